use chrono::{Datelike, NaiveDate};

use crate::types::WisdomQuote;

/// Quote of the day: rotates through the collection by day of year.
pub fn daily_quote(quotes: &[WisdomQuote], date: NaiveDate) -> Option<&WisdomQuote> {
    if quotes.is_empty() {
        return None;
    }
    let index = date.ordinal() as usize % quotes.len();
    quotes.get(index)
}

pub fn quote_by_id(quotes: &[WisdomQuote], id: u32) -> Option<&WisdomQuote> {
    quotes.iter().find(|quote| quote.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quotes() -> Vec<WisdomQuote> {
        (1..=3)
            .map(|id| WisdomQuote {
                id,
                text: format!("Quote {id}"),
                author: "Anonymous".to_string(),
                theme: None,
            })
            .collect()
    }

    #[test]
    fn rotates_by_ordinal_day() {
        let quotes = quotes();
        let jan_1 = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let jan_3 = NaiveDate::from_ymd_opt(2026, 1, 3).unwrap();
        assert_eq!(daily_quote(&quotes, jan_1).map(|q| q.id), Some(2));
        assert_eq!(daily_quote(&quotes, jan_3).map(|q| q.id), Some(1));
    }

    #[test]
    fn empty_collection_has_no_quote() {
        let date = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        assert!(daily_quote(&[], date).is_none());
        assert_eq!(quote_by_id(&quotes(), 3).map(|q| q.text.as_str()), Some("Quote 3"));
    }
}
