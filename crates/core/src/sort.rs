use std::{cmp::Ordering, fmt, str::FromStr, sync::LazyLock};

use icu_collator::{Collator, CollatorBorrowed, options::CollatorOptions};

use crate::{
    error::{Result, WonderlandError},
    types::LessonRecord,
};

pub type LessonComparator = fn(&LessonRecord, &LessonRecord) -> Ordering;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    #[default]
    Featured,
    Title,
    PriceLow,
    PriceHigh,
    DurationShort,
    DurationLong,
}

impl SortMode {
    pub const ALL: [SortMode; 6] = [
        SortMode::Featured,
        SortMode::Title,
        SortMode::PriceLow,
        SortMode::PriceHigh,
        SortMode::DurationShort,
        SortMode::DurationLong,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Featured => "featured",
            SortMode::Title => "title",
            SortMode::PriceLow => "price-low",
            SortMode::PriceHigh => "price-high",
            SortMode::DurationShort => "duration-short",
            SortMode::DurationLong => "duration-long",
        }
    }

    pub fn comparator(self) -> LessonComparator {
        match self {
            SortMode::Featured => featured_first,
            SortMode::Title => by_title,
            SortMode::PriceLow => by_price,
            SortMode::PriceHigh => |a, b| by_price(b, a),
            SortMode::DurationShort => by_duration,
            SortMode::DurationLong => |a, b| by_duration(b, a),
        }
    }
}

impl FromStr for SortMode {
    type Err = WonderlandError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "featured" | "featured-first" => Ok(SortMode::Featured),
            "title" | "title-ascending" => Ok(SortMode::Title),
            "price-low" | "price-ascending" => Ok(SortMode::PriceLow),
            "price-high" | "price-descending" => Ok(SortMode::PriceHigh),
            "duration-short" | "duration-ascending" => Ok(SortMode::DurationShort),
            "duration-long" | "duration-descending" => Ok(SortMode::DurationLong),
            _ => Err(WonderlandError::UnknownSortMode {
                mode: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a sort-mode identifier to its comparator.
pub fn select_comparator(mode: &str) -> Result<LessonComparator> {
    mode.parse::<SortMode>().map(SortMode::comparator)
}

fn featured_first(a: &LessonRecord, b: &LessonRecord) -> Ordering {
    b.featured.cmp(&a.featured)
}

fn by_price(a: &LessonRecord, b: &LessonRecord) -> Ordering {
    a.price.total_cmp(&b.price)
}

fn by_duration(a: &LessonRecord, b: &LessonRecord) -> Ordering {
    a.duration.cmp(&b.duration)
}

/// Root-locale collator shared by every title sort.
static TITLE_COLLATOR: LazyLock<Option<CollatorBorrowed<'static>>> = LazyLock::new(|| {
    Collator::try_new(Default::default(), CollatorOptions::default())
        .inspect_err(|e| tracing::warn!(error = %e, "title collator unavailable"))
        .ok()
});

fn by_title(a: &LessonRecord, b: &LessonRecord) -> Ordering {
    match TITLE_COLLATOR.as_ref() {
        Some(collator) => collator.compare(&a.title, &b.title),
        None => a.title.cmp(&b.title),
    }
}

/// Stable: lessons with equal keys keep their input order.
pub fn sort_lessons(lessons: &mut [&LessonRecord], mode: SortMode) {
    let cmp = mode.comparator();
    lessons.sort_by(|a, b| cmp(*a, *b));
}
