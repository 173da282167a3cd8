use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::{
    error::{Result, WonderlandError},
    types::{CoachingSessionRecord, LessonRecord, Level, SessionType},
};

/// Sentinel used by every non-text criterion: `All` disables it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    pub fn is_active(&self) -> bool {
        matches!(self, Selection::Only(_))
    }

    pub fn admits(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(Selection::All)
        } else {
            s.parse().map(Selection::Only)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LessonCriteria {
    query: String,
    /// Lower-cased `query`; `None` when the query is blank.
    needle: Option<String>,
    pub category: Selection<String>,
    pub level: Selection<Level>,
}

impl LessonCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.set_query(query.into());
        self
    }

    /// Whitespace-only queries disable the text filter.
    fn set_query(&mut self, query: String) {
        self.needle = if query.trim().is_empty() {
            None
        } else {
            Some(query.to_lowercase())
        };
        self.query = query;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Selection::Only(category.into());
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Selection::Only(level);
        self
    }

    /// Set a criterion by name, as received from a query string or CLI flag.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "query" | "q" => self.set_query(value.to_string()),
            "category" => {
                self.category = match value.parse::<Selection<String>>() {
                    Ok(selection) => selection,
                    Err(never) => match never {},
                }
            }
            "level" => self.level = value.parse()?,
            _ => {
                return Err(WonderlandError::UnknownFilterKey {
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn matches(&self, lesson: &LessonRecord) -> bool {
        self.category.admits(&lesson.category)
            && self.level.admits(&lesson.level)
            && self
                .needle
                .as_deref()
                .is_none_or(|q| lesson_contains_text(lesson, q))
    }
}

/// `query` must already be lower-cased.
fn lesson_contains_text(lesson: &LessonRecord, query: &str) -> bool {
    lesson.title.to_lowercase().contains(query)
        || lesson.description.to_lowercase().contains(query)
        || lesson.category.to_lowercase().contains(query)
        || lesson
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(query))
}

pub fn filter_lessons<'a>(
    lessons: &'a [LessonRecord],
    criteria: &LessonCriteria,
) -> Vec<&'a LessonRecord> {
    let filtered: Vec<&LessonRecord> = lessons
        .iter()
        .filter(|lesson| criteria.matches(lesson))
        .collect();

    tracing::debug!(
        total = lessons.len(),
        matched = filtered.len(),
        "filtered lessons"
    );
    filtered
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeWindow {
    #[default]
    All,
    Upcoming,
    Past,
}

impl TimeWindow {
    pub fn admits(&self, session: &CoachingSessionRecord, now: DateTime<Utc>) -> bool {
        match self {
            TimeWindow::All => true,
            TimeWindow::Upcoming => session.is_upcoming(now),
            TimeWindow::Past => !session.is_upcoming(now),
        }
    }
}

impl FromStr for TimeWindow {
    type Err = WonderlandError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(TimeWindow::All),
            "upcoming" => Ok(TimeWindow::Upcoming),
            "past" => Ok(TimeWindow::Past),
            _ => Err(WonderlandError::InvalidFilterValue {
                key: "window",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionCriteria {
    pub session_type: Selection<SessionType>,
    pub window: TimeWindow,
}

impl SessionCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, session_type: SessionType) -> Self {
        self.session_type = Selection::Only(session_type);
        self
    }

    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "type" => self.session_type = value.parse()?,
            "window" => self.window = value.parse()?,
            _ => {
                return Err(WonderlandError::UnknownFilterKey {
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }
}

pub fn filter_sessions<'a>(
    sessions: &'a [CoachingSessionRecord],
    criteria: &SessionCriteria,
    now: DateTime<Utc>,
) -> Vec<&'a CoachingSessionRecord> {
    sessions
        .iter()
        .filter(|session| criteria.session_type.admits(&session.session_type))
        .filter(|session| criteria.window.admits(session, now))
        .collect()
}

/// Split a `key=value` pair as given on the command line.
pub fn parse_assignment(raw: &str) -> Result<(&str, &str)> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .ok_or_else(|| WonderlandError::UnknownFilterKey {
            key: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn lesson(id: u32, title: &str, category: &str, level: Level, tags: &[&str]) -> LessonRecord {
        LessonRecord {
            id,
            title: title.to_string(),
            description: format!("About {}", title.to_lowercase()),
            category: category.to_string(),
            level,
            duration: 30,
            price: 10.0,
            featured: false,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            instructor: "Alice".to_string(),
            thumbnail: String::new(),
            content: None,
        }
    }

    fn catalog() -> Vec<LessonRecord> {
        vec![
            lesson(1, "Meet Your Squirrels", "Foundation", Level::Beginner, &["inner"]),
            lesson(2, "Emotional Release", "Healing", Level::Intermediate, &["hypnosis"]),
            lesson(3, "NLP Basics", "Transformation", Level::Beginner, &["mindset"]),
            lesson(4, "Deep Trance", "Healing", Level::Advanced, &["subconscious"]),
            lesson(5, "Morning Focus", "Foundation", Level::Advanced, &["Meditation"]),
        ]
    }

    fn ids(lessons: &[&LessonRecord]) -> Vec<u32> {
        lessons.iter().map(|l| l.id).collect()
    }

    #[test]
    fn no_active_criteria_returns_everything() {
        let lessons = catalog();
        let result = filter_lessons(&lessons, &LessonCriteria::new().with_query("   "));
        assert_eq!(ids(&result), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn category_is_exact_match() {
        let lessons = catalog();
        let result = filter_lessons(&lessons, &LessonCriteria::new().with_category("Healing"));
        assert_eq!(ids(&result), vec![2, 4]);

        let partial = filter_lessons(&lessons, &LessonCriteria::new().with_category("Heal"));
        assert!(partial.is_empty());
    }

    #[test]
    fn query_matches_any_field_case_insensitively() {
        let lessons = catalog();
        let by_tag = filter_lessons(&lessons, &LessonCriteria::new().with_query("MEDITATION"));
        assert_eq!(ids(&by_tag), vec![5]);

        let by_category = filter_lessons(&lessons, &LessonCriteria::new().with_query("transf"));
        assert_eq!(ids(&by_category), vec![3]);

        let by_description = filter_lessons(&lessons, &LessonCriteria::new().with_query("about deep"));
        assert_eq!(ids(&by_description), vec![4]);
    }

    #[test]
    fn criteria_combine_with_and() {
        let lessons = catalog();
        let criteria = LessonCriteria::new()
            .with_category("Foundation")
            .with_level(Level::Advanced);
        assert_eq!(ids(&filter_lessons(&lessons, &criteria)), vec![5]);
    }

    #[test]
    fn filtering_is_idempotent_and_a_subset() {
        let lessons = catalog();
        let criteria = LessonCriteria::new().with_query("e").with_level(Level::Beginner);
        let once: Vec<LessonRecord> = filter_lessons(&lessons, &criteria)
            .into_iter()
            .cloned()
            .collect();
        let twice = filter_lessons(&once, &criteria);
        assert_eq!(ids(&twice), once.iter().map(|l| l.id).collect::<Vec<_>>());
        assert!(once.iter().all(|l| lessons.iter().any(|o| o.id == l.id)));
        assert!(once.iter().all(|l| criteria.matches(l)));
    }

    #[test]
    fn query_is_normalized_once_when_set() {
        let mut criteria = LessonCriteria::new();
        criteria.set("q", "  ").unwrap();
        assert_eq!(criteria.query(), "  ");
        assert_eq!(criteria.needle, None);

        criteria.set("query", "Trance ").unwrap();
        assert_eq!(criteria.needle.as_deref(), Some("trance "));
        let lessons = catalog();
        assert!(!criteria.matches(&lessons[3]));
        criteria.set("query", "TRANCE").unwrap();
        assert!(criteria.matches(&lessons[3]));
    }

    #[test]
    fn set_rejects_unknown_keys_and_values() {
        let mut criteria = LessonCriteria::new();
        criteria.set("category", "all").unwrap();
        assert_eq!(criteria.category, Selection::All);
        criteria.set("level", "Advanced").unwrap();
        assert_eq!(criteria.level, Selection::Only(Level::Advanced));

        assert!(matches!(
            criteria.set("color", "red"),
            Err(WonderlandError::UnknownFilterKey { .. })
        ));
        assert!(matches!(
            criteria.set("level", "guru"),
            Err(WonderlandError::InvalidFilterValue { .. })
        ));
    }

    fn session(id: u32, session_type: SessionType, schedule: DateTime<Utc>) -> CoachingSessionRecord {
        CoachingSessionRecord {
            id,
            title: format!("Session {id}"),
            session_type,
            schedule,
            description: String::new(),
            max_participants: 10,
            current_participants: 2,
            price: 50.0,
            duration: 60,
            join_link: format!("https://example.com/{id}"),
        }
    }

    #[test]
    fn sessions_filter_by_type_and_window() {
        let now = Utc::now();
        let sessions = vec![
            session(1, SessionType::Group, now - Duration::days(1)),
            session(2, SessionType::Group, now + Duration::days(1)),
            session(3, SessionType::Individual, now + Duration::days(2)),
            session(4, SessionType::Workshop, now),
        ];

        let upcoming_groups = SessionCriteria::new()
            .with_type(SessionType::Group)
            .with_window(TimeWindow::Upcoming);
        let result = filter_sessions(&sessions, &upcoming_groups, now);
        assert_eq!(result.iter().map(|s| s.id).collect::<Vec<_>>(), vec![2]);

        let past = SessionCriteria::new().with_window(TimeWindow::Past);
        let result = filter_sessions(&sessions, &past, now);
        assert_eq!(result.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 4]);
    }

    #[test]
    fn session_criteria_set_by_name() {
        let mut criteria = SessionCriteria::new();
        criteria.set("type", "workshop").unwrap();
        criteria.set("window", "past").unwrap();
        assert_eq!(criteria.session_type, Selection::Only(SessionType::Workshop));
        assert_eq!(criteria.window, TimeWindow::Past);
        assert!(criteria.set("level", "Beginner").is_err());
    }

    #[test]
    fn parse_assignment_splits_on_first_equals() {
        assert_eq!(parse_assignment("query=a=b").unwrap(), ("query", "a=b"));
        assert!(parse_assignment("query").is_err());
    }
}
