use std::{collections::BTreeSet, fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WonderlandError;

pub type LessonId = u32;
pub type UserId = u32;
pub type SessionId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }
}

impl FromStr for Level {
    type Err = WonderlandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "beginner" => Ok(Level::Beginner),
            "intermediate" => Ok(Level::Intermediate),
            "advanced" => Ok(Level::Advanced),
            _ => Err(WonderlandError::InvalidFilterValue {
                key: "level",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Individual,
    Group,
    Workshop,
}

impl SessionType {
    pub const ALL: [SessionType; 3] = [
        SessionType::Individual,
        SessionType::Group,
        SessionType::Workshop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::Individual => "individual",
            SessionType::Group => "group",
            SessionType::Workshop => "workshop",
        }
    }
}

impl FromStr for SessionType {
    type Err = WonderlandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "individual" => Ok(SessionType::Individual),
            "group" => Ok(SessionType::Group),
            "workshop" => Ok(SessionType::Workshop),
            _ => Err(WonderlandError::InvalidFilterValue {
                key: "type",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonContent {
    #[serde(default)]
    pub exercises: Vec<String>,
    #[serde(default)]
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonRecord {
    #[serde(rename = "Id")]
    pub id: LessonId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub level: Level,
    /// Minutes.
    pub duration: u32,
    pub price: f64,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<LessonContent>,
}

impl LessonRecord {
    pub fn exercises(&self) -> &[String] {
        self.content
            .as_ref()
            .map(|c| c.exercises.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachingSessionRecord {
    #[serde(rename = "Id")]
    pub id: SessionId,
    pub title: String,
    #[serde(rename = "type")]
    pub session_type: SessionType,
    pub schedule: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    pub max_participants: u32,
    #[serde(default)]
    pub current_participants: u32,
    pub price: f64,
    /// Minutes.
    pub duration: u32,
    #[serde(alias = "marcoPoloLink")]
    pub join_link: String,
}

impl CoachingSessionRecord {
    /// Upcoming is strictly after `now`; a session starting exactly now is past.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.schedule > now
    }

    pub fn spots_left(&self) -> u32 {
        self.max_participants
            .saturating_sub(self.current_participants)
    }

    pub fn is_full(&self) -> bool {
        self.spots_left() == 0
    }
}

/// Completion percentage, always within [0, 100].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "i64", into = "u8")]
pub struct Completion(u8);

impl Completion {
    pub const DONE: Completion = Completion(100);

    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn status(self) -> ProgressStatus {
        match self.0 {
            0 => ProgressStatus::NotStarted,
            100 => ProgressStatus::Completed,
            _ => ProgressStatus::InProgress,
        }
    }
}

impl From<i64> for Completion {
    fn from(value: i64) -> Self {
        Completion::clamped(value)
    }
}

impl From<Completion> for u8 {
    fn from(value: Completion) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl ProgressStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ProgressStatus::NotStarted => "Not Started",
            ProgressStatus::InProgress => "In Progress",
            ProgressStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Bookmarked playback offsets in seconds, unique, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<u32>", into = "Vec<u32>")]
pub struct Bookmarks(Vec<u32>);

impl Bookmarks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the offset was already bookmarked.
    pub fn insert(&mut self, offset: u32) -> bool {
        if self.0.contains(&offset) {
            return false;
        }
        self.0.push(offset);
        true
    }

    pub fn contains(&self, offset: u32) -> bool {
        self.0.contains(&offset)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// The last `n` bookmarks added, newest first.
    pub fn recent(&self, n: usize) -> Vec<u32> {
        self.0.iter().rev().take(n).copied().collect()
    }
}

impl From<Vec<u32>> for Bookmarks {
    fn from(offsets: Vec<u32>) -> Self {
        let mut bookmarks = Bookmarks::new();
        for offset in offsets {
            bookmarks.insert(offset);
        }
        bookmarks
    }
}

impl From<Bookmarks> for Vec<u32> {
    fn from(bookmarks: Bookmarks) -> Self {
        bookmarks.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub user_id: UserId,
    pub lesson_id: LessonId,
    pub completion_percentage: Completion,
    pub last_accessed: DateTime<Utc>,
    #[serde(default)]
    pub bookmarks: Bookmarks,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl ProgressRecord {
    pub fn new(user_id: UserId, lesson_id: LessonId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            lesson_id,
            completion_percentage: Completion::default(),
            last_accessed: now,
            bookmarks: Bookmarks::new(),
            completed_at: None,
        }
    }

    pub fn status(&self) -> ProgressStatus {
        self.completion_percentage.status()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCounters {
    /// Minutes.
    #[serde(default)]
    pub total_watch_time: u32,
    /// Days.
    #[serde(default)]
    pub current_streak: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(rename = "Id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub purchased_lessons: BTreeSet<LessonId>,
    #[serde(default)]
    pub achievements: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<UserCounters>,
}

impl UserRecord {
    pub fn has_purchased(&self, lesson_id: LessonId) -> bool {
        self.purchased_lessons.contains(&lesson_id)
    }

    pub fn total_watch_time(&self) -> u32 {
        self.progress.map(|p| p.total_watch_time).unwrap_or(0)
    }

    pub fn current_streak(&self) -> u32 {
        self.progress.map(|p| p.current_streak).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WisdomQuote {
    #[serde(rename = "Id")]
    pub id: u32,
    pub text: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}
