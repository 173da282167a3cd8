//! Adapter for the hosted record backend.
//!
//! Records are read with `POST {base}/tables/{table}/records/query` and
//! written with `POST {base}/tables/{table}/records/update`. Every response
//! is wrapped in a `{success, data, message}` envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    config::HostedConfig,
    error::{Result, WonderlandError},
    source::CatalogSource,
    store::Catalog,
    types::{Bookmarks, Completion, LessonId, ProgressRecord, UserId},
};

const LESSON_TABLE: &str = "lesson";
const SESSION_TABLE: &str = "coaching_session";
const PROGRESS_TABLE: &str = "progress";
const USER_TABLE: &str = "user_profile";
const WISDOM_TABLE: &str = "wisdom_quote";

const LESSON_FIELDS: &[&str] = &[
    "Id",
    "title",
    "description",
    "category",
    "level",
    "duration",
    "price",
    "featured",
    "tags",
    "instructor",
    "thumbnail",
    "content",
];
const SESSION_FIELDS: &[&str] = &[
    "Id",
    "title",
    "type",
    "schedule",
    "description",
    "maxParticipants",
    "currentParticipants",
    "price",
    "duration",
    "joinLink",
];
const PROGRESS_FIELDS: &[&str] = &[
    "userId",
    "lessonId",
    "completionPercentage",
    "lastAccessed",
    "bookmarks",
    "completedAt",
];
const USER_FIELDS: &[&str] = &[
    "Id",
    "name",
    "email",
    "purchasedLessons",
    "achievements",
    "progress",
];
const WISDOM_FIELDS: &[&str] = &["Id", "text", "author", "theme"];

#[derive(Deserialize)]
struct Envelope<T> {
    success: bool,
    #[serde(default = "Vec::new")]
    data: Vec<T>,
    #[serde(default)]
    message: Option<String>,
}

/// Progress as stored remotely: bookmarks are a comma-delimited string.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgressRow {
    user_id: UserId,
    lesson_id: LessonId,
    completion_percentage: Completion,
    last_accessed: DateTime<Utc>,
    #[serde(default)]
    bookmarks: String,
    #[serde(default)]
    completed_at: Option<DateTime<Utc>>,
}

impl TryFrom<ProgressRow> for ProgressRecord {
    type Error = WonderlandError;

    fn try_from(row: ProgressRow) -> Result<Self> {
        Ok(ProgressRecord {
            user_id: row.user_id,
            lesson_id: row.lesson_id,
            completion_percentage: row.completion_percentage,
            last_accessed: row.last_accessed,
            bookmarks: bookmarks_from_delimited(&row.bookmarks)?,
            completed_at: row.completed_at,
        })
    }
}

impl From<&ProgressRecord> for ProgressRow {
    fn from(record: &ProgressRecord) -> Self {
        ProgressRow {
            user_id: record.user_id,
            lesson_id: record.lesson_id,
            completion_percentage: record.completion_percentage,
            last_accessed: record.last_accessed,
            bookmarks: bookmarks_to_delimited(&record.bookmarks),
            completed_at: record.completed_at,
        }
    }
}

pub fn bookmarks_to_delimited(bookmarks: &Bookmarks) -> String {
    bookmarks
        .as_slice()
        .iter()
        .map(|offset| offset.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn bookmarks_from_delimited(raw: &str) -> Result<Bookmarks> {
    if raw.trim().is_empty() {
        return Ok(Bookmarks::new());
    }
    raw.split(',')
        .map(|part| part.trim().parse::<u32>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map(Bookmarks::from)
        .map_err(|_| WonderlandError::MalformedBookmarks {
            raw: raw.to_string(),
        })
}

/// Built once at startup and shared by reference.
#[derive(Clone, Debug)]
pub struct HostedSource {
    client: reqwest::Client,
    config: HostedConfig,
}

impl HostedSource {
    pub fn new(config: HostedConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn table_url(&self, table: &str, action: &str) -> String {
        format!(
            "{}/tables/{}/records/{}",
            self.config.base_url.trim_end_matches('/'),
            table,
            action
        )
    }

    async fn post<T: DeserializeOwned>(
        &self,
        table: &str,
        action: &str,
        body: serde_json::Value,
    ) -> Result<Vec<T>> {
        let response = self
            .client
            .post(self.table_url(table, action))
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<Envelope<T>>()
            .await?;

        if !response.success {
            return Err(WonderlandError::BackendFailed {
                table: table.to_string(),
                reason: response
                    .message
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        }
        Ok(response.data)
    }

    async fn query<T: DeserializeOwned>(&self, table: &str, fields: &[&str]) -> Result<Vec<T>> {
        let records = self
            .post(table, "query", serde_json::json!({ "fields": fields }))
            .await?;
        tracing::debug!(table, count = records.len(), "queried hosted table");
        Ok(records)
    }

    async fn update<T: Serialize>(&self, table: &str, records: &[T]) -> Result<()> {
        self.post::<serde_json::Value>(table, "update", serde_json::json!({ "records": records }))
            .await?;
        Ok(())
    }
}

impl CatalogSource for HostedSource {
    async fn load(&self) -> Result<Catalog> {
        let progress = self
            .query::<ProgressRow>(PROGRESS_TABLE, PROGRESS_FIELDS)
            .await?
            .into_iter()
            .map(ProgressRecord::try_from)
            .collect::<Result<Vec<_>>>()?;

        let catalog = Catalog {
            lessons: self.query(LESSON_TABLE, LESSON_FIELDS).await?,
            sessions: self.query(SESSION_TABLE, SESSION_FIELDS).await?,
            progress,
            users: self.query(USER_TABLE, USER_FIELDS).await?,
            wisdom: self.query(WISDOM_TABLE, WISDOM_FIELDS).await?,
        };

        tracing::info!(
            base_url = %self.config.base_url,
            lessons = catalog.lessons.len(),
            "loaded hosted catalog"
        );
        Ok(catalog)
    }

    /// Only progress and users change on the client side.
    async fn save(&self, catalog: &Catalog) -> Result<()> {
        let rows: Vec<ProgressRow> = catalog.progress.iter().map(ProgressRow::from).collect();
        self.update(PROGRESS_TABLE, &rows).await?;
        self.update(USER_TABLE, &catalog.users).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimited_bookmarks_round_trip() {
        let bookmarks = bookmarks_from_delimited(" 120, 45,120 ,300").unwrap();
        assert_eq!(bookmarks.as_slice(), &[120, 45, 300]);
        assert_eq!(bookmarks_to_delimited(&bookmarks), "120,45,300");
        assert!(bookmarks_from_delimited("").unwrap().is_empty());
    }

    #[test]
    fn malformed_bookmarks_are_rejected() {
        assert!(matches!(
            bookmarks_from_delimited("12,abc"),
            Err(WonderlandError::MalformedBookmarks { .. })
        ));
    }

    #[test]
    fn progress_row_converts_at_the_boundary() {
        let json = r#"{
            "userId": 1,
            "lessonId": 4,
            "completionPercentage": 65,
            "lastAccessed": "2026-03-02T09:30:00Z",
            "bookmarks": "30,95"
        }"#;
        let row: ProgressRow = serde_json::from_str(json).unwrap();
        let record = ProgressRecord::try_from(row).unwrap();
        assert_eq!(record.bookmarks.as_slice(), &[30, 95]);
        assert_eq!(record.completion_percentage.value(), 65);

        let back = serde_json::to_value(ProgressRow::from(&record)).unwrap();
        assert_eq!(back["bookmarks"], "30,95");
    }

    #[test]
    fn failed_envelope_carries_message() {
        let envelope: Envelope<serde_json::Value> =
            serde_json::from_str(r#"{"success": false, "message": "table locked"}"#).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_empty());
        assert_eq!(envelope.message.as_deref(), Some("table locked"));
    }

    #[test]
    fn table_urls_ignore_trailing_slash() {
        let source = HostedSource::new(HostedConfig {
            base_url: "https://api.example.com/v1/".to_string(),
            api_key: "secret".to_string(),
        });
        assert_eq!(
            source.table_url(LESSON_TABLE, "query"),
            "https://api.example.com/v1/tables/lesson/records/query"
        );
    }
}
