use thiserror::Error;

use crate::types::{LessonId, UserId};

#[derive(Error, Debug)]
pub enum WonderlandError {
    #[error("Unknown sort mode: {mode}")]
    UnknownSortMode { mode: String },

    #[error("Unknown filter key: {key}")]
    UnknownFilterKey { key: String },

    #[error("Invalid value {value:?} for filter {key}")]
    InvalidFilterValue { key: &'static str, value: String },

    #[error("Unknown area: {id}")]
    UnknownArea { id: String },

    #[error("Missing configuration: {env_var} environment variable is not set")]
    MissingConfig { env_var: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u32 },

    #[error("Lesson {lesson_id} has not been purchased by user {user_id}")]
    NotPurchased { user_id: UserId, lesson_id: LessonId },

    #[error("Malformed bookmark list {raw:?}")]
    MalformedBookmarks { raw: String },

    #[error("Backend request to {table} failed: {reason}")]
    BackendFailed { table: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, WonderlandError>;
