//! Wonderland Core Library
//!
//! Lesson catalog derivations (filtering, sorting, progress aggregation,
//! topic-area matching) over collections loaded from fixtures or a hosted
//! backend.

pub mod aggregate;
pub mod areas;
pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod format;
pub mod hosted;
pub mod paths;
pub mod sessions;
pub mod sort;
pub mod source;
pub mod store;
pub mod types;
pub mod wisdom;

// Re-export commonly used items at crate root
pub use aggregate::{ProgressSummary, summarize, total_spent};
pub use areas::{AREAS, AreaDefinition, area_counts, find_area, lessons_for_area};
pub use config::{Backend, HostedConfig, resolve_data_dir};
pub use context::SessionContext;
pub use error::{Result, WonderlandError};
pub use filter::{LessonCriteria, Selection, SessionCriteria, TimeWindow, filter_lessons, filter_sessions};
pub use format::{format_lesson_line, format_minutes, format_session_line, format_summary_readable, format_timestamp};
pub use hosted::HostedSource;
pub use sessions::{SessionPartition, partition_sessions};
pub use sort::{SortMode, select_comparator, sort_lessons};
pub use source::{AnySource, CatalogSource, FixtureSource};
pub use store::{Catalog, MemoryStore};
pub use types::{
    Bookmarks, CoachingSessionRecord, Completion, LessonRecord, Level, ProgressRecord,
    ProgressStatus, SessionType, UserRecord, WisdomQuote,
};
