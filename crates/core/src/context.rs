use chrono::{DateTime, Utc};

use crate::types::{LessonId, UserId, UserRecord};

/// The signed-in user and the clock every user-scoped call is evaluated against.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub user: UserRecord,
    pub now: DateTime<Utc>,
}

impl SessionContext {
    pub fn new(user: UserRecord) -> Self {
        Self::at(user, Utc::now())
    }

    pub fn at(user: UserRecord, now: DateTime<Utc>) -> Self {
        Self { user, now }
    }

    pub fn user_id(&self) -> UserId {
        self.user.id
    }

    pub fn owns(&self, lesson_id: LessonId) -> bool {
        self.user.has_purchased(lesson_id)
    }
}
