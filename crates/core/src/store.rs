use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    context::SessionContext,
    error::{Result, WonderlandError},
    filter::{LessonCriteria, filter_lessons},
    sessions::partition_sessions,
    types::{
        CoachingSessionRecord, Completion, LessonId, LessonRecord, ProgressRecord, SessionId,
        SessionType, UserId, UserRecord, WisdomQuote,
    },
    wisdom::daily_quote,
};

pub const RELATED_LESSONS_LIMIT: usize = 3;

/// Every collection the app works with, fully materialized.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub lessons: Vec<LessonRecord>,
    pub sessions: Vec<CoachingSessionRecord>,
    pub progress: Vec<ProgressRecord>,
    pub users: Vec<UserRecord>,
    pub wisdom: Vec<WisdomQuote>,
}

/// In-memory service layer over a loaded [`Catalog`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    catalog: Catalog,
}

impl MemoryStore {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }

    pub fn lesson(&self, id: LessonId) -> Result<&LessonRecord> {
        self.catalog
            .lessons
            .iter()
            .find(|lesson| lesson.id == id)
            .ok_or(WonderlandError::NotFound {
                entity: "Lesson",
                id,
            })
    }

    pub fn lessons_by_category(&self, category: &str) -> Vec<&LessonRecord> {
        filter_lessons(
            &self.catalog.lessons,
            &LessonCriteria::new().with_category(category),
        )
    }

    pub fn featured_lessons(&self) -> Vec<&LessonRecord> {
        self.catalog
            .lessons
            .iter()
            .filter(|lesson| lesson.featured)
            .collect()
    }

    pub fn search_lessons(&self, query: &str) -> Vec<&LessonRecord> {
        filter_lessons(&self.catalog.lessons, &LessonCriteria::new().with_query(query))
    }

    /// Other lessons in the same category, at most `limit`.
    pub fn related_lessons(&self, id: LessonId, limit: usize) -> Result<Vec<&LessonRecord>> {
        let lesson = self.lesson(id)?;
        Ok(self
            .lessons_by_category(&lesson.category)
            .into_iter()
            .filter(|related| related.id != id)
            .take(limit)
            .collect())
    }

    pub fn session(&self, id: SessionId) -> Result<&CoachingSessionRecord> {
        self.catalog
            .sessions
            .iter()
            .find(|session| session.id == id)
            .ok_or(WonderlandError::NotFound {
                entity: "Coaching session",
                id,
            })
    }

    pub fn sessions_by_type(&self, session_type: SessionType) -> Vec<&CoachingSessionRecord> {
        self.catalog
            .sessions
            .iter()
            .filter(|session| session.session_type == session_type)
            .collect()
    }

    pub fn upcoming_sessions(&self, now: DateTime<Utc>) -> Vec<&CoachingSessionRecord> {
        partition_sessions(&self.catalog.sessions, now).upcoming
    }

    pub fn user(&self, id: UserId) -> Result<&UserRecord> {
        self.catalog
            .users
            .iter()
            .find(|user| user.id == id)
            .ok_or(WonderlandError::NotFound { entity: "User", id })
    }

    fn user_mut(&mut self, id: UserId) -> Result<&mut UserRecord> {
        self.catalog
            .users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or(WonderlandError::NotFound { entity: "User", id })
    }

    /// Build a context for `user_id`, or for the first user when none is given.
    pub fn context_for(&self, user_id: Option<UserId>, now: DateTime<Utc>) -> Result<SessionContext> {
        let user = match user_id {
            Some(id) => self.user(id)?,
            None => self
                .catalog
                .users
                .first()
                .ok_or(WonderlandError::NotFound { entity: "User", id: 0 })?,
        };
        Ok(SessionContext::at(user.clone(), now))
    }

    pub fn user_progress(&self, user_id: UserId) -> Vec<ProgressRecord> {
        self.catalog
            .progress
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn lesson_progress(&self, user_id: UserId, lesson_id: LessonId) -> Option<&ProgressRecord> {
        self.catalog
            .progress
            .iter()
            .find(|p| p.user_id == user_id && p.lesson_id == lesson_id)
    }

    fn lesson_progress_index(&self, user_id: UserId, lesson_id: LessonId) -> Option<usize> {
        self.catalog
            .progress
            .iter()
            .position(|p| p.user_id == user_id && p.lesson_id == lesson_id)
    }

    pub fn daily_quote(&self, date: NaiveDate) -> Option<&WisdomQuote> {
        daily_quote(&self.catalog.wisdom, date)
    }

    /// Returns false when the lesson was already owned. The context is
    /// refreshed with the updated user record.
    pub fn purchase_lesson(&mut self, ctx: &mut SessionContext, lesson_id: LessonId) -> Result<bool> {
        self.lesson(lesson_id)?;
        let user = self.user_mut(ctx.user_id())?;
        let added = user.purchased_lessons.insert(lesson_id);
        ctx.user = user.clone();

        if added {
            tracing::info!(user_id = ctx.user_id(), lesson_id, "lesson purchased");
        }
        Ok(added)
    }

    /// Record playback progress, creating the record on first interaction.
    pub fn update_progress(
        &mut self,
        ctx: &SessionContext,
        lesson_id: LessonId,
        completion: i64,
    ) -> Result<&ProgressRecord> {
        let user_id = ctx.user_id();
        if !self.user(user_id)?.has_purchased(lesson_id) {
            return Err(WonderlandError::NotPurchased { user_id, lesson_id });
        }

        let index = match self.lesson_progress_index(user_id, lesson_id) {
            Some(index) => index,
            None => {
                self.catalog
                    .progress
                    .push(ProgressRecord::new(user_id, lesson_id, ctx.now));
                self.catalog.progress.len() - 1
            }
        };

        let record = &mut self.catalog.progress[index];
        record.completion_percentage = Completion::clamped(completion);
        record.last_accessed = ctx.now;
        if record.completion_percentage == Completion::DONE && record.completed_at.is_none() {
            record.completed_at = Some(ctx.now);
        }

        tracing::debug!(
            user_id,
            lesson_id,
            completion = record.completion_percentage.value(),
            "progress updated"
        );
        Ok(&*record)
    }

    /// `None` when the user has no progress record for the lesson yet. The
    /// flag is false when the offset was already bookmarked.
    pub fn add_bookmark(
        &mut self,
        ctx: &SessionContext,
        lesson_id: LessonId,
        offset: u32,
    ) -> Option<(&ProgressRecord, bool)> {
        let index = self.lesson_progress_index(ctx.user_id(), lesson_id)?;
        let record = &mut self.catalog.progress[index];
        let added = record.bookmarks.insert(offset);
        Some((&*record, added))
    }

    pub fn add_achievement(&mut self, user_id: UserId, tag: &str) -> Result<&UserRecord> {
        let user = self.user_mut(user_id)?;
        user.achievements.insert(tag.to_string());
        Ok(&*user)
    }

    pub fn update_profile(
        &mut self,
        user_id: UserId,
        name: Option<String>,
        email: Option<String>,
    ) -> Result<&UserRecord> {
        let user = self.user_mut(user_id)?;
        if let Some(name) = name {
            user.name = name;
        }
        if let Some(email) = email {
            user.email = email;
        }
        Ok(&*user)
    }
}
