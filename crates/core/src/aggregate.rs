use serde::Serialize;

use crate::types::{LessonId, LessonRecord, ProgressRecord, ProgressStatus, UserRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub total_purchased: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
    /// Mean completion across all records, rounded.
    pub overall_percentage: u8,
    /// Share of records that are completed, rounded.
    pub completion_rate: u8,
    /// Minutes, taken from the user's counters.
    pub total_watch_time: u32,
    pub current_streak: u32,
    pub achievements: Vec<String>,
}

/// Integer division rounded half-up. `den` must be non-zero.
fn round_div(num: u64, den: u64) -> u64 {
    (2 * num + den) / (2 * den)
}

pub fn overall_percentage(progress: &[ProgressRecord]) -> u8 {
    if progress.is_empty() {
        return 0;
    }
    let total: u64 = progress
        .iter()
        .map(|p| u64::from(p.completion_percentage.value()))
        .sum();
    round_div(total, progress.len() as u64) as u8
}

pub fn completion_rate(progress: &[ProgressRecord]) -> u8 {
    if progress.is_empty() {
        return 0;
    }
    let completed = count_status(progress, ProgressStatus::Completed) as u64;
    round_div(completed * 100, progress.len() as u64) as u8
}

fn count_status(progress: &[ProgressRecord], status: ProgressStatus) -> usize {
    progress.iter().filter(|p| p.status() == status).count()
}

/// Summarize one user's progress records. Counters come from the user record.
pub fn summarize(progress: &[ProgressRecord], user: &UserRecord) -> ProgressSummary {
    let summary = ProgressSummary {
        total_purchased: user.purchased_lessons.len(),
        completed: count_status(progress, ProgressStatus::Completed),
        in_progress: count_status(progress, ProgressStatus::InProgress),
        not_started: count_status(progress, ProgressStatus::NotStarted),
        overall_percentage: overall_percentage(progress),
        completion_rate: completion_rate(progress),
        total_watch_time: user.total_watch_time(),
        current_streak: user.current_streak(),
        achievements: user.achievements.iter().cloned().collect(),
    };

    tracing::debug!(
        user_id = user.id,
        records = progress.len(),
        overall = summary.overall_percentage,
        "summarized progress"
    );
    summary
}

pub fn purchased_lessons<'a>(lessons: &'a [LessonRecord], user: &UserRecord) -> Vec<&'a LessonRecord> {
    lessons
        .iter()
        .filter(|lesson| user.has_purchased(lesson.id))
        .collect()
}

pub fn total_spent(lessons: &[LessonRecord], user: &UserRecord) -> f64 {
    purchased_lessons(lessons, user)
        .iter()
        .map(|lesson| lesson.price)
        .sum()
}

pub fn progress_for_lesson(progress: &[ProgressRecord], lesson_id: LessonId) -> Option<&ProgressRecord> {
    progress.iter().find(|p| p.lesson_id == lesson_id)
}

pub struct AchievementInfo {
    pub title: &'static str,
    pub description: &'static str,
}

pub fn achievement_info(tag: &str) -> AchievementInfo {
    let (title, description) = match tag {
        "first-lesson" => ("First Lesson", "Completed your first lesson"),
        "week-streak" => ("Week Streak", "Maintained a 7-day learning streak"),
        "lesson-completed" => ("Lesson Master", "Completed a lesson"),
        "early-bird" => ("Early Bird", "Joined the Wonderland community early"),
        _ => ("Achievement", "Special recognition"),
    };
    AchievementInfo { title, description }
}
