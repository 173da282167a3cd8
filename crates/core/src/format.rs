use crate::{
    aggregate::{ProgressSummary, achievement_info},
    types::{CoachingSessionRecord, LessonRecord},
};

/// Format a bookmark offset in seconds as M:SS
pub fn format_timestamp(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Format minutes as "1h 5m" or "45m"
pub fn format_minutes(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

pub fn format_lesson_line(lesson: &LessonRecord) -> String {
    let star = if lesson.featured { "★ " } else { "" };
    format!(
        "{}#{} {} [{} | {} | {} | {}]",
        star,
        lesson.id,
        lesson.title,
        lesson.category,
        lesson.level,
        format_minutes(lesson.duration),
        format_price(lesson.price)
    )
}

pub fn format_session_line(session: &CoachingSessionRecord) -> String {
    format!(
        "#{} {} ({}) {} · {} · {} spots left",
        session.id,
        session.title,
        session.session_type,
        session.schedule.format("%Y-%m-%d %H:%M UTC"),
        format_minutes(session.duration),
        session.spots_left()
    )
}

/// Format a progress summary as human-readable markdown
pub fn format_summary_readable(summary: &ProgressSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "**Overall:** {}% | **Completed:** {} | **In progress:** {} | **Not started:** {}\n\n",
        summary.overall_percentage, summary.completed, summary.in_progress, summary.not_started
    ));
    output.push_str(&format!(
        "**Purchased:** {} | **Completion rate:** {}% | **Watch time:** {} | **Streak:** {} days\n\n",
        summary.total_purchased,
        summary.completion_rate,
        format_minutes(summary.total_watch_time),
        summary.current_streak
    ));

    if !summary.achievements.is_empty() {
        output.push_str("## Achievements\n\n");
        for tag in &summary.achievements {
            let info = achievement_info(tag);
            output.push_str(&format!("• {}: {}\n", info.title, info.description));
        }
        output.push('\n');
    }

    output
}
