//! Topic areas for the labyrinth map view.
//!
//! An area claims a lesson when the lesson's category is one of the area's
//! categories, or when any of its keywords occurs in the lesson's title,
//! description or tags. Areas overlap freely.

use crate::{
    error::{Result, WonderlandError},
    types::LessonRecord,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaDefinition {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub color: &'static str,
    /// Map coordinates.
    pub position: (u16, u16),
    pub keywords: &'static [&'static str],
    pub categories: &'static [&'static str],
}

pub static AREAS: [AreaDefinition; 5] = [
    AreaDefinition {
        id: "inner-awareness",
        label: "Inner Awareness",
        description: "Discover your inner squirrels and understand the different aspects of consciousness",
        color: "#8B5CF6",
        position: (150, 120),
        keywords: &["consciousness", "self-discovery", "inner", "awareness", "squirrels"],
        categories: &["Foundation"],
    },
    AreaDefinition {
        id: "transformation-path",
        label: "Transformation Path",
        description: "Navigate through personal transformation and growth",
        color: "#06B6D4",
        position: (320, 180),
        keywords: &["transformation", "growth", "change", "nlp", "mindset"],
        categories: &["Transformation"],
    },
    AreaDefinition {
        id: "healing-gardens",
        label: "Healing Gardens",
        description: "Release emotional blocks and experience deep healing",
        color: "#10B981",
        position: (480, 140),
        keywords: &["healing", "emotional-release", "hypnosis", "subconscious"],
        categories: &["Healing"],
    },
    AreaDefinition {
        id: "labyrinth-center",
        label: "Sacred Center",
        description: "The heart of the labyrinth where all paths converge",
        color: "#F59E0B",
        position: (320, 280),
        keywords: &["meditation", "inner-journey", "breakthrough", "big7"],
        categories: &["Foundation", "Transformation", "Healing"],
    },
    AreaDefinition {
        id: "wisdom-grove",
        label: "Wisdom Grove",
        description: "Ancient wisdom and advanced practices for deep transformation",
        color: "#EF4444",
        position: (220, 340),
        keywords: &["advanced", "wisdom", "breakthrough", "mental-emotional"],
        categories: &["Healing", "Transformation"],
    },
];

pub fn find_area(id: &str) -> Result<&'static AreaDefinition> {
    AREAS
        .iter()
        .find(|area| area.id == id)
        .ok_or_else(|| WonderlandError::UnknownArea { id: id.to_string() })
}

fn searchable_text(lesson: &LessonRecord) -> String {
    let mut text = format!("{} {}", lesson.title, lesson.description);
    for tag in &lesson.tags {
        text.push(' ');
        text.push_str(tag);
    }
    text.to_lowercase()
}

impl AreaDefinition {
    pub fn matches(&self, lesson: &LessonRecord) -> bool {
        if self.categories.contains(&lesson.category.as_str()) {
            return true;
        }
        let mut keywords = self.keywords.iter().filter(|k| !k.trim().is_empty()).peekable();
        if keywords.peek().is_none() {
            return false;
        }
        let text = searchable_text(lesson);
        keywords.any(|keyword| text.contains(&keyword.to_lowercase()))
    }
}

pub fn lessons_for_area<'a>(area: &AreaDefinition, lessons: &'a [LessonRecord]) -> Vec<&'a LessonRecord> {
    let matched: Vec<&LessonRecord> = lessons.iter().filter(|lesson| area.matches(lesson)).collect();
    if matched.is_empty() {
        tracing::warn!(area = area.id, "no lessons found for area");
    }
    matched
}

pub fn area_counts<'a>(
    areas: &'a [AreaDefinition],
    lessons: &[LessonRecord],
) -> Vec<(&'a AreaDefinition, usize)> {
    areas
        .iter()
        .map(|area| (area, lessons.iter().filter(|lesson| area.matches(lesson)).count()))
        .collect()
}

/// Distinct categories in first-seen order.
pub fn distinct_categories(lessons: &[LessonRecord]) -> Vec<&str> {
    let mut categories: Vec<&str> = Vec::new();
    for lesson in lessons {
        if !categories.contains(&lesson.category.as_str()) {
            categories.push(&lesson.category);
        }
    }
    categories
}
