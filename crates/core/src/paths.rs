use std::path::{Path, PathBuf};

/// Default fixture directory when none is configured
pub fn get_default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("wonderland")
}

pub fn get_lessons_path(data_dir: &Path) -> PathBuf {
    data_dir.join("lessons.json")
}

pub fn get_sessions_path(data_dir: &Path) -> PathBuf {
    data_dir.join("coaching.json")
}

pub fn get_progress_path(data_dir: &Path) -> PathBuf {
    data_dir.join("progress.json")
}

pub fn get_users_path(data_dir: &Path) -> PathBuf {
    data_dir.join("users.json")
}

/// Optional: a missing file means no quotes
pub fn get_wisdom_path(data_dir: &Path) -> PathBuf {
    data_dir.join("wisdom.json")
}
