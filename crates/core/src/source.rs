use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use tokio::fs;

use crate::{
    config::{Backend, HostedConfig},
    error::Result,
    hosted::HostedSource,
    paths::{
        get_lessons_path, get_progress_path, get_sessions_path, get_users_path, get_wisdom_path,
    },
    store::Catalog,
};

/// Where raw collections come from. Everything downstream works on the
/// materialized [`Catalog`].
pub trait CatalogSource {
    async fn load(&self) -> Result<Catalog>;
    async fn save(&self, catalog: &Catalog) -> Result<()>;
}

/// A directory of JSON fixture files.
#[derive(Clone, Debug)]
pub struct FixtureSource {
    data_dir: PathBuf,
}

impl FixtureSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json_content = fs::read_to_string(path).await?;
    let value: T = serde_json::from_str(&json_content)?;
    Ok(value)
}

async fn save_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let pretty_json = serde_json::to_string_pretty(value)?;
    fs::write(path, &pretty_json).await?;
    Ok(())
}

impl CatalogSource for FixtureSource {
    async fn load(&self) -> Result<Catalog> {
        let dir = self.data_dir.as_path();
        let wisdom_path = get_wisdom_path(dir);
        let wisdom = if fs::try_exists(&wisdom_path).await? {
            load_json(&wisdom_path).await?
        } else {
            Vec::new()
        };

        let catalog = Catalog {
            lessons: load_json(&get_lessons_path(dir)).await?,
            sessions: load_json(&get_sessions_path(dir)).await?,
            progress: load_json(&get_progress_path(dir)).await?,
            users: load_json(&get_users_path(dir)).await?,
            wisdom,
        };

        tracing::info!(
            dir = %dir.display(),
            lessons = catalog.lessons.len(),
            sessions = catalog.sessions.len(),
            users = catalog.users.len(),
            "loaded fixtures"
        );
        Ok(catalog)
    }

    async fn save(&self, catalog: &Catalog) -> Result<()> {
        let dir = self.data_dir.as_path();
        fs::create_dir_all(dir).await?;

        save_json(&catalog.lessons, &get_lessons_path(dir)).await?;
        save_json(&catalog.sessions, &get_sessions_path(dir)).await?;
        save_json(&catalog.progress, &get_progress_path(dir)).await?;
        save_json(&catalog.users, &get_users_path(dir)).await?;
        save_json(&catalog.wisdom, &get_wisdom_path(dir)).await?;

        tracing::info!(dir = %dir.display(), "saved fixtures");
        Ok(())
    }
}

/// The adapter selected at startup.
pub enum AnySource {
    Fixtures(FixtureSource),
    Hosted(HostedSource),
}

impl AnySource {
    pub fn from_backend(backend: Backend, data_dir: PathBuf) -> Result<Self> {
        match backend {
            Backend::Fixtures => Ok(AnySource::Fixtures(FixtureSource::new(data_dir))),
            Backend::Hosted => Ok(AnySource::Hosted(HostedSource::new(HostedConfig::from_env()?))),
        }
    }

    pub fn backend(&self) -> Backend {
        match self {
            AnySource::Fixtures(_) => Backend::Fixtures,
            AnySource::Hosted(_) => Backend::Hosted,
        }
    }
}

impl CatalogSource for AnySource {
    async fn load(&self) -> Result<Catalog> {
        match self {
            AnySource::Fixtures(source) => source.load().await,
            AnySource::Hosted(source) => source.load().await,
        }
    }

    async fn save(&self, catalog: &Catalog) -> Result<()> {
        match self {
            AnySource::Fixtures(source) => source.save(catalog).await,
            AnySource::Hosted(source) => source.save(catalog).await,
        }
    }
}
