//! Flat-file record store: one pretty-printed JSON document per domain.

use crate::errors::AppError;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Entries,
    Habits,
    Lists,
    Tasks,
    TimeTracker,
    Mindful,
}

impl Domain {
    pub const ALL: [Domain; 6] = [
        Domain::Entries,
        Domain::Habits,
        Domain::Lists,
        Domain::Tasks,
        Domain::TimeTracker,
        Domain::Mindful,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Domain::Entries => "entries.json",
            Domain::Habits => "habitData.json",
            Domain::Lists => "lists.json",
            Domain::Tasks => "dailyTasks.json",
            Domain::TimeTracker => "timetracker.json",
            Domain::Mindful => "mindfulData.json",
        }
    }

    /// Value written for a domain file that does not exist yet.
    pub fn skeleton(self) -> Value {
        match self {
            Domain::Entries | Domain::Habits | Domain::Lists => json!([]),
            Domain::Tasks | Domain::TimeTracker => json!({}),
            Domain::Mindful => json!({ "gratitudeHistory": [], "customAffirmations": [] }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, domain: Domain) -> PathBuf {
        self.root.join(domain.file_name())
    }

    /// Creates the data directory and seeds every missing domain file.
    pub async fn ensure_files(&self) -> Result<(), std::io::Error> {
        fs::create_dir_all(&self.root).await?;
        for domain in Domain::ALL {
            let path = self.path(domain);
            if fs::try_exists(&path).await? {
                continue;
            }
            let payload = serde_json::to_vec_pretty(&domain.skeleton())
                .map_err(std::io::Error::other)?;
            fs::write(&path, payload).await?;
            info!("created {}", path.display());
        }
        Ok(())
    }

    /// Raw document, falling back to the skeleton on any failure.
    pub async fn read_value(&self, domain: Domain) -> Value {
        match self.load(domain).await {
            Ok(Some(value)) => value,
            Ok(None) => domain.skeleton(),
            Err(message) => {
                error!("{message}");
                domain.skeleton()
            }
        }
    }

    /// Typed read for GET paths. Never fails; problems are logged.
    pub async fn read<T>(&self, domain: Domain) -> T
    where
        T: DeserializeOwned + Default,
    {
        match self.load(domain).await {
            Ok(Some(value)) => serde_json::from_value(value).unwrap_or_else(|err| {
                error!("unexpected shape in {}: {err}", domain.file_name());
                T::default()
            }),
            Ok(None) => T::default(),
            Err(message) => {
                error!("{message}");
                T::default()
            }
        }
    }

    /// Typed read for read-modify-write paths. A missing file is the
    /// default; an unreadable one is an error so it is never overwritten.
    pub async fn read_for_update<T>(&self, domain: Domain) -> Result<T, AppError>
    where
        T: DeserializeOwned + Default,
    {
        match self.load(domain).await {
            Ok(Some(value)) => serde_json::from_value(value).map_err(|err| {
                let message = format!("unexpected shape in {}: {err}", domain.file_name());
                error!("{message}");
                AppError::internal_message(message)
            }),
            Ok(None) => Ok(T::default()),
            Err(message) => {
                error!("{message}");
                Err(AppError::internal_message(message))
            }
        }
    }

    pub async fn write<T>(&self, domain: Domain, data: &T) -> Result<(), AppError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.path(domain);
        let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
        fs::write(&path, payload).await.map_err(|err| {
            error!("failed to write {}: {err}", path.display());
            AppError::internal(err)
        })?;
        Ok(())
    }

    /// `Ok(None)` when the file is missing or blank.
    async fn load(&self, domain: Domain) -> Result<Option<Value>, String> {
        let path = self.path(domain);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!("{} missing, using default", path.display());
                return Ok(None);
            }
            Err(err) => return Err(format!("failed to read {}: {err}", path.display())),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|err| format!("failed to parse {}: {err}", path.display()))
    }
}
