use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use super::domain::{ProfileEntry, ProfileId, ProfileRecord};

/// Lookup abstraction over the profile-storage subsystem.
pub trait ProfileDirectory: Send + Sync {
    fn fetch(&self, id: &ProfileId) -> Result<Option<ProfileRecord>, DirectoryError>;
    fn upsert(&self, id: ProfileId, record: ProfileRecord) -> Result<(), DirectoryError>;
    fn len(&self) -> Result<usize, DirectoryError>;

    fn is_empty(&self) -> Result<bool, DirectoryError> {
        Ok(self.len()? == 0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("profile {0} not found")]
    UnknownProfile(ProfileId),
    #[error("could not load profiles from {source_name}: {reason}")]
    InvalidSeed { source_name: String, reason: String },
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryProfileDirectory {
    records: Arc<RwLock<HashMap<ProfileId, ProfileRecord>>>,
}

impl InMemoryProfileDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: impl IntoIterator<Item = ProfileEntry>) -> Self {
        let records: HashMap<ProfileId, ProfileRecord> = entries
            .into_iter()
            .map(|entry| (entry.id, entry.profile))
            .collect();
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }
}

impl ProfileDirectory for InMemoryProfileDirectory {
    fn fetch(&self, id: &ProfileId) -> Result<Option<ProfileRecord>, DirectoryError> {
        let guard = self
            .records
            .read()
            .map_err(|_| DirectoryError::Unavailable("profile lock poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }

    fn upsert(&self, id: ProfileId, record: ProfileRecord) -> Result<(), DirectoryError> {
        let mut guard = self
            .records
            .write()
            .map_err(|_| DirectoryError::Unavailable("profile lock poisoned".to_string()))?;
        guard.insert(id, record);
        Ok(())
    }

    fn len(&self) -> Result<usize, DirectoryError> {
        let guard = self
            .records
            .read()
            .map_err(|_| DirectoryError::Unavailable("profile lock poisoned".to_string()))?;
        Ok(guard.len())
    }
}

/// Seed a directory from a JSON array of `{ "id": .., "profile": {..} }` entries.
pub fn load_profiles_from_path<D, P>(directory: &D, path: P) -> Result<usize, DirectoryError>
where
    D: ProfileDirectory + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let source_name = path.display().to_string();
    let file = File::open(path).map_err(|err| DirectoryError::InvalidSeed {
        source_name: source_name.clone(),
        reason: err.to_string(),
    })?;
    load_profiles_from_reader(directory, BufReader::new(file), &source_name)
}

pub fn load_profiles_from_reader<D, R>(
    directory: &D,
    reader: R,
    source_name: &str,
) -> Result<usize, DirectoryError>
where
    D: ProfileDirectory + ?Sized,
    R: Read,
{
    let entries: Vec<ProfileEntry> =
        serde_json::from_reader(reader).map_err(|err| DirectoryError::InvalidSeed {
            source_name: source_name.to_string(),
            reason: err.to_string(),
        })?;

    let mut loaded = 0;
    for entry in entries {
        if entry.id.0.trim().is_empty() {
            warn!(source = source_name, "skipping profile with blank id");
            continue;
        }
        directory.upsert(entry.id, entry.profile)?;
        loaded += 1;
    }

    info!(source = source_name, loaded, "profile directory seeded");
    Ok(loaded)
}
