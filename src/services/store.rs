use crate::error::{ExportError, Result};
use crate::rules::RulesTable;
use crate::services::fetch::parse_rules;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Default key the rules table is persisted under.
pub const DEFAULT_RULES_CACHE_KEY: &str = "epack_serial_rules_v1";

/// Persistent storage for the last good rules table.
pub trait RulesCache {
    /// The stored table. Corrupt entries are reported as `RulesFormat`/`Json`.
    fn get(&self) -> Result<Option<RulesTable>>;
    fn set(&self, table: &RulesTable) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Platform data directory for this tool.
pub fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("io", "epack", "epack-export")
        .ok_or_else(|| ExportError::storage_error("initialization", "could not resolve data dir"))
}

/// Rules cache stored as `<key>.json` on the local filesystem.
pub struct LocalFsCache {
    path: PathBuf,
}

impl LocalFsCache {
    /// Cache under the platform data directory.
    pub fn new(key: &str) -> Result<Self> {
        let root = project_dirs()?.data_local_dir().join("cache");
        Ok(Self::at(root, key))
    }

    /// Cache under an explicit directory.
    pub fn at(root: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: root.as_ref().join(format!("{key}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RulesCache for LocalFsCache {
    fn get(&self) -> Result<Option<RulesTable>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let body = fs::read_to_string(&self.path)?;
        parse_rules(&body).map(Some)
    }

    fn set(&self, table: &RulesTable) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(table)?;
        fs::write(&self.path, body)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// In-process cache, nothing persisted.
#[derive(Default)]
pub struct MemoryCache {
    slot: Mutex<Option<RulesTable>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(table: RulesTable) -> Self {
        Self {
            slot: Mutex::new(Some(table)),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<RulesTable>>> {
        self.slot
            .lock()
            .map_err(|_| ExportError::storage_error("lock", "memory cache poisoned"))
    }
}

impl RulesCache for MemoryCache {
    fn get(&self) -> Result<Option<RulesTable>> {
        Ok(self.lock()?.clone())
    }

    fn set(&self, table: &RulesTable) -> Result<()> {
        *self.lock()? = Some(table.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.lock()? = None;
        Ok(())
    }
}
