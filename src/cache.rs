use crate::error::CacheError;
use crate::model::Catalog;
use crate::sources::Source;
use directories::ProjectDirs;
use log::{debug, info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// A cache file older than this is rebuilt before use.
pub const MAX_AGE: Duration = Duration::from_secs(60 * 60);

pub fn default_cache_path() -> PathBuf {
    ProjectDirs::from("org", "gell", "gell")
        .map(|dirs| dirs.cache_dir().join("apps.json"))
        .unwrap_or_else(|| PathBuf::from("apps.json"))
}

/// Persists the catalog produced by `S` and serves it while fresh.
pub struct CatalogCache<S: Source> {
    path: PathBuf,
    source: S,
}

impl<S: Source> CatalogCache<S> {
    pub fn new(path: PathBuf, source: S) -> Self {
        Self { path, source }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entry point for the UI: optionally drops the cache, then loads.
    pub fn load(&self, force_refresh: bool) -> Catalog {
        if force_refresh {
            if let Err(e) = self.invalidate() {
                warn!("Could not remove cache {:?}: {}", self.path, e);
            }
        }
        self.get()
    }

    pub fn get(&self) -> Catalog {
        self.get_at(SystemTime::now())
    }

    fn get_at(&self, now: SystemTime) -> Catalog {
        match self.read_fresh(now) {
            Ok(Some(catalog)) => {
                debug!("Serving {} entries from {:?}", catalog.len(), self.path);
                return catalog;
            }
            Ok(None) => debug!("Cache {:?} missing or stale", self.path),
            Err(e) => debug!("Ignoring unreadable cache {:?}: {}", self.path, e),
        }

        let catalog = match self.source.scan() {
            Ok(catalog) => catalog,
            Err(e) => {
                // Not cached, so the next start scans again
                warn!("Catalog scan failed: {}", e);
                return Catalog::default();
            }
        };

        match self.write(&catalog) {
            Ok(()) => info!("Cached {} entries at {:?}", catalog.len(), self.path),
            Err(e) => warn!("Could not write cache {:?}: {}", self.path, e),
        }
        catalog
    }

    /// Removes the cache file; an absent file is not an error.
    pub fn invalidate(&self) -> Result<(), CacheError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn read_fresh(&self, now: SystemTime) -> Result<Option<Catalog>, CacheError> {
        let modified = match fs::metadata(&self.path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        // An mtime in the future counts as brand new
        let age = now.duration_since(modified).unwrap_or_default();
        if age >= MAX_AGE {
            return Ok(None);
        }

        let content = fs::read(&self.path)?;
        Ok(Some(serde_json::from_slice(&content)?))
    }

    fn write(&self, catalog: &Catalog) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec(catalog)?)?;
        Ok(())
    }
}
