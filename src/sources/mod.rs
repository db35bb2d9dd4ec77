use crate::model::Catalog;
use anyhow::Result;

/// Produces a fresh catalog; the cache calls this on every miss.
pub trait Source {
    fn scan(&self) -> Result<Catalog>;
}

pub mod desktop;
pub mod desktop_file;
