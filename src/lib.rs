//! Application catalog, cache and fuzzy search behind the `gell` launcher.
//!
//! `.desktop` files are scanned by [`sources::desktop::DesktopSource`],
//! persisted by [`cache::CatalogCache`] for an hour, ranked per keystroke by
//! [`matcher`] and started through [`executor::launch`].

pub mod cache;
pub mod config;
pub mod error;
pub mod executor;
pub mod matcher;
pub mod model;
pub mod sources;
pub mod state;
