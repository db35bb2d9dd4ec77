use crate::error::ParseError;
use crate::model::{Catalog, Entry};
use crate::sources::Source;
use crate::sources::desktop_file::DesktopFile;
use anyhow::Result;
use directories::BaseDirs;
use log::{debug, info};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const SECTION: &str = "Desktop Entry";

/// Scans `.desktop` files across directories given in priority order.
pub struct DesktopSource {
    dirs: Vec<PathBuf>,
}

impl DesktopSource {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// User applications first, then the system locations.
    pub fn default_dirs() -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        if let Some(base_dirs) = BaseDirs::new() {
            dirs.push(base_dirs.data_dir().join("applications"));
        }
        dirs.push(PathBuf::from("/usr/share/applications"));
        dirs.push(PathBuf::from("/usr/local/share/applications"));
        dirs
    }
}

impl Default for DesktopSource {
    fn default() -> Self {
        Self::new(Self::default_dirs())
    }
}

impl Source for DesktopSource {
    fn scan(&self) -> Result<Catalog> {
        let mut entries = Vec::new();
        let mut seen = HashSet::new();

        for dir in &self.dirs {
            if !dir.is_dir() {
                debug!("Skipping missing directory {:?}", dir);
                continue;
            }

            debug!("Scanning desktop files in {:?}", dir);
            let mut found = 0;
            let walker = WalkDir::new(dir)
                .min_depth(1)
                .max_depth(1)
                .follow_links(true)
                .sort_by_file_name();
            for item in walker.into_iter().filter_map(|e| e.ok()) {
                let path = item.path();
                if path.extension().and_then(|s| s.to_str()) != Some("desktop") {
                    continue;
                }
                let Some(entry) = parse_entry(path) else {
                    continue;
                };
                if seen.insert(entry.name.to_lowercase()) {
                    entries.push(entry);
                    found += 1;
                } else {
                    debug!("Dropping duplicate {:?} from {:?}", entry.name, path);
                }
            }
            debug!("{:?}: {} entries", dir, found);
        }

        entries.sort_by_cached_key(|e| e.name.to_lowercase());
        info!("DesktopSource: found {} entries", entries.len());
        Ok(Catalog::new(entries))
    }
}

/// Reads one descriptor; `None` when it is unreadable, malformed, hidden or incomplete.
pub fn parse_entry(path: &Path) -> Option<Entry> {
    let content = fs::read_to_string(path)
        .inspect_err(|e| debug!("Cannot read {:?}: {}", path, e))
        .ok()?;
    parse_desktop_file(&path.to_string_lossy(), &content)
        .inspect_err(|e| debug!("Skipping {:?}: {}", path, e))
        .ok()
        .flatten()
}

fn parse_desktop_file(id: &str, content: &str) -> Result<Option<Entry>, ParseError> {
    let file = DesktopFile::parse(content)?;
    if !file.has_section(SECTION) {
        return Err(ParseError::MissingSection(SECTION.to_string()));
    }

    if file.get_bool(SECTION, "NoDisplay", false)? || file.get_bool(SECTION, "Hidden", false)? {
        return Ok(None);
    }

    let name = file.get(SECTION, "Name").unwrap_or_default();
    let exec = file.get(SECTION, "Exec").unwrap_or_default();
    let terminal = file.get_bool(SECTION, "Terminal", false)?;
    if name.is_empty() || exec.is_empty() {
        return Ok(None);
    }

    let mut entry = Entry::new(id.to_string(), name.to_string(), exec.to_string(), terminal);
    entry.icon = file
        .get(SECTION, "Icon")
        .filter(|icon| !icon.is_empty())
        .map(str::to_string);
    Ok(Some(entry))
}
