use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,           // Source path, e.g. "/usr/share/applications/firefox.desktop"
    pub name: String,         // Display name, unique within a catalog
    pub command: String,      // Exec line as declared, field codes included
    pub icon: Option<String>, // Icon name/path
    pub terminal: bool,
}

impl Entry {
    pub fn new(id: String, name: String, command: String, terminal: bool) -> Self {
        Self {
            id,
            name,
            command,
            icon: None,
            terminal,
        }
    }
}

/// Deduplicated application list, ordered by case-insensitive name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<Entry>,
}

impl Catalog {
    /// Wraps an already sorted and deduplicated list.
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
