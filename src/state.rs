use crate::config::Config;
use crate::matcher;
use crate::model::{Catalog, Entry};
use log::warn;
use regex::Regex;

/// Query session over an owned catalog: ranked results, filters and cursor.
pub struct AppState {
    pub config: Config,
    pub catalog: Catalog,
    pub filtered_indices: Vec<usize>,
    pub selected_index: usize,
    pub query: String,
    blacklist: Vec<Regex>,
}

impl AppState {
    pub fn new(config: Config, catalog: Catalog) -> Self {
        // Prepare regexes once
        let blacklist = config
            .filter
            .blacklist
            .iter()
            .flatten()
            .filter_map(|pattern| {
                Regex::new(pattern)
                    .inspect_err(|e| warn!("Ignoring blacklist pattern {:?}: {}", pattern, e))
                    .ok()
            })
            .collect();

        let mut state = Self {
            config,
            catalog,
            filtered_indices: Vec::new(),
            selected_index: 0,
            query: String::new(),
            blacklist,
        };
        state.update_filter();
        state
    }

    pub fn update_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.update_filter();
    }

    fn update_filter(&mut self) {
        let entries = self.catalog.entries();
        self.filtered_indices = matcher::rank_indices(&self.query, entries)
            .into_iter()
            .map(|(idx, _)| idx)
            .filter(|&idx| self.is_allowed(&entries[idx]))
            .collect();

        log::info!("AppState: query='{}', filtered_count={}", self.query, self.filtered_indices.len());
        self.selected_index = 0;
    }

    fn is_allowed(&self, e: &Entry) -> bool {
        // Whitelist check
        if let Some(whitelist) = &self.config.filter.whitelist {
            if !whitelist.iter().any(|w| e.name.contains(w) || e.id.contains(w)) {
                return false;
            }
        }

        // Blacklist check
        !self.blacklist.iter().any(|re| re.is_match(&e.name) || re.is_match(&e.id))
    }

    /// Results up to the display cap.
    pub fn visible(&self) -> impl Iterator<Item = &Entry> {
        self.filtered_indices
            .iter()
            .take(self.config.general.max_results)
            .map(|&idx| &self.catalog.entries()[idx])
    }

    pub fn match_count(&self) -> usize {
        self.filtered_indices.len()
    }

    pub fn move_selection(&mut self, delta: i32) {
        let len = self.filtered_indices.len().min(self.config.general.max_results);
        if len == 0 {
            self.selected_index = 0;
            return;
        }

        let new_index = (self.selected_index as i64 + delta as i64).rem_euclid(len as i64);
        self.selected_index = new_index as usize;
    }

    pub fn get_selected(&self) -> Option<&Entry> {
        self.visible().nth(self.selected_index)
    }
}
