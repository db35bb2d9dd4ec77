//! Substring-first fuzzy scoring of entry names.
//!
//! A query that occurs contiguously in the name always scores
//! `BASE_SUBSTRING_SCORE - offset`. Otherwise the query must be a subsequence
//! of the name, and every consumed character earns
//! `BASE_CHAR_SCORE + run * CONSECUTIVE_MULTIPLIER` where `run` is the length
//! of the current unbroken streak. For a query of `n` characters the fuzzy
//! score is bounded by `10n + 5n(n+1)/2`, far below the substring base.

use crate::model::{Catalog, Entry};

pub const BASE_SUBSTRING_SCORE: i64 = 100_000;
pub const BASE_CHAR_SCORE: i64 = 10;
pub const CONSECUTIVE_MULTIPLIER: i64 = 5;

/// Scores `text` against `query`, case-insensitively. Non-matches are `(false, 0)`.
pub fn fuzzy_match(query: &str, text: &str) -> (bool, i64) {
    if query.is_empty() {
        return (true, 0);
    }

    let query = query.to_lowercase();
    let text = text.to_lowercase();

    if let Some(byte_idx) = text.find(&query) {
        let offset = text[..byte_idx].chars().count() as i64;
        return (true, BASE_SUBSTRING_SCORE - offset);
    }

    let needle: Vec<char> = query.chars().collect();
    let mut consumed = 0;
    let mut consecutive = 0;
    let mut score = 0;
    for c in text.chars() {
        if consumed < needle.len() && c == needle[consumed] {
            consumed += 1;
            consecutive += 1;
            score += BASE_CHAR_SCORE + consecutive * CONSECUTIVE_MULTIPLIER;
        } else {
            consecutive = 0;
        }
    }

    if consumed == needle.len() {
        (true, score)
    } else {
        (false, 0)
    }
}

/// Indices of matching entries with their scores, best first.
/// Equal scores keep input order.
pub fn rank_indices(query: &str, entries: &[Entry]) -> Vec<(usize, i64)> {
    let mut ranked: Vec<(usize, i64)> = entries
        .iter()
        .enumerate()
        .filter_map(|(idx, entry)| match fuzzy_match(query, &entry.name) {
            (true, score) => Some((idx, score)),
            (false, _) => None,
        })
        .collect();
    // Stable: ties stay in catalog order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

pub fn rank<'a>(query: &str, entries: &'a [Entry]) -> Vec<(&'a Entry, i64)> {
    rank_indices(query, entries)
        .into_iter()
        .map(|(idx, score)| (&entries[idx], score))
        .collect()
}

pub fn search<'a>(query: &str, catalog: &'a Catalog) -> Vec<&'a Entry> {
    rank(query, catalog.entries())
        .into_iter()
        .map(|(entry, _)| entry)
        .collect()
}
