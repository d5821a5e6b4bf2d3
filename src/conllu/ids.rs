//! Sentence identifier bookkeeping.
use std::collections::HashSet;

use log::warn;

/// Hands out sentence ids, renaming duplicates.
#[derive(Debug, Default)]
pub struct UniqueIds {
    seen: HashSet<String>,
}

impl UniqueIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id`, returning it unchanged if unseen.
    ///
    /// A duplicate gets the first free `-<n>` suffix (starting at 2).
    pub fn claim(&mut self, id: String) -> String {
        if self.seen.insert(id.clone()) {
            return id;
        }

        let mut n = 2;
        let renamed = loop {
            let candidate = format!("{}-{}", id, n);
            if !self.seen.contains(&candidate) {
                break candidate;
            }
            n += 1;
        };
        warn!("duplicate sentence id {:?}, renamed to {:?}", id, renamed);
        self.seen.insert(renamed.clone());
        renamed
    }
}
