// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Author resolution cache.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use mira_core::Author;

use crate::sync::source::{SourceError, SourceTracker};

/// Per-run cache of author lookups.
///
/// A project's tickets are reported and commented by the same handful of
/// people over and over; one lookup per username per run is plenty.
#[derive(Debug, Default)]
pub struct AuthorCache {
    authors: HashMap<String, Author>,
}

impl AuthorCache {
    pub fn new() -> Self {
        AuthorCache::default()
    }

    /// Resolve `username`, hitting the source tracker only on first sight.
    ///
    /// Failed lookups are not cached; the next resolve tries again.
    pub fn resolve<'a, S: SourceTracker>(
        &'a mut self,
        source: &mut S,
        username: &str,
    ) -> Result<&'a Author, SourceError> {
        match self.authors.entry(username.to_string()) {
            Entry::Occupied(hit) => Ok(hit.into_mut()),
            Entry::Vacant(miss) => {
                let author = source.lookup_user(username)?;
                Ok(miss.insert(author))
            }
        }
    }
}

#[cfg(test)]
#[path = "authors_tests.rs"]
mod tests;
