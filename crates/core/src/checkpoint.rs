// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSONL checkpoint for the mirrored ticket set.
//!
//! One ticket per line. The checkpoint is the only state that survives
//! between runs, so saves go through a sibling temp file with fsync and an
//! atomic rename: a crash mid-save leaves the previous checkpoint intact.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::ticket::Ticket;

/// Durable store for the full mirrored ticket set.
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    /// Creates a store backed by the given file. The file is not touched
    /// until the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CheckpointStore { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the full ticket set.
    ///
    /// A missing file means no tickets have been mirrored yet and yields an
    /// empty set. Skips empty lines.
    pub fn load(&self) -> Result<Vec<Ticket>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut tickets = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let ticket: Ticket = serde_json::from_str(&line)?;
            tickets.push(ticket);
        }

        Ok(tickets)
    }

    /// Saves the full ticket set, replacing any previous checkpoint.
    pub fn save(&self, tickets: &[Ticket]) -> Result<()> {
        let tmp = self.path.with_extension("jsonl.tmp");
        let mut file = File::create(&tmp)?;

        for ticket in tickets {
            let json = serde_json::to_string(ticket)?;
            writeln!(file, "{json}")?;
        }
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "checkpoint_tests.rs"]
mod tests;
