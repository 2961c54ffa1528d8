// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Batch mirror driver.
//!
//! Walks the source project page by page, renders each ticket, hands it to
//! the reconciliation engine, and checkpoints the full ticket set after
//! every outcome that changed something. Interrupting a run is safe: the
//! next one re-walks from the first page and unchanged tickets cost nothing.

use std::time::{Duration, Instant};

use mira_core::{CheckpointStore, Comment, Ticket};

use crate::config::Config;
use crate::error::Result;
use crate::render;
use crate::sync::authors::AuthorCache;
use crate::sync::dest::DestTracker;
use crate::sync::engine::{ReconcileEngine, Reconciliation};
use crate::sync::source::{SourceIssue, SourceTracker};

/// What one mirror run saw and did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Tickets fetched from the source.
    pub fetched: usize,
    /// Tickets mirrored for the first time.
    pub created: usize,
    /// Tickets whose mirror was brought up to date.
    pub updated: usize,
    /// Tickets that needed nothing.
    pub unchanged: usize,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

/// One full mirror pass over the source project.
pub struct Driver<S, D> {
    source: S,
    engine: ReconcileEngine<D>,
    store: CheckpointStore,
    authors: AuthorCache,
    config: Config,
}

impl<S: SourceTracker, D: DestTracker> Driver<S, D> {
    pub fn new(source: S, dest: D, store: CheckpointStore, config: Config) -> Self {
        Driver {
            source,
            engine: ReconcileEngine::new(dest),
            store,
            authors: AuthorCache::new(),
            config,
        }
    }

    /// Mirror every ticket in the source project, oldest first.
    pub fn run(&mut self) -> Result<RunReport> {
        let started = Instant::now();
        let mut tickets = self.store.load()?;
        tracing::info!("found {} local tickets", tickets.len());

        let mut report = RunReport {
            fetched: 0,
            created: 0,
            updated: 0,
            unchanged: 0,
            elapsed: Duration::ZERO,
        };

        let mut offset = 0;
        loop {
            tracing::info!("fetching tickets starting at {}", offset);
            let batch = self.source.query_batch(offset)?;
            for issue in batch.issues {
                tracing::info!("fetching {}: {}", issue.key, issue.title);
                let incoming = self.assemble(issue)?;
                let outcome = self.engine.reconcile(&mut tickets, incoming)?;
                report.fetched += 1;
                match &outcome {
                    Reconciliation::Created { issue, comments } => {
                        report.created += 1;
                        tracing::info!("created issue #{} with {} comments", issue, comments);
                    }
                    Reconciliation::Updated {
                        issue,
                        added,
                        updated,
                        deleted,
                    } => {
                        report.updated += 1;
                        tracing::info!(
                            "updated issue #{}: {} comments added, {} updated, {} deleted",
                            issue,
                            added,
                            updated,
                            deleted
                        );
                    }
                    Reconciliation::Unchanged => {
                        report.unchanged += 1;
                        tracing::debug!("up to date");
                    }
                }
                if outcome.changed() {
                    self.store.save(&tickets)?;
                }
            }

            offset += batch.page_size;
            if offset >= batch.total {
                break;
            }
        }

        report.elapsed = started.elapsed();
        Ok(report)
    }

    /// Turn one source issue into the fully rendered ticket the engine
    /// compares against the stored state.
    fn assemble(&mut self, issue: SourceIssue) -> Result<Ticket> {
        let raw_comments = self.source.fetch_comments(&issue.key)?;
        let attachments = self.source.fetch_attachments(&issue.key)?;

        let reporter = match &issue.reporter {
            Some(name) => Some(self.authors.resolve(&mut self.source, name)?.clone()),
            None => None,
        };

        let body = render::ticket_body(
            &self.config.source.base_url,
            &self.config.source.project,
            &issue.key,
            reporter.as_ref(),
            issue.created.as_deref(),
            issue.description.as_deref(),
            &attachments,
        );

        let mut ticket = Ticket::new(issue.key.clone(), issue.title.clone(), body);
        ticket.open = render::is_open(&issue.status);
        ticket.labels = render::labels(
            &issue.versions,
            issue.resolution.as_deref(),
            &self.config.render.current_version,
        );

        for raw in raw_comments {
            let author = match &raw.author {
                Some(name) => Some(self.authors.resolve(&mut self.source, name)?.clone()),
                None => None,
            };
            let body = render::comment_body(
                &self.config.source.base_url,
                &issue.key,
                &raw.id,
                author.as_ref(),
                raw.created.as_deref(),
                &raw.body,
            );
            ticket.comments.push(Comment::new(Some(raw.id), body));
        }

        Ok(ticket)
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
