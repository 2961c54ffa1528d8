// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Reconciliation engine.
//!
//! Compares each freshly rendered ticket against the checkpointed mirror
//! state and issues the smallest set of destination mutations that brings
//! the mirror in line. Identical content costs zero API calls; a changed
//! ticket costs exactly the calls its changes require.

use mira_core::{comment_ops, CommentOp, Ticket};

use crate::sync::dest::{DestError, DestTracker};

/// What [`ReconcileEngine::reconcile`] did for one ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// The ticket was mirrored for the first time.
    Created { issue: u64, comments: usize },
    /// The mirrored issue was brought up to date.
    Updated {
        issue: u64,
        added: usize,
        updated: usize,
        deleted: usize,
    },
    /// Stored and incoming content were identical.
    Unchanged,
}

impl Reconciliation {
    /// Whether the checkpoint needs saving after this outcome.
    pub fn changed(&self) -> bool {
        !matches!(self, Reconciliation::Unchanged)
    }
}

/// Drives destination mutations from stored-versus-incoming ticket diffs.
pub struct ReconcileEngine<D> {
    dest: D,
}

impl<D: DestTracker> ReconcileEngine<D> {
    pub fn new(dest: D) -> Self {
        ReconcileEngine { dest }
    }

    /// Reconcile one incoming ticket against the stored set, mutating the
    /// destination and the stored set to match.
    ///
    /// A stored ticket that never finished creation (no destination id) is
    /// re-created in place, so an interrupted run heals on the next one.
    pub fn reconcile(
        &mut self,
        tickets: &mut Vec<Ticket>,
        incoming: Ticket,
    ) -> Result<Reconciliation, DestError> {
        let position = tickets
            .iter()
            .position(|t| t.source_key == incoming.source_key);
        match position {
            None => {
                let mut ticket = incoming;
                let issue = self.mirror_new(&mut ticket)?;
                let comments = ticket.comments.len();
                tickets.push(ticket);
                Ok(Reconciliation::Created { issue, comments })
            }
            Some(index) => {
                let stored = &mut tickets[index];
                if stored.content_matches(&incoming) && stored.dest_id.is_some() {
                    return Ok(Reconciliation::Unchanged);
                }
                match stored.dest_id {
                    None => {
                        let mut ticket = incoming;
                        let issue = self.mirror_new(&mut ticket)?;
                        let comments = ticket.comments.len();
                        *stored = ticket;
                        Ok(Reconciliation::Created { issue, comments })
                    }
                    Some(issue) => self.mirror_changes(stored, incoming, issue),
                }
            }
        }
    }

    /// Create the destination issue, its comments, and its final state for a
    /// ticket new to the mirror, recording assigned ids on `ticket`.
    ///
    /// Issues are created open so comments can be added, then closed when the
    /// source ticket is closed, and locked either way: the mirror is
    /// read-only for destination users.
    fn mirror_new(&mut self, ticket: &mut Ticket) -> Result<u64, DestError> {
        let issue = self
            .dest
            .create_issue(&ticket.title, &ticket.body, &ticket.labels)?;
        ticket.dest_id = Some(issue);
        for comment in &mut ticket.comments {
            comment.dest_id = Some(self.dest.create_comment(issue, &comment.body)?);
        }
        if !ticket.open {
            self.dest
                .update_issue(issue, &ticket.title, &ticket.body, false, &ticket.labels)?;
        }
        self.dest.lock_issue(issue)?;
        Ok(issue)
    }

    /// Push the differences between `stored` and `incoming` to the
    /// destination, then absorb `incoming` into `stored`.
    fn mirror_changes(
        &mut self,
        stored: &mut Ticket,
        incoming: Ticket,
        issue: u64,
    ) -> Result<Reconciliation, DestError> {
        if !stored.fields_match(&incoming) {
            self.dest.update_issue(
                issue,
                &incoming.title,
                &incoming.body,
                incoming.open,
                &incoming.labels,
            )?;
        }

        let ops = comment_ops(&stored.comments, &incoming.comments);
        let mut created: Vec<Option<u64>> = vec![None; incoming.comments.len()];
        let mut added = 0;
        let mut updated = 0;
        let mut deleted = 0;
        for op in ops {
            match op {
                CommentOp::Create { incoming: index } => {
                    let body = &incoming.comments[index].body;
                    created[index] = Some(self.dest.create_comment(issue, body)?);
                    added += 1;
                }
                CommentOp::Update {
                    dest_id,
                    incoming: index,
                } => {
                    self.dest
                        .update_comment(dest_id, &incoming.comments[index].body)?;
                    updated += 1;
                }
                CommentOp::Delete { dest_id } => {
                    self.dest.delete_comment(dest_id)?;
                    deleted += 1;
                }
            }
        }

        // Rebuild the stored comment list from the incoming order so stale
        // entries never linger, carrying over destination ids from matching
        // stored comments and from creations made just now.
        let previous = std::mem::take(&mut stored.comments);
        let mut merged = Vec::with_capacity(incoming.comments.len());
        for (index, comment) in incoming.comments.iter().enumerate() {
            let carried = previous
                .iter()
                .find(|old| old.source_id == comment.source_id)
                .and_then(|old| old.dest_id);
            let mut comment = comment.clone();
            comment.dest_id = created[index].or(carried);
            merged.push(comment);
        }
        stored.absorb(&incoming);
        stored.comments = merged;

        Ok(Reconciliation::Updated {
            issue,
            added,
            updated,
            deleted,
        })
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
