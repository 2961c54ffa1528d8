// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core record types for the ticket mirror.
//!
//! A [`Ticket`] is the persisted pairing of one source tracker ticket with
//! the destination issue that mirrors it. Content equality deliberately
//! ignores destination ids: two records are the same when a reader of the
//! destination could not tell them apart.

use serde::{Deserialize, Serialize};

/// A user in the source tracker, as shown in rendered bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Login name used for lookups.
    pub username: String,
    /// Human-readable display name.
    pub display_name: String,
    /// Avatar image URL.
    pub avatar_url: String,
}

/// A mirrored comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment id in the source tracker. Absent for comments that did not
    /// originate there.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    /// Comment id on the destination. Absent until the comment has been
    /// created there.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_id: Option<u64>,
    /// Rendered comment text.
    pub body: String,
}

impl Comment {
    /// Creates a comment that has not been pushed to the destination yet.
    pub fn new(source_id: Option<String>, body: impl Into<String>) -> Self {
        Comment {
            source_id,
            dest_id: None,
            body: body.into(),
        }
    }
}

/// The persisted record pairing one source ticket with one destination issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique, immutable key in the source tracker (e.g. "MC-318").
    pub source_key: String,
    /// Issue number on the destination. Absent until creation succeeds;
    /// never cleared or reassigned afterwards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_id: Option<u64>,
    /// Issue title.
    pub title: String,
    /// Rendered issue body.
    pub body: String,
    /// Whether the ticket is still open in the source tracker.
    pub open: bool,
    /// Labels in application order. Order is significant for equality.
    pub labels: Vec<String>,
    /// Comments in source creation order.
    pub comments: Vec<Comment>,
}

impl Ticket {
    /// Creates an open ticket with no labels, comments, or destination id.
    pub fn new(
        source_key: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Ticket {
            source_key: source_key.into(),
            dest_id: None,
            title: title.into(),
            body: body.into(),
            open: true,
            labels: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Returns true when the ticket-level fields match: title, body, open
    /// flag, and labels as an ordered sequence.
    ///
    /// Destination ids are never consulted.
    pub fn fields_match(&self, other: &Ticket) -> bool {
        self.title == other.title
            && self.body == other.body
            && self.open == other.open
            && self.labels == other.labels
    }

    /// Returns true when the full mirrored content matches: ticket-level
    /// fields plus comment bodies compared pairwise by position.
    ///
    /// Comment lists are kept in source creation order, so position stands
    /// for identity here. Destination ids are never consulted.
    pub fn content_matches(&self, other: &Ticket) -> bool {
        self.fields_match(other)
            && self.comments.len() == other.comments.len()
            && self
                .comments
                .iter()
                .zip(&other.comments)
                .all(|(a, b)| a.body == b.body)
    }

    /// Copies ticket-level fields from `other`. The destination id and the
    /// comment list are left untouched; reconciling those is the engine's
    /// job.
    pub fn absorb(&mut self, other: &Ticket) {
        self.title = other.title.clone();
        self.body = other.body.clone();
        self.open = other.open;
        self.labels = other.labels.clone();
    }
}

#[cfg(test)]
#[path = "ticket_tests.rs"]
mod tests;
