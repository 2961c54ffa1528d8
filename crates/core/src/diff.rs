// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Comment diff for the reconciliation engine.
//!
//! Decides, per source comment id, which destination operations bring the
//! mirrored comment set in line with the latest source state. The decision
//! is pure; executing the operations and recording the destination ids they
//! assign is the engine's job.

use crate::ticket::Comment;

/// A single destination operation produced by [`comment_ops`].
///
/// `incoming` indexes refer to positions in the incoming comment slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentOp {
    /// Create the incoming comment on the destination.
    Create { incoming: usize },
    /// Rewrite destination comment `dest_id` with the incoming body.
    Update { dest_id: u64, incoming: usize },
    /// Delete destination comment `dest_id`.
    Delete { dest_id: u64 },
}

/// Computes the ordered destination operations for one ticket's comments.
///
/// Matching is by `source_id` equality, where two absent ids also match (the
/// first absent-id stored comment stands in for all of them). Creates and
/// updates come out in incoming order, then deletes in stored order, which
/// is the order the engine executes them in.
///
/// A matched comment whose stored twin carries no destination id cannot be
/// addressed remotely: it is re-created when its body changed and left alone
/// otherwise. An unmatched stored comment without a destination id has
/// nothing to delete.
pub fn comment_ops(stored: &[Comment], incoming: &[Comment]) -> Vec<CommentOp> {
    let mut ops = Vec::new();

    for (index, comment) in incoming.iter().enumerate() {
        match stored.iter().find(|old| old.source_id == comment.source_id) {
            None => ops.push(CommentOp::Create { incoming: index }),
            Some(old) if old.body != comment.body => match old.dest_id {
                Some(dest_id) => ops.push(CommentOp::Update {
                    dest_id,
                    incoming: index,
                }),
                None => ops.push(CommentOp::Create { incoming: index }),
            },
            Some(_) => {}
        }
    }

    for old in stored {
        let gone = incoming.iter().all(|c| c.source_id != old.source_id);
        if gone {
            if let Some(dest_id) = old.dest_id {
                ops.push(CommentOp::Delete { dest_id });
            }
        }
    }

    ops
}

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;
