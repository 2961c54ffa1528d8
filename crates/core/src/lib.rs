// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! mira-core: shared model for the mira ticket mirror.
//!
//! This crate provides the mirrored ticket record, the comment diff used by
//! the reconciliation engine, and the JSONL checkpoint store that carries
//! the mirrored set between runs.

pub mod checkpoint;
pub mod diff;
pub mod error;
pub mod ticket;

pub use checkpoint::CheckpointStore;
pub use diff::{comment_ops, CommentOp};
pub use error::{Error, Result};
pub use ticket::{Author, Comment, Ticket};
