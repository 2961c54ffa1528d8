// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Batch mirroring from the source tracker to the destination tracker.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐    ┌────────────┐    ┌──────────────────┐    ┌─────────────┐
//! │   Driver   │───►│   Engine   │───►│ ReliableExecutor │───►│ Destination │
//! │  (paging)  │    │ (diffing)  │    │ (blocking retry) │    │   tracker   │
//! └────────────┘    └────────────┘    └──────────────────┘    └─────────────┘
//!       │
//!       ▼
//! ┌────────────┐    ┌────────────┐
//! │   Source   │    │ Checkpoint │  (JSONL, saved after every change)
//! │  tracker   │    │   store    │
//! └────────────┘    └────────────┘
//! ```
//!
//! The driver walks the source project page by page, renders each ticket,
//! and hands it to the engine. The engine computes the minimal set of
//! destination operations and executes them through the executor, which
//! retries failed mutations with a blocking backoff. Source reads are not
//! retried: a source failure aborts the run.

pub mod authors;
pub mod dest;
pub mod driver;
pub mod engine;
pub mod executor;
pub mod source;

pub use authors::AuthorCache;
pub use dest::{DestError, DestTracker, GitHubDest};
pub use driver::{Driver, RunReport};
pub use engine::{ReconcileEngine, Reconciliation};
pub use executor::{ReliableExecutor, RetryPolicy, SystemWaiter, Waiter};
pub use source::{
    JiraSource, SourceAttachment, SourceBatch, SourceComment, SourceError, SourceIssue,
    SourceTracker,
};

#[cfg(test)]
mod test_helpers;
