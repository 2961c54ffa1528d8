// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared mock trackers and builders for sync module tests.

#![allow(clippy::unwrap_used)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use mira_core::{Author, Comment, Ticket};

use crate::config::{Config, DestinationConfig, RenderConfig, SourceConfig};
use crate::sync::dest::{DestError, DestTracker};
use crate::sync::source::{
    SourceAttachment, SourceBatch, SourceComment, SourceError, SourceIssue, SourceTracker,
};

/// One recorded destination mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestCall {
    CreateIssue {
        title: String,
        body: String,
        labels: Vec<String>,
    },
    UpdateIssue {
        number: u64,
        title: String,
        body: String,
        open: bool,
        labels: Vec<String>,
    },
    LockIssue {
        number: u64,
    },
    CreateComment {
        number: u64,
        body: String,
    },
    UpdateComment {
        comment_id: u64,
        body: String,
    },
    DeleteComment {
        comment_id: u64,
    },
}

#[derive(Debug)]
struct MockDestInner {
    calls: Vec<DestCall>,
    failures: VecDeque<DestError>,
    next_issue: u64,
    next_comment: u64,
}

/// Scriptable in-memory destination tracker.
///
/// Clones share state, so a test keeps one handle for assertions while the
/// code under test owns another. Every call is recorded before any scripted
/// failure is served, so failed attempts are visible too.
#[derive(Clone)]
pub struct MockDest {
    inner: Arc<Mutex<MockDestInner>>,
}

impl MockDest {
    pub fn new() -> Self {
        MockDest {
            inner: Arc::new(Mutex::new(MockDestInner {
                calls: Vec::new(),
                failures: VecDeque::new(),
                next_issue: 1,
                next_comment: 100,
            })),
        }
    }

    /// Queue an error to serve instead of the next call's answer.
    pub fn fail_next(&self, error: DestError) {
        self.inner.lock().unwrap().failures.push_back(error);
    }

    pub fn calls(&self) -> Vec<DestCall> {
        self.inner.lock().unwrap().calls.clone()
    }
}

impl DestTracker for MockDest {
    fn create_issue(
        &mut self,
        title: &str,
        body: &str,
        labels: &[String],
    ) -> Result<u64, DestError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(DestCall::CreateIssue {
            title: title.to_string(),
            body: body.to_string(),
            labels: labels.to_vec(),
        });
        if let Some(error) = inner.failures.pop_front() {
            return Err(error);
        }
        let number = inner.next_issue;
        inner.next_issue += 1;
        Ok(number)
    }

    fn update_issue(
        &mut self,
        number: u64,
        title: &str,
        body: &str,
        open: bool,
        labels: &[String],
    ) -> Result<(), DestError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(DestCall::UpdateIssue {
            number,
            title: title.to_string(),
            body: body.to_string(),
            open,
            labels: labels.to_vec(),
        });
        match inner.failures.pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn lock_issue(&mut self, number: u64) -> Result<(), DestError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(DestCall::LockIssue { number });
        match inner.failures.pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn create_comment(&mut self, number: u64, body: &str) -> Result<u64, DestError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(DestCall::CreateComment {
            number,
            body: body.to_string(),
        });
        if let Some(error) = inner.failures.pop_front() {
            return Err(error);
        }
        let id = inner.next_comment;
        inner.next_comment += 1;
        Ok(id)
    }

    fn update_comment(&mut self, comment_id: u64, body: &str) -> Result<(), DestError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(DestCall::UpdateComment {
            comment_id,
            body: body.to_string(),
        });
        match inner.failures.pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn delete_comment(&mut self, comment_id: u64) -> Result<(), DestError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(DestCall::DeleteComment { comment_id });
        match inner.failures.pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Default)]
struct MockSourceInner {
    issues: Vec<SourceIssue>,
    comments: HashMap<String, Vec<SourceComment>>,
    attachments: HashMap<String, Vec<SourceAttachment>>,
    users: HashMap<String, Author>,
    page_size: u64,
    queries: usize,
    lookups: usize,
}

/// Scriptable in-memory source tracker.
///
/// Serves issues in insertion order, paged by the configured page size, and
/// counts queries and user lookups so tests can assert on traffic.
#[derive(Clone)]
pub struct MockSource {
    inner: Arc<Mutex<MockSourceInner>>,
}

impl MockSource {
    pub fn new(page_size: u64) -> Self {
        MockSource {
            inner: Arc::new(Mutex::new(MockSourceInner {
                page_size,
                ..Default::default()
            })),
        }
    }

    pub fn add_issue(&self, issue: SourceIssue) {
        self.inner.lock().unwrap().issues.push(issue);
    }

    pub fn add_comment(&self, key: &str, comment: SourceComment) {
        self.inner
            .lock()
            .unwrap()
            .comments
            .entry(key.to_string())
            .or_default()
            .push(comment);
    }

    pub fn add_attachment(&self, key: &str, attachment: SourceAttachment) {
        self.inner
            .lock()
            .unwrap()
            .attachments
            .entry(key.to_string())
            .or_default()
            .push(attachment);
    }

    pub fn add_user(&self, author: Author) {
        self.inner
            .lock()
            .unwrap()
            .users
            .insert(author.username.clone(), author);
    }

    pub fn set_issue_title(&self, key: &str, title: &str) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(issue) = inner.issues.iter_mut().find(|i| i.key == key) {
            issue.title = title.to_string();
        }
    }

    pub fn set_comment_body(&self, key: &str, id: &str, body: &str) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(comments) = inner.comments.get_mut(key) {
            if let Some(comment) = comments.iter_mut().find(|c| c.id == id) {
                comment.body = body.to_string();
            }
        }
    }

    pub fn remove_comment(&self, key: &str, id: &str) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(comments) = inner.comments.get_mut(key) {
            comments.retain(|c| c.id != id);
        }
    }

    pub fn queries(&self) -> usize {
        self.inner.lock().unwrap().queries
    }

    pub fn lookups(&self) -> usize {
        self.inner.lock().unwrap().lookups
    }
}

impl SourceTracker for MockSource {
    fn query_batch(&mut self, offset: u64) -> Result<SourceBatch, SourceError> {
        let mut inner = self.inner.lock().unwrap();
        inner.queries += 1;
        let total = inner.issues.len() as u64;
        let start = (offset as usize).min(inner.issues.len());
        let end = (start + inner.page_size as usize).min(inner.issues.len());
        Ok(SourceBatch {
            issues: inner.issues[start..end].to_vec(),
            total,
            page_size: inner.page_size,
        })
    }

    fn fetch_comments(&mut self, key: &str) -> Result<Vec<SourceComment>, SourceError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.comments.get(key).cloned().unwrap_or_default())
    }

    fn fetch_attachments(&mut self, key: &str) -> Result<Vec<SourceAttachment>, SourceError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.attachments.get(key).cloned().unwrap_or_default())
    }

    fn lookup_user(&mut self, username: &str) -> Result<Author, SourceError> {
        let mut inner = self.inner.lock().unwrap();
        inner.lookups += 1;
        inner.users.get(username).cloned().ok_or(SourceError::Api {
            status: 404,
            message: format!("no such user: {}", username),
        })
    }
}

/// An open source issue reported by alice.
pub fn issue(key: &str, title: &str) -> SourceIssue {
    SourceIssue {
        key: key.to_string(),
        title: title.to_string(),
        description: Some(format!("Details for {}", key)),
        status: "Open".to_string(),
        resolution: None,
        versions: Vec::new(),
        reporter: Some("alice".to_string()),
        created: Some("2012-10-29T14:05:45.000+0000".to_string()),
    }
}

/// A source comment authored by alice.
pub fn source_comment(id: &str, body: &str) -> SourceComment {
    SourceComment {
        id: id.to_string(),
        author: Some("alice".to_string()),
        body: body.to_string(),
        created: Some("2013-01-15T10:30:00.000+0000".to_string()),
    }
}

pub fn alice() -> Author {
    Author {
        username: "alice".to_string(),
        display_name: "Alice".to_string(),
        avatar_url: "https://a.example/alice.png".to_string(),
    }
}

/// A mirrored ticket with deterministic title and body.
pub fn ticket(key: &str) -> Ticket {
    Ticket::new(key, format!("Title {}", key), format!("Body {}", key))
}

/// A not-yet-pushed comment with a source id.
pub fn comment(source_id: &str, body: &str) -> Comment {
    Comment::new(Some(source_id.to_string()), body)
}

pub fn test_config() -> Config {
    Config {
        source: SourceConfig {
            base_url: "https://bugs.example.com".to_string(),
            project: "MC".to_string(),
            page_size: 100,
        },
        destination: DestinationConfig {
            api_url: "https://api.github.com".to_string(),
            owner: "example".to_string(),
            repo: "mirror".to_string(),
        },
        render: RenderConfig {
            current_version: "1.12.2".to_string(),
        },
        retry: None,
    }
}
