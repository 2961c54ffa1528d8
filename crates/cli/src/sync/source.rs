// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Source tracker client.
//!
//! [`SourceTracker`] is the read-only view the driver needs; [`JiraSource`]
//! implements it against a Jira-flavoured REST API over blocking HTTP.

use std::collections::HashMap;

use serde::Deserialize;

use mira_core::Author;

use crate::config::SourceConfig;

/// Error type for source tracker operations.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The API answered with a non-success status.
    #[error("api error: {status} {message}")]
    Api { status: u16, message: String },

    /// The request never produced an answer.
    #[error("transport error: {0}")]
    Transport(String),

    /// The answer was not the JSON we asked for.
    #[error("decode error: {0}")]
    Decode(String),
}

/// One page of a ticket search.
#[derive(Debug, Clone)]
pub struct SourceBatch {
    /// Tickets on this page, in creation order.
    pub issues: Vec<SourceIssue>,
    /// Total matches across all pages.
    pub total: u64,
    /// Page size the server actually applied.
    pub page_size: u64,
}

/// A ticket as fetched from the source tracker, before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceIssue {
    pub key: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub resolution: Option<String>,
    /// Names of the versions the ticket affects.
    pub versions: Vec<String>,
    /// Reporter username, when the tracker exposes one.
    pub reporter: Option<String>,
    /// Raw creation timestamp.
    pub created: Option<String>,
}

/// A comment as fetched from the source tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceComment {
    pub id: String,
    pub author: Option<String>,
    pub body: String,
    pub created: Option<String>,
}

/// An attachment reference as fetched from the source tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceAttachment {
    pub id: String,
    pub filename: String,
}

/// Read-only view of the source issue tracker.
///
/// Failures here abort the run; only destination mutations get the retry
/// treatment.
pub trait SourceTracker {
    /// Fetch one page of the project's tickets starting at `offset`,
    /// ordered by creation date ascending.
    fn query_batch(&mut self, offset: u64) -> Result<SourceBatch, SourceError>;

    /// Fetch a ticket's comments in creation order.
    fn fetch_comments(&mut self, key: &str) -> Result<Vec<SourceComment>, SourceError>;

    /// Fetch a ticket's attachment list.
    fn fetch_attachments(&mut self, key: &str) -> Result<Vec<SourceAttachment>, SourceError>;

    /// Look up a user's display name and avatar.
    fn lookup_user(&mut self, username: &str) -> Result<Author, SourceError>;
}

/// Jira-flavoured REST implementation of [`SourceTracker`].
pub struct JiraSource {
    agent: ureq::Agent,
    base_url: String,
    project: String,
    page_size: u64,
    token: String,
}

impl JiraSource {
    pub fn new(config: &SourceConfig, token: String) -> Self {
        JiraSource {
            agent: ureq::agent(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            project: config.project.clone(),
            page_size: config.page_size,
            token,
        }
    }

    fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, SourceError> {
        let response = self
            .agent
            .get(url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Accept", "application/json")
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(status, response) => SourceError::Api {
                    status,
                    message: response.into_string().unwrap_or_default(),
                },
                ureq::Error::Transport(transport) => SourceError::Transport(transport.to_string()),
            })?;
        response
            .into_json()
            .map_err(|e| SourceError::Decode(e.to_string()))
    }
}

impl SourceTracker for JiraSource {
    fn query_batch(&mut self, offset: u64) -> Result<SourceBatch, SourceError> {
        let jql = format!("project = {} ORDER BY created ASC", self.project);
        let url = format!(
            "{}/rest/api/2/search?jql={}&startAt={}&maxResults={}&fields=summary,description,status,resolution,versions,reporter,created",
            self.base_url,
            urlencoding::encode(&jql),
            offset,
            self.page_size,
        );
        let response: SearchResponse = self.get(&url)?;
        Ok(SourceBatch {
            total: response.total,
            page_size: response.max_results,
            issues: response.issues.into_iter().map(SourceIssue::from).collect(),
        })
    }

    fn fetch_comments(&mut self, key: &str) -> Result<Vec<SourceComment>, SourceError> {
        let url = format!("{}/rest/api/2/issue/{}/comment", self.base_url, key);
        let response: CommentsResponse = self.get(&url)?;
        Ok(response
            .comments
            .into_iter()
            .map(|c| SourceComment {
                id: c.id,
                author: c.author.map(|a| a.name),
                body: c.body,
                created: c.created,
            })
            .collect())
    }

    fn fetch_attachments(&mut self, key: &str) -> Result<Vec<SourceAttachment>, SourceError> {
        let url = format!(
            "{}/rest/api/2/issue/{}?fields=attachment",
            self.base_url, key
        );
        let response: AttachmentsResponse = self.get(&url)?;
        Ok(response
            .fields
            .attachment
            .into_iter()
            .map(|a| SourceAttachment {
                id: a.id,
                filename: a.filename,
            })
            .collect())
    }

    fn lookup_user(&mut self, username: &str) -> Result<Author, SourceError> {
        let url = format!(
            "{}/rest/api/2/user?username={}",
            self.base_url,
            urlencoding::encode(username),
        );
        let user: UserResponse = self.get(&url)?;
        Ok(Author {
            username: user.name,
            display_name: user.display_name,
            avatar_url: user.avatar_urls.get("24x24").cloned().unwrap_or_default(),
        })
    }
}

// Wire DTOs. Only the fields the mirror reads are modelled.

#[derive(Debug, Deserialize)]
struct SearchResponse {
    total: u64,
    #[serde(rename = "maxResults")]
    max_results: u64,
    #[serde(default)]
    issues: Vec<IssueDto>,
}

#[derive(Debug, Deserialize)]
struct IssueDto {
    key: String,
    fields: IssueFieldsDto,
}

#[derive(Debug, Deserialize)]
struct IssueFieldsDto {
    summary: String,
    description: Option<String>,
    status: NamedDto,
    resolution: Option<NamedDto>,
    #[serde(default)]
    versions: Vec<NamedDto>,
    reporter: Option<UserRefDto>,
    created: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NamedDto {
    name: String,
}

#[derive(Debug, Deserialize)]
struct UserRefDto {
    name: String,
}

#[derive(Debug, Deserialize)]
struct CommentsResponse {
    #[serde(default)]
    comments: Vec<CommentDto>,
}

#[derive(Debug, Deserialize)]
struct CommentDto {
    id: String,
    author: Option<UserRefDto>,
    body: String,
    created: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AttachmentsResponse {
    fields: AttachmentFieldsDto,
}

#[derive(Debug, Deserialize)]
struct AttachmentFieldsDto {
    #[serde(default)]
    attachment: Vec<AttachmentDto>,
}

#[derive(Debug, Deserialize)]
struct AttachmentDto {
    id: String,
    filename: String,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    name: String,
    #[serde(rename = "displayName")]
    display_name: String,
    #[serde(rename = "avatarUrls", default)]
    avatar_urls: HashMap<String, String>,
}

impl From<IssueDto> for SourceIssue {
    fn from(dto: IssueDto) -> Self {
        SourceIssue {
            key: dto.key,
            title: dto.fields.summary,
            description: dto.fields.description,
            status: dto.fields.status.name,
            resolution: dto.fields.resolution.map(|r| r.name),
            versions: dto.fields.versions.into_iter().map(|v| v.name).collect(),
            reporter: dto.fields.reporter.map(|r| r.name),
            created: dto.fields.created,
        }
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
