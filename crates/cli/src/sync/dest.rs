// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Destination tracker client.
//!
//! [`DestTracker`] is the mutation surface the reconciliation engine drives;
//! [`GitHubDest`] implements it against a GitHub-flavoured REST API. Rate
//! limit answers are classified into their own error variant so the retry
//! layer can honor the server's timing instead of guessing.

use serde::Deserialize;

use crate::config::DestinationConfig;

/// Error type for destination tracker operations.
#[derive(Debug, thiserror::Error)]
pub enum DestError {
    /// The API refused the call because we are over its rate budget.
    #[error("rate limited by the destination api")]
    RateLimited {
        /// Seconds to wait, when the server said so.
        retry_after: Option<u64>,
    },

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

/// Mutation surface of the destination issue tracker.
///
/// Every method is a single API call; retry behavior lives in the layer
/// wrapping this trait, not in implementations.
pub trait DestTracker {
    /// Create an issue and return its number.
    fn create_issue(&mut self, title: &str, body: &str, labels: &[String])
        -> Result<u64, DestError>;

    /// Rewrite an issue's title, body, open state, and labels.
    fn update_issue(
        &mut self,
        number: u64,
        title: &str,
        body: &str,
        open: bool,
        labels: &[String],
    ) -> Result<(), DestError>;

    /// Lock an issue's conversation.
    fn lock_issue(&mut self, number: u64) -> Result<(), DestError>;

    /// Create a comment on an issue and return the comment id.
    fn create_comment(&mut self, number: u64, body: &str) -> Result<u64, DestError>;

    /// Rewrite an existing comment's body.
    fn update_comment(&mut self, comment_id: u64, body: &str) -> Result<(), DestError>;

    /// Delete an existing comment.
    fn delete_comment(&mut self, comment_id: u64) -> Result<(), DestError>;
}

/// GitHub-flavoured REST implementation of [`DestTracker`].
pub struct GitHubDest {
    agent: ureq::Agent,
    api_url: String,
    owner: String,
    repo: String,
    token: String,
}

impl GitHubDest {
    pub fn new(config: &DestinationConfig, token: String) -> Self {
        GitHubDest {
            agent: ureq::agent(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            token,
        }
    }

    fn request(&self, method: &str, path: &str) -> ureq::Request {
        let url = format!(
            "{}/repos/{}/{}/{}",
            self.api_url, self.owner, self.repo, path
        );
        self.agent
            .request(method, &url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Accept", "application/vnd.github+json")
            .set("User-Agent", "mira")
    }

    fn decode_error(error: ureq::Error) -> DestError {
        match error {
            ureq::Error::Status(status, response) => {
                let retry_after = response
                    .header("Retry-After")
                    .and_then(|v| v.parse::<u64>().ok());
                let remaining_zero = response
                    .header("x-ratelimit-remaining")
                    .is_some_and(|v| v == "0");
                let message = response.into_string().unwrap_or_default();
                classify(status, retry_after, remaining_zero, message)
            }
            ureq::Error::Transport(transport) => DestError::Transport(transport.to_string()),
        }
    }

    fn decode_body<T: serde::de::DeserializeOwned>(
        response: ureq::Response,
    ) -> Result<T, DestError> {
        response
            .into_json()
            .map_err(|e| DestError::Decode(e.to_string()))
    }
}

/// Sort an error status into rate limiting versus a plain API failure.
///
/// GitHub signals primary rate limits with 429 and secondary ones with 403
/// plus either a `Retry-After` header or an exhausted remaining counter. A
/// bare 403 is a permissions problem, not a rate limit.
fn classify(
    status: u16,
    retry_after: Option<u64>,
    remaining_zero: bool,
    message: String,
) -> DestError {
    if status == 429 || (status == 403 && (retry_after.is_some() || remaining_zero)) {
        DestError::RateLimited { retry_after }
    } else {
        DestError::Api { status, message }
    }
}

#[derive(Debug, Deserialize)]
struct IssueResponse {
    number: u64,
}

#[derive(Debug, Deserialize)]
struct CommentResponse {
    id: u64,
}

impl DestTracker for GitHubDest {
    fn create_issue(
        &mut self,
        title: &str,
        body: &str,
        labels: &[String],
    ) -> Result<u64, DestError> {
        let response = self
            .request("POST", "issues")
            .send_json(serde_json::json!({
                "title": title,
                "body": body,
                "labels": labels,
            }))
            .map_err(Self::decode_error)?;
        let issue: IssueResponse = Self::decode_body(response)?;
        Ok(issue.number)
    }

    fn update_issue(
        &mut self,
        number: u64,
        title: &str,
        body: &str,
        open: bool,
        labels: &[String],
    ) -> Result<(), DestError> {
        self.request("PATCH", &format!("issues/{}", number))
            .send_json(serde_json::json!({
                "title": title,
                "body": body,
                "state": if open { "open" } else { "closed" },
                "labels": labels,
            }))
            .map_err(Self::decode_error)?;
        Ok(())
    }

    fn lock_issue(&mut self, number: u64) -> Result<(), DestError> {
        self.request("PUT", &format!("issues/{}/lock", number))
            .call()
            .map_err(Self::decode_error)?;
        Ok(())
    }

    fn create_comment(&mut self, number: u64, body: &str) -> Result<u64, DestError> {
        let response = self
            .request("POST", &format!("issues/{}/comments", number))
            .send_json(serde_json::json!({ "body": body }))
            .map_err(Self::decode_error)?;
        let comment: CommentResponse = Self::decode_body(response)?;
        Ok(comment.id)
    }

    fn update_comment(&mut self, comment_id: u64, body: &str) -> Result<(), DestError> {
        self.request("PATCH", &format!("issues/comments/{}", comment_id))
            .send_json(serde_json::json!({ "body": body }))
            .map_err(Self::decode_error)?;
        Ok(())
    }

    fn delete_comment(&mut self, comment_id: u64) -> Result<(), DestError> {
        self.request("DELETE", &format!("issues/comments/{}", comment_id))
            .call()
            .map_err(Self::decode_error)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "dest_tests.rs"]
mod tests;
