// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Markdown rendering for mirrored tickets and comments.
//!
//! Bodies are rendered once, on the way in from the source tracker, and the
//! rendered text is what gets persisted and compared. Mentions are guarded
//! (`@` becomes `(at)`) so mirrored text never pings destination users.

use mira_core::Author;

use crate::sync::source::SourceAttachment;

/// Replaces `@` with `(at)` so mirrored text cannot ping anyone.
pub fn guard_mentions(text: &str) -> String {
    text.replace('@', "(at)")
}

/// True while the source ticket still counts as open.
pub fn is_open(status: &str) -> bool {
    !(status == "Closed" || status == "Resolved")
}

/// Labels for a ticket: an `affects <version>` marker when the configured
/// version is among the affected versions, then the mapped resolution.
pub fn labels(versions: &[String], resolution: Option<&str>, current_version: &str) -> Vec<String> {
    let mut labels = Vec::new();
    if !current_version.is_empty() && versions.iter().any(|v| v == current_version) {
        labels.push(format!("affects {}", current_version));
    }
    match resolution {
        Some("Fixed") => labels.push("fixed".to_string()),
        Some("Duplicate") => labels.push("duplicate".to_string()),
        Some("Invalid") | Some("Cannot Reproduce") => labels.push("invalid".to_string()),
        Some("Won't Fix") => labels.push("won't fix".to_string()),
        Some("Works As Intended") => labels.push("works as intended".to_string()),
        _ => {}
    }
    labels
}

/// Renders the full issue body for a ticket.
///
/// Shape: a heading linking back to the source ticket, the reporter with
/// avatar and profile link (plus creation date when it parses), the guarded
/// description, and an attachment gallery when there are attachments.
pub fn ticket_body(
    base_url: &str,
    project: &str,
    key: &str,
    reporter: Option<&Author>,
    created: Option<&str>,
    description: Option<&str>,
    attachments: &[SourceAttachment],
) -> String {
    let mut body = format!(
        "## [{} Ticket {}]({}/browse/{})",
        project, key, base_url, key
    );
    if let Some(author) = reporter {
        body.push_str(&format!(
            "\n### <img src=\"{}\" width=20 height=20> [{}]({}/secure/ViewProfile.jspa?name={})",
            author.avatar_url,
            author.display_name,
            base_url,
            urlencoding::encode(&author.username),
        ));
        if let Some(date) = created.and_then(format_date) {
            body.push_str(&format!(" • {}", date));
        }
    }
    body.push_str("\n\n");
    body.push_str(&guard_mentions(description.unwrap_or_default()));
    if !attachments.is_empty() {
        body.push_str("\n### Attachments:\n");
        for attachment in attachments {
            let url = format!(
                "{}/secure/attachment/{}/{}",
                base_url,
                attachment.id,
                urlencoding::encode(&attachment.filename),
            );
            if is_image(&attachment.filename) {
                body.push_str(&format!(
                    "  <img src=\"{}\" width=\"240\" height=\"135\">",
                    url
                ));
            } else {
                body.push_str(&format!("  \n[{}]({})", attachment.filename, url));
            }
        }
    }
    body
}

/// Renders one comment body: author heading anchored at the focused comment
/// (plus date when it parses), then the guarded text.
pub fn comment_body(
    base_url: &str,
    key: &str,
    comment_id: &str,
    author: Option<&Author>,
    created: Option<&str>,
    text: &str,
) -> String {
    let mut body = String::new();
    if let Some(author) = author {
        body.push_str(&format!(
            "### <img src=\"{}\" width=20 height=20> [{}]({}/browse/{}?focusedCommentId={}#comment-{})",
            author.avatar_url, author.display_name, base_url, key, comment_id, comment_id,
        ));
        if let Some(date) = created.and_then(format_date) {
            body.push_str(&format!(" • {}", date));
        }
        body.push('\n');
    }
    body.push_str(&guard_mentions(text));
    body
}

/// Formats a source timestamp as e.g. `Mar 5, 2019`. Unparseable input
/// renders no date at all.
fn format_date(raw: &str) -> Option<String> {
    chrono::DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z")
        .ok()
        .map(|date| date.format("%b %-d, %Y").to_string())
}

fn is_image(filename: &str) -> bool {
    filename.ends_with(".png") || filename.ends_with(".jpg") || filename.ends_with(".jpeg")
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
