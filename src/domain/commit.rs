use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pull/merge request that produced a merge commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeInfo {
    /// Request number as written in the message (without `#` or `!`)
    pub id: String,
    /// Source branch, when the host records it in the message
    pub branch: Option<String>,
}

/// A single commit in history order.
///
/// The fetcher fills in the raw fields (`hash` through `tag_message`). The
/// derived fields start empty and are only ever added to by annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub hash: String,
    /// First line of the message
    pub subject: String,
    /// Remainder of the message after the subject, trimmed
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub author: String,
    pub date: DateTime<Utc>,
    /// Version tag pointing at this commit
    #[serde(default)]
    pub tag: Option<String>,
    /// Annotation text of the tag, for annotated tags
    #[serde(default)]
    pub tag_message: Option<String>,

    #[serde(default)]
    pub breaking: bool,
    #[serde(default)]
    pub issue_ids: Vec<String>,
    #[serde(default)]
    pub fixes: Vec<String>,
    #[serde(default)]
    pub merge: Option<MergeInfo>,
    /// Subject of the commit this one reverts
    #[serde(default)]
    pub revert: Option<String>,
}

impl Commit {
    /// Create an untagged, unannotated commit
    pub fn new(hash: impl Into<String>, subject: impl Into<String>, date: DateTime<Utc>) -> Self {
        Commit {
            hash: hash.into(),
            subject: subject.into(),
            body: String::new(),
            author: String::new(),
            date,
            tag: None,
            tag_message: None,
            breaking: false,
            issue_ids: Vec::new(),
            fixes: Vec::new(),
            merge: None,
            revert: None,
        }
    }

    /// Build a commit from a full message, splitting subject and body
    pub fn from_message(hash: impl Into<String>, message: &str, date: DateTime<Utc>) -> Self {
        let (subject, body) = split_message(message);
        Commit::new(hash, subject, date).with_body(body)
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_tag_message(mut self, message: impl Into<String>) -> Self {
        self.tag_message = Some(message.into());
        self
    }

    /// First seven characters of the hash
    pub fn short_hash(&self) -> &str {
        match self.hash.char_indices().nth(7) {
            Some((idx, _)) => &self.hash[..idx],
            None => &self.hash,
        }
    }
}

/// Split a raw commit message into its subject line and trimmed body
pub fn split_message(message: &str) -> (String, String) {
    let message = message.trim();
    match message.split_once('\n') {
        Some((subject, body)) => (subject.trim().to_string(), body.trim().to_string()),
        None => (message.to_string(), String::new()),
    }
}
