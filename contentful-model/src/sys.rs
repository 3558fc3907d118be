//! Identity and version metadata.
//!
//! Every persisted document carries a `sys` object. Two facts drive the write
//! protocol:
//! - `createdAt` present means the document exists on the server, so a write
//!   is an update; absent means it is a create, even if `id` is set.
//! - `version` is the optimistic-concurrency token. An absent version counts
//!   as 1, and the server's returned version must be adopted after every write.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sys {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_version: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_published_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Link>,
    /// Only set on entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<Link>,
}

impl Sys {
    /// A `sys` for a document whose identity the caller picks up front.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Current version, treating a never-written document as version 1.
    pub fn version(&self) -> u64 {
        self.version.unwrap_or(1)
    }

    pub fn is_persisted(&self) -> bool {
        self.created_at.is_some()
    }

    pub fn is_published(&self) -> bool {
        self.published_at.is_some() || self.published_version.is_some()
    }

    pub fn state(&self) -> LifecycleState {
        if !self.is_persisted() {
            LifecycleState::Unsaved
        } else if self.is_published() {
            LifecycleState::Published
        } else {
            LifecycleState::Draft
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.created_at.as_deref())
    }

    pub fn published_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.published_at.as_deref())
    }

    pub fn space_id(&self) -> Option<&str> {
        self.space.as_ref().map(Link::id)
    }

    pub fn content_type_id(&self) -> Option<&str> {
        self.content_type.as_ref().map(Link::id)
    }
}

fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|t| DateTime::parse_from_rfc3339(t).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Persistence status derived from `sys`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    /// Never written; the next upsert creates it.
    Unsaved,
    /// Saved but not published.
    Draft,
    Published,
}

/// A reference to another object: `{"sys": {"type": "Link", "linkType", "id"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub sys: LinkSys,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSys {
    #[serde(rename = "type", default = "link_kind")]
    pub kind: String,
    pub link_type: String,
    pub id: String,
}

fn link_kind() -> String {
    "Link".to_string()
}

impl Link {
    pub fn new(link_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            sys: LinkSys {
                kind: link_kind(),
                link_type: link_type.into(),
                id: id.into(),
            },
        }
    }

    pub fn space(id: impl Into<String>) -> Self {
        Self::new("Space", id)
    }

    pub fn environment(id: impl Into<String>) -> Self {
        Self::new("Environment", id)
    }

    pub fn content_type(id: impl Into<String>) -> Self {
        Self::new("ContentType", id)
    }

    pub fn id(&self) -> &str {
        &self.sys.id
    }
}

/// A document that carries `sys` metadata and takes part in versioned writes.
pub trait Versioned {
    fn sys(&self) -> &Sys;

    fn id(&self) -> Option<&str> {
        self.sys().id.as_deref()
    }

    fn version(&self) -> u64 {
        self.sys().version()
    }

    fn state(&self) -> LifecycleState {
        self.sys().state()
    }
}
