//! Core domain types for MetaTitle title resolution.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ViewKind
// ---------------------------------------------------------------------------

/// The period a date archive covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "period", rename_all = "lowercase")]
pub enum DateArchive {
    Year { year: i32 },
    Month { year: i32, month: u32 },
    Day { year: i32, month: u32, day: u32 },
}

impl DateArchive {
    /// The first calendar day covered by the archive, if the parts are valid.
    pub fn first_day(&self) -> Option<NaiveDate> {
        match *self {
            Self::Year { year } => NaiveDate::from_ymd_opt(year, 1, 1),
            Self::Month { year, month } => NaiveDate::from_ymd_opt(year, month, 1),
            Self::Day { year, month, day } => NaiveDate::from_ymd_opt(year, month, day),
        }
    }
}

/// Classification of the view a title is requested for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewKind {
    /// The site's front page (posts index or static page).
    Front,
    /// A single content item.
    Singular,
    /// A taxonomy term archive.
    Term,
    /// A post type archive. An empty post type resolves against the query var.
    PostTypeArchive { post_type: String },
    /// A year, month or day archive.
    Date(DateArchive),
    /// An author archive.
    Author { author_id: u64 },
    /// A post format archive, identified by its bare slug (`gallery`).
    PostFormat { slug: String },
    /// An archive no specific rule covers.
    Archive,
    /// Search results.
    Search,
    /// Not-found page.
    NotFound,
    /// Unclassifiable request.
    Unknown,
}

// ---------------------------------------------------------------------------
// ViewContext
// ---------------------------------------------------------------------------

/// Explicit resolution arguments. `None` arguments mean "use the ambient request".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleArgs {
    /// Content item or term id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Taxonomy; when present the id is a term id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxonomy: Option<String>,
}

impl TitleArgs {
    /// Arguments addressing a content item.
    pub fn item(id: u64) -> Self {
        Self {
            id: Some(id),
            taxonomy: None,
        }
    }

    /// Arguments addressing a term.
    pub fn term(id: u64, taxonomy: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            taxonomy: Some(taxonomy.into()),
        }
    }
}

/// A classified view, built fresh for every resolution call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewContext {
    pub kind: ViewKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxonomy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_id: Option<u64>,
    /// Whether the context came from the ambient request rather than arguments.
    pub ambient: bool,
}

impl ViewContext {
    /// A context without any ids.
    pub fn new(kind: ViewKind, ambient: bool) -> Self {
        Self {
            kind,
            content_id: None,
            taxonomy: None,
            term_id: None,
            ambient,
        }
    }

    /// Attach a content item id.
    pub fn with_content(mut self, id: u64) -> Self {
        self.content_id = Some(id);
        self
    }

    /// Attach a term id and its taxonomy.
    pub fn with_term(mut self, id: u64, taxonomy: impl Into<String>) -> Self {
        self.term_id = Some(id);
        self.taxonomy = Some(taxonomy.into());
        self
    }

    pub fn is_front(&self) -> bool {
        self.kind == ViewKind::Front
    }
}

// ---------------------------------------------------------------------------
// Content records
// ---------------------------------------------------------------------------

/// Publication status of a content item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Publish,
    Private,
    Draft,
    Pending,
    Future,
    #[serde(other)]
    Other,
}

/// A content item as the title pipeline sees it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    /// Raw title field.
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: PostStatus,
    /// Non-empty when the item is password protected.
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub post_type: String,
    /// Item-level custom title.
    #[serde(default)]
    pub custom_title: String,
    /// Item-level Open Graph title.
    #[serde(default)]
    pub og_title: String,
    /// Item-level Twitter title.
    #[serde(default)]
    pub twitter_title: String,
}

impl Post {
    pub fn is_protected(&self) -> bool {
        !self.password.is_empty()
    }

    pub fn is_private(&self) -> bool {
        self.status == PostStatus::Private
    }
}

/// A taxonomy term.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Term {
    pub id: u64,
    /// Empty for terms detached from any taxonomy.
    #[serde(default)]
    pub taxonomy: String,
    #[serde(default)]
    pub name: String,
    /// Term-level custom title metadata.
    #[serde(default)]
    pub doc_title: String,
}

/// Labels registered for a taxonomy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomyLabels {
    #[serde(default)]
    pub singular: String,
    #[serde(default)]
    pub plural: String,
}

/// Site-wide naming.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tagline: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_archive_first_day() {
        let month = DateArchive::Month {
            year: 2024,
            month: 2,
        };
        assert_eq!(month.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1));

        let bogus = DateArchive::Day {
            year: 2023,
            month: 2,
            day: 30,
        };
        assert!(bogus.first_day().is_none());
    }

    #[test]
    fn view_kind_serializes_tagged() {
        let kind = ViewKind::PostFormat {
            slug: "gallery".into(),
        };
        let json = serde_json::to_string(&kind).expect("serialize");
        assert_eq!(json, r#"{"kind":"post_format","slug":"gallery"}"#);

        let parsed: ViewKind = serde_json::from_str(r#"{"kind":"not_found"}"#).expect("parse");
        assert_eq!(parsed, ViewKind::NotFound);
    }

    #[test]
    fn contexts_differ_by_origin() {
        let ambient = ViewContext::new(ViewKind::Singular, true).with_content(4);
        let explicit = ViewContext::new(ViewKind::Singular, false).with_content(4);
        assert_ne!(ambient, explicit);
        assert_eq!(ambient.content_id, Some(4));
    }

    #[test]
    fn unknown_status_deserializes_as_other() {
        let post: Post = toml::from_str("id = 3\nstatus = \"inherit\"").expect("parse");
        assert_eq!(post.status, PostStatus::Other);
        assert!(!post.is_private());
    }
}
