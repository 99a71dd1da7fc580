//! Read-only collaborators of the title pipeline.
//!
//! The pipeline never owns content or settings. Each resolution call receives
//! a [`TitleEnv`] borrowing the options snapshot, a [`ContentStore`], and the
//! ambient [`RequestState`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use metatitle_shared::{
    DateArchive, MetaTitleError, Post, Result, SiteInfo, TaxonomyLabels, Term, TitleOptions,
};

/// Taxonomies every site has, even when the snapshot does not register them.
const BUILTIN_TAXONOMIES: &[&str] = &["category", "tag", "post_format"];

// ---------------------------------------------------------------------------
// ContentStore
// ---------------------------------------------------------------------------

/// Lookup surface over site content.
///
/// Missing records are `None`; a term lookup may additionally fail with an
/// error-like value, which callers fold into "no term".
pub trait ContentStore {
    /// Fetch a content item.
    fn post(&self, id: u64) -> Option<Post>;

    /// Fetch a term of `taxonomy`. `Err` when the lookup itself is invalid.
    fn term(&self, id: u64, taxonomy: &str) -> Result<Option<Term>>;

    /// Labels of a registered taxonomy.
    fn taxonomy_labels(&self, taxonomy: &str) -> Option<TaxonomyLabels>;

    /// Plural label of a post type.
    fn post_type_label(&self, post_type: &str) -> Option<String>;

    /// Display name of an author.
    fn author_name(&self, id: u64) -> Option<String>;

    /// Site name and tagline.
    fn site(&self) -> &SiteInfo;
}

// ---------------------------------------------------------------------------
// RequestState
// ---------------------------------------------------------------------------

/// The archive the ambient request queried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueriedArchive {
    Term { term_id: u64, taxonomy: String },
    /// `taxonomy` names the taxonomy the archive was reached through, if any.
    PostType {
        post_type: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        taxonomy: Option<String>,
    },
    Date(DateArchive),
    Author { author_id: u64 },
    PostFormat { slug: String },
    /// Any archive no specific rule covers.
    Other,
}

/// Ambient request state, as classified by the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestState {
    #[serde(default)]
    pub not_found: bool,
    /// Raw search phrase when the request is a search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default)]
    pub front_page: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive: Option<QueriedArchive>,
    /// Queried content item on singular views.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub singular_id: Option<u64>,
    /// Main-loop page counter (`<!--nextpage-->` splits).
    #[serde(default)]
    pub page: u32,
    /// Query `paged` parameter.
    #[serde(default)]
    pub paged: u32,
    #[serde(default)]
    pub rtl: bool,
    #[serde(default)]
    pub admin: bool,
    /// The query's `post_type` variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_type: Option<String>,
}

impl RequestState {
    /// The effective page number: the larger of both counters.
    pub fn page_number(&self) -> u32 {
        self.page.max(self.paged)
    }
}

/// Everything one resolution call reads.
#[derive(Clone, Copy)]
pub struct TitleEnv<'a> {
    pub options: &'a TitleOptions,
    pub store: &'a dyn ContentStore,
    pub request: &'a RequestState,
}

impl<'a> TitleEnv<'a> {
    pub fn new(
        options: &'a TitleOptions,
        store: &'a dyn ContentStore,
        request: &'a RequestState,
    ) -> Self {
        Self {
            options,
            store,
            request,
        }
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// A registered taxonomy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomyRecord {
    pub name: String,
    #[serde(flatten)]
    pub labels: TaxonomyLabels,
}

/// A registered post type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostTypeRecord {
    pub name: String,
    /// Plural label.
    #[serde(default)]
    pub label: String,
}

/// An author.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub id: u64,
    #[serde(default)]
    pub display_name: String,
}

/// In-memory [`ContentStore`], deserializable from a site snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    pub site: SiteInfo,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub terms: Vec<Term>,
    #[serde(default)]
    pub taxonomies: Vec<TaxonomyRecord>,
    #[serde(default)]
    pub post_types: Vec<PostTypeRecord>,
    #[serde(default)]
    pub authors: Vec<AuthorRecord>,
}

impl MemoryStore {
    pub fn new(name: impl Into<String>, tagline: impl Into<String>) -> Self {
        Self {
            site: SiteInfo {
                name: name.into(),
                tagline: tagline.into(),
            },
            ..Self::default()
        }
    }

    pub fn with_post(mut self, post: Post) -> Self {
        self.posts.push(post);
        self
    }

    pub fn with_term(mut self, term: Term) -> Self {
        self.terms.push(term);
        self
    }

    pub fn with_taxonomy(
        mut self,
        name: impl Into<String>,
        singular: impl Into<String>,
        plural: impl Into<String>,
    ) -> Self {
        self.taxonomies.push(TaxonomyRecord {
            name: name.into(),
            labels: TaxonomyLabels {
                singular: singular.into(),
                plural: plural.into(),
            },
        });
        self
    }

    pub fn with_post_type(mut self, name: impl Into<String>, label: impl Into<String>) -> Self {
        self.post_types.push(PostTypeRecord {
            name: name.into(),
            label: label.into(),
        });
        self
    }

    pub fn with_author(mut self, id: u64, display_name: impl Into<String>) -> Self {
        self.authors.push(AuthorRecord {
            id,
            display_name: display_name.into(),
        });
        self
    }

    fn is_registered_taxonomy(&self, taxonomy: &str) -> bool {
        BUILTIN_TAXONOMIES.contains(&taxonomy) || self.taxonomies.iter().any(|t| t.name == taxonomy)
    }
}

impl ContentStore for MemoryStore {
    fn post(&self, id: u64) -> Option<Post> {
        self.posts.iter().find(|p| p.id == id).cloned()
    }

    fn term(&self, id: u64, taxonomy: &str) -> Result<Option<Term>> {
        if !self.is_registered_taxonomy(taxonomy) {
            return Err(MetaTitleError::lookup(format!(
                "invalid taxonomy `{taxonomy}` for term {id}"
            )));
        }
        Ok(self
            .terms
            .iter()
            .find(|t| t.id == id && t.taxonomy == taxonomy)
            .cloned())
    }

    fn taxonomy_labels(&self, taxonomy: &str) -> Option<TaxonomyLabels> {
        self.taxonomies
            .iter()
            .find(|t| t.name == taxonomy)
            .map(|t| t.labels.clone())
    }

    fn post_type_label(&self, post_type: &str) -> Option<String> {
        self.post_types
            .iter()
            .find(|p| p.name == post_type)
            .map(|p| p.label.clone())
    }

    fn author_name(&self, id: u64) -> Option<String> {
        self.authors
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.display_name.clone())
    }

    fn site(&self) -> &SiteInfo {
        &self.site
    }
}

// ---------------------------------------------------------------------------
// SiteSnapshot
// ---------------------------------------------------------------------------

/// A TOML site snapshot: content, the ambient request, and optional options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteSnapshot {
    #[serde(flatten)]
    pub store: MemoryStore,
    #[serde(default)]
    pub request: RequestState,
    /// Overrides the configured options when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<TitleOptions>,
}

impl SiteSnapshot {
    /// Parse a snapshot from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| MetaTitleError::snapshot(e.to_string()))
    }

    /// Load a snapshot file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MetaTitleError::io(path, e))?;
        let snapshot: Self = toml::from_str(&content).map_err(|e| {
            MetaTitleError::snapshot(format!("failed to parse {}: {e}", path.display()))
        })?;
        debug!(
            ?path,
            posts = snapshot.store.posts.len(),
            terms = snapshot.store.terms.len(),
            "loaded site snapshot"
        );
        Ok(snapshot)
    }
}
