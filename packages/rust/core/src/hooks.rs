//! Injectable override points of the title pipeline.
//!
//! Every method has a pass-through default, so an implementor overrides only
//! the stages it cares about. Hooks are pure: they receive the candidate and
//! its context and return the replacement candidate.

use metatitle_shared::{Post, Term, ViewContext};

/// Strategy object consulted at each stage of title resolution.
pub trait TitleHooks {
    /// Filters the raw custom-field title before decoration. Empty means "no custom title".
    fn custom_field_title(&self, title: String, _ctx: &ViewContext) -> String {
        title
    }

    /// Filters the generated title (after the "Untitled" fallback) before decoration.
    fn generated_title(&self, title: String, _ctx: &ViewContext) -> String {
        title
    }

    /// Short-circuits archive title generation when it returns a non-empty string.
    ///
    /// Runs before any archive rule, even when the term lookup failed
    /// (`term` is then `None`).
    fn archive_title(&self, _ctx: &ViewContext, _term: Option<&Term>) -> String {
        String::new()
    }

    /// Filters the archive title produced by the archive rules.
    fn generated_archive_title(&self, title: String, _term: Option<&Term>) -> String {
        title
    }

    /// Label of the not-found view.
    fn not_found_title(&self) -> String {
        "404".to_string()
    }

    /// Filters a content item's raw title.
    fn single_post_title(&self, title: String, _post: &Post) -> String {
        title
    }

    /// Filters a term's name before archive prefixes are applied.
    fn single_term_title(&self, name: String, _term: &Term) -> String {
        name
    }

    /// Filters a post type archive's label.
    fn post_type_archive_title(&self, label: String, _post_type: &str) -> String {
        label
    }

    /// Formats the title of a password-protected item.
    fn protected_title(&self, title: &str, _post: &Post) -> String {
        format!("Protected: {title}")
    }

    /// Formats the title of a private item.
    fn private_title(&self, title: &str, _post: &Post) -> String {
        format!("Private: {title}")
    }

    /// Filters the separator glyph. Consulted once per resolver lifetime.
    fn separator(&self, glyph: String) -> String {
        glyph
    }
}

/// Hooks that change nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl TitleHooks for NoHooks {}
