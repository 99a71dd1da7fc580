//! Generated (fallback) titles, one rule per [`ViewKind`].
//!
//! Everything here is undecorated and unescaped. Missing data yields an empty
//! string; the resolver replaces an empty generated title with "Untitled".

use tracing::{debug, warn};

use metatitle_shared::{DateArchive, Term, ViewContext, ViewKind};

use crate::hooks::TitleHooks;
use crate::store::TitleEnv;

/// Generic archive title.
pub const ARCHIVES_TITLE: &str = "Archives";

/// Slug prefix the host stores post format terms under.
const POST_FORMAT_PREFIX: &str = "post-format-";

/// Generate the fallback title for `ctx`.
pub fn generate(ctx: &ViewContext, env: &TitleEnv<'_>, hooks: &dyn TitleHooks) -> String {
    match &ctx.kind {
        ViewKind::NotFound => hooks.not_found_title(),
        ViewKind::Search => search_title(env),
        ViewKind::Front => env.store.site().name.clone(),
        ViewKind::Singular => single_post_title(ctx, env, hooks),
        ViewKind::Unknown => String::new(),
        ViewKind::Term
        | ViewKind::PostTypeArchive { .. }
        | ViewKind::Date(_)
        | ViewKind::Author { .. }
        | ViewKind::PostFormat { .. }
        | ViewKind::Archive => archive_title(ctx, env, hooks),
    }
}

fn search_title(env: &TitleEnv<'_>) -> String {
    let phrase = env.request.search.as_deref().unwrap_or_default();
    format!("Search Results for \"{phrase}\"")
}

fn single_post_title(ctx: &ViewContext, env: &TitleEnv<'_>, hooks: &dyn TitleHooks) -> String {
    let Some(post) = ctx.content_id.and_then(|id| env.store.post(id)) else {
        debug!(content_id = ?ctx.content_id, "no content item for singular title");
        return String::new();
    };
    hooks.single_post_title(post.title.clone(), &post)
}

/// Look up the context's term. Failed lookups count as "no term".
pub(crate) fn lookup_term(ctx: &ViewContext, env: &TitleEnv<'_>) -> Option<Term> {
    let id = ctx.term_id?;
    let taxonomy = ctx.taxonomy.as_deref().unwrap_or_default();
    match env.store.term(id, taxonomy) {
        Ok(term) => term,
        Err(e) => {
            warn!(term_id = id, taxonomy, error = %e, "term lookup failed");
            None
        }
    }
}

/// Archive titles: term, date, author, post format and post type archives.
fn archive_title(ctx: &ViewContext, env: &TitleEnv<'_>, hooks: &dyn TitleHooks) -> String {
    let term = match ctx.kind {
        ViewKind::Term => lookup_term(ctx, env),
        _ => None,
    };

    let short_circuit = hooks.archive_title(ctx, term.as_ref());
    if !short_circuit.is_empty() {
        debug!("archive title short-circuited by hook");
        return short_circuit;
    }

    let use_prefix = env.options.use_archive_prefix();
    let prefixed = |label: &str, title: String| {
        if use_prefix {
            format!("{label}: {title}")
        } else {
            title
        }
    };

    let title = match &ctx.kind {
        ViewKind::Term => match &term {
            Some(term) => term_title(term, env, hooks, use_prefix),
            None => return String::new(),
        },
        ViewKind::Date(date) => match date_title(date) {
            Some(title) => prefixed(date_prefix(date), title),
            None => return String::new(),
        },
        ViewKind::Author { author_id } => {
            let name = env.store.author_name(*author_id).unwrap_or_default();
            if name.is_empty() {
                debug!(author_id, "no author name for archive title");
                return String::new();
            }
            prefixed("Author", name)
        }
        ViewKind::PostFormat { slug } => post_format_title(slug).to_string(),
        ViewKind::PostTypeArchive { post_type } => {
            let label = post_type_archive_title(post_type, env, hooks);
            let label = if label.is_empty() {
                ctx.taxonomy
                    .as_deref()
                    .and_then(|tax| env.store.taxonomy_labels(tax))
                    .map(|labels| labels.plural)
                    .unwrap_or_default()
            } else {
                label
            };
            if label.is_empty() {
                debug!(%post_type, "no label for post type archive title");
                return String::new();
            }
            prefixed("Archives", label)
        }
        _ => ARCHIVES_TITLE.to_string(),
    };

    hooks.generated_archive_title(title, term.as_ref())
}

fn term_title(term: &Term, env: &TitleEnv<'_>, hooks: &dyn TitleHooks, use_prefix: bool) -> String {
    if term.taxonomy.is_empty() {
        return ARCHIVES_TITLE.to_string();
    }

    let name = hooks.single_term_title(term.name.clone(), term);
    if !use_prefix {
        return name;
    }

    match term.taxonomy.as_str() {
        "category" => format!("Category: {name}"),
        "tag" => format!("Tag: {name}"),
        other => match env.store.taxonomy_labels(other) {
            Some(labels) if !labels.singular.is_empty() => format!("{}: {name}", labels.singular),
            _ => name,
        },
    }
}

fn date_prefix(date: &DateArchive) -> &'static str {
    match date {
        DateArchive::Year { .. } => "Year",
        DateArchive::Month { .. } => "Month",
        DateArchive::Day { .. } => "Day",
    }
}

fn date_title(date: &DateArchive) -> Option<String> {
    let first = date.first_day()?;
    let pattern = match date {
        DateArchive::Year { .. } => "%Y",
        DateArchive::Month { .. } => "%B %Y",
        DateArchive::Day { .. } => "%B %-d, %Y",
    };
    Some(first.format(pattern).to_string())
}

/// Plural archive noun of a post format. Unknown formats yield "".
pub fn post_format_title(slug: &str) -> &'static str {
    match slug.strip_prefix(POST_FORMAT_PREFIX).unwrap_or(slug) {
        "aside" => "Asides",
        "gallery" => "Galleries",
        "image" => "Images",
        "video" => "Videos",
        "quote" => "Quotes",
        "link" => "Links",
        "status" => "Statuses",
        "audio" => "Audio",
        "chat" => "Chats",
        _ => "",
    }
}

/// Label of a post type archive. An empty post type means the query's post type.
fn post_type_archive_title(post_type: &str, env: &TitleEnv<'_>, hooks: &dyn TitleHooks) -> String {
    let post_type = if post_type.is_empty() {
        env.request.post_type.as_deref().unwrap_or_default()
    } else {
        post_type
    };
    if post_type.is_empty() {
        return String::new();
    }

    let label = env.store.post_type_label(post_type).unwrap_or_default();
    hooks.post_type_archive_title(label, post_type)
}
