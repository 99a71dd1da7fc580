//! View classification: explicit arguments or the ambient request → [`ViewContext`].

use tracing::debug;

use metatitle_shared::{TitleArgs, TitleOptions, ViewContext, ViewKind};

use crate::store::{QueriedArchive, RequestState};

/// Classify a resolution request.
///
/// With `args`, a taxonomy always yields [`ViewKind::Term`]; otherwise the id
/// is the front page or a singular item. Without `args`, the ambient request
/// is classified with the precedence
/// not-found > search > front > archive > singular > unknown.
pub fn resolve(
    args: Option<&TitleArgs>,
    options: &TitleOptions,
    request: &RequestState,
) -> ViewContext {
    let ctx = match args {
        Some(args) => from_args(args, options),
        None => from_request(options, request),
    };
    debug!(kind = ?ctx.kind, ambient = ctx.ambient, "view classified");
    ctx
}

fn from_args(args: &TitleArgs, options: &TitleOptions) -> ViewContext {
    let id = args.id.unwrap_or(0);

    if let Some(taxonomy) = args.taxonomy.as_deref().filter(|t| !t.is_empty()) {
        return ViewContext::new(ViewKind::Term, false).with_term(id, taxonomy);
    }

    let kind = if options.is_front_page_id(id) {
        ViewKind::Front
    } else {
        ViewKind::Singular
    };
    let ctx = ViewContext::new(kind, false);
    if id == 0 { ctx } else { ctx.with_content(id) }
}

fn from_request(options: &TitleOptions, request: &RequestState) -> ViewContext {
    if request.not_found {
        return ViewContext::new(ViewKind::NotFound, true);
    }
    if request.search.is_some() {
        return ViewContext::new(ViewKind::Search, true);
    }
    if request.front_page {
        let ctx = ViewContext::new(ViewKind::Front, true);
        return match options.page_on_front {
            Some(id) => ctx.with_content(id),
            None => ctx,
        };
    }
    if let Some(archive) = &request.archive {
        return archive_context(archive);
    }
    if let Some(id) = request.singular_id {
        return ViewContext::new(ViewKind::Singular, true).with_content(id);
    }
    ViewContext::new(ViewKind::Unknown, true)
}

fn archive_context(archive: &QueriedArchive) -> ViewContext {
    match archive {
        QueriedArchive::Term { term_id, taxonomy } => {
            ViewContext::new(ViewKind::Term, true).with_term(*term_id, taxonomy.clone())
        }
        QueriedArchive::PostType {
            post_type,
            taxonomy,
        } => {
            let mut ctx = ViewContext::new(
                ViewKind::PostTypeArchive {
                    post_type: post_type.clone(),
                },
                true,
            );
            ctx.taxonomy = taxonomy.clone();
            ctx
        }
        QueriedArchive::Date(date) => ViewContext::new(ViewKind::Date(*date), true),
        QueriedArchive::Author { author_id } => ViewContext::new(
            ViewKind::Author {
                author_id: *author_id,
            },
            true,
        ),
        QueriedArchive::PostFormat { slug } => {
            ViewContext::new(ViewKind::PostFormat { slug: slug.clone() }, true)
        }
        QueriedArchive::Other => ViewContext::new(ViewKind::Archive, true),
    }
}
