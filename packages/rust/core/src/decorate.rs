//! Title decorations, applied in a fixed order:
//! protection prefix, pagination suffix, branding affix.
//!
//! Each step is a no-op when its gate is closed or its input is empty, and
//! none of them inspects separators already present in the title.

use tracing::debug;

use metatitle_shared::{BrandingSide, ViewContext, ViewKind};

use crate::hooks::TitleHooks;
use crate::store::TitleEnv;

/// Which title source a policy is derived for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleSource {
    /// User-entered custom field title.
    CustomField,
    /// Generated fallback title.
    Generated,
}

/// Gates for one decoration pass. Derived per call, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecorationPolicy {
    pub allow_protection: bool,
    pub allow_pagination: bool,
    pub allow_branding: bool,
    pub branding_side: BrandingSide,
}

impl DecorationPolicy {
    /// Derive the gates for `ctx` and the winning `source`.
    pub fn derive(
        ctx: &ViewContext,
        env: &TitleEnv<'_>,
        source: TitleSource,
        protection_blind: bool,
    ) -> Self {
        let mut allow_branding = use_title_branding(ctx, env);
        if source == TitleSource::CustomField {
            allow_branding &= !env.options.custom_title_rem_additions;
        }

        let branding_side = if ctx.is_front() {
            env.options.home_title_location
        } else {
            env.options.title_location
        };

        Self {
            allow_protection: !protection_blind,
            allow_pagination: allows_pagination(ctx, env),
            allow_branding,
            branding_side,
        }
    }
}

/// Branding is on for the front page when the tagline is enabled and non-empty,
/// and elsewhere unless additions are removed.
pub fn use_title_branding(ctx: &ViewContext, env: &TitleEnv<'_>) -> bool {
    if ctx.is_front() {
        env.options.homepage_tagline && !home_tagline(env).is_empty()
    } else {
        !env.options.title_rem_additions
    }
}

/// Pagination only decorates ambient, non-admin, found views.
fn allows_pagination(ctx: &ViewContext, env: &TitleEnv<'_>) -> bool {
    ctx.ambient && ctx.kind != ViewKind::NotFound && !env.request.admin
}

/// Homepage tagline: the custom option, else the site tagline. Trimmed.
pub fn home_tagline(env: &TitleEnv<'_>) -> String {
    let custom = env.options.homepage_title_tagline.trim();
    if custom.is_empty() {
        env.store.site().tagline.trim().to_string()
    } else {
        custom.to_string()
    }
}

/// Run the three steps over a trimmed candidate.
pub fn decorate(
    title: &str,
    ctx: &ViewContext,
    env: &TitleEnv<'_>,
    hooks: &dyn TitleHooks,
    separator: &str,
    policy: &DecorationPolicy,
) -> String {
    let mut title = title.trim().to_string();

    if policy.allow_protection {
        title = merge_protection(title, ctx, env, hooks);
    }
    if policy.allow_pagination {
        title = merge_pagination(title, env, separator);
    }
    if policy.allow_branding {
        title = merge_branding(title, ctx, env, separator, policy.branding_side);
    }

    title
}

/// Prefix protected or private items.
pub fn merge_protection(
    title: String,
    ctx: &ViewContext,
    env: &TitleEnv<'_>,
    hooks: &dyn TitleHooks,
) -> String {
    let Some(post) = ctx.content_id.and_then(|id| env.store.post(id)) else {
        return title;
    };

    if post.is_protected() {
        debug!(content_id = post.id, "protected title prefix");
        hooks.protected_title(&title, &post)
    } else if post.is_private() {
        debug!(content_id = post.id, "private title prefix");
        hooks.private_title(&title, &post)
    } else {
        title
    }
}

/// Append (prepend under RTL) `Page n` when the request is on page 2 or later.
pub fn merge_pagination(title: String, env: &TitleEnv<'_>, separator: &str) -> String {
    let page = env.request.page_number();
    if page < 2 {
        return title;
    }

    let paging = format!("Page {page}");
    if env.request.rtl {
        format!("{paging} {separator} {title}")
    } else {
        format!("{title} {separator} {paging}")
    }
}

/// Join the branding addition to the title on the configured side.
pub fn merge_branding(
    title: String,
    ctx: &ViewContext,
    env: &TitleEnv<'_>,
    separator: &str,
    side: BrandingSide,
) -> String {
    let addition = if ctx.is_front() {
        let tagline = home_tagline(env);
        if tagline.is_empty() {
            env.store.site().name.trim().to_string()
        } else {
            tagline
        }
    } else {
        env.store.site().name.trim().to_string()
    };

    let title = title.trim();
    if title.is_empty() || addition.is_empty() {
        return title.to_string();
    }

    match side {
        BrandingSide::Left => format!("{addition} {separator} {title}"),
        BrandingSide::Right => format!("{title} {separator} {addition}"),
    }
}
