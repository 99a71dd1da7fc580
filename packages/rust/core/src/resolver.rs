//! Source resolution: custom-field title first, generated title as fallback.
//!
//! [`TitleResolver`] is the long-lived entry point. It owns the hooks, the
//! separator memo (computed once per resolver) and a per-request cache keyed
//! by the serialized view context and the escape flag. Resolution is
//! single-threaded; the memos use cells, not locks.

use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, instrument};

use metatitle_shared::{Post, TitleArgs, ViewContext, ViewKind, separator_glyph};

use crate::context;
use crate::decorate::{DecorationPolicy, TitleSource, decorate};
use crate::escape::maybe_escape;
use crate::generate::{generate, lookup_term};
use crate::hooks::{NoHooks, TitleHooks};
use crate::store::TitleEnv;

/// Title used when every source is empty.
pub const UNTITLED: &str = "Untitled";

/// Every title variant for one view, as the CLI reports it.
#[derive(Debug, Clone, Serialize)]
pub struct TitleSet {
    pub context: ViewContext,
    pub title: String,
    pub custom_field: String,
    pub generated: String,
    pub open_graph: String,
    pub twitter: String,
}

/// Resolves display titles for views.
pub struct TitleResolver<H: TitleHooks = NoHooks> {
    hooks: H,
    protection_blind: bool,
    separator: OnceCell<String>,
    cache: RefCell<HashMap<String, String>>,
}

impl TitleResolver<NoHooks> {
    pub fn new() -> Self {
        Self::with_hooks(NoHooks)
    }
}

impl Default for TitleResolver<NoHooks> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: TitleHooks> TitleResolver<H> {
    pub fn with_hooks(hooks: H) -> Self {
        Self {
            hooks,
            protection_blind: false,
            separator: OnceCell::new(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Skip the protection prefix for every resolution.
    pub fn protection_blind(mut self, blind: bool) -> Self {
        self.protection_blind = blind;
        self
    }

    /// The separator glyph, computed from the first options seen.
    pub fn separator(&self, env: &TitleEnv<'_>) -> String {
        self.separator
            .get_or_init(|| {
                let glyph = separator_glyph(&env.options.title_separator);
                self.hooks.separator(glyph)
            })
            .clone()
    }

    /// Forget cached titles; call between requests.
    pub fn clear_request_cache(&self) {
        self.cache.borrow_mut().clear();
    }

    /// Forget every memo, including the separator.
    pub fn reset(&mut self) {
        self.separator = OnceCell::new();
        self.cache.get_mut().clear();
    }

    /// Classify `args` (or the ambient request).
    pub fn context(&self, env: &TitleEnv<'_>, args: Option<&TitleArgs>) -> ViewContext {
        context::resolve(args, env.options, env.request)
    }

    /// The display title: custom-field title when present, else generated.
    #[instrument(skip_all, fields(ambient = args.is_none(), escape = escape))]
    pub fn get_title(&self, env: &TitleEnv<'_>, args: Option<&TitleArgs>, escape: bool) -> String {
        let ctx = self.context(env, args);
        self.title_for(env, &ctx, escape)
    }

    /// The display title for an already classified view.
    pub fn title_for(&self, env: &TitleEnv<'_>, ctx: &ViewContext, escape: bool) -> String {
        let key = serde_json::to_string(ctx)
            .ok()
            .map(|json| format!("{json}|{escape}"));

        if let Some(hit) = key
            .as_ref()
            .and_then(|key| self.cache.borrow().get(key).cloned())
        {
            debug!("title cache hit");
            return hit;
        }

        let custom = self.decorated_custom(env, ctx);
        let title = if custom.is_empty() {
            debug!("no custom field title, using generated");
            self.decorated_generated(env, ctx)
        } else {
            debug!("custom field title wins");
            custom
        };
        let title = maybe_escape(title, escape);

        if let Some(key) = key {
            self.cache.borrow_mut().insert(key, title.clone());
        }
        title
    }

    /// The decorated custom-field title, or "" when none is stored.
    pub fn custom_field_title(
        &self,
        env: &TitleEnv<'_>,
        args: Option<&TitleArgs>,
        escape: bool,
    ) -> String {
        let ctx = self.context(env, args);
        maybe_escape(self.decorated_custom(env, &ctx), escape)
    }

    /// The decorated generated title. Never empty.
    pub fn generated_title(
        &self,
        env: &TitleEnv<'_>,
        args: Option<&TitleArgs>,
        escape: bool,
    ) -> String {
        let ctx = self.context(env, args);
        maybe_escape(self.decorated_generated(env, &ctx), escape)
    }

    /// Open Graph title: homepage option, item field, then the display title.
    pub fn open_graph_title(
        &self,
        env: &TitleEnv<'_>,
        args: Option<&TitleArgs>,
        escape: bool,
    ) -> String {
        let ctx = self.context(env, args);
        let home = if ctx.is_front() {
            env.options.homepage_og_title.trim()
        } else {
            ""
        };

        let title = if !home.is_empty() {
            home.to_string()
        } else {
            let item = item_field(&ctx, env, |post| &post.og_title);
            if item.is_empty() {
                self.title_for(env, &ctx, false)
            } else {
                item
            }
        };
        maybe_escape(title, escape)
    }

    /// Twitter title: homepage option, item field, then the Open Graph title.
    pub fn twitter_title(
        &self,
        env: &TitleEnv<'_>,
        args: Option<&TitleArgs>,
        escape: bool,
    ) -> String {
        let ctx = self.context(env, args);
        let home = if ctx.is_front() {
            env.options.homepage_twitter_title.trim()
        } else {
            ""
        };

        let title = if !home.is_empty() {
            home.to_string()
        } else {
            let item = item_field(&ctx, env, |post| &post.twitter_title);
            if item.is_empty() {
                self.open_graph_title(env, args, false)
            } else {
                item
            }
        };
        maybe_escape(title, escape)
    }

    /// Every variant at once.
    pub fn title_set(
        &self,
        env: &TitleEnv<'_>,
        args: Option<&TitleArgs>,
        escape: bool,
    ) -> TitleSet {
        TitleSet {
            context: self.context(env, args),
            title: self.get_title(env, args, escape),
            custom_field: self.custom_field_title(env, args, escape),
            generated: self.generated_title(env, args, escape),
            open_graph: self.open_graph_title(env, args, escape),
            twitter: self.twitter_title(env, args, escape),
        }
    }

    fn decorated_custom(&self, env: &TitleEnv<'_>, ctx: &ViewContext) -> String {
        let raw = unprocessed_custom_title(ctx, env);
        let title = self.hooks.custom_field_title(raw, ctx);
        let title = title.trim();
        if title.is_empty() {
            return String::new();
        }

        let policy =
            DecorationPolicy::derive(ctx, env, TitleSource::CustomField, self.protection_blind);
        decorate(title, ctx, env, &self.hooks, &self.separator(env), &policy)
    }

    fn decorated_generated(&self, env: &TitleEnv<'_>, ctx: &ViewContext) -> String {
        let mut raw = generate(ctx, env, &self.hooks);
        if raw.is_empty() {
            raw = UNTITLED.to_string();
        }
        let title = self.hooks.generated_title(raw, ctx);

        let policy =
            DecorationPolicy::derive(ctx, env, TitleSource::Generated, self.protection_blind);
        decorate(&title, ctx, env, &self.hooks, &self.separator(env), &policy)
    }
}

/// The stored custom title for a view, undecorated.
///
/// Front pages read the homepage option, falling back to the static front
/// page's own field. Singular items and terms read their own metadata. Other
/// views have no custom field.
fn unprocessed_custom_title(ctx: &ViewContext, env: &TitleEnv<'_>) -> String {
    match ctx.kind {
        ViewKind::Front => {
            let home = env.options.homepage_title.trim();
            if home.is_empty() {
                item_field(ctx, env, |post| &post.custom_title)
            } else {
                home.to_string()
            }
        }
        ViewKind::Singular => item_field(ctx, env, |post| &post.custom_title),
        ViewKind::Term => lookup_term(ctx, env)
            .map(|term| term.doc_title)
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// A trimmed item-level field of the view's content item, or "".
fn item_field(
    ctx: &ViewContext,
    env: &TitleEnv<'_>,
    field: impl Fn(&Post) -> &String,
) -> String {
    if !matches!(ctx.kind, ViewKind::Front | ViewKind::Singular) {
        return String::new();
    }
    ctx.content_id
        .and_then(|id| env.store.post(id))
        .map(|post| field(&post).trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, RequestState};
    use crate::testing::Fixture;
    use metatitle_shared::{BrandingSide, TitleOptions};

    #[test]
    fn front_page_scenario() {
        let mut fx = Fixture::acme();
        fx.request.front_page = true;
        fx.options.home_title_location = BrandingSide::Right;
        let resolver = TitleResolver::new();
        let env = fx.env();

        let ctx = resolver.context(&env, None);
        assert_eq!(generate(&ctx, &env, &NoHooks), "Acme");
        assert_eq!(resolver.get_title(&env, None, true), "Acme - Widgets Inc");
    }

    #[test]
    fn category_scenario() {
        let fx = Fixture::acme();
        let resolver = TitleResolver::new();
        let args = TitleArgs::term(7, "category");
        assert_eq!(
            resolver.get_title(&fx.env(), Some(&args), false),
            "Category: News - Acme"
        );
    }

    #[test]
    fn search_scenario() {
        let mut fx = Fixture::acme();
        fx.request.search = Some("dogs".into());
        fx.options.title_rem_additions = true;
        let resolver = TitleResolver::new();
        assert_eq!(
            resolver.get_title(&fx.env(), None, false),
            "Search Results for \"dogs\""
        );
        assert_eq!(
            resolver.get_title(&fx.env(), None, true),
            "Search Results for &quot;dogs&quot;"
        );
    }

    #[test]
    fn protected_paginated_singular_scenario() {
        let mut fx = Fixture::acme();
        fx.request.singular_id = Some(42);
        fx.request.page = 2;
        fx.options.title_rem_additions = true;
        let resolver = TitleResolver::new();
        assert_eq!(
            resolver.get_title(&fx.env(), None, true),
            "Protected: Launch Plan - Page 2"
        );
    }

    #[test]
    fn post_format_scenario() {
        let mut fx = Fixture::acme();
        fx.request.archive = Some(crate::store::QueriedArchive::PostFormat {
            slug: "gallery".into(),
        });
        let resolver = TitleResolver::new();
        let ctx = resolver.context(&fx.env(), None);
        assert_eq!(generate(&ctx, &fx.env(), &NoHooks), "Galleries");
        assert_eq!(resolver.get_title(&fx.env(), None, true), "Galleries - Acme");
    }

    #[test]
    fn unknown_scenario_is_untitled() {
        let fx = Fixture::new(
            TitleOptions::default(),
            MemoryStore::default(),
            RequestState::default(),
        );
        let resolver = TitleResolver::new();
        assert_eq!(resolver.get_title(&fx.env(), None, true), UNTITLED);
    }

    #[test]
    fn untitled_is_still_decorated() {
        let fx = Fixture::acme();
        let resolver = TitleResolver::new();
        assert_eq!(resolver.get_title(&fx.env(), None, true), "Untitled - Acme");

        let missing = TitleArgs::item(404);
        assert_eq!(
            resolver.get_title(&fx.env(), Some(&missing), true),
            "Untitled - Acme"
        );
    }

    #[test]
    fn custom_title_wins_over_generated() {
        let fx = Fixture::acme();
        let resolver = TitleResolver::new();
        let args = TitleArgs::item(44);
        assert_eq!(
            resolver.get_title(&fx.env(), Some(&args), false),
            "Hello, Custom - Acme"
        );
        assert_eq!(
            resolver.generated_title(&fx.env(), Some(&args), false),
            "Hello World - Acme"
        );
    }

    #[test]
    fn custom_branding_has_its_own_switch() {
        let mut fx = Fixture::acme();
        fx.options.custom_title_rem_additions = true;
        let resolver = TitleResolver::new();
        let custom = TitleArgs::item(44);
        let plain = TitleArgs::item(45);
        assert_eq!(
            resolver.get_title(&fx.env(), Some(&custom), false),
            "Hello, Custom"
        );
        assert_eq!(
            resolver.get_title(&fx.env(), Some(&plain), false),
            "Plain Post - Acme"
        );
    }

    #[test]
    fn term_custom_title() {
        let fx = Fixture::acme();
        let resolver = TitleResolver::new();
        let args = TitleArgs::term(11, "category");
        assert_eq!(
            resolver.custom_field_title(&fx.env(), Some(&args), false),
            "Breaking Coverage - Acme"
        );
    }

    #[test]
    fn homepage_option_and_static_page_fallback() {
        let mut fx = Fixture::acme();
        fx.options.page_on_front = Some(44);
        fx.request.front_page = true;
        let resolver = TitleResolver::new();
        assert_eq!(
            resolver.get_title(&fx.env(), None, false),
            "Hello, Custom - Widgets Inc"
        );

        resolver.clear_request_cache();
        fx.options.homepage_title = "Welcome".into();
        fx.options.home_title_location = BrandingSide::Left;
        assert_eq!(
            resolver.get_title(&fx.env(), None, false),
            "Widgets Inc - Welcome"
        );
    }

    #[test]
    fn explicit_contexts_skip_pagination_but_keep_protection() {
        let mut fx = Fixture::acme();
        fx.request.page = 4;
        fx.options.title_rem_additions = true;
        let resolver = TitleResolver::new();
        let args = TitleArgs::item(42);
        assert_eq!(
            resolver.get_title(&fx.env(), Some(&args), false),
            "Protected: Launch Plan"
        );
    }

    #[test]
    fn ambient_custom_title_is_paginated() {
        let mut fx = Fixture::acme();
        fx.request.singular_id = Some(44);
        fx.request.paged = 3;
        let resolver = TitleResolver::new();
        assert_eq!(
            resolver.get_title(&fx.env(), None, false),
            "Hello, Custom - Page 3 - Acme"
        );

        let args = TitleArgs::item(44);
        assert_eq!(
            resolver.get_title(&fx.env(), Some(&args), false),
            "Hello, Custom - Acme"
        );

        resolver.clear_request_cache();
        fx.request.admin = true;
        assert_eq!(
            resolver.get_title(&fx.env(), None, false),
            "Hello, Custom - Acme"
        );
    }

    #[test]
    fn rtl_pagination_leads_the_title() {
        let mut fx = Fixture::acme();
        fx.request.singular_id = Some(45);
        fx.request.page = 2;
        fx.request.rtl = true;
        let resolver = TitleResolver::new();
        assert_eq!(
            resolver.get_title(&fx.env(), None, false),
            "Page 2 - Plain Post - Acme"
        );
    }

    #[test]
    fn protection_blind_resolver() {
        let mut fx = Fixture::acme();
        fx.options.title_rem_additions = true;
        let resolver = TitleResolver::new().protection_blind(true);
        let args = TitleArgs::item(43);
        assert_eq!(
            resolver.get_title(&fx.env(), Some(&args), false),
            "Board Minutes"
        );
    }

    #[test]
    fn not_found_is_never_paginated() {
        let mut fx = Fixture::acme();
        fx.request.not_found = true;
        fx.request.paged = 5;
        let resolver = TitleResolver::new();
        assert_eq!(resolver.get_title(&fx.env(), None, false), "404 - Acme");
    }

    #[test]
    fn separator_is_memoized_until_reset() {
        let mut fx = Fixture::acme();
        fx.options.title_separator = "pipe".into();
        let mut resolver = TitleResolver::new();
        assert_eq!(resolver.separator(&fx.env()), "|");

        fx.options.title_separator = "mdash".into();
        assert_eq!(resolver.separator(&fx.env()), "|");

        resolver.reset();
        assert_eq!(resolver.separator(&fx.env()), "\u{2014}");
    }

    #[test]
    fn request_cache_is_keyed_by_escape_flag() {
        let mut fx = Fixture::acme();
        fx.store.site.name = "Salt & Co".into();
        let resolver = TitleResolver::new();
        let args = TitleArgs::item(45);

        assert_eq!(
            resolver.get_title(&fx.env(), Some(&args), true),
            "Plain Post - Salt &amp; Co"
        );
        assert_eq!(
            resolver.get_title(&fx.env(), Some(&args), false),
            "Plain Post - Salt & Co"
        );

        // Cached until the request ends.
        fx.store.site.name = "Renamed".into();
        assert_eq!(
            resolver.get_title(&fx.env(), Some(&args), false),
            "Plain Post - Salt & Co"
        );
        resolver.clear_request_cache();
        assert_eq!(
            resolver.get_title(&fx.env(), Some(&args), false),
            "Plain Post - Renamed"
        );
    }

    #[test]
    fn social_titles_fall_back_in_order() {
        let mut fx = Fixture::acme();
        let resolver = TitleResolver::new();
        let with_og = TitleArgs::item(44);
        let plain = TitleArgs::item(45);

        assert_eq!(
            resolver.open_graph_title(&fx.env(), Some(&with_og), false),
            "Hello, Graph"
        );
        assert_eq!(
            resolver.twitter_title(&fx.env(), Some(&with_og), false),
            "Hello, Graph"
        );
        assert_eq!(
            resolver.open_graph_title(&fx.env(), Some(&plain), false),
            "Plain Post - Acme"
        );

        fx.request.front_page = true;
        fx.options.homepage_twitter_title = "Acme & Friends".into();
        assert_eq!(
            resolver.twitter_title(&fx.env(), None, true),
            "Acme &amp; Friends"
        );
        assert_eq!(
            resolver.open_graph_title(&fx.env(), None, true),
            "Acme - Widgets Inc"
        );
    }

    struct Bracketing;

    impl TitleHooks for Bracketing {
        fn generated_title(&self, title: String, _ctx: &ViewContext) -> String {
            format!("[{title}]")
        }

        fn custom_field_title(&self, title: String, ctx: &ViewContext) -> String {
            if ctx.content_id == Some(45) {
                "Injected".to_string()
            } else {
                title
            }
        }

        fn separator(&self, _glyph: String) -> String {
            "::".to_string()
        }
    }

    #[test]
    fn hooks_filter_both_sources() {
        let fx = Fixture::acme();
        let resolver = TitleResolver::with_hooks(Bracketing);
        assert_eq!(
            resolver.get_title(&fx.env(), Some(&TitleArgs::item(45)), false),
            "Injected :: Acme"
        );
        assert_eq!(
            resolver.generated_title(&fx.env(), Some(&TitleArgs::item(42)), false),
            "Protected: [Launch Plan] :: Acme"
        );
    }

    #[test]
    fn title_set_reports_every_variant() {
        let fx = Fixture::acme();
        let resolver = TitleResolver::new();
        let set = resolver.title_set(&fx.env(), Some(&TitleArgs::item(44)), false);
        assert_eq!(set.context.kind, ViewKind::Singular);
        assert_eq!(set.title, "Hello, Custom - Acme");
        assert_eq!(set.generated, "Hello World - Acme");
        assert_eq!(set.open_graph, "Hello, Graph");
        assert_eq!(set.twitter, "Hello, Graph");
    }
}
