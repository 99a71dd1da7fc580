//! Title resolution and decoration for MetaTitle.
//!
//! A view is classified into a [`ViewContext`](metatitle_shared::ViewContext),
//! its custom-field title is preferred over the generated fallback, and the
//! winner is decorated (protection, pagination, branding) before it is
//! escaped once at the boundary. [`TitleResolver`] is the entry point.

pub mod context;
pub mod decorate;
pub mod escape;
pub mod generate;
pub mod hooks;
pub mod resolver;
pub mod store;

#[cfg(test)]
mod testing;

pub use decorate::{DecorationPolicy, TitleSource};
pub use escape::escape_title;
pub use hooks::{NoHooks, TitleHooks};
pub use resolver::{TitleResolver, TitleSet, UNTITLED};
pub use store::{
    ContentStore, MemoryStore, QueriedArchive, RequestState, SiteSnapshot, TitleEnv,
};
