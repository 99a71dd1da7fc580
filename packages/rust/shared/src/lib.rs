//! Shared types, error model, and configuration for MetaTitle.
//!
//! This crate is the foundation depended on by all other MetaTitle crates.
//! It provides:
//! - [`MetaTitleError`]: the unified error type
//! - Domain types ([`ViewKind`], [`ViewContext`], [`TitleArgs`], [`Post`], [`Term`])
//! - Configuration ([`TitleOptions`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BrandingSide, TitleOptions, config_dir, config_file_path, init_config,
    load_config, load_config_from, separator_glyph,
};
pub use error::{MetaTitleError, Result};
pub use types::{
    DateArchive, Post, PostStatus, SiteInfo, TaxonomyLabels, Term, TitleArgs, ViewContext,
    ViewKind,
};
