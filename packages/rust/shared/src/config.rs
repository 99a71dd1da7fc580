//! Application configuration for MetaTitle.
//!
//! User config lives at `~/.metatitle/metatitle.toml`.
//! CLI flags override config file values, which override defaults.
//!
//! [`TitleOptions`] is the read-only settings snapshot handed to every
//! resolution call. It is never cached by the pipeline itself.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MetaTitleError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "metatitle.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".metatitle";

/// Glyph used when the separator slug is empty.
const FALLBACK_SEPARATOR: &str = "-";

// ---------------------------------------------------------------------------
// Config structs (matching metatitle.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// CLI defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Title settings.
    #[serde(default)]
    pub title: TitleOptions,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Site snapshot used when `--snapshot` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<String>,
}

/// Which side of the title a branding addition is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrandingSide {
    Left,
    Right,
}

/// `[title]` section: every stored option the title pipeline reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleOptions {
    /// Separator slug, e.g. `hyphen` or `pipe`. See [`separator_glyph`].
    #[serde(default = "default_separator")]
    pub title_separator: String,

    /// Branding side for every view except the front page.
    #[serde(default = "default_location")]
    pub title_location: BrandingSide,

    /// Branding side for the front page.
    #[serde(default = "default_location")]
    pub home_title_location: BrandingSide,

    /// Suppress branding on generated titles (and custom ones).
    #[serde(default)]
    pub title_rem_additions: bool,

    /// Suppress branding on custom-field titles only.
    #[serde(default)]
    pub custom_title_rem_additions: bool,

    /// Drop `Category: `-style prefixes from archive titles.
    #[serde(default)]
    pub title_rem_prefixes: bool,

    /// Custom homepage title.
    #[serde(default)]
    pub homepage_title: String,

    /// Whether the homepage title carries the tagline.
    #[serde(default = "default_true")]
    pub homepage_tagline: bool,

    /// Custom homepage tagline; falls back to the site tagline.
    #[serde(default)]
    pub homepage_title_tagline: String,

    /// Custom homepage Open Graph title.
    #[serde(default)]
    pub homepage_og_title: String,

    /// Custom homepage Twitter title.
    #[serde(default)]
    pub homepage_twitter_title: String,

    /// Id of the static front page, if the site uses one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_on_front: Option<u64>,
}

impl Default for TitleOptions {
    fn default() -> Self {
        Self {
            title_separator: default_separator(),
            title_location: default_location(),
            home_title_location: default_location(),
            title_rem_additions: false,
            custom_title_rem_additions: false,
            title_rem_prefixes: false,
            homepage_title: String::new(),
            homepage_tagline: true,
            homepage_title_tagline: String::new(),
            homepage_og_title: String::new(),
            homepage_twitter_title: String::new(),
            page_on_front: None,
        }
    }
}

fn default_separator() -> String {
    "hyphen".into()
}
fn default_location() -> BrandingSide {
    BrandingSide::Right
}
fn default_true() -> bool {
    true
}

impl TitleOptions {
    /// Whether `id` addresses the front page.
    ///
    /// Id `0` stands for "the posts index", which is the front page only when
    /// no static front page is configured.
    pub fn is_front_page_id(&self, id: u64) -> bool {
        match self.page_on_front {
            Some(front) => front == id,
            None => id == 0,
        }
    }

    /// Archive prefixes are used unless removed.
    pub fn use_archive_prefix(&self) -> bool {
        !self.title_rem_prefixes
    }
}

/// Map a separator slug to its glyph. Unknown slugs are used verbatim.
pub fn separator_glyph(slug: &str) -> String {
    let glyph = match slug {
        "" => FALLBACK_SEPARATOR,
        "pipe" => "|",
        "hyphen" | "dash" => "-",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "bull" => "\u{2022}",
        "middot" => "\u{00b7}",
        "lsaquo" => "\u{2039}",
        "rsaquo" => "\u{203a}",
        "frasl" => "\u{2044}",
        "laquo" => "\u{00ab}",
        "raquo" => "\u{00bb}",
        "le" => "\u{2264}",
        "ge" => "\u{2265}",
        "lt" => "<",
        "gt" => ">",
        other => other,
    };
    glyph.to_string()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.metatitle/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| MetaTitleError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.metatitle/metatitle.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| MetaTitleError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| MetaTitleError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| MetaTitleError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| MetaTitleError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| MetaTitleError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
