//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use metatitle_core::{SiteSnapshot, TitleEnv, TitleResolver};
use metatitle_shared::{AppConfig, TitleArgs, init_config, load_config, load_config_from};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// MetaTitle: resolve metadata titles for site views.
#[derive(Parser)]
#[command(
    name = "metatitle",
    version,
    about = "Resolve decorated metadata titles for front pages, items, and archives.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ~/.metatitle/metatitle.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Title output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Which view to resolve. Without `--id`/`--taxonomy` the snapshot's request is used.
#[derive(Args, Debug)]
pub(crate) struct ViewArgs {
    /// Site snapshot (TOML). Defaults to `defaults.snapshot` from the config.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Content item or term id.
    #[arg(long)]
    pub id: Option<u64>,

    /// Taxonomy; makes `--id` a term id.
    #[arg(long)]
    pub taxonomy: Option<String>,

    /// Print unescaped titles.
    #[arg(long)]
    pub raw: bool,
}

impl ViewArgs {
    fn title_args(&self) -> Option<TitleArgs> {
        if self.id.is_none() && self.taxonomy.is_none() {
            return None;
        }
        Some(TitleArgs {
            id: self.id,
            taxonomy: self.taxonomy.clone(),
        })
    }
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Resolve the display title of a view.
    Resolve {
        #[command(flatten)]
        view: ViewArgs,

        /// Output format: text prints the title, json prints every variant.
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Resolve the Open Graph and Twitter titles of a view.
    Social {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr; titles to stdout.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "metatitle=info",
        1 => "metatitle=debug",
        _ => "metatitle=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Resolve { view, format } => cmd_resolve(config_path, &view, &format),
        Command::Social { view } => cmd_social(config_path, &view),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn read_config(path: Option<&Path>) -> Result<AppConfig> {
    Ok(match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    })
}

/// Load the config and the snapshot; snapshot options override the config's.
fn load_site(config_path: Option<&Path>, view: &ViewArgs) -> Result<(AppConfig, SiteSnapshot)> {
    let mut config = read_config(config_path)?;

    let snapshot_path = view
        .snapshot
        .clone()
        .or_else(|| config.defaults.snapshot.as_ref().map(PathBuf::from))
        .ok_or_else(|| eyre!("no snapshot given; pass --snapshot or set defaults.snapshot"))?;

    let mut snapshot = SiteSnapshot::load(&snapshot_path)?;
    if let Some(options) = snapshot.options.take() {
        config.title = options;
    }

    info!(snapshot = %snapshot_path.display(), "site snapshot loaded");
    Ok((config, snapshot))
}

fn cmd_resolve(config_path: Option<&Path>, view: &ViewArgs, format: &OutputFormat) -> Result<()> {
    let (config, snapshot) = load_site(config_path, view)?;
    let env = TitleEnv::new(&config.title, &snapshot.store, &snapshot.request);
    let resolver = TitleResolver::new();
    let args = view.title_args();
    let escape = !view.raw;

    match format {
        OutputFormat::Text => {
            println!("{}", resolver.get_title(&env, args.as_ref(), escape));
        }
        OutputFormat::Json => {
            let set = resolver.title_set(&env, args.as_ref(), escape);
            println!("{}", serde_json::to_string_pretty(&set)?);
        }
    }
    Ok(())
}

fn cmd_social(config_path: Option<&Path>, view: &ViewArgs) -> Result<()> {
    let (config, snapshot) = load_site(config_path, view)?;
    let env = TitleEnv::new(&config.title, &snapshot.store, &snapshot.request);
    let resolver = TitleResolver::new();
    let args = view.title_args();
    let escape = !view.raw;

    println!(
        "og:title       {}",
        resolver.open_graph_title(&env, args.as_ref(), escape)
    );
    println!(
        "twitter:title  {}",
        resolver.twitter_title(&env, args.as_ref(), escape)
    );
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = read_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
