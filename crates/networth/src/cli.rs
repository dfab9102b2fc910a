//! Clap derive structures for the `networth` CLI.
//!
//! Defines the command tree, global flags, and shared argument groups.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use networth_core::AssetKind;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// networth -- track cash, holdings, property and equity from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "networth",
    version,
    about = "Manage a networth backend from the command line",
    long_about = "Lists, adds, updates and deletes asset records on a networth backend,\n\
        and reports the resulting net-worth summary.\n\n\
        Asset types: cash, stocks, crypto, real-estate, equity, manual, categories.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "NETWORTH_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend URL (overrides profile)
    #[arg(long, short = 'b', env = "NETWORTH_BACKEND", global = true)]
    pub backend: Option<String>,

    /// API token (overrides profile and keyring)
    #[arg(long, env = "NETWORTH_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "NETWORTH_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "NETWORTH_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "NETWORTH_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List records of one asset type
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a single record
    Show {
        /// Asset type (cash, stocks, crypto, real-estate, equity, manual, categories)
        kind: AssetKind,

        /// Record ID
        id: i64,
    },

    /// Add a record
    #[command(alias = "create")]
    Add(AddArgs),

    /// Update an existing record
    #[command(alias = "edit")]
    Update(UpdateArgs),

    /// Delete a record
    #[command(alias = "rm")]
    Delete {
        /// Asset type
        kind: AssetKind,

        /// Record ID
        id: i64,
    },

    /// Show the form schema for an asset type or category
    Schema(SchemaArgs),

    /// List backend plugins
    Plugins,

    /// Net-worth totals across every asset type
    #[command(alias = "sum")]
    Summary,

    /// Backend health and service status
    Health,

    /// Download the backend's OpenAPI document
    ApiSpec {
        /// Write to a file instead of stdout
        #[arg(long, short = 'O')]
        out: Option<PathBuf>,
    },

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Asset Arguments ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    Id,
    Name,
    /// Highest market value first
    Value,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Asset type (cash, stocks, crypto, real-estate, equity, manual, categories)
    pub kind: AssetKind,

    /// Sort order
    #[arg(long, default_value = "id")]
    pub sort: SortKey,

    /// Show at most this many records
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

/// Record fields, from JSON and/or individual `--set` pairs.
#[derive(Debug, Args)]
pub struct PayloadArgs {
    /// Record fields as a JSON object
    #[arg(long, short = 'd', conflicts_with = "file")]
    pub data: Option<String>,

    /// Read the JSON object from a file
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// Set one field; repeatable (e.g. --set current_balance=5000)
    #[arg(long = "set", short = 's', value_name = "FIELD=VALUE")]
    pub fields: Vec<String>,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Asset type
    pub kind: AssetKind,

    #[command(flatten)]
    pub payload: PayloadArgs,

    /// Validate manual-entry fields against this category's schema
    #[arg(long)]
    pub category: Option<i64>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Asset type
    pub kind: AssetKind,

    /// Record ID
    pub id: i64,

    #[command(flatten)]
    pub payload: PayloadArgs,
}

#[derive(Debug, Args)]
#[command(group = clap::ArgGroup::new("target").required(true).args(["kind", "category"]))]
pub struct SchemaArgs {
    /// Asset type
    pub kind: Option<AssetKind>,

    /// Asset category ID
    #[arg(long)]
    pub category: Option<i64>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (secrets masked)
    Show,

    /// Print the config file location
    Path,

    /// Set a profile value
    Set {
        /// Key: backend, api_token_env, ca_cert, insecure, timeout
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store an API token in the system keyring
    SetToken,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
