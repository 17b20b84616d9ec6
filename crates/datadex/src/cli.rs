//! Clap derive structures for the `datadex` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// datadex -- search, browse, and curate a data catalog from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "datadex",
    version,
    about = "Search and curate your data catalog from the command line",
    long_about = "A command-line client for a data catalog frontend.\n\n\
        Searches tables, people, and dashboards, shows table metadata and\n\
        lineage, manages bookmarks, and files issues and feedback.",
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
    /// Catalog profile to use
    #[arg(long, short = 'p', env = "DATADEX_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Catalog frontend URL (overrides profile)
    #[arg(long, short = 'u', env = "DATADEX_URL", global = true)]
    pub url: Option<String>,

    /// Bearer token (overrides profile credentials)
    #[arg(long, env = "DATADEX_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "DATADEX_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "DATADEX_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "DATADEX_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    pub fn output(&self) -> OutputFormat {
        self.output.clone().unwrap_or(OutputFormat::Table)
    }

    pub fn color(&self) -> ColorMode {
        self.color.clone().unwrap_or(ColorMode::Auto)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
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

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Kinds of catalog resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Table,
    User,
    Dashboard,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search tables, people, and dashboards
    #[command(alias = "s")]
    Search(SearchArgs),

    /// Quick suggestions for a partial term (tables and people)
    Suggest {
        /// Partial search term
        term: String,
    },

    /// List the most popular tables
    Popular,

    /// Show a table's metadata, optionally editing it first
    #[command(alias = "t")]
    Table(TableArgs),

    /// Manage bookmarks
    #[command(alias = "bm")]
    Bookmarks(BookmarksArgs),

    /// List or file data issues for a table
    Issues(IssuesArgs),

    /// Send product feedback
    Feedback(FeedbackArgs),

    /// Show recent announcements
    Announcements,

    /// Show when the search index was last rebuilt
    LastIndexed,

    /// List every tag with its usage count
    Tags,

    /// Ask a table's owners to add a description
    RequestMetadata(RequestMetadataArgs),

    /// Show the logged-in user, or another user by id
    User {
        /// User id (email); omit for the logged-in user
        id: Option<String>,
    },

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SEARCH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Search term
    pub term: String,

    /// Only search this resource kind (paged); omit to search all
    #[arg(long, short = 'r')]
    pub resource: Option<ResourceKind>,

    /// Zero-based page index
    #[arg(long, default_value = "0")]
    pub page: u32,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TABLE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct TableArgs {
    /// Table key (database://cluster.schema/table)
    pub key: String,

    /// Show columns with descriptions and stats
    #[arg(long)]
    pub columns: bool,

    /// Show owners
    #[arg(long)]
    pub owners: bool,

    /// Show tags
    #[arg(long)]
    pub tags: bool,

    /// Show upstream and downstream lineage
    #[arg(long)]
    pub lineage: bool,

    /// Show a data preview sample
    #[arg(long)]
    pub preview: bool,

    /// Replace the table description
    #[arg(long, value_name = "TEXT")]
    pub set_description: Option<String>,

    /// Replace a column description (repeatable)
    #[arg(long, value_name = "COLUMN=TEXT")]
    pub set_column_description: Vec<String>,

    /// Add an owner by user id (repeatable)
    #[arg(long, value_name = "USER")]
    pub add_owner: Vec<String>,

    /// Remove an owner by user id (repeatable)
    #[arg(long, value_name = "USER")]
    pub remove_owner: Vec<String>,

    /// Add a tag (repeatable)
    #[arg(long, value_name = "TAG")]
    pub add_tag: Vec<String>,

    /// Remove a tag (repeatable)
    #[arg(long, value_name = "TAG")]
    pub remove_tag: Vec<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BOOKMARKS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BookmarksArgs {
    #[command(subcommand)]
    pub command: BookmarksCommand,
}

#[derive(Debug, Subcommand)]
pub enum BookmarksCommand {
    /// List bookmarks, grouped by resource kind
    #[command(alias = "ls")]
    List {
        /// Another user's bookmarks instead of your own
        #[arg(long)]
        user: Option<String>,
    },

    /// Bookmark a resource
    Add {
        /// Resource key
        key: String,

        /// Resource kind
        #[arg(long = "type", short = 't', default_value = "table")]
        resource: ResourceKind,
    },

    /// Remove a bookmark
    #[command(alias = "rm")]
    Remove {
        /// Resource key
        key: String,

        /// Resource kind
        #[arg(long = "type", short = 't', default_value = "table")]
        resource: ResourceKind,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ISSUES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct IssuesArgs {
    #[command(subcommand)]
    pub command: IssuesCommand,
}

#[derive(Debug, Subcommand)]
pub enum IssuesCommand {
    /// List open issues for a table
    #[command(alias = "ls")]
    List {
        /// Table key
        key: String,
    },

    /// File a new issue against a table
    Create {
        /// Table key
        key: String,

        /// Issue title
        #[arg(long)]
        title: String,

        /// Issue description
        #[arg(long)]
        description: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  FEEDBACK
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct FeedbackArgs {
    #[command(subcommand)]
    pub command: FeedbackCommand,
}

#[derive(Debug, Subcommand)]
pub enum FeedbackCommand {
    /// Rate the catalog (1-10)
    Rating {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=10))]
        rating: u8,

        /// Optional comment
        #[arg(long, default_value = "")]
        comment: String,
    },

    /// Request a feature
    Request {
        /// What should the feature do
        #[arg(long)]
        summary: String,

        /// Why it matters
        #[arg(long)]
        value_prop: String,

        #[arg(long, default_value = "Feature Request")]
        subject: String,
    },

    /// Report a bug
    Bug {
        /// What went wrong
        #[arg(long)]
        summary: String,

        /// Steps to reproduce
        #[arg(long)]
        repro: String,

        #[arg(long, default_value = "Bug Report")]
        subject: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  REQUEST METADATA
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RequestMetadataArgs {
    /// Table key
    pub key: String,

    /// Ask about one column instead of the whole table
    #[arg(long)]
    pub column: Option<String>,

    /// Free-form note for the owners
    #[arg(long)]
    pub comment: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration
    Show,

    /// Set a profile value
    Set {
        /// Profile key (url, token_env, auth_header, ca_cert, insecure,
        /// timeout, notifications_enabled, index_dashboards, index_users,
        /// issue_tracking)
        key: String,

        /// Value to set
        value: String,
    },

    /// Store the active profile's token in the system keyring
    SetToken,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
