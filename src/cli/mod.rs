//! CLI argument definitions and command dispatch.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Lower-third configurator - configuration state and synchronization
/// engine for live-stream broadcast overlays.
///
/// Robot Mode: Use --robot or --format=json for machine-parseable output.
#[derive(Parser, Debug)]
#[command(name = "ltc", version, about, long_about = None)]
#[command(propagate_version = true)]
#[allow(clippy::struct_excessive_bools)] // CLI flags naturally use multiple bools
pub struct Cli {
    /// Output format (text for humans, json for agents/scripts)
    #[arg(
        long,
        short = 'f',
        default_value = "text",
        global = true,
        env = "LTC_FORMAT"
    )]
    pub format: OutputFormat,

    /// Robot mode: equivalent to --format=json
    #[arg(long, global = true)]
    pub robot: bool,

    /// Verbose output (show debug information)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Quiet mode (suppress non-essential output)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Store document path (defaults to the platform data directory)
    #[arg(long, short = 's', global = true, env = "LTC_STORE")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with optional color
    #[default]
    Text,
    /// JSON output for scripts and agents
    Json,
    /// Compact JSON (single line)
    JsonCompact,
}

impl Cli {
    /// Returns true if output should be JSON (robot mode or explicit --format=json).
    pub const fn use_json(&self) -> bool {
        self.robot || matches!(self.format, OutputFormat::Json | OutputFormat::JsonCompact)
    }

    /// Returns true if output should be compact JSON.
    pub const fn use_compact_json(&self) -> bool {
        matches!(self.format, OutputFormat::JsonCompact)
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    // === Profile Lifecycle ===
    /// Create a profile with the built-in default preset
    Init(InitArgs),

    /// Show a profile, or list all stored profiles
    Show(ShowArgs),

    /// Set a single configuration field through a leaf store write
    Set(SetArgs),

    /// Upgrade a legacy profile record to the current schema
    Migrate(MigrateArgs),

    // === Analysis ===
    /// Validate a profile's configuration
    Validate(ValidateArgs),

    /// Suggest configuration improvements
    Recommend(RecommendArgs),

    // === Transforms ===
    /// Rescale a configuration to a new canvas resolution
    Scale(ScaleArgs),

    /// Export a configuration for a downstream renderer
    Export(ExportArgs),

    // === Utilities ===
    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// === Argument Structs ===

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Profile name (unique store key)
    pub name: String,

    /// Overwrite an existing profile
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Profile name (omit with --list)
    pub name: Option<String>,

    /// List all stored profile names
    #[arg(long, short = 'l')]
    pub list: bool,
}

/// Arguments for a single-field edit.
///
/// # Examples
///
/// ```bash
/// # Hide the logo without rewriting the whole record
/// ltc set "Noticias" logo.visible false
///
/// # Replace the caption text
/// ltc set "Noticias" main_text.content "Breaking news"
/// ```
#[derive(Parser, Debug)]
pub struct SetArgs {
    /// Profile name
    pub name: String,

    /// Dot-separated field path inside the configuration,
    /// e.g. "main_text.visible" or "logo.visible"
    pub path: String,

    /// New value, parsed as JSON when possible, otherwise taken as a
    /// bare string
    pub value: String,
}

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Profile name
    pub name: String,
}

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Profile name
    pub name: String,
}

#[derive(Parser, Debug)]
pub struct RecommendArgs {
    /// Profile name
    pub name: String,
}

#[derive(Parser, Debug)]
pub struct ScaleArgs {
    /// Profile name
    pub name: String,

    /// Target canvas width in pixels
    pub width: u32,

    /// Target canvas height in pixels
    pub height: u32,

    /// Persist the rescaled configuration back to the store
    #[arg(long)]
    pub save: bool,
}

#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Profile name
    pub name: String,

    /// Export target
    #[arg(long, short = 't', default_value = "obs")]
    pub target: ExportTarget,

    /// Base URL for companion-app endpoint templating (web target only)
    #[arg(long, default_value = "http://localhost:8420")]
    pub base_url: String,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ExportTarget {
    /// OBS-style JSON document
    #[default]
    Obs,
    /// Stylesheet for browser-source renderers
    Css,
    /// Companion-app web payload
    Web,
}

#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
