//! CLI argument definitions
//!
//! All Clap derive structs for `pharmasite` command-line parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::config::SiteConfig;
use crate::observability::LogFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// CMS-backed corporate site with fallback-first page assembly.
#[derive(Parser, Debug)]
#[command(name = "pharmasite", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "PHARMASITE_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(
        long,
        default_value = "human",
        global = true,
        env = "PHARMASITE_LOG_FORMAT"
    )]
    pub log_format: LogFormat,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the site over HTTP.
    Serve(ServeArgs),

    /// Render one page to stdout.
    Render(RenderArgs),

    /// List the site's routes.
    Routes(RoutesArgs),

    /// Validate fallback content files without serving.
    CheckFallbacks(CheckFallbacksArgs),

    /// Display version and build information.
    Version(VersionArgs),
}

// ============================================================================
// Shared Site Arguments
// ============================================================================

/// CMS connection and fallback content settings.
#[derive(Args, Debug, Clone)]
pub struct SiteArgs {
    /// CMS origin.
    #[arg(long, default_value = "http://localhost:1337", env = "PHARMASITE_CMS_URL")]
    pub cms_url: String,

    /// CMS API token.
    #[arg(long, env = "PHARMASITE_CMS_TOKEN", hide_env_values = true)]
    pub cms_token: Option<String>,

    /// Public origin of the site, used for canonical links.
    #[arg(long, default_value = "http://localhost:3000", env = "PHARMASITE_SITE_URL")]
    pub site_url: String,

    /// How long a CMS response is reused (e.g. `60s`, `5m`, `0s`).
    #[arg(
        long,
        default_value = "60s",
        value_parser = humantime::parse_duration,
        env = "PHARMASITE_REVALIDATE"
    )]
    pub revalidate: Duration,

    /// Deployment environment.
    #[arg(long, default_value = "development", env = "PHARMASITE_ENV")]
    pub environment: String,

    /// YAML file deep-merged over the built-in fallback content.
    #[arg(long, env = "PHARMASITE_FALLBACKS")]
    pub fallbacks: Option<PathBuf>,
}

impl SiteArgs {
    /// Runtime settings from the parsed flags.
    #[must_use]
    pub fn to_config(&self) -> SiteConfig {
        SiteConfig {
            cms_url: self.cms_url.clone(),
            cms_token: self.cms_token.clone().filter(|t| !t.is_empty()),
            site_url: self.site_url.clone(),
            revalidate: self.revalidate,
            environment: self.environment.clone(),
        }
    }
}

// ============================================================================
// Serve / Render / Routes
// ============================================================================

/// Arguments for `serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Site settings.
    #[command(flatten)]
    pub site: SiteArgs,

    /// Bind address as `[host:]port`.
    #[arg(long, default_value = ":3000", env = "PHARMASITE_BIND")]
    pub bind: String,

    /// Expose Prometheus metrics on this port.
    #[arg(long, env = "PHARMASITE_METRICS_PORT")]
    pub metrics_port: Option<u16>,
}

/// Arguments for `render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Site path, e.g. `/about-us` or `/media/press-releases?q=launch&page=2`.
    pub path: String,

    /// Output format.
    #[arg(short, long, default_value = "html")]
    pub format: RenderFormat,

    /// Use fallback content only; never contact the CMS.
    #[arg(long)]
    pub offline: bool,

    /// Write to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Site settings.
    #[command(flatten)]
    pub site: SiteArgs,
}

/// Arguments for `routes`.
#[derive(Args, Debug)]
pub struct RoutesArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// Check Fallbacks
// ============================================================================

/// Arguments for `check-fallbacks`.
#[derive(Args, Debug)]
pub struct CheckFallbacksArgs {
    /// Fallback files to validate.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Validate each file as a complete catalog instead of an override.
    #[arg(long)]
    pub standalone: bool,

    /// Enable strict validation (warnings become errors).
    #[arg(long)]
    pub strict: bool,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// Version
// ============================================================================

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Output of `render`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RenderFormat {
    /// Complete HTML document.
    #[default]
    Html,
    /// The assembled page view-model.
    Json,
}

// ============================================================================
// Tests
// ============================================================================
