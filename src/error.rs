//! Error types for `pharmasite`
//!
//! Every fallible layer has its own error enum; [`SiteError`] aggregates them
//! for the CLI and maps each to a process exit code.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `pharmasite` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid fallback catalog, bad flag values)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, bind failure)
    pub const IO_ERROR: i32 = 3;

    /// CMS error surfaced outside the page fallback path
    pub const CMS_ERROR: i32 = 4;

    /// Requested page does not exist
    pub const NOT_FOUND: i32 = 5;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `pharmasite` operations.
#[derive(Debug, Error)]
pub enum SiteError {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// CMS access error
    #[error(transparent)]
    Cms(#[from] CmsError),

    /// Page assembly error
    #[error(transparent)]
    Page(#[from] PageError),

    /// Page rendering error
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Invalid command-line usage
    #[error("usage error: {0}")]
    Usage(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SiteError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Json(_) => ExitCode::CONFIG_ERROR,
            Self::Cms(_) => ExitCode::CMS_ERROR,
            Self::Page(PageError::NotFound { .. }) => ExitCode::NOT_FOUND,
            Self::Page(_) | Self::Render(_) => ExitCode::ERROR,
            Self::Usage(_) => ExitCode::USAGE_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing failed
    #[error("parse error in {source_name}: {message}")]
    ParseError {
        /// File path, or `<embedded>` for the built-in catalog
        source_name: String,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Fallback catalog validation failed
    #[error("validation failed for {source_name}")]
    ValidationError {
        /// File path, or `<embedded>` for the built-in catalog
        source_name: String,
        /// List of validation issues found
        errors: Vec<ValidationIssue>,
    },

    /// Referenced configuration file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Configuration file exceeds the size limit
    #[error("{path} is {size} bytes (limit: {limit})")]
    TooLarge {
        /// Path to the oversized file
        path: PathBuf,
        /// Actual size in bytes
        size: u64,
        /// Configured limit in bytes
        limit: u64,
    },
}

// ============================================================================
// Validation Types
// ============================================================================

/// A single issue found while validating the fallback catalog.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Path to the problematic field (e.g., "leaders.board[2].name")
    pub path: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.message, self.path)
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Prevents the catalog from being used
    Error,
    /// Reported but does not block loading
    Warning,
}

// ============================================================================
// CMS Errors
// ============================================================================

/// Failures talking to the headless CMS.
///
/// Page assemblers treat every variant the same way (log, then fall back);
/// the distinction exists for logs and metrics.
#[derive(Debug, Error)]
pub enum CmsError {
    /// Connection refused, DNS failure, reset, ...
    #[error("network error: {0}")]
    Network(String),

    /// The CMS answered with a non-2xx status
    #[error("CMS returned HTTP {status} for {endpoint}")]
    HttpStatus {
        /// Content-type endpoint that was requested
        endpoint: String,
        /// HTTP status code
        status: u16,
        /// Error message extracted from the response body, if any
        message: Option<String>,
    },

    /// The response body was not valid JSON
    #[error("invalid CMS response from {endpoint}: {message}")]
    Decode {
        /// Content-type endpoint that was requested
        endpoint: String,
        /// Parser error message
        message: String,
    },

    /// The request URL could not be built
    #[error("invalid CMS URL: {0}")]
    InvalidUrl(String),

    /// No CMS is configured (offline rendering)
    #[error("CMS unavailable: {0}")]
    Unavailable(String),
}

impl CmsError {
    /// Short label used for the `outcome` metrics dimension.
    #[must_use]
    pub const fn outcome(&self) -> &'static str {
        match self {
            Self::Network(_) => "network_error",
            Self::HttpStatus { .. } => "http_error",
            Self::Decode { .. } => "decode_error",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Unavailable(_) => "unavailable",
        }
    }
}

impl From<reqwest::Error> for CmsError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

// ============================================================================
// Page Errors
// ============================================================================

/// Page resolution errors.
#[derive(Debug, Error)]
pub enum PageError {
    /// No route matches the requested path, or a slug does not resolve
    #[error("page not found: {path}")]
    NotFound {
        /// Requested path
        path: String,
    },
}

// ============================================================================
// Render Errors
// ============================================================================

/// HTML rendering errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A component that requires data was given none
    #[error("component '{component}' requires data but none was supplied")]
    MissingData {
        /// Component name
        component: &'static str,
    },
}

// ============================================================================
// Contact Form Errors
// ============================================================================

/// Contact Us submission errors. The `Display` text is what the visitor sees.
#[derive(Debug, Error)]
pub enum ContactError {
    /// Client-side validation failed
    #[error("{0}")]
    Invalid(String),

    /// The CMS rejected or never received the lead
    #[error("{0}")]
    Submission(String),
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `pharmasite` operations.
pub type Result<T> = std::result::Result<T, SiteError>;

// ============================================================================
// Tests
// ============================================================================
