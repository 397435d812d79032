//! Fallback catalog loader.
//!
//! Pipeline:
//! 1. Parse the embedded catalog
//! 2. Optionally parse an override file and deep-merge it over the embedded one
//! 3. Deserialize to [`FallbackCatalog`]
//! 4. Fill derived display fields
//! 5. Validate, failing on any error-severity issue
//! 6. Freeze with `Arc`

use std::path::Path;
use std::sync::Arc;

use serde_yaml::Value;

use crate::config::catalog::FallbackCatalog;
use crate::config::env_or;
use crate::error::{ConfigError, Severity, ValidationIssue};

/// The catalog compiled into the binary.
pub const EMBEDDED_CATALOG: &str = include_str!("fallback.yaml");

const EMBEDDED_SOURCE: &str = "<embedded>";

// ============================================================================
// Public API
// ============================================================================

/// Resource limits for catalog loading.
#[derive(Debug, Clone)]
pub struct LoaderLimits {
    /// Maximum override file size in bytes.
    pub max_fallback_size: u64,
}

impl Default for LoaderLimits {
    fn default() -> Self {
        Self {
            max_fallback_size: env_or("PHARMASITE_MAX_FALLBACK_SIZE", 2 * 1024 * 1024),
        }
    }
}

/// A loaded catalog plus the non-fatal issues found while validating it.
#[derive(Debug)]
pub struct LoadResult {
    /// The validated, frozen catalog.
    pub catalog: Arc<FallbackCatalog>,
    /// Warning-severity validation issues.
    pub warnings: Vec<ValidationIssue>,
}

/// Loads the fallback catalog.
#[derive(Debug, Default)]
pub struct CatalogLoader {
    limits: LoaderLimits,
}

impl CatalogLoader {
    /// Creates a loader with the given limits.
    #[must_use]
    pub const fn new(limits: LoaderLimits) -> Self {
        Self { limits }
    }

    /// Loads the embedded catalog only.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded YAML fails to parse or validate.
    pub fn load_embedded(&self) -> Result<LoadResult, ConfigError> {
        let root = parse(EMBEDDED_SOURCE, EMBEDDED_CATALOG)?;
        finish(EMBEDDED_SOURCE, root)
    }

    /// Loads the embedded catalog with `path` deep-merged over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, exceeds the size limit,
    /// fails to parse, or the merged catalog fails validation.
    pub fn load_with_override(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let overlay = self.read_file(path)?;
        let mut root = parse(EMBEDDED_SOURCE, EMBEDDED_CATALOG)?;
        if !overlay.is_null() {
            deep_merge(&mut root, &overlay);
        }
        finish(&path.display().to_string(), root)
    }

    /// Loads `path` as a complete catalog, without the embedded defaults.
    ///
    /// # Errors
    ///
    /// Same as [`load_with_override`](Self::load_with_override).
    pub fn load_standalone(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let root = self.read_file(path)?;
        finish(&path.display().to_string(), root)
    }

    /// Loads the override when given, otherwise the embedded catalog.
    ///
    /// # Errors
    ///
    /// See [`load_with_override`](Self::load_with_override).
    pub fn load(&self, path: Option<&Path>) -> Result<LoadResult, ConfigError> {
        path.map_or_else(|| self.load_embedded(), |p| self.load_with_override(p))
    }

    fn read_file(&self, path: &Path) -> Result<Value, ConfigError> {
        let metadata = std::fs::metadata(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;
        if metadata.len() > self.limits.max_fallback_size {
            return Err(ConfigError::TooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                limit: self.limits.max_fallback_size,
            });
        }

        let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;
        let raw = raw.strip_prefix('\u{feff}').unwrap_or(&raw);
        parse(&path.display().to_string(), raw)
    }
}

// ============================================================================
// Pipeline stages
// ============================================================================

fn parse(source_name: &str, text: &str) -> Result<Value, ConfigError> {
    serde_yaml::from_str(text).map_err(|e| ConfigError::ParseError {
        source_name: source_name.to_string(),
        line: e.location().map(|l| l.line()),
        message: e.to_string(),
    })
}

fn finish(source_name: &str, root: Value) -> Result<LoadResult, ConfigError> {
    let mut catalog: FallbackCatalog =
        serde_yaml::from_value(root).map_err(|e| ConfigError::ParseError {
            source_name: source_name.to_string(),
            line: e.location().map(|l| l.line()),
            message: e.to_string(),
        })?;
    catalog.normalize();

    let (errors, warnings): (Vec<_>, Vec<_>) = catalog
        .validate()
        .into_iter()
        .partition(|i| i.severity == Severity::Error);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationError {
            source_name: source_name.to_string(),
            errors,
        });
    }
    for warning in &warnings {
        tracing::debug!(source = source_name, %warning, "fallback catalog warning");
    }

    Ok(LoadResult {
        catalog: Arc::new(catalog),
        warnings,
    })
}

/// Deep merges `overlay` into `base`.
///
/// Mappings merge key by key; any other value in `overlay` replaces the
/// one in `base`, so lists are replaced wholesale.
fn deep_merge(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                if let Some(existing) = base_map.get_mut(key) {
                    deep_merge(existing, value);
                } else {
                    base_map.insert(key.clone(), value.clone());
                }
            }
        }
        (base, overlay) => {
            *base = overlay.clone();
        }
    }
}
