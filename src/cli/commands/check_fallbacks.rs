//! `check-fallbacks` command handler
//!
//! Loads each file the way `serve --fallbacks` would (deep-merged over the
//! built-in content) or, with `--standalone`, as a complete catalog.

use serde::Serialize;
use tracing::{info, warn};

use crate::cli::args::{CheckFallbacksArgs, OutputFormat};
use crate::config::CatalogLoader;
use crate::error::{ConfigError, SiteError};

#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    warnings: Vec<String>,
}

/// Validate fallback files without serving.
///
/// # Errors
///
/// Returns the first file's config error: missing, too large, unparsable,
/// invalid, or (with `--strict`) carrying warnings.
pub fn run(args: &CheckFallbacksArgs) -> Result<(), SiteError> {
    let loader = CatalogLoader::default();
    let mut reports = Vec::with_capacity(args.files.len());

    for path in &args.files {
        info!(file = %path.display(), "validating fallback content");
        let result = if args.standalone {
            loader.load_standalone(path)?
        } else {
            loader.load_with_override(path)?
        };

        for warning in &result.warnings {
            warn!(file = %path.display(), location = %warning.path, "{}", warning.message);
        }
        if args.strict && !result.warnings.is_empty() {
            return Err(ConfigError::ValidationError {
                source_name: path.display().to_string(),
                errors: result.warnings,
            }
            .into());
        }

        reports.push(FileReport {
            file: path.display().to_string(),
            warnings: result.warnings.iter().map(ToString::to_string).collect(),
        });
    }

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Human => {
            for report in &reports {
                match report.warnings.len() {
                    0 => println!("{}: ok", report.file),
                    n => println!("{}: ok ({n} warning{})", report.file, if n == 1 { "" } else { "s" }),
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn args(files: Vec<PathBuf>, standalone: bool) -> CheckFallbacksArgs {
        CheckFallbacksArgs {
            files,
            standalone,
            strict: false,
            format: OutputFormat::Json,
        }
    }

    #[test]
    fn override_file_passes() {
        let file = write_temp("about:\n  heading: Caring for Life\n");
        run(&args(vec![file.path().to_path_buf()], false)).unwrap();
    }

    #[test]
    fn partial_file_fails_standalone() {
        let file = write_temp("about:\n  heading: Caring for Life\n");
        let err = run(&args(vec![file.path().to_path_buf()], true)).unwrap_err();
        assert!(matches!(
            err,
            SiteError::Config(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn missing_file() {
        let err = run(&args(vec![PathBuf::from("/nonexistent/fallbacks.yaml")], false))
            .unwrap_err();
        assert!(matches!(err, SiteError::Config(ConfigError::MissingFile { .. })));
    }

    #[test]
    fn unknown_key_is_a_parse_error() {
        let file = write_temp("careers:\n  heading: Join us\n");
        let err = run(&args(vec![file.path().to_path_buf()], false)).unwrap_err();
        assert!(matches!(err, SiteError::Config(ConfigError::ParseError { .. })));
    }
}
