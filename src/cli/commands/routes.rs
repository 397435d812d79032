//! `routes` command handler

use serde::Serialize;

use crate::cli::args::{OutputFormat, RoutesArgs};
use crate::error::SiteError;
use crate::pages::{LISTED, Route};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RouteEntry {
    path: &'static str,
    title: &'static str,
    banner: Option<&'static str>,
    listing: bool,
}

impl From<&Route> for RouteEntry {
    fn from(route: &Route) -> Self {
        Self {
            path: route.pattern(),
            title: route.title(),
            banner: route.banner_key(),
            listing: route.is_listing(),
        }
    }
}

fn entries() -> Vec<RouteEntry> {
    let detail = Route::PressReleaseDetail {
        slug: String::new(),
    };
    LISTED
        .iter()
        .chain(std::iter::once(&detail))
        .map(RouteEntry::from)
        .collect()
}

/// Print every route, including the press-release detail pattern.
///
/// # Errors
///
/// Returns a JSON error if serialization fails.
pub fn run(args: &RoutesArgs) -> Result<(), SiteError> {
    let entries = entries();
    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Human => {
            for entry in &entries {
                let marker = if entry.listing { "  (filterable)" } else { "" };
                println!("{:<32}{}{marker}", entry.path, entry.title);
            }
        }
    }
    Ok(())
}
