//! About Us mapper.

use serde_json::Value;

use crate::content::model::{AboutData, ContentBlock, Stat};
use crate::content::probe::{self, Precedence};

const PRECEDENCE: Precedence = Precedence::AttributesFirst;

/// Maps the `about-us` single type.
///
/// The intro copy may live in an `Intro` component or directly on the
/// entity. Returns `None` when there is neither a heading nor a description.
#[must_use]
pub fn map_about_data(raw: &Value) -> Option<AboutData> {
    let entity = probe::single(raw)?;
    let intro = probe::field_any(entity, &["Intro", "AboutIntro", "intro"], PRECEDENCE);

    let from_intro_or_entity = |keys: &[&str]| {
        intro
            .and_then(|i| probe::text(i, keys, Precedence::FlatFirst))
            .or_else(|| probe::text(entity, keys, PRECEDENCE))
    };

    let about = AboutData {
        heading: from_intro_or_entity(&["Heading", "Title", "heading", "title"]).unwrap_or_default(),
        description: from_intro_or_entity(&["Description", "description"]).unwrap_or_default(),
        vision: block(entity, &["Vision", "vision"]),
        mission: block(entity, &["Mission", "mission"]),
        stats: probe::list(entity, &["Stats", "KeyFigures", "stats"], PRECEDENCE)
            .into_iter()
            .filter_map(stat)
            .collect(),
    };

    if about.heading.is_empty() && about.description.is_empty() {
        return None;
    }
    Some(about)
}

fn block(entity: &Value, keys: &[&str]) -> Option<ContentBlock> {
    let component = probe::field_any(entity, keys, PRECEDENCE)?;
    let p = Precedence::FlatFirst;
    let body = probe::text(component, &["Description", "Body", "description", "body"], p)?;
    Some(ContentBlock {
        heading: probe::text(component, &["Heading", "Title", "heading", "title"], p)
            .unwrap_or_default(),
        body,
    })
}

fn stat(item: &Value) -> Option<Stat> {
    let p = Precedence::FlatFirst;
    Some(Stat {
        value: probe::text(item, &["Value", "Number", "value"], p)?,
        label: probe::text(item, &["Label", "Title", "label"], p).unwrap_or_default(),
    })
}
