//! Card-grid mappers: community initiatives and business segments.

use serde_json::Value;

use crate::content::model::{Card, CardGrid, Link};
use crate::content::probe::{self, Precedence};

const PRECEDENCE: Precedence = Precedence::AttributesFirst;

/// Maps the `Initiatives` component of the `community` single type.
#[must_use]
pub fn map_community_initiatives(raw: &Value) -> Option<CardGrid> {
    map_card_grid(raw, &["Initiatives", "initiatives", "Programs"])
}

/// Maps the `Segments` component of the `our-business` single type.
#[must_use]
pub fn map_business_segments(raw: &Value) -> Option<CardGrid> {
    map_card_grid(raw, &["Segments", "Businesses", "segments"])
}

/// Maps a `{Heading, Description, Cards: [...]}` component found under any
/// of `keys`. Returns `None` when it has no usable card.
#[must_use]
pub fn map_card_grid(raw: &Value, keys: &[&str]) -> Option<CardGrid> {
    let entity = probe::single(raw)?;
    let component = probe::field_any(entity, keys, PRECEDENCE)?;
    let p = Precedence::FlatFirst;

    let cards: Vec<Card> = probe::list(component, &["Cards", "Items", "cards", "items"], p)
        .into_iter()
        .filter_map(card)
        .collect();
    if cards.is_empty() {
        return None;
    }

    Some(CardGrid {
        heading: probe::text(component, &["Heading", "Title", "heading"], p).unwrap_or_default(),
        intro: probe::text(component, &["Description", "Intro", "description"], p),
        cards,
    })
}

fn card(item: &Value) -> Option<Card> {
    let p = Precedence::FlatFirst;
    let title = probe::text(item, &["Title", "Heading", "title"], p)?;
    let link = match (
        probe::text(item, &["LinkLabel", "linkLabel"], p),
        probe::text(item, &["LinkUrl", "Link", "linkUrl", "url"], p),
    ) {
        (label, Some(href)) => Some(Link {
            label: label.unwrap_or_else(|| "Know more".to_string()),
            href,
        }),
        (_, None) => None,
    };
    Some(Card {
        title,
        description: probe::text(item, &["Description", "description"], p).unwrap_or_default(),
        image: probe::media(item, &["Image", "image", "Icon"], p),
        link,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_initiatives() {
        let raw = json!({"data": {"id": 1, "attributes": {"Initiatives": {
            "Heading": "Our Initiatives",
            "Description": "Programs we run with communities.",
            "Cards": [
                {"Title": "Health", "Description": "Mobile clinics", "LinkUrl": "/community/health"},
                {"Description": "no title"},
                {"Title": "Education", "Image": {"data": {"attributes": {"url": "/uploads/edu.jpg"}}}}
            ]
        }}}});
        let grid = map_community_initiatives(&raw).unwrap();
        assert_eq!(grid.heading, "Our Initiatives");
        assert_eq!(grid.cards.len(), 2);
        assert_eq!(grid.cards[0].link.as_ref().unwrap().label, "Know more");
        assert!(grid.cards[1].link.is_none());
        assert_eq!(grid.cards[1].image.as_ref().unwrap().url, "/uploads/edu.jpg");
    }

    #[test]
    fn segments_flat_shape() {
        let raw = json!({"data": {"Segments": {"Heading": "Our Business",
            "Cards": [{"Title": "Generics", "Description": "Affordable medicines"}]}}});
        let grid = map_business_segments(&raw).unwrap();
        assert_eq!(grid.cards[0].title, "Generics");
    }

    #[test]
    fn no_cards_is_none() {
        let raw = json!({"data": {"Segments": {"Heading": "Our Business", "Cards": []}}});
        assert!(map_business_segments(&raw).is_none());
    }
}
