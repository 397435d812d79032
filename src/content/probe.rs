//! Tolerant decoding of CMS payloads.
//!
//! The CMS has served two response shapes over its lifetime:
//!
//! ```text
//! legacy: {"data": {"id": 1, "attributes": {"TopBanner": {...}}}}
//! flat:   {"data": {"id": 1, "TopBanner": {...}}}
//! ```
//!
//! and media/relations carry the same split one level down
//! (`{"data": {"attributes": {"url": ...}}}` vs `{"url": ...}`). Every lookup
//! goes through this module with an explicit [`Precedence`] so that a
//! payload mixing both shapes resolves the same way every time.

use serde_json::Value;

use super::model::ImageRef;

/// Which shape wins when both carry a non-null value for the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    /// `attributes.<key>` before `<key>`
    AttributesFirst,
    /// `<key>` before `attributes.<key>`
    FlatFirst,
}

/// The non-null `data` member of an envelope.
#[must_use]
pub fn data(envelope: &Value) -> Option<&Value> {
    envelope.get("data").filter(|v| !v.is_null())
}

/// Entries of a collection envelope. A single-object `data` is treated as a
/// one-element collection; anything else yields nothing.
#[must_use]
pub fn entries(envelope: &Value) -> Vec<&Value> {
    match data(envelope) {
        Some(Value::Array(items)) => items.iter().filter(|v| v.is_object()).collect(),
        Some(item @ Value::Object(_)) => vec![item],
        _ => Vec::new(),
    }
}

/// Looks up `key` on an entity in both shapes.
#[must_use]
pub fn field<'a>(entity: &'a Value, key: &str, precedence: Precedence) -> Option<&'a Value> {
    let legacy = entity
        .get("attributes")
        .and_then(|a| a.get(key))
        .filter(|v| !v.is_null());
    let flat = entity.get(key).filter(|v| !v.is_null());
    match precedence {
        Precedence::AttributesFirst => legacy.or(flat),
        Precedence::FlatFirst => flat.or(legacy),
    }
}

/// First of `keys` present on the entity. Used where the CMS schema has
/// changed casing between versions (`Title` vs `title`).
#[must_use]
pub fn field_any<'a>(entity: &'a Value, keys: &[&str], precedence: Precedence) -> Option<&'a Value> {
    keys.iter().find_map(|k| field(entity, k, precedence))
}

/// Scalar value as non-empty trimmed text. Numbers are stringified.
#[must_use]
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let t = s.trim();
            (!t.is_empty()).then(|| t.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Text field under any of `keys`.
#[must_use]
pub fn text(entity: &Value, keys: &[&str], precedence: Precedence) -> Option<String> {
    keys.iter()
        .find_map(|k| field(entity, k, precedence).and_then(as_text))
}

/// Numeric id of an entity (`id` is always top-level in both shapes).
#[must_use]
pub fn id(entity: &Value) -> Option<u64> {
    entity.get("id").and_then(Value::as_u64)
}

/// Unwraps a media or relation value to the object holding its fields.
///
/// Accepted, in order: `{data: {attributes: {..}}}`, `{data: {..}}`,
/// `{..}`. A `data` array contributes its first element.
#[must_use]
pub fn unwrap_relation(value: &Value) -> Option<&Value> {
    let inner = match value.get("data") {
        Some(Value::Array(items)) => items.first()?,
        Some(Value::Null) => return None,
        Some(d) => d,
        None => match value {
            Value::Array(items) => items.first()?,
            v => v,
        },
    };
    let inner = inner.get("attributes").unwrap_or(inner);
    inner.is_object().then_some(inner)
}

/// Name of a related entry (geography, category, therapy).
#[must_use]
pub fn relation_name(entity: &Value, key: &str, precedence: Precedence) -> Option<String> {
    let value = field(entity, key, precedence)?;
    if let Some(name) = as_text(value) {
        return Some(name);
    }
    let inner = unwrap_relation(value)?;
    text(inner, &["name", "Name", "title", "Title"], Precedence::FlatFirst)
}

/// Image under any of `keys`.
#[must_use]
pub fn media(entity: &Value, keys: &[&str], precedence: Precedence) -> Option<ImageRef> {
    let value = field_any(entity, keys, precedence)?;
    let inner = unwrap_relation(value)?;
    let url = text(inner, &["url"], Precedence::FlatFirst)?;
    let alt = text(
        inner,
        &["alternativeText", "caption", "name"],
        Precedence::FlatFirst,
    )
    .unwrap_or_default();
    Some(ImageRef { url, alt })
}

/// URL of a media file under any of `keys`.
#[must_use]
pub fn media_url(entity: &Value, keys: &[&str], precedence: Precedence) -> Option<String> {
    media(entity, keys, precedence).map(|m| m.url)
}

/// Array under `key`; objects only.
#[must_use]
pub fn list<'a>(entity: &'a Value, keys: &[&str], precedence: Precedence) -> Vec<&'a Value> {
    field_any(entity, keys, precedence)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter(|v| v.is_object()).collect())
        .unwrap_or_default()
}

/// The single-type entity of an envelope, or the value itself when it is
/// already unwrapped.
#[must_use]
pub fn single(envelope: &Value) -> Option<&Value> {
    let entity = if envelope.get("data").is_some() {
        data(envelope)?
    } else {
        envelope
    };
    entity
        .as_object()
        .is_some_and(|m| !m.is_empty())
        .then_some(entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_probes_both_shapes() {
        let legacy = json!({"id": 1, "attributes": {"title": "A"}});
        let flat = json!({"id": 1, "title": "A"});
        assert_eq!(field(&legacy, "title", Precedence::FlatFirst), Some(&json!("A")));
        assert_eq!(field(&flat, "title", Precedence::AttributesFirst), Some(&json!("A")));
    }

    #[test]
    fn precedence_resolves_conflicts() {
        let mixed = json!({"title": "flat", "attributes": {"title": "legacy"}});
        assert_eq!(text(&mixed, &["title"], Precedence::FlatFirst).as_deref(), Some("flat"));
        assert_eq!(
            text(&mixed, &["title"], Precedence::AttributesFirst).as_deref(),
            Some("legacy")
        );
    }

    #[test]
    fn null_does_not_shadow_other_shape() {
        let mixed = json!({"title": null, "attributes": {"title": "legacy"}});
        assert_eq!(text(&mixed, &["title"], Precedence::FlatFirst).as_deref(), Some("legacy"));
    }

    #[test]
    fn text_rejects_blank_and_stringifies_numbers() {
        let e = json!({"a": "   ", "b": 42});
        assert_eq!(text(&e, &["a"], Precedence::FlatFirst), None);
        assert_eq!(text(&e, &["b"], Precedence::FlatFirst).as_deref(), Some("42"));
        assert_eq!(text(&e, &["a", "b"], Precedence::FlatFirst).as_deref(), Some("42"));
    }

    #[test]
    fn entries_accepts_array_or_object() {
        assert_eq!(entries(&json!({"data": [{"id": 1}, {"id": 2}, 3]})).len(), 2);
        assert_eq!(entries(&json!({"data": {"id": 1}})).len(), 1);
        assert!(entries(&json!({"data": null})).is_empty());
        assert!(entries(&Value::Null).is_empty());
    }

    #[test]
    fn relation_name_shapes() {
        let legacy = json!({"geography": {"data": {"id": 3, "attributes": {"name": "India"}}}});
        let mid = json!({"geography": {"data": {"id": 3, "name": "India"}}});
        let flat = json!({"geography": {"id": 3, "name": "India"}});
        let scalar = json!({"geography": "India"});
        for e in [legacy, mid, flat, scalar] {
            assert_eq!(
                relation_name(&e, "geography", Precedence::FlatFirst).as_deref(),
                Some("India"),
                "{e}"
            );
        }
    }

    #[test]
    fn relation_name_missing() {
        let e = json!({"geography": {"data": null}});
        assert_eq!(relation_name(&e, "geography", Precedence::FlatFirst), None);
    }

    #[test]
    fn media_shapes() {
        let legacy = json!({"Image": {"data": {"attributes": {"url": "/uploads/a.png", "alternativeText": "A"}}}});
        let flat = json!({"Image": {"url": "/uploads/a.png", "alternativeText": "A"}});
        let expected = ImageRef {
            url: "/uploads/a.png".into(),
            alt: "A".into(),
        };
        assert_eq!(media(&legacy, &["Image"], Precedence::FlatFirst), Some(expected.clone()));
        assert_eq!(media(&flat, &["Image"], Precedence::FlatFirst), Some(expected));
    }

    #[test]
    fn media_without_url_is_none() {
        let e = json!({"Image": {"data": {"attributes": {"alternativeText": "A"}}}});
        assert_eq!(media(&e, &["Image"], Precedence::FlatFirst), None);
    }

    #[test]
    fn single_unwraps_envelope() {
        let env = json!({"data": {"id": 1, "attributes": {}}});
        assert!(single(&env).is_some());
        assert!(single(&json!({"data": null})).is_none());
        assert!(single(&json!({})).is_none());
    }
}
