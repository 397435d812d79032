//! Product-finder mapper.

use serde_json::Value;

use crate::content::model::{Pagination, Product};
use crate::content::probe::{self, Precedence};

const PRECEDENCE: Precedence = Precedence::FlatFirst;

/// Maps one product entry. Relations are probed in both shapes.
#[must_use]
pub fn map_product(entry: &Value) -> Option<Product> {
    Some(Product {
        id: probe::id(entry),
        name: probe::text(entry, &["name", "Name", "title"], PRECEDENCE)?,
        composition: probe::text(entry, &["composition", "Composition", "molecule"], PRECEDENCE),
        dosage_form: probe::text(entry, &["dosageForm", "DosageForm", "form"], PRECEDENCE),
        strength: probe::text(entry, &["strength", "Strength"], PRECEDENCE),
        pack_size: probe::text(entry, &["packSize", "PackSize"], PRECEDENCE),
        geography: probe::relation_name(entry, "geography", PRECEDENCE),
        category: probe::relation_name(entry, "category", PRECEDENCE),
        therapy: probe::relation_name(entry, "therapy", PRECEDENCE)
            .or_else(|| probe::relation_name(entry, "therapyArea", PRECEDENCE)),
    })
}

/// Maps the product collection.
#[must_use]
pub fn map_products(raw: &Value) -> Vec<Product> {
    probe::entries(raw)
        .into_iter()
        .filter_map(map_product)
        .collect()
}

/// Reads `meta.pagination`. Missing members default to zero.
#[must_use]
pub fn map_pagination(raw: &Value) -> Option<Pagination> {
    let p = raw.get("meta")?.get("pagination")?;
    let num = |key: &str| p.get(key).and_then(Value::as_u64).unwrap_or(0);
    Some(Pagination {
        page: u32::try_from(num("page")).unwrap_or(u32::MAX),
        page_size: u32::try_from(num("pageSize")).unwrap_or(u32::MAX),
        page_count: u32::try_from(num("pageCount")).unwrap_or(u32::MAX),
        total: num("total"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_and_flat_products_match() {
        let legacy = json!({"id": 7, "attributes": {
            "name": "Paracetamol",
            "composition": "Paracetamol IP 500 mg",
            "geography": {"data": {"id": 1, "attributes": {"name": "India"}}},
            "category": {"data": {"id": 2, "attributes": {"name": "Branded Generics"}}},
            "therapy": {"data": {"id": 3, "attributes": {"name": "Pain Management"}}}
        }});
        let flat = json!({"id": 7,
            "name": "Paracetamol",
            "composition": "Paracetamol IP 500 mg",
            "geography": {"id": 1, "name": "India"},
            "category": {"id": 2, "name": "Branded Generics"},
            "therapy": {"id": 3, "name": "Pain Management"}
        });
        let a = map_product(&legacy).unwrap();
        assert_eq!(a, map_product(&flat).unwrap());
        assert_eq!(a.geography.as_deref(), Some("India"));
        assert_eq!(a.id, Some(7));
    }

    #[test]
    fn nameless_product_dropped() {
        let raw = json!({"data": [{"id": 1}, {"id": 2, "name": "Tiotropium"}]});
        let products = map_products(&raw);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Tiotropium");
    }

    #[test]
    fn pagination_meta() {
        let raw = json!({"data": [], "meta": {"pagination": {"page": 2, "pageSize": 12, "pageCount": 5, "total": 57}}});
        assert_eq!(
            map_pagination(&raw),
            Some(Pagination {
                page: 2,
                page_size: 12,
                page_count: 5,
                total: 57
            })
        );
        assert_eq!(map_pagination(&json!({"data": []})), None);
    }
}
