//! Leadership mapper: one `leaders` collection split into the board of
//! directors and the management team.

use serde_json::Value;

use crate::content::model::{Leader, LeadersData};
use crate::content::probe::{self, Precedence};

const PRECEDENCE: Precedence = Precedence::FlatFirst;

/// Which leadership section an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderGroup {
    /// Board of directors
    Board,
    /// Management team
    Management,
}

impl LeaderGroup {
    /// Classifies the CMS `category` value (`"Board of Directors"`,
    /// `"board"`, `"Management Team"`, `"management"`, ...).
    #[must_use]
    pub fn classify(category: &str) -> Option<Self> {
        let c = category.to_ascii_lowercase();
        if c.contains("board") || c.contains("director") {
            Some(Self::Board)
        } else if c.contains("management") || c.contains("executive") {
            Some(Self::Management)
        } else {
            None
        }
    }
}

/// Maps the `leaders` collection.
///
/// Entries without a name or a recognizable category are skipped; each
/// section is ordered by the CMS `order` field, ties keeping CMS order.
/// Returns `None` when both sections end up empty.
#[must_use]
pub fn map_leaders_data(raw: &Value) -> Option<LeadersData> {
    let mut board: Vec<(i64, Leader)> = Vec::new();
    let mut management: Vec<(i64, Leader)> = Vec::new();

    for entry in probe::entries(raw) {
        let Some(name) = probe::text(entry, &["name", "Name"], PRECEDENCE) else {
            continue;
        };
        let Some(group) = probe::text(entry, &["category", "Category", "type", "Type"], PRECEDENCE)
            .as_deref()
            .and_then(LeaderGroup::classify)
        else {
            continue;
        };
        let order = probe::field_any(entry, &["order", "Order"], PRECEDENCE)
            .and_then(Value::as_i64)
            .unwrap_or(i64::MAX);
        let leader = Leader {
            name,
            designation: probe::text(entry, &["designation", "Designation", "role"], PRECEDENCE)
                .unwrap_or_default(),
            image: probe::media(entry, &["image", "Image", "photo", "Photo"], PRECEDENCE),
            bio: probe::text(entry, &["bio", "Bio", "description"], PRECEDENCE),
        };
        match group {
            LeaderGroup::Board => board.push((order, leader)),
            LeaderGroup::Management => management.push((order, leader)),
        }
    }

    board.sort_by_key(|(order, _)| *order);
    management.sort_by_key(|(order, _)| *order);

    let data = LeadersData {
        board: board.into_iter().map(|(_, l)| l).collect(),
        management: management.into_iter().map(|(_, l)| l).collect(),
    };
    (!data.is_empty()).then_some(data)
}
