//! Player records.
//!
//! One player per power, keyed in the state by an opaque sender identity.
//! Players accumulate build-phase submissions in an ordered pending list;
//! movement and retreat submissions land on the units directly.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::unit::{UnitId, UnitKind};

/// A queued build-phase submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BuildEntry {
    /// Create a unit in an owned, unoccupied supply center.
    #[serde(rename_all = "camelCase")]
    Build {
        kind: UnitKind,
        region: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        coast: Option<String>,
    },
    /// Remove one of the player's units.
    Disband { unit: UnitId },
}

/// One of the seven powers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Power name, e.g. "Austria".
    pub name: String,
    /// Opaque sender identity; duplicated as the state map key.
    pub identity: String,
    #[serde(rename = "unitIds")]
    pub unit_ids: BTreeSet<UnitId>,
    /// Owned supply-center count as of the last build phase; also the
    /// unit budget.
    #[serde(rename = "supplyCenters")]
    pub supply_centers: u32,
    pub ready: bool,
    #[serde(rename = "pendingBuilds")]
    pub pending_builds: Vec<BuildEntry>,
}

impl Player {
    pub fn new(name: &str, identity: &str, supply_centers: u32) -> Player {
        Player {
            name: name.to_string(),
            identity: identity.to_string(),
            unit_ids: BTreeSet::new(),
            supply_centers,
            ready: false,
            pending_builds: Vec::new(),
        }
    }
}
