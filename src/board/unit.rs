//! Units and their ownership.

use serde::{Deserialize, Serialize};

use super::order::Order;
use super::region::RegionKind;

/// Stable unit identifier. Assigned once at creation from the state-owned
/// counter and never reused within a game.
pub type UnitId = u32;

/// The mobility class of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Army,
    Navy,
}

impl UnitKind {
    /// Parses the wire name used by build payloads.
    pub fn from_wire(s: &str) -> Option<UnitKind> {
        match s {
            "army" => Some(UnitKind::Army),
            "navy" => Some(UnitKind::Navy),
            _ => None,
        }
    }

    /// Returns true if a unit of this kind may stand on the given terrain.
    pub fn can_enter(self, kind: RegionKind) -> bool {
        match self {
            UnitKind::Army => kind != RegionKind::Sea,
            UnitKind::Navy => kind != RegionKind::Land,
        }
    }
}

/// A unit on the board.
///
/// Cross-references go through the central store: the position is a region
/// name and the owner is the player's sender identity. The order lives one
/// phase; it is reset to `Hold` when the phase resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub kind: UnitKind,
    pub position: String,
    /// The occupied coast, for navies on split-coast regions.
    #[serde(rename = "subPosition", default, skip_serializing_if = "Option::is_none")]
    pub sub_position: Option<String>,
    /// Sender identity of the owning player.
    pub owner: String,
    #[serde(rename = "currentOrder")]
    pub order: Order,
    /// Set to the attacker's origin region while the unit is dislodged;
    /// cleared when the retreat phase resolves.
    #[serde(rename = "dislodgedFrom", default, skip_serializing_if = "Option::is_none")]
    pub dislodged_from: Option<String>,
}

impl Unit {
    pub fn is_dislodged(&self) -> bool {
        self.dislodged_from.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_parse() {
        assert_eq!(UnitKind::from_wire("army"), Some(UnitKind::Army));
        assert_eq!(UnitKind::from_wire("navy"), Some(UnitKind::Navy));
        assert_eq!(UnitKind::from_wire("fleet"), None);
    }

    #[test]
    fn terrain_rules() {
        assert!(UnitKind::Army.can_enter(RegionKind::Land));
        assert!(UnitKind::Army.can_enter(RegionKind::Coast));
        assert!(!UnitKind::Army.can_enter(RegionKind::Sea));

        assert!(!UnitKind::Navy.can_enter(RegionKind::Land));
        assert!(UnitKind::Navy.can_enter(RegionKind::Coast));
        assert!(UnitKind::Navy.can_enter(RegionKind::Sea));
    }
}
