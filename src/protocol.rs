//! The wire contract for player submissions.
//!
//! Inputs arrive as a tagged JSON document: `{"kind": ..., "payload": ...}`.
//! Field names are the contract and follow the host convention (`unitID`,
//! `toRegion`, `fromSubRegion`, ...). Empty strings stand in for absent
//! optional fields, matching the host's encoding.

use serde::{Deserialize, Serialize};

use crate::board::UnitId;

/// A player submission, dispatched on `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload")]
pub enum Input {
    /// A movement-phase order for one unit (any kind of unit, despite the
    /// historical name).
    MoveArmy(MoveArmyPayload),
    /// A build-phase build or disband, queued on the submitting player.
    BuildArmy(BuildArmyPayload),
    /// Finalize the sender's orders for this phase. The payload is unused.
    ReadyOrders(serde_json::Value),
    /// A retreat-phase order for one dislodged unit.
    Retreat(RetreatPayload),
}

/// Movement-phase order payload. `orderType` selects among
/// `move`, `support move`, `support hold`, `convoy`, `convoy move`, `hold`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveArmyPayload {
    #[serde(rename = "unitID")]
    pub unit_id: UnitId,
    #[serde(rename = "orderType")]
    pub order_type: String,
    #[serde(rename = "orderOwner", default)]
    pub order_owner: String,
    #[serde(rename = "toRegion", default)]
    pub to_region: String,
    #[serde(rename = "toSubRegion", default)]
    pub to_sub_region: String,
    #[serde(rename = "fromRegion", default)]
    pub from_region: String,
    #[serde(rename = "fromSubRegion", default)]
    pub from_sub_region: String,
}

/// Build-phase payload. `delete` of zero requests a build; any positive
/// value is the id of a unit to disband.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildArmyPayload {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub position: String,
    #[serde(rename = "subPosition", default)]
    pub sub_position: String,
    pub owner: String,
    pub delete: UnitId,
}

/// Retreat-phase payload. `delete` disbands the unit instead of moving it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetreatPayload {
    #[serde(rename = "unitID")]
    pub unit_id: UnitId,
    #[serde(default)]
    pub delete: bool,
    #[serde(rename = "toRegion", default)]
    pub to_region: String,
    #[serde(rename = "toSubRegion", default)]
    pub to_sub_region: String,
}

/// Turns an empty wire string into `None`.
pub(crate) fn optional(field: &str) -> Option<String> {
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_move_army() {
        let raw = r#"{"kind": "MoveArmy", "payload": {"unitID": 4, "orderType": "move",
            "orderOwner": "England", "toRegion": "Wales", "fromRegion": "London"}}"#;
        let input: Input = serde_json::from_str(raw).unwrap();
        match input {
            Input::MoveArmy(p) => {
                assert_eq!(p.unit_id, 4);
                assert_eq!(p.order_type, "move");
                assert_eq!(p.to_region, "Wales");
                assert_eq!(p.from_region, "London");
                assert_eq!(p.to_sub_region, "");
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn parses_build_army() {
        let raw = r#"{"kind": "BuildArmy", "payload": {"type": "navy",
            "position": "London", "owner": "England", "delete": 0}}"#;
        let input: Input = serde_json::from_str(raw).unwrap();
        match input {
            Input::BuildArmy(p) => {
                assert_eq!(p.kind, "navy");
                assert_eq!(p.position, "London");
                assert_eq!(p.delete, 0);
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn parses_ready_with_empty_payload() {
        let raw = r#"{"kind": "ReadyOrders", "payload": ""}"#;
        let input: Input = serde_json::from_str(raw).unwrap();
        assert!(matches!(input, Input::ReadyOrders(_)));
    }

    #[test]
    fn parses_retreat() {
        let raw = r#"{"kind": "Retreat", "payload": {"unitID": 14, "delete": false,
            "toRegion": "Tuscany"}}"#;
        let input: Input = serde_json::from_str(raw).unwrap();
        match input {
            Input::Retreat(p) => {
                assert_eq!(p.unit_id, 14);
                assert!(!p.delete);
                assert_eq!(p.to_region, "Tuscany");
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_kind() {
        let raw = r#"{"kind": "Teleport", "payload": {}}"#;
        assert!(serde_json::from_str::<Input>(raw).is_err());
    }
}
