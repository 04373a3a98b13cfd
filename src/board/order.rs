//! Order types for the movement and retreat phases.
//!
//! One variant per order kind; exhaustive matching everywhere. An order is
//! carried on the unit it was issued to, consumed by the phase resolver,
//! and reset to `Hold` when the phase ends. Build-phase submissions are
//! queued on the player instead (see `board::player`).

use serde::{Deserialize, Serialize};

/// An order carried by a unit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Order {
    /// Stay in place. Also the resting state between phases.
    #[default]
    Hold,

    /// Move to an adjacent region. `to_coast` names the destination coast
    /// when a navy enters a split-coast region.
    #[serde(rename_all = "camelCase")]
    Move {
        to: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        to_coast: Option<String>,
    },

    /// Add strength to whichever unit holds `target`.
    #[serde(rename_all = "camelCase")]
    SupportHold { target: String },

    /// Add strength to a move from `from` into `to`.
    #[serde(rename_all = "camelCase")]
    SupportMove { from: String, to: String },

    /// Ferry an army moving `from` -> `to` across this navy's sea region.
    #[serde(rename_all = "camelCase")]
    Convoy { from: String, to: String },

    /// An army's request to be convoyed `from` -> `to`.
    #[serde(rename_all = "camelCase")]
    ConvoyMove { from: String, to: String },

    /// Relocate a dislodged unit. Retreat phase only.
    #[serde(rename_all = "camelCase")]
    Retreat {
        to: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        to_coast: Option<String>,
    },

    /// Remove the unit from play. Retreat phase only; build-phase disbands
    /// are queued on the player.
    Disband,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_hold() {
        assert_eq!(Order::default(), Order::Hold);
    }

    #[test]
    fn serializes_tagged() {
        let order = Order::SupportMove {
            from: "Tyrolia".to_string(),
            to: "Venice".to_string(),
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["type"], "supportMove");
        assert_eq!(json["from"], "Tyrolia");
        assert_eq!(json["to"], "Venice");
    }

    #[test]
    fn round_trips() {
        let orders = [
            Order::Hold,
            Order::Move {
                to: "Wales".to_string(),
                to_coast: None,
            },
            Order::Retreat {
                to: "Tuscany".to_string(),
                to_coast: None,
            },
            Order::Disband,
        ];
        for order in orders {
            let json = serde_json::to_string(&order).unwrap();
            let back: Order = serde_json::from_str(&json).unwrap();
            assert_eq!(back, order);
        }
    }
}
