//! Game state representation.
//!
//! Holds the complete snapshot of a game at a point in time: the board,
//! units by id, players by sender identity, the current phase, and the
//! movement-parity bit. The serialized form is the snapshot the host
//! receives from `inspect`; deserializing it reproduces an
//! indistinguishable state, including the unit-id counter.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::order::Order;
use super::player::Player;
use super::region::Board;
use super::unit::{Unit, UnitId, UnitKind};

/// Supply centers needed for a solo victory on the standard map.
const SOLO_SUPPLY_CENTERS: usize = 18;

/// The phase within a game year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Movement,
    Retreat,
    Build,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Movement => "movement",
            Phase::Retreat => "retreat",
            Phase::Build => "build",
        }
    }
}

/// Complete game state.
///
/// All cross-references are ids and names through the central maps, and the
/// maps are ordered, so resolution never depends on submission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    #[serde(rename = "map")]
    pub board: Board,
    pub units: BTreeMap<UnitId, Unit>,
    /// Players keyed by sender identity.
    pub players: BTreeMap<String, Player>,
    #[serde(rename = "turn")]
    pub phase: Phase,
    /// True while the movement phase in progress (or just resolved) is the
    /// second of the year, i.e. the one a build phase follows.
    #[serde(rename = "movementParity")]
    pub movement_parity: bool,
    #[serde(rename = "nextUnitId")]
    pub next_unit_id: UnitId,
}

impl GameState {
    pub fn player(&self, identity: &str) -> Option<&Player> {
        self.players.get(identity)
    }

    pub fn player_mut(&mut self, identity: &str) -> Option<&mut Player> {
        self.players.get_mut(identity)
    }

    /// The power name behind a sender identity. Identity must be known.
    pub fn power_name(&self, identity: &str) -> &str {
        &self.players[identity].name
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    /// The non-dislodged unit occupying a region, if any.
    pub fn unit_at(&self, region: &str) -> Option<&Unit> {
        self.board
            .region(region)
            .occupant
            .and_then(|id| self.units.get(&id))
    }

    /// Creates a unit from the state-owned counter and wires it to its
    /// owner and region. The region must be unoccupied.
    pub fn spawn_unit(
        &mut self,
        kind: UnitKind,
        position: &str,
        sub_position: Option<String>,
        owner: &str,
    ) -> UnitId {
        let id = self.next_unit_id;
        self.next_unit_id += 1;
        self.units.insert(
            id,
            Unit {
                id,
                kind,
                position: position.to_string(),
                sub_position,
                owner: owner.to_string(),
                order: Order::Hold,
                dislodged_from: None,
            },
        );
        self.board.region_mut(position).occupant = Some(id);
        if let Some(player) = self.players.get_mut(owner) {
            player.unit_ids.insert(id);
        }
        id
    }

    /// Removes a unit from the store, its owner's roster, and the board.
    pub fn remove_unit(&mut self, id: UnitId) {
        let Some(unit) = self.units.remove(&id) else {
            return;
        };
        if let Some(player) = self.players.get_mut(&unit.owner) {
            player.unit_ids.remove(&id);
        }
        let region = self.board.region_mut(&unit.position);
        if region.occupant == Some(id) {
            region.occupant = None;
        }
    }

    /// Rewrites supply-center ownership from end-of-phase occupancy.
    /// Ownership persists when the occupant later leaves; the budget that
    /// hangs off it is only recounted at the build phase.
    pub fn update_ownership(&mut self) {
        let mut captured: Vec<(String, String)> = Vec::new();
        for region in self.board.regions() {
            if !region.supply_center {
                continue;
            }
            if let Some(id) = region.occupant {
                if let Some(unit) = self.units.get(&id) {
                    let power = self.players[&unit.owner].name.clone();
                    if region.owner.as_deref() != Some(power.as_str()) {
                        captured.push((region.name.clone(), power));
                    }
                }
            }
        }
        for (name, power) in captured {
            tracing::debug!(region = %name, power = %power, "supply center changes hands");
            self.board.region_mut(&name).owner = Some(power);
        }
    }

    /// Counts the supply centers owned by a power name.
    pub fn owned_supply_centers(&self, power: &str) -> usize {
        self.board
            .regions()
            .filter(|r| r.supply_center && r.owner.as_deref() == Some(power))
            .count()
    }

    /// The power owning enough supply centers for a solo victory, if any.
    /// Victory handling itself is the host's concern.
    pub fn solo_victor(&self) -> Option<&str> {
        self.players
            .values()
            .map(|p| p.name.as_str())
            .find(|power| self.owned_supply_centers(power) >= SOLO_SUPPLY_CENTERS)
    }

    pub fn all_ready(&self) -> bool {
        self.players.values().all(|p| p.ready)
    }

    pub fn clear_ready(&mut self) {
        for player in self.players.values_mut() {
            player.ready = false;
        }
    }

    /// Resets every unit's order to `Hold` at phase end.
    pub fn reset_orders(&mut self) {
        for unit in self.units.values_mut() {
            unit.order = Order::Hold;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::standard;

    fn state() -> GameState {
        standard::standard_state([
            "0xa1", "0xe1", "0xf1", "0xg1", "0xi1", "0xr1", "0xt1",
        ])
    }

    #[test]
    fn spawn_assigns_sequential_ids() {
        let mut s = state();
        let before = s.next_unit_id;
        let id = s.spawn_unit(UnitKind::Army, "Serbia", None, "0xa1");
        assert_eq!(id, before);
        assert_eq!(s.next_unit_id, before + 1);
        assert_eq!(s.unit_at("Serbia").map(|u| u.id), Some(id));
        assert!(s.players["0xa1"].unit_ids.contains(&id));
    }

    #[test]
    fn remove_unit_clears_all_references() {
        let mut s = state();
        let id = s.unit_at("Vienna").map(|u| u.id).expect("starting unit");
        s.remove_unit(id);
        assert!(s.unit(id).is_none());
        assert!(s.unit_at("Vienna").is_none());
        assert!(!s.players["0xa1"].unit_ids.contains(&id));
    }

    #[test]
    fn ownership_updates_on_occupation_and_persists_after() {
        let mut s = state();
        let id = s.spawn_unit(UnitKind::Army, "Serbia", None, "0xa1");
        s.update_ownership();
        assert_eq!(
            s.board.region("Serbia").owner.as_deref(),
            Some("Austria")
        );

        s.remove_unit(id);
        s.update_ownership();
        assert_eq!(
            s.board.region("Serbia").owner.as_deref(),
            Some("Austria")
        );
    }

    #[test]
    fn no_solo_victor_at_start() {
        assert_eq!(state().solo_victor(), None);
    }

    #[test]
    fn eighteen_centers_is_a_solo() {
        let mut s = state();
        let centers: Vec<String> = s
            .board
            .regions()
            .filter(|r| r.supply_center)
            .take(18)
            .map(|r| r.name.clone())
            .collect();
        for name in centers {
            s.board.region_mut(&name).owner = Some("Russia".to_string());
        }
        assert_eq!(s.solo_victor(), Some("Russia"));
    }

    #[test]
    fn all_ready_requires_every_player() {
        let mut s = state();
        assert!(!s.all_ready());
        for player in s.players.values_mut() {
            player.ready = true;
        }
        assert!(s.all_ready());
        s.clear_ready();
        assert!(!s.all_ready());
    }
}
