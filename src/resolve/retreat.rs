//! Retreat-phase resolution.
//!
//! Every dislodged unit either retreats, disbands, or, with no order at
//! all, is disbanded. Two retreats claiming the same destination cannot
//! be arbitrated, so all claimants disband. Markers are cleared when the
//! plan is applied.

use std::collections::BTreeMap;

use crate::board::{GameState, Order, UnitId};

/// The retreat resolution plan.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RetreatOutcome {
    /// Survivors and where they go.
    pub moved: Vec<RetreatMove>,
    /// Units removed from play: explicit disbands, unordered units, and
    /// collided retreats.
    pub disbanded: Vec<UnitId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetreatMove {
    pub unit: UnitId,
    pub to: String,
    pub to_coast: Option<String>,
}

/// Computes the retreat plan for all dislodged units.
pub fn resolve_retreats(state: &GameState) -> RetreatOutcome {
    let mut claims: BTreeMap<&str, Vec<(UnitId, Option<String>)>> = BTreeMap::new();
    let mut disbanded = Vec::new();

    for unit in state.units.values() {
        if !unit.is_dislodged() {
            continue;
        }
        match &unit.order {
            Order::Retreat { to, to_coast } => {
                claims
                    .entry(to.as_str())
                    .or_default()
                    .push((unit.id, to_coast.clone()));
            }
            // Explicit disband, or no retreat submitted at all.
            _ => disbanded.push(unit.id),
        }
    }

    let mut moved = Vec::new();
    for (to, claimants) in claims {
        let unoccupied = state.board.region(to).occupant.is_none();
        if claimants.len() == 1 && unoccupied {
            let (unit, to_coast) = claimants.into_iter().next().expect("one claimant");
            moved.push(RetreatMove {
                unit,
                to: to.to_string(),
                to_coast,
            });
        } else {
            tracing::debug!(region = %to, count = claimants.len(), "contested retreat disbands");
            disbanded.extend(claimants.into_iter().map(|(unit, _)| unit));
        }
    }

    disbanded.sort_unstable();
    RetreatOutcome { moved, disbanded }
}

/// Applies the retreat plan and clears every dislodgement marker.
pub fn apply_retreats(state: &mut GameState, outcome: &RetreatOutcome) {
    for m in &outcome.moved {
        if let Some(unit) = state.units.get_mut(&m.unit) {
            unit.position = m.to.clone();
            unit.sub_position = m.to_coast.clone();
            unit.dislodged_from = None;
            // The old region's occupant is the unit that dislodged us; it
            // stays. Only claim the destination.
            state.board.region_mut(&m.to).occupant = Some(m.unit);
        }
    }

    for unit in &outcome.disbanded {
        tracing::debug!(unit, "dislodged unit disbanded");
        state.remove_unit(*unit);
    }

    for unit in state.units.values_mut() {
        unit.dislodged_from = None;
    }
}
