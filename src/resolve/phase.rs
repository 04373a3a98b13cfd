//! Phase sequencing logic.
//!
//! Drives the {movement, retreat, build} state machine once every player
//! has signalled ready. The movement-parity bit distinguishes the first
//! movement of a year from the second: only the second is followed by a
//! build phase.
//!
//! Phase flow:
//! - Movement -> Retreat (if anything was dislodged)
//! - Movement (first)  -> Movement (second)
//! - Movement (second) -> Build
//! - Retreat -> Movement (second) or Build, per the same parity
//! - Build -> Movement (first)

use crate::board::{GameState, Phase};

use super::build::{apply_builds, refresh_budgets, resolve_builds};
use super::movement::{apply_movement, resolve_movement};
use super::retreat::{apply_retreats, resolve_retreats};

/// Resolves the current phase and advances to the next. The caller has
/// already checked that every player is ready. Ready flags reset and all
/// orders return to `Hold` on the way out.
pub fn advance_phase(state: &mut GameState) {
    let from = state.phase;
    match state.phase {
        Phase::Movement => {
            let outcome = resolve_movement(state);
            apply_movement(state, &outcome);
            state.update_ownership();
            let was_second = state.movement_parity;
            if !outcome.dislodged.is_empty() {
                state.phase = Phase::Retreat;
            } else if was_second {
                state.phase = Phase::Build;
                state.movement_parity = false;
                refresh_budgets(state);
            } else {
                state.phase = Phase::Movement;
                state.movement_parity = true;
            }
        }
        Phase::Retreat => {
            let outcome = resolve_retreats(state);
            apply_retreats(state, &outcome);
            state.update_ownership();
            if state.movement_parity {
                state.phase = Phase::Build;
                state.movement_parity = false;
                refresh_budgets(state);
            } else {
                state.phase = Phase::Movement;
                state.movement_parity = true;
            }
        }
        Phase::Build => {
            let outcome = resolve_builds(state);
            apply_builds(state, &outcome);
            state.phase = Phase::Movement;
            state.movement_parity = false;
        }
    }

    state.reset_orders();
    state.clear_ready();
    tracing::info!(
        from = from.as_str(),
        to = state.phase.as_str(),
        parity = state.movement_parity,
        "phase advanced"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{standard, Order, UnitKind};

    const IDS: [&str; 7] = ["0xa1", "0xe1", "0xf1", "0xg1", "0xi1", "0xr1", "0xt1"];
    const AUSTRIA: &str = "0xa1";

    fn state() -> GameState {
        standard::standard_state(IDS)
    }

    #[test]
    fn quiet_year_runs_two_movements_then_build() {
        let mut s = state();
        assert_eq!(s.phase, Phase::Movement);
        assert!(!s.movement_parity);

        advance_phase(&mut s);
        assert_eq!(s.phase, Phase::Movement);
        assert!(s.movement_parity);

        advance_phase(&mut s);
        assert_eq!(s.phase, Phase::Build);
        assert!(!s.movement_parity);

        advance_phase(&mut s);
        assert_eq!(s.phase, Phase::Movement);
        assert!(!s.movement_parity);
    }

    #[test]
    fn dislodgement_inserts_a_retreat_phase() {
        let mut s = state();
        // Second movement of the year.
        s.movement_parity = true;
        let attacker = s.spawn_unit(UnitKind::Army, "Tyrolia", None, AUSTRIA);
        let supporter = s.spawn_unit(UnitKind::Army, "Piedmont", None, AUSTRIA);
        s.units.get_mut(&attacker).unwrap().order = Order::Move {
            to: "Venice".to_string(),
            to_coast: None,
        };
        s.units.get_mut(&supporter).unwrap().order = Order::SupportMove {
            from: "Tyrolia".to_string(),
            to: "Venice".to_string(),
        };

        advance_phase(&mut s);
        assert_eq!(s.phase, Phase::Retreat);
        // Parity survives into the retreat so the build still follows.
        assert!(s.movement_parity);
        assert!(s.unit(14).unwrap().is_dislodged());

        advance_phase(&mut s);
        assert_eq!(s.phase, Phase::Build);
        assert!(!s.movement_parity);
        // No retreat was submitted: the Venetian army is gone.
        assert!(s.unit(14).is_none());
    }

    #[test]
    fn retreat_after_first_movement_returns_to_movement() {
        let mut s = state();
        let attacker = s.spawn_unit(UnitKind::Army, "Tyrolia", None, AUSTRIA);
        let supporter = s.spawn_unit(UnitKind::Army, "Piedmont", None, AUSTRIA);
        s.units.get_mut(&attacker).unwrap().order = Order::Move {
            to: "Venice".to_string(),
            to_coast: None,
        };
        s.units.get_mut(&supporter).unwrap().order = Order::SupportMove {
            from: "Tyrolia".to_string(),
            to: "Venice".to_string(),
        };

        advance_phase(&mut s);
        assert_eq!(s.phase, Phase::Retreat);
        assert!(!s.movement_parity);

        advance_phase(&mut s);
        assert_eq!(s.phase, Phase::Movement);
        assert!(s.movement_parity);
    }

    #[test]
    fn resolution_resets_orders_and_ready_flags() {
        let mut s = state();
        s.units.get_mut(&4).unwrap().order = Order::Move {
            to: "Wales".to_string(),
            to_coast: None,
        };
        for player in s.players.values_mut() {
            player.ready = true;
        }

        advance_phase(&mut s);
        assert!(s.units.values().all(|u| u.order == Order::Hold));
        assert!(s.players.values().all(|p| !p.ready));
    }

    #[test]
    fn ownership_updates_after_movement() {
        let mut s = state();
        let army = s.spawn_unit(UnitKind::Army, "Albania", None, AUSTRIA);
        s.units.get_mut(&army).unwrap().order = Order::Move {
            to: "Greece".to_string(),
            to_coast: None,
        };

        advance_phase(&mut s);
        assert_eq!(s.board.region("Greece").owner.as_deref(), Some("Austria"));
        // The budget only refreshes at the build phase.
        assert_eq!(s.players[AUSTRIA].supply_centers, 3);

        advance_phase(&mut s); // second movement
        advance_phase(&mut s); // build
        assert_eq!(s.players[AUSTRIA].supply_centers, 4);
    }
}
