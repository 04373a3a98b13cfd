//! Build/disband-phase resolution.
//!
//! Budgets refresh from supply-center ownership when the build phase is
//! entered, so submissions validate against the year's real counts. At
//! resolution, voluntary disbands run first, builds consume the remaining
//! slack, and any surplus a player left unnamed is disbanded
//! deterministically, lowest unit id first. Stale or excess entries are
//! skipped; the pending lists are cleared when the plan is applied.

use std::collections::BTreeSet;

use crate::board::{BuildEntry, GameState, UnitId, UnitKind};

/// The build-phase reconciliation plan.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildOutcome {
    pub created: Vec<NewUnit>,
    pub disbanded: Vec<UnitId>,
}

/// A unit to create; the id comes from the state counter at apply time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUnit {
    pub owner: String,
    pub kind: UnitKind,
    pub region: String,
    pub coast: Option<String>,
}

/// Rewrites every player's supply-center budget from current ownership.
/// The sequencer calls this once on entry to the build phase.
pub fn refresh_budgets(state: &mut GameState) {
    let budgets: Vec<(String, u32)> = state
        .players
        .values()
        .map(|p| (p.identity.clone(), state.owned_supply_centers(&p.name) as u32))
        .collect();
    for (identity, budget) in budgets {
        if let Some(player) = state.player_mut(&identity) {
            if player.supply_centers != budget {
                tracing::debug!(power = %player.name, budget, "supply budget updated");
            }
            player.supply_centers = budget;
        }
    }
}

/// Computes the build plan for every power against the refreshed budgets.
pub fn resolve_builds(state: &GameState) -> BuildOutcome {
    let mut outcome = BuildOutcome::default();
    // Regions consumed by builds this phase, across all powers.
    let mut claimed: BTreeSet<&str> = BTreeSet::new();

    for (identity, player) in &state.players {
        let budget = player.supply_centers;
        let mut disbands: BTreeSet<UnitId> = BTreeSet::new();
        let mut builds: Vec<NewUnit> = Vec::new();

        for entry in &player.pending_builds {
            match entry {
                BuildEntry::Disband { unit } => {
                    // Entries were validated at submission; the unit may
                    // still have died in the meantime.
                    if player.unit_ids.contains(unit) {
                        disbands.insert(*unit);
                    }
                }
                BuildEntry::Build { kind, region, coast } => {
                    let remaining =
                        player.unit_ids.len() as u32 - disbands.len() as u32 + builds.len() as u32;
                    if remaining >= budget {
                        tracing::debug!(power = %player.name, %region, "build beyond slack ignored");
                        continue;
                    }
                    let r = state.board.region(region);
                    let stale = r.occupant.is_some()
                        || claimed.contains(region.as_str())
                        || r.owner.as_deref() != Some(player.name.as_str());
                    if stale {
                        continue;
                    }
                    claimed.insert(r.name.as_str());
                    builds.push(NewUnit {
                        owner: identity.clone(),
                        kind: *kind,
                        region: region.clone(),
                        coast: coast.clone(),
                    });
                }
            }
        }

        // Auto-disband whatever surplus the player left unnamed.
        let mut count = player.unit_ids.len() as u32 - disbands.len() as u32 + builds.len() as u32;
        for unit in &player.unit_ids {
            if count <= budget {
                break;
            }
            if disbands.insert(*unit) {
                tracing::debug!(power = %player.name, unit, "surplus unit auto-disbanded");
                count -= 1;
            }
        }

        outcome.disbanded.extend(disbands);
        outcome.created.extend(builds);
    }

    outcome
}

/// Applies the build plan: removals, then creations, then the pending
/// lists are cleared.
pub fn apply_builds(state: &mut GameState, outcome: &BuildOutcome) {
    for unit in &outcome.disbanded {
        state.remove_unit(*unit);
    }
    for new_unit in &outcome.created {
        let id = state.spawn_unit(
            new_unit.kind,
            &new_unit.region,
            new_unit.coast.clone(),
            &new_unit.owner,
        );
        tracing::debug!(unit = id, region = %new_unit.region, "unit built");
    }
    for player in state.players.values_mut() {
        player.pending_builds.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{standard, Phase};

    const IDS: [&str; 7] = ["0xa1", "0xe1", "0xf1", "0xg1", "0xi1", "0xr1", "0xt1"];
    const AUSTRIA: &str = "0xa1";
    const ENGLAND: &str = "0xe1";

    fn build_state() -> GameState {
        let mut s = standard::standard_state(IDS);
        s.phase = Phase::Build;
        refresh_budgets(&mut s);
        s
    }

    #[test]
    fn balanced_power_needs_nothing() {
        let s = build_state();
        let outcome = resolve_builds(&s);
        assert!(outcome.created.is_empty());
        assert!(outcome.disbanded.is_empty());
        assert_eq!(s.players[AUSTRIA].supply_centers, 3);
    }

    #[test]
    fn gained_center_allows_one_build() {
        let mut s = build_state();
        // Austria captured Serbia during the year; Vienna is free.
        s.board.region_mut("Serbia").owner = Some("Austria".to_string());
        s.remove_unit(1);
        refresh_budgets(&mut s);
        s.player_mut(AUSTRIA).unwrap().pending_builds = vec![
            BuildEntry::Build {
                kind: UnitKind::Army,
                region: "Vienna".to_string(),
                coast: None,
            },
            // A second build beyond the slack is ignored.
            BuildEntry::Build {
                kind: UnitKind::Army,
                region: "Budapest".to_string(),
                coast: None,
            },
        ];

        let outcome = resolve_builds(&s);
        assert_eq!(outcome.created.len(), 1);
        assert_eq!(outcome.created[0].region, "Vienna");

        apply_builds(&mut s, &outcome);
        let new_unit = s.unit_at("Vienna").unwrap();
        assert_eq!(new_unit.id, 23);
        assert_eq!(s.power_name(&new_unit.owner), "Austria");
        assert_eq!(s.players[AUSTRIA].supply_centers, 4);
        assert!(s.players[AUSTRIA].pending_builds.is_empty());
        assert_eq!(s.next_unit_id, 24);
    }

    #[test]
    fn lost_center_forces_disband() {
        let mut s = build_state();
        // England lost London to France.
        s.board.region_mut("London").owner = Some("France".to_string());
        refresh_budgets(&mut s);
        s.player_mut(ENGLAND).unwrap().pending_builds =
            vec![BuildEntry::Disband { unit: 4 }];

        let outcome = resolve_builds(&s);
        assert!(outcome.disbanded.contains(&4));

        apply_builds(&mut s, &outcome);
        assert!(s.unit(4).is_none());
        assert_eq!(s.players[ENGLAND].supply_centers, 2);
        assert_eq!(s.players[ENGLAND].unit_ids.len(), 2);
    }

    #[test]
    fn under_submitted_disbands_fall_on_lowest_ids() {
        let mut s = build_state();
        // England down to one center, no disbands submitted.
        s.board.region_mut("London").owner = Some("France".to_string());
        s.board.region_mut("Liverpool").owner = Some("France".to_string());
        refresh_budgets(&mut s);

        let outcome = resolve_builds(&s);
        // Units 4 and 5 go; unit 6 survives.
        assert_eq!(outcome.disbanded, vec![4, 5]);

        apply_builds(&mut s, &outcome);
        assert_eq!(s.players[ENGLAND].unit_ids.len(), 1);
        assert!(s.unit(6).is_some());
    }

    #[test]
    fn voluntary_disband_counts_toward_the_shortfall() {
        let mut s = build_state();
        s.board.region_mut("London").owner = Some("France".to_string());
        refresh_budgets(&mut s);
        s.player_mut(ENGLAND).unwrap().pending_builds =
            vec![BuildEntry::Disband { unit: 6 }];

        let outcome = resolve_builds(&s);
        assert_eq!(outcome.disbanded, vec![6]);
    }

    #[test]
    fn stale_build_into_occupied_region_is_skipped() {
        let mut s = build_state();
        s.board.region_mut("Serbia").owner = Some("Austria".to_string());
        refresh_budgets(&mut s);
        // Vienna is still occupied by unit 1, so the build cannot land.
        s.player_mut(AUSTRIA).unwrap().pending_builds = vec![BuildEntry::Build {
            kind: UnitKind::Army,
            region: "Vienna".to_string(),
            coast: None,
        }];

        let outcome = resolve_builds(&s);
        assert!(outcome.created.is_empty());
    }

    #[test]
    fn budgets_refresh_from_ownership() {
        let mut s = build_state();
        s.board.region_mut("Greece").owner = Some("Austria".to_string());
        s.board.region_mut("Serbia").owner = Some("Austria".to_string());

        refresh_budgets(&mut s);
        assert_eq!(s.players[AUSTRIA].supply_centers, 5);
    }
}
