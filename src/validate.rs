//! Per-submission order validation.
//!
//! Every check runs against the current state before anything is mutated:
//! a submission is either accepted whole (the order lands on the unit, or
//! the build entry is queued on the player) or rejected with one of the
//! stable error kinds below. Resolution itself never raises; conflicts
//! between accepted orders become bounces and dislodgements, not errors.

use thiserror::Error;

use crate::board::{BuildEntry, GameState, Order, Phase, RegionKind, UnitId, UnitKind};
use crate::protocol::{optional, BuildArmyPayload, MoveArmyPayload, RetreatPayload};

/// A rejected submission. Message strings are stable; hosts and tests
/// match on them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("order kind not allowed in the current phase")]
    WrongPhase,

    #[error("can't order a unit that doesn't belong to you")]
    NotOwner,

    #[error("unit not found")]
    NonexistentUnit,

    #[error("can't reach a non-adjacent region")]
    NonAdjacent,

    #[error("can't send an army into the sea or a ship inland")]
    TerrainViolation,

    #[error("can't order a move from a region your unit doesn't occupy")]
    EmptyOrigin,

    #[error("need to specify exactly one coast and can't move directly between coasts")]
    BadCoastSpec,

    #[error("no available boats to convoy")]
    ConvoyUnavailable,

    #[error("can't convoy to a coast more than one sea tile away")]
    ConvoyTooFar,

    #[error("{0}")]
    BadRetreatTarget(&'static str),

    #[error("can't retreat to an occupied region")]
    OccupiedRetreat,

    #[error("can't build in a territory you don't own")]
    BuildNotOwned,

    #[error("can't build outside a supply center")]
    BuildNonSupply,

    #[error("can't build in an occupied region")]
    BuildOccupied,

    #[error("can't build another unit without extra supply centers")]
    OverBudget,

    #[error("invalid input: {0}")]
    Malformed(String),
}

pub const RETREAT_TO_SELF: &str = "can't retreat to the same place";
pub const RETREAT_FORWARD: &str = "can't retreat forward to the attacking region";

fn known_region<'a>(state: &GameState, name: &'a str) -> Result<&'a str, OrderError> {
    if state.board.contains(name) {
        Ok(name)
    } else {
        Err(OrderError::Malformed(format!("unknown region '{name}'")))
    }
}

/// Validates a movement-phase submission and produces the order to store
/// on the unit.
pub fn movement_order(
    state: &GameState,
    sender: &str,
    payload: &MoveArmyPayload,
) -> Result<(UnitId, Order), OrderError> {
    if state.phase != Phase::Movement {
        return Err(OrderError::WrongPhase);
    }

    let unit = state
        .unit(payload.unit_id)
        .ok_or(OrderError::NonexistentUnit)?;
    if unit.owner != sender {
        return Err(OrderError::NotOwner);
    }

    let order = match payload.order_type.as_str() {
        "hold" => Order::Hold,

        "move" => {
            let from = known_region(state, &payload.from_region)?;
            let to = known_region(state, &payload.to_region)?;
            if unit.position != from {
                return Err(OrderError::EmptyOrigin);
            }
            if !unit.kind.can_enter(state.board.kind(to)) {
                return Err(OrderError::TerrainViolation);
            }
            if !state.board.is_adjacent(from, to) {
                return Err(OrderError::NonAdjacent);
            }

            let to_coast = if unit.kind == UnitKind::Navy
                && (state.board.region(from).has_coasts() || state.board.region(to).has_coasts())
            {
                validate_coast_move(state, unit.sub_position.as_deref(), payload, from, to)?
            } else {
                // Armies and plain coastlines carry no coast information.
                None
            };

            Order::Move {
                to: to.to_string(),
                to_coast,
            }
        }

        "support move" => {
            let from = known_region(state, &payload.from_region)?;
            let to = known_region(state, &payload.to_region)?;
            if !state.board.is_adjacent(&unit.position, to)
                || !state.board.is_adjacent(from, to)
            {
                return Err(OrderError::NonAdjacent);
            }
            Order::SupportMove {
                from: from.to_string(),
                to: to.to_string(),
            }
        }

        "support hold" => {
            let target = known_region(state, &payload.to_region)?;
            if !state.board.is_adjacent(&unit.position, target) {
                return Err(OrderError::NonAdjacent);
            }
            Order::SupportHold {
                target: target.to_string(),
            }
        }

        "convoy" => {
            if unit.kind != UnitKind::Navy
                || state.board.kind(&unit.position) != RegionKind::Sea
            {
                return Err(OrderError::TerrainViolation);
            }
            let from = known_region(state, &payload.from_region)?;
            let to = known_region(state, &payload.to_region)?;
            if !state.board.is_adjacent(&unit.position, from)
                || !state.board.is_adjacent(&unit.position, to)
            {
                return Err(OrderError::NonAdjacent);
            }
            Order::Convoy {
                from: from.to_string(),
                to: to.to_string(),
            }
        }

        "convoy move" => {
            if unit.kind != UnitKind::Army {
                return Err(OrderError::TerrainViolation);
            }
            let from = known_region(state, &payload.from_region)?;
            let to = known_region(state, &payload.to_region)?;
            if unit.position != from {
                return Err(OrderError::EmptyOrigin);
            }
            if state.board.kind(from) != RegionKind::Coast
                || state.board.kind(to) != RegionKind::Coast
            {
                return Err(OrderError::TerrainViolation);
            }

            // Single-sea-tile convoys only: some occupied sea neighbor of
            // the origin must itself touch the destination.
            let occupied_seas: Vec<&str> = state
                .board
                .neighbors_of(from)
                .iter()
                .map(String::as_str)
                .filter(|n| {
                    state.board.kind(n) == RegionKind::Sea && state.unit_at(n).is_some()
                })
                .collect();
            if occupied_seas.is_empty() {
                return Err(OrderError::ConvoyUnavailable);
            }
            if !occupied_seas
                .iter()
                .any(|sea| state.board.is_adjacent(sea, to))
            {
                return Err(OrderError::ConvoyTooFar);
            }
            Order::ConvoyMove {
                from: from.to_string(),
                to: to.to_string(),
            }
        }

        _ => return Err(OrderError::Malformed("invalid order".to_string())),
    };

    Ok((payload.unit_id, order))
}

/// Coast rules for navies when either endpoint has split coastlines:
/// exactly one of the two coast fields must be set, the named coast must
/// exist, and the crossing must follow that coast's own adjacency.
fn validate_coast_move(
    state: &GameState,
    current_coast: Option<&str>,
    payload: &MoveArmyPayload,
    from: &str,
    to: &str,
) -> Result<Option<String>, OrderError> {
    let from_coast = optional(&payload.from_sub_region);
    let to_coast = optional(&payload.to_sub_region);

    match (from_coast, to_coast) {
        (Some(_), Some(_)) | (None, None) => Err(OrderError::BadCoastSpec),
        (Some(coast), None) => {
            if current_coast != Some(coast.as_str()) {
                return Err(OrderError::BadCoastSpec);
            }
            if !state.board.is_coast_adjacent(from, &coast, to) {
                return Err(OrderError::NonAdjacent);
            }
            Ok(None)
        }
        (None, Some(coast)) => {
            if !state.board.region(to).sub_coasts.contains_key(&coast) {
                return Err(OrderError::BadCoastSpec);
            }
            if !state.board.is_coast_adjacent(to, &coast, from) {
                return Err(OrderError::NonAdjacent);
            }
            Ok(Some(coast))
        }
    }
}

/// Validates a retreat-phase submission.
pub fn retreat_order(
    state: &GameState,
    sender: &str,
    payload: &RetreatPayload,
) -> Result<(UnitId, Order), OrderError> {
    if state.phase != Phase::Retreat {
        return Err(OrderError::WrongPhase);
    }

    let unit = state
        .unit(payload.unit_id)
        .ok_or(OrderError::NonexistentUnit)?;
    if unit.owner != sender {
        return Err(OrderError::NotOwner);
    }
    let Some(attacker_from) = unit.dislodged_from.as_deref() else {
        return Err(OrderError::Malformed("unit is not dislodged".to_string()));
    };

    if payload.delete {
        return Ok((payload.unit_id, Order::Disband));
    }

    let to = known_region(state, &payload.to_region)?;
    if to == unit.position {
        return Err(OrderError::BadRetreatTarget(RETREAT_TO_SELF));
    }
    if to == attacker_from {
        return Err(OrderError::BadRetreatTarget(RETREAT_FORWARD));
    }
    if !state.board.is_adjacent(&unit.position, to) {
        return Err(OrderError::NonAdjacent);
    }
    if !unit.kind.can_enter(state.board.kind(to)) {
        return Err(OrderError::TerrainViolation);
    }
    if state.board.region(to).occupant.is_some() {
        return Err(OrderError::OccupiedRetreat);
    }

    let to_coast = if unit.kind == UnitKind::Navy && state.board.region(to).has_coasts() {
        let coast = optional(&payload.to_sub_region).ok_or(OrderError::BadCoastSpec)?;
        if !state.board.is_coast_adjacent(to, &coast, &unit.position) {
            return Err(OrderError::NonAdjacent);
        }
        Some(coast)
    } else {
        None
    };

    Ok((
        payload.unit_id,
        Order::Retreat {
            to: to.to_string(),
            to_coast,
        },
    ))
}

/// Validates a build-phase submission and produces the entry to queue on
/// the sender's pending-build list.
pub fn build_order(
    state: &GameState,
    sender: &str,
    payload: &BuildArmyPayload,
) -> Result<BuildEntry, OrderError> {
    if state.phase != Phase::Build {
        return Err(OrderError::WrongPhase);
    }

    let player = state
        .player(sender)
        .ok_or_else(|| OrderError::Malformed("unknown sender".to_string()))?;
    if payload.owner != player.name {
        return Err(OrderError::NotOwner);
    }

    let position = known_region(state, &payload.position)?;
    let region = state.board.region(position);
    if !region.supply_center {
        return Err(OrderError::BuildNonSupply);
    }
    if region.owner.as_deref() != Some(player.name.as_str()) {
        return Err(OrderError::BuildNotOwned);
    }

    if payload.delete != 0 {
        let unit = state.unit(payload.delete).ok_or(OrderError::NonexistentUnit)?;
        if unit.owner != sender {
            return Err(OrderError::NotOwner);
        }
        if unit.position != position {
            return Err(OrderError::EmptyOrigin);
        }
        return Ok(BuildEntry::Disband {
            unit: payload.delete,
        });
    }

    if region.occupant.is_some() {
        return Err(OrderError::BuildOccupied);
    }
    let kind = UnitKind::from_wire(&payload.kind)
        .ok_or_else(|| OrderError::Malformed("invalid order".to_string()))?;
    if !kind.can_enter(region.kind) {
        return Err(OrderError::TerrainViolation);
    }
    if player.unit_ids.len() as u32 >= player.supply_centers {
        return Err(OrderError::OverBudget);
    }

    let coast = if kind == UnitKind::Navy && region.has_coasts() {
        let coast = optional(&payload.sub_position).ok_or(OrderError::BadCoastSpec)?;
        if !region.sub_coasts.contains_key(&coast) {
            return Err(OrderError::BadCoastSpec);
        }
        Some(coast)
    } else {
        None
    };

    Ok(BuildEntry::Build {
        kind,
        region: position.to_string(),
        coast,
    })
}
