//! Movement-phase resolution.
//!
//! Adjudicates the full set of simultaneous hold/move/support/convoy orders.
//! The plan is computed over an immutable snapshot of the state and applied
//! in one step, so the outcome depends only on the set of finalized orders,
//! never on submission order.
//!
//! The algorithm starts from the optimistic guess that every effective move
//! succeeds and iterates to a fixed point: each pass re-evaluates the
//! still-successful moves against current strengths and permanently
//! invalidates the losers. A pass can only remove successes, so the loop
//! terminates within one pass per unit. Convoy disruption and support
//! cutting by ordered moves are decided up front; support lost to
//! dislodgement and to non-vacating friendly targets is re-derived inside
//! the loop.

use std::collections::BTreeMap;

use crate::board::{GameState, Order, UnitId};

/// A successful move in the resolution plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovedUnit {
    pub unit: UnitId,
    pub from: String,
    pub to: String,
    pub to_coast: Option<String>,
}

/// A defeated defender, tagged with the winning attacker's origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dislodgement {
    pub unit: UnitId,
    pub attacker_from: String,
}

/// The complete movement resolution plan.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MovementOutcome {
    pub moved: Vec<MovedUnit>,
    /// Movers whose move failed; they stay in place.
    pub bounced: Vec<UnitId>,
    /// Convoyed armies whose convoy was attacked; they never left.
    pub disrupted: Vec<UnitId>,
    pub dislodged: Vec<Dislodgement>,
}

/// A unit with an effective move this turn (plain or convoyed-intact).
#[derive(Debug, Clone)]
struct Mover {
    unit: UnitId,
    owner: String,
    from: String,
    to: String,
    to_coast: Option<String>,
}

#[derive(Debug, Clone)]
enum SupportKind {
    Hold { target: String },
    Move { from: String, to: String },
}

#[derive(Debug, Clone)]
struct Supporter {
    unit: UnitId,
    owner: String,
    at: String,
    kind: SupportKind,
    /// Cut by a hostile ordered move into the supporter's region. Decided
    /// once; origin equal to the supported attack's destination is exempt.
    cut: bool,
}

struct Resolver {
    movers: Vec<Mover>,
    supporters: Vec<Supporter>,
    /// Region -> (occupant id, occupant owner) at the start of the phase.
    occupants: BTreeMap<String, (UnitId, String)>,
    /// Current success guess per mover; failures are permanent.
    ok: BTreeMap<UnitId, bool>,
    disrupted: Vec<UnitId>,
}

/// Computes the resolution plan for the current movement phase.
pub fn resolve_movement(state: &GameState) -> MovementOutcome {
    let mut resolver = Resolver::build(state);
    resolver.iterate();
    let outcome = resolver.outcome();
    tracing::debug!(
        moved = outcome.moved.len(),
        bounced = outcome.bounced.len(),
        disrupted = outcome.disrupted.len(),
        dislodged = outcome.dislodged.len(),
        "movement resolved"
    );
    outcome
}

impl Resolver {
    fn build(state: &GameState) -> Resolver {
        let mut occupants = BTreeMap::new();
        for region in state.board.regions() {
            if let Some(id) = region.occupant {
                if let Some(unit) = state.unit(id) {
                    occupants.insert(region.name.clone(), (id, unit.owner.clone()));
                }
            }
        }

        let mut movers = Vec::new();
        let mut disrupted = Vec::new();
        for unit in state.units.values() {
            match &unit.order {
                Order::Move { to, to_coast } => movers.push(Mover {
                    unit: unit.id,
                    owner: unit.owner.clone(),
                    from: unit.position.clone(),
                    to: to.clone(),
                    to_coast: to_coast.clone(),
                }),
                Order::ConvoyMove { from, to } => {
                    if convoy_intact(state, from, to) {
                        movers.push(Mover {
                            unit: unit.id,
                            owner: unit.owner.clone(),
                            from: from.clone(),
                            to: to.clone(),
                            to_coast: None,
                        });
                    } else {
                        tracing::debug!(unit = unit.id, %from, %to, "convoy disrupted");
                        disrupted.push(unit.id);
                    }
                }
                _ => {}
            }
        }

        let mut supporters = Vec::new();
        for unit in state.units.values() {
            let kind = match &unit.order {
                Order::SupportHold { target } => SupportKind::Hold {
                    target: target.clone(),
                },
                Order::SupportMove { from, to } => SupportKind::Move {
                    from: from.clone(),
                    to: to.clone(),
                },
                _ => continue,
            };
            let exempt_origin = match &kind {
                SupportKind::Move { to, .. } => Some(to.as_str()),
                SupportKind::Hold { .. } => None,
            };
            let cut = movers.iter().any(|m| {
                m.to == unit.position
                    && m.owner != unit.owner
                    && exempt_origin != Some(m.from.as_str())
            });
            supporters.push(Supporter {
                unit: unit.id,
                owner: unit.owner.clone(),
                at: unit.position.clone(),
                kind,
                cut,
            });
        }

        let ok = movers.iter().map(|m| (m.unit, true)).collect();
        Resolver {
            movers,
            supporters,
            occupants,
            ok,
            disrupted,
        }
    }

    fn iterate(&mut self) {
        loop {
            let mut failed = Vec::new();
            for m in &self.movers {
                if self.ok[&m.unit] && !self.move_succeeds(m) {
                    failed.push(m.unit);
                }
            }
            if failed.is_empty() {
                break;
            }
            for unit in failed {
                self.ok.insert(unit, false);
            }
        }
    }

    fn mover(&self, unit: UnitId) -> Option<&Mover> {
        self.movers.iter().find(|m| m.unit == unit)
    }

    fn occupant(&self, region: &str) -> Option<&(UnitId, String)> {
        self.occupants.get(region)
    }

    /// True if the occupant is currently leaving its region, as seen by a
    /// unit moving in from `toward.from`. A head-to-head opponent does not
    /// vacate: the two would swap places, which is illegal without convoy.
    fn vacates(&self, occupant: UnitId, toward: &Mover) -> bool {
        match self.mover(occupant) {
            Some(m) => m.to != toward.from && self.ok[&occupant],
            None => false,
        }
    }

    fn move_succeeds(&self, m: &Mover) -> bool {
        // Self-dislodgement is forbidden: a friendly occupant that stays
        // downgrades the move to a bounce.
        if let Some((occ, occ_owner)) = self.occupant(&m.to) {
            if *occ_owner == m.owner && !self.vacates(*occ, m) {
                return false;
            }
        }

        let strength = self.attack_strength(m);
        if strength <= self.hold_strength(&m.to) {
            return false;
        }

        // Head-to-head: the destination's occupant is attacking back along
        // the same edge. A symmetric contest of attack strengths.
        if let Some((occ, _)) = self.occupant(&m.to) {
            if let Some(opponent) = self.mover(*occ) {
                if opponent.to == m.from && strength <= self.attack_strength(opponent) {
                    return false;
                }
            }
        }

        // Every rival attacking the same destination must be outbid.
        for other in &self.movers {
            if other.unit != m.unit
                && other.to == m.to
                && strength <= self.prevent_strength(other)
            {
                return false;
            }
        }

        true
    }

    fn attack_strength(&self, m: &Mover) -> i32 {
        let mut strength = 1;
        for s in &self.supporters {
            if let SupportKind::Move { from, to } = &s.kind {
                if *from == m.from && *to == m.to && self.support_counts(s, m) {
                    strength += 1;
                }
            }
        }
        strength
    }

    /// A support contributes only while the supporter is neither cut nor
    /// dislodged, and never toward dislodging the supporter's own unit.
    fn support_counts(&self, s: &Supporter, m: &Mover) -> bool {
        if s.cut || self.dislodged_now(&s.at) {
            return false;
        }
        if let Some((occ, occ_owner)) = self.occupant(&m.to) {
            if *occ_owner == s.owner && !self.vacates(*occ, m) {
                return false;
            }
        }
        true
    }

    /// True if a successful move currently lands on the region.
    fn dislodged_now(&self, region: &str) -> bool {
        self.movers.iter().any(|m| self.ok[&m.unit] && m.to == region)
    }

    fn hold_strength(&self, region: &str) -> i32 {
        let Some((occ, _)) = self.occupant(region) else {
            return 0;
        };
        if let Some(_m) = self.mover(*occ) {
            // A vacating unit defends with nothing; a failed mover defends
            // alone, without hold support.
            return if self.ok[occ] { 0 } else { 1 };
        }
        let mut strength = 1;
        for s in &self.supporters {
            if let SupportKind::Hold { target } = &s.kind {
                if target == region && !s.cut && !self.dislodged_now(&s.at) {
                    strength += 1;
                }
            }
        }
        strength
    }

    fn prevent_strength(&self, m: &Mover) -> i32 {
        // A mover beaten in its head-to-head no longer contests its
        // destination.
        if let Some((occ, _)) = self.occupant(&m.to) {
            if let Some(opponent) = self.mover(*occ) {
                if opponent.to == m.from && !self.ok[&m.unit] {
                    return 0;
                }
            }
        }
        let mut strength = 1;
        for s in &self.supporters {
            if let SupportKind::Move { from, to } = &s.kind {
                if *from == m.from && *to == m.to && self.support_counts(s, m) {
                    strength += 1;
                }
            }
        }
        strength
    }

    fn outcome(self) -> MovementOutcome {
        let mut outcome = MovementOutcome {
            disrupted: self.disrupted.clone(),
            ..MovementOutcome::default()
        };

        for m in &self.movers {
            if self.ok[&m.unit] {
                outcome.moved.push(MovedUnit {
                    unit: m.unit,
                    from: m.from.clone(),
                    to: m.to.clone(),
                    to_coast: m.to_coast.clone(),
                });
            } else {
                outcome.bounced.push(m.unit);
            }
        }

        // A defender is dislodged when a successful move lands on it and
        // it did not itself move away.
        for m in &self.movers {
            if !self.ok[&m.unit] {
                continue;
            }
            if let Some((occ, _)) = self.occupant(&m.to) {
                let occupant_left = self
                    .mover(*occ)
                    .is_some_and(|om| self.ok[&om.unit]);
                if !occupant_left {
                    outcome.dislodged.push(Dislodgement {
                        unit: *occ,
                        attacker_from: m.from.clone(),
                    });
                }
            }
        }

        outcome
    }
}

/// True if the convoyed move has at least one matching convoy order on a
/// sea-region navy that no move targets this turn. Any attack on the
/// convoying navy disrupts the chain, even one that goes on to bounce.
fn convoy_intact(state: &GameState, from: &str, to: &str) -> bool {
    state.units.values().any(|navy| {
        let Order::Convoy {
            from: c_from,
            to: c_to,
        } = &navy.order
        else {
            return false;
        };
        if c_from != from || c_to != to {
            return false;
        }
        !state.units.values().any(|attacker| {
            matches!(&attacker.order, Order::Move { to: target, .. } if *target == navy.position)
        })
    })
}

/// Applies a resolution plan: dislodgement markers first, then all
/// vacated regions are cleared before any arrivals land, so chains and
/// rotations settle in a single step.
pub fn apply_movement(state: &mut GameState, outcome: &MovementOutcome) {
    for d in &outcome.dislodged {
        if let Some(unit) = state.units.get_mut(&d.unit) {
            tracing::debug!(unit = d.unit, attacker_from = %d.attacker_from, "unit dislodged");
            unit.dislodged_from = Some(d.attacker_from.clone());
        }
    }

    for m in &outcome.moved {
        let region = state.board.region_mut(&m.from);
        if region.occupant == Some(m.unit) {
            region.occupant = None;
        }
    }
    for m in &outcome.moved {
        state.board.region_mut(&m.to).occupant = Some(m.unit);
        if let Some(unit) = state.units.get_mut(&m.unit) {
            unit.position = m.to.clone();
            unit.sub_position = m.to_coast.clone();
        }
    }
}
