//! The engine facade.
//!
//! `Game` owns the state and exposes the two-operation interface the host
//! drives: `advance` feeds one sender's submission through validation and,
//! on the last ready signal, resolution; `inspect` serializes the full
//! snapshot. Each `advance` is atomic: a rejected submission leaves the
//! state untouched apart from the returned error.

use crate::board::{standard, GameState, Order, UnitId};
use crate::protocol::Input;
use crate::resolve::advance_phase;
use crate::validate::{self, OrderError};

pub struct Game {
    state: GameState,
}

impl Game {
    /// Starts a standard game. Identities bind to the powers in the order
    /// Austria, England, France, Germany, Italy, Russia, Turkey.
    pub fn standard(identities: [&str; 7]) -> Game {
        Game {
            state: standard::standard_state(identities),
        }
    }

    /// Restores a game from a previously serialized snapshot.
    pub fn from_state(state: GameState) -> Game {
        Game { state }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Processes one submission from `sender`. The payload is the raw JSON
    /// input document.
    pub fn advance(&mut self, sender: &str, payload: &[u8]) -> Result<(), OrderError> {
        let input: Input = serde_json::from_slice(payload)
            .map_err(|e| OrderError::Malformed(e.to_string()))?;
        self.advance_input(sender, &input)
    }

    /// Processes one already-parsed submission from `sender`.
    pub fn advance_input(&mut self, sender: &str, input: &Input) -> Result<(), OrderError> {
        let Some(sender_record) = self.state.player(sender) else {
            return Err(OrderError::Malformed("unknown sender".to_string()));
        };
        // Ready finalizes the sender's orders until the phase resolves.
        if sender_record.ready && !matches!(input, Input::ReadyOrders(_)) {
            return Err(OrderError::Malformed(
                "orders already finalized".to_string(),
            ));
        }

        match input {
            Input::MoveArmy(payload) => {
                let (unit, order) = validate::movement_order(&self.state, sender, payload)?;
                self.store_order(unit, order);
            }
            Input::Retreat(payload) => {
                let (unit, order) = validate::retreat_order(&self.state, sender, payload)?;
                self.store_order(unit, order);
            }
            Input::BuildArmy(payload) => {
                let entry = validate::build_order(&self.state, sender, payload)?;
                if let Some(player) = self.state.player_mut(sender) {
                    player.pending_builds.push(entry);
                }
            }
            Input::ReadyOrders(_) => {
                if let Some(player) = self.state.player_mut(sender) {
                    player.ready = true;
                    tracing::debug!(power = %player.name, "player ready");
                }
                if self.state.all_ready() {
                    advance_phase(&mut self.state);
                }
            }
        }
        Ok(())
    }

    /// The full state snapshot as a JSON document.
    pub fn inspect(&self) -> serde_json::Value {
        serde_json::to_value(&self.state).expect("game state always serializes")
    }

    /// A later submission for the same unit replaces the earlier one,
    /// until the sender marks ready.
    fn store_order(&mut self, unit: UnitId, order: Order) {
        if let Some(u) = self.state.units.get_mut(&unit) {
            u.order = order;
        }
    }
}
