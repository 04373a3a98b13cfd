//! Order resolution.
//!
//! The per-phase resolvers each compute a plan over an immutable snapshot
//! of the state and apply it in one step; the sequencer threads them
//! together off the players' ready flags. Resolvers never error: conflicts
//! become bounces, disbands, and dislodgements.

pub mod build;
pub mod movement;
pub mod phase;
pub mod retreat;

pub use build::{apply_builds, refresh_budgets, resolve_builds, BuildOutcome};
pub use movement::{apply_movement, resolve_movement, MovementOutcome};
pub use phase::advance_phase;
pub use retreat::{apply_retreats, resolve_retreats, RetreatOutcome};
