//! Entente engine library.
//!
//! Adjudicates a seven-power Diplomacy-style game: validates player
//! submissions, resolves simultaneous movement with supports and convoys,
//! handles retreats and builds, and sequences phases off per-player ready
//! flags. The host drives the engine through `Game::advance` and
//! `Game::inspect`; everything else (transport, identity, persistence,
//! clocks) stays on the host's side of the line.

pub mod board;
pub mod game;
pub mod protocol;
pub mod resolve;
pub mod validate;

pub use board::{GameState, Phase};
pub use game::Game;
pub use protocol::Input;
pub use validate::OrderError;
