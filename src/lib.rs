//! Alien Invasion: a terminal arcade shooter.
//!
//! The library holds the whole simulation. Terminal I/O lives in the binary,
//! behind the [`game::Frontend`] trait.
//!
//! - `settings`: tunable parameters and the per-level dynamic values
//! - `entities`: ship, projectiles, invaders and the master game state
//! - `fleet`: invader formation layout
//! - `stats` / `scoreboard`: session counters and the HUD built from them
//! - `compute`: per-frame collision, scoring and state transitions
//! - `game`: input mapping and the frame loop

pub mod compute;
pub mod entities;
pub mod fleet;
pub mod game;
pub mod scoreboard;
pub mod settings;
pub mod stats;

pub use entities::{GameState, GameStatus};
pub use settings::{Config, FleetDirection, Settings};
