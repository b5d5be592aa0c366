//! Core data models for the chess system.

mod game;
mod ids;
mod location;
mod player;
mod stats;
mod tournament;

pub use game::*;
pub use ids::*;
pub use location::*;
pub use player::*;
pub use stats::*;
pub use tournament::*;
