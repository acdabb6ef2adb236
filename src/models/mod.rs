//! Core data models for the doubles scheduler.

mod game;
mod player;
mod round;
mod session;
mod stats;

pub use game::*;
pub use player::*;
pub use round::*;
pub use session::*;
pub use stats::*;
