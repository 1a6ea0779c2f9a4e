//! The runner scene: a player jumping a single recycled cactus while the
//! ground, river and clouds scroll past.
//!
//! The scene owns all mutable game state and is advanced explicitly by
//! [`tick_runner`] from the main loop.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
