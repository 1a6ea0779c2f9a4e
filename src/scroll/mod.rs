//! Scroll-and-recycle engine.
//!
//! Simulates an endless horizontal scroll with a fixed pool of tiles: each
//! tick every entity moves left, and anything that leaves the viewport on
//! the left is teleported back past the right edge instead of being
//! destroyed and respawned.

pub mod layout;
pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
