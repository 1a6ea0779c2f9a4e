//! Dino Run - Terminal Side-Scrolling Runner Library
//!
//! This module exposes the scroll engine, simulation and UI for testing and
//! for the `dino-run` binary.

pub mod build_info;
pub mod core;
pub mod input;
pub mod runner;
pub mod scroll;
pub mod ui;

pub use crate::core::config::{GameConfig, SceneVariant};
pub use runner::{tick_runner, GameState, RunnerScene, TickEvent};
