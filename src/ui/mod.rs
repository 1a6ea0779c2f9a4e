//! Terminal UI.

pub mod game_common;
pub mod runner_scene;

use crate::core::config::SceneVariant;
use crate::runner::RunnerScene;
use ratatui::Frame;

/// Frames the score readout stays highlighted after a milestone.
pub const MILESTONE_FLASH_FRAMES: u32 = 30;

/// Result of the most recent run, shown while waiting for the next start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastRun {
    pub score: u64,
    pub new_record: bool,
}

/// Presentation-only state that lives next to the scene.
#[derive(Debug, Clone, Default)]
pub struct Hud {
    pub variant: SceneVariant,
    pub last_run: Option<LastRun>,
    pub milestone_flash: u32,
}

impl Hud {
    pub fn new(variant: SceneVariant) -> Self {
        Self {
            variant,
            ..Default::default()
        }
    }

    /// Called once per drawn frame.
    pub fn on_frame(&mut self) {
        self.milestone_flash = self.milestone_flash.saturating_sub(1);
    }
}

/// Draw the whole screen.
pub fn draw_ui(frame: &mut Frame, scene: &RunnerScene, hud: &Hud) {
    let area = frame.size();
    runner_scene::render_runner_scene(frame, area, scene, hud);
}
