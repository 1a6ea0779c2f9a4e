//! Maps [`TickEvent`]s to HUD state.
//!
//! Binary-only: it bridges pure simulation events to presentation state.

use dino_run::ui::{Hud, LastRun, MILESTONE_FLASH_FRAMES};
use dino_run::TickEvent;

pub fn apply_tick_events(hud: &mut Hud, events: &[TickEvent]) {
    for event in events {
        match event {
            TickEvent::Started | TickEvent::Jumped => {}
            TickEvent::ScoreMilestone { .. } => {
                hud.milestone_flash = MILESTONE_FLASH_FRAMES;
            }
            TickEvent::Crashed {
                score, new_record, ..
            } => {
                hud.last_run = Some(LastRun {
                    score: *score,
                    new_record: *new_record,
                });
                hud.milestone_flash = 0;
            }
        }
    }
}
