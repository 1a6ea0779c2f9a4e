//! Runner game logic: start gate, jumping, gravity, scoring, collision and
//! restart.

use super::types::*;
use crate::core::constants::*;

/// Advance the runner scene. Called from the main loop.
///
/// `dt_ms` is milliseconds since the last call and `control_pressed` is the
/// current state of the control key. Internally steps in fixed 16ms ticks
/// (~60 FPS). Returns the events produced, in order.
pub fn tick_runner(scene: &mut RunnerScene, control_pressed: bool, dt_ms: u64) -> Vec<TickEvent> {
    let mut events = Vec::new();

    // Clamp dt so a stall does not fire a burst of physics steps
    scene.accumulated_time_ms += dt_ms.min(MAX_FRAME_DELTA_MS);

    while scene.accumulated_time_ms >= PHYSICS_TICK_MS {
        scene.accumulated_time_ms -= PHYSICS_TICK_MS;
        let restarts_before = scene.restarts;
        step(scene, control_pressed, &mut events);

        // A restart rebuilt the scene; leftover time belongs to the old run
        if scene.restarts != restarts_before {
            scene.accumulated_time_ms = 0;
            break;
        }
    }

    events
}

/// Single simulation tick.
pub fn step(scene: &mut RunnerScene, control_pressed: bool, events: &mut Vec<TickEvent>) {
    // 1. Start gate: nothing runs until the first press
    if scene.state.phase == RunPhase::NotStarted {
        if !control_pressed {
            return;
        }
        scene.state.phase = RunPhase::Running;
        scene.input_gate.arm();
        tracing::info!(high_score = scene.state.high_score, "run started");
        events.push(TickEvent::Started);
    }

    scene.tick_count += 1;

    // 2. Controls
    if scene.input_gate.update(control_pressed) && scene.player.is_on_ground() {
        jump(&mut scene.player);
        events.push(TickEvent::Jumped);
    }

    // 3. Scroll every pool
    scene.field.advance_all(&mut scene.rng);

    // 4. Score
    if let Some(milestone) = add_score(&mut scene.state) {
        tracing::debug!(score = milestone, "score milestone");
        events.push(TickEvent::ScoreMilestone { score: milestone });
    }

    // 5. Player physics
    apply_gravity(&mut scene.player, PHYSICS_DT_SECONDS);

    // 6. Animation: airborne restarts the run cycle every tick, holding its first frame
    let on_ground = scene.player.is_on_ground();
    scene.player.animation.play(Animation::Right, on_ground);
    scene.player.animation.tick();

    // 7. Collision
    if check_collision(scene) {
        events.push(crash(scene));
    }
}

/// Launch the player upward.
pub fn jump(player: &mut Player) {
    player.velocity_y = JUMP_VELOCITY;
}

/// Integrate gravity for `dt` seconds, landing on the grass and stopping at
/// the top of the viewport.
pub fn apply_gravity(player: &mut Player, dt: f64) {
    player.velocity_y += GRAVITY * dt;
    player.y += player.velocity_y * dt;

    let half_height = PLAYER_HEIGHT / 2.0;
    if player.y + half_height >= GROUND_TOP {
        player.y = GROUND_TOP - half_height;
        player.velocity_y = 0.0;
    } else if player.y - half_height < 0.0 {
        player.y = half_height;
        player.velocity_y = 0.0;
    }
}

/// Add one tick's worth of score. Returns the score if it hit a milestone.
pub fn add_score(state: &mut GameState) -> Option<u64> {
    state.score += SCORE_PER_TICK;
    (state.score % SCORE_MILESTONE == 0).then_some(state.score)
}

/// True if the player overlaps the obstacle.
pub fn check_collision(scene: &RunnerScene) -> bool {
    scene
        .player
        .bounds()
        .overlaps(&obstacle_bounds(&scene.field.obstacle))
}

/// Bank the score into the high score and restart the scene.
fn crash(scene: &mut RunnerScene) -> TickEvent {
    let score = scene.state.score;
    let new_record = score > scene.state.high_score;
    scene.state.high_score = scene.state.high_score.max(score);
    let high_score = scene.state.high_score;

    tracing::info!(score, high_score, new_record, "crashed into obstacle, restarting");
    scene.restart();

    TickEvent::Crashed {
        score,
        high_score,
        new_record,
    }
}
