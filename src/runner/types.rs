//! Runner scene data structures: player, animation, input gate and the
//! per-process score state.

use crate::core::config::GameConfig;
use crate::core::constants::*;
use crate::scroll::layout::build_scroll_field;
use crate::scroll::{ScrollEntity, ScrollField};
use rand::rngs::StdRng;

/// Whether the simulation tick runs.
///
/// A crash passes through a restart (score banked, scene rebuilt) and lands
/// back in `NotStarted` within the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    NotStarted,
    Running,
}

/// Debounce for the single control key that both starts the run and jumps.
///
/// The press that starts a run must not also jump, so the gate only lets
/// jumps through after the control has been released once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputGate {
    /// Run not started; presses are start signals.
    Idle,
    /// The starting press is still held; jumps are suppressed.
    ArmedForStart,
    /// Control released at least once since the start; presses jump.
    Active,
}

impl InputGate {
    /// Called when a press starts the run.
    pub fn arm(&mut self) {
        *self = InputGate::ArmedForStart;
    }

    /// Feed one tick of control state. Returns true if a jump may fire.
    pub fn update(&mut self, control_pressed: bool) -> bool {
        match self {
            InputGate::Idle => false,
            InputGate::ArmedForStart => {
                if !control_pressed {
                    *self = InputGate::Active;
                }
                false
            }
            InputGate::Active => control_pressed,
        }
    }
}

/// Player sprite animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Animation {
    /// Idle pose facing the camera.
    Turn,
    /// Running right.
    Right,
}

impl Animation {
    pub fn first_frame(&self) -> u32 {
        match self {
            Self::Turn => 4,
            Self::Right => 5,
        }
    }

    pub fn last_frame(&self) -> u32 {
        match self {
            Self::Turn => 4,
            Self::Right => 8,
        }
    }

    /// Frames per second.
    pub fn frame_rate(&self) -> u32 {
        match self {
            Self::Turn => 20,
            Self::Right => 10,
        }
    }

    pub fn repeats(&self) -> bool {
        matches!(self, Self::Right)
    }

    /// Physics ticks each frame stays on screen.
    pub fn ticks_per_frame(&self) -> u32 {
        (TICKS_PER_SECOND / self.frame_rate()).max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationState {
    pub animation: Animation,
    pub frame: u32,
    pub ticks_in_frame: u32,
}

impl AnimationState {
    pub fn new(animation: Animation) -> Self {
        Self {
            animation,
            frame: animation.first_frame(),
            ticks_in_frame: 0,
        }
    }

    /// Switch to `animation` from its first frame. With `ignore_if_playing`,
    /// an animation that is already running keeps its current frame.
    pub fn play(&mut self, animation: Animation, ignore_if_playing: bool) {
        if ignore_if_playing && self.animation == animation {
            return;
        }
        *self = Self::new(animation);
    }

    /// Advance one physics tick.
    pub fn tick(&mut self) {
        self.ticks_in_frame += 1;
        if self.ticks_in_frame < self.animation.ticks_per_frame() {
            return;
        }
        self.ticks_in_frame = 0;
        if self.frame < self.animation.last_frame() {
            self.frame += 1;
        } else if self.animation.repeats() {
            self.frame = self.animation.first_frame();
        }
    }
}

/// Axis-aligned box in world pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn centered(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            left: x - width / 2.0,
            right: x + width / 2.0,
            top: y - height / 2.0,
            bottom: y + height / 2.0,
        }
    }

    /// Strict overlap; boxes that only share an edge do not collide.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }
}

/// Bounding box of the obstacle sprite (one tile at double scale).
pub fn obstacle_bounds(obstacle: &ScrollEntity) -> Bounds {
    Bounds::centered(obstacle.x, obstacle.y, OBSTACLE_SIZE, OBSTACLE_SIZE)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Sprite center in world pixels.
    pub x: f64,
    pub y: f64,
    /// Vertical velocity in px/s (negative = upward).
    pub velocity_y: f64,
    pub animation: AnimationState,
}

impl Player {
    pub fn new() -> Self {
        Self {
            x: PLAYER_X,
            y: PLAYER_START_Y,
            velocity_y: 0.0,
            animation: AnimationState::new(Animation::Turn),
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::centered(self.x, self.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    pub fn is_on_ground(&self) -> bool {
        self.bounds().bottom >= GROUND_TOP
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Score state owned by the scene controller.
///
/// `high_score` lives for the whole process; `score` resets on every restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub score: u64,
    pub high_score: u64,
    pub phase: RunPhase,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            score: 0,
            high_score: 0,
            phase: RunPhase::NotStarted,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Events produced by a tick, for the front end to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickEvent {
    Started,
    Jumped,
    /// Score reached a multiple of the milestone interval.
    ScoreMilestone { score: u64 },
    /// Player hit the obstacle; the scene has already been restarted.
    Crashed {
        score: u64,
        high_score: u64,
        new_record: bool,
    },
}

/// The whole runner scene: scrolling field, player, input gate and scores.
#[derive(Debug, Clone)]
pub struct RunnerScene {
    pub state: GameState,
    pub field: ScrollField,
    pub player: Player,
    pub input_gate: InputGate,

    /// Sub-tick time accumulator (milliseconds).
    pub accumulated_time_ms: u64,
    /// Physics ticks run since the scene was last (re)built.
    pub tick_count: u64,
    /// Number of crash restarts in this process.
    pub restarts: u32,

    pub(crate) rng: StdRng,
}

impl RunnerScene {
    pub fn new(config: &GameConfig) -> Self {
        let mut rng = config.make_rng();
        let field = build_scroll_field(&mut rng);
        Self {
            state: GameState::new(),
            field,
            player: Player::new(),
            input_gate: InputGate::Idle,
            accumulated_time_ms: 0,
            tick_count: 0,
            restarts: 0,
            rng,
        }
    }

    /// Deterministic scene for tests and `--seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(&GameConfig {
            seed: Some(seed),
            ..Default::default()
        })
    }

    /// Rebuild the scene in place, keeping the high score and the rng.
    pub fn restart(&mut self) {
        self.field = build_scroll_field(&mut self.rng);
        self.player = Player::new();
        self.input_gate = InputGate::Idle;
        self.state.score = 0;
        self.state.phase = RunPhase::NotStarted;
        self.accumulated_time_ms = 0;
        self.tick_count = 0;
        self.restarts += 1;
    }
}
