// World dimensions (pixels)
pub const VIEWPORT_WIDTH: f64 = 420.0;
pub const VIEWPORT_HEIGHT: f64 = 290.0;
pub const VIEWPORT_WIDTH_PX: i32 = 420;
pub const VIEWPORT_HEIGHT_PX: i32 = 290;

// Tiles
pub const TILE_SIZE: f64 = 18.0;
pub const TILE_STEP: f64 = 18.0;
/// Tile rows are laid out until they extend this far past the right edge.
pub const ROW_OVERHANG: f64 = 48.0;

// Scroll and recycle
/// An entity is recycled once its x drops below this value.
pub const RECYCLE_BOUNDARY: f64 = -24.0;
/// Fixed respawn coordinate (right-edge spawn point).
pub const RESPAWN_X: f64 = VIEWPORT_WIDTH + 20.0;
pub const RESPAWN_X_PX: i32 = VIEWPORT_WIDTH_PX + 20;
/// Width of the randomized cloud respawn window past `RESPAWN_X`.
pub const CLOUD_RESPAWN_SPREAD_PX: i32 = 500;
pub const TILE_SPEED: f64 = -2.0;
pub const CLOUD_SPEED: f64 = -0.2;

// Ground and river rows (tile centers)
pub const GROUND_REF_Y: f64 = VIEWPORT_HEIGHT - TILE_SIZE;
pub const GRASS_Y: f64 = GROUND_REF_Y - 3.0 * TILE_SIZE;
/// Top edge of the grass row; the player stands on it.
pub const GROUND_TOP: f64 = GRASS_Y - TILE_SIZE / 2.0;
pub const DEEP_WATER_Y: f64 = VIEWPORT_HEIGHT - TILE_SIZE / 2.0;
pub const SHALLOW_WATER_Y: f64 = VIEWPORT_HEIGHT - TILE_SIZE;
/// Static backdrop row across the middle of the sky.
pub const HORIZON_Y: f64 = VIEWPORT_HEIGHT / 2.0;
pub const HORIZON_TILE_SIZE: f64 = 24.0;

// Obstacle
pub const OBSTACLE_SCALE: f64 = 2.0;
pub const OBSTACLE_SIZE: f64 = TILE_SIZE * OBSTACLE_SCALE;
pub const OBSTACLE_Y: f64 = VIEWPORT_HEIGHT - 99.0;

// Player
pub const PLAYER_X: f64 = 100.0;
pub const PLAYER_START_Y: f64 = VIEWPORT_HEIGHT - 105.0;
pub const PLAYER_WIDTH: f64 = 32.0;
pub const PLAYER_HEIGHT: f64 = 48.0;
/// Gravity in px/s^2 (positive = downward).
pub const GRAVITY: f64 = 600.0;
/// Jump velocity in px/s (negative = upward).
pub const JUMP_VELOCITY: f64 = -300.0;

// Scoring
pub const SCORE_PER_TICK: u64 = 5;
pub const SCORE_MILESTONE: u64 = 5000;

// Timing
pub const PHYSICS_TICK_MS: u64 = 16;
pub const PHYSICS_DT_SECONDS: f64 = 1.0 / 60.0;
/// Frame deltas are clamped to this to avoid a burst of steps after a stall.
pub const MAX_FRAME_DELTA_MS: u64 = 100;
pub const TICKS_PER_SECOND: u32 = 60;

// Terminal input
/// Without key-release events, the control counts as held this long after
/// the last repeat event.
pub const CONTROL_HOLD_MS: u64 = 150;
/// Hold after the initial press; outlasts the OS auto-repeat delay so a key
/// held down reads as one continuous press.
pub const CONTROL_INITIAL_HOLD_MS: u64 = 600;
pub const INPUT_POLL_MS: u64 = 8;
