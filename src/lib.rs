//! Brickfall - a modifier-driven block-breaking minigame
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `scene`: Render-boundary scene description for a presentation layer
//! - `config`: Runtime configuration with optional JSON overrides
//! - `assets`: Background image loading (non-fatal on failure)

pub mod assets;
pub mod config;
pub mod scene;
pub mod sim;

pub use config::GameConfig;
pub use scene::Scene;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions in pixels
    pub const FIELD_WIDTH: f32 = 1200.0;
    pub const FIELD_HEIGHT: f32 = 800.0;

    /// Fixed simulation/render tick rate (Hz). Difficulty never touches
    /// this; speed-ups go through entity speeds instead.
    pub const TICK_RATE: u32 = 30;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 300.0;
    pub const PADDLE_HEIGHT: f32 = 30.0;
    pub const PADDLE_SPEED: f32 = 10.0;
    /// Gap between the paddle and the bottom of the field
    pub const PADDLE_MARGIN_BOTTOM: f32 = 10.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_SPEED: f32 = 5.0;

    /// Block grid: 10 columns x 4 rows of 100x50 cells, laid out from a
    /// (10,10) origin on a (120,70) pitch
    pub const BLOCK_COLS: usize = 10;
    pub const BLOCK_ROWS: usize = 4;
    pub const BLOCK_WIDTH: f32 = 100.0;
    pub const BLOCK_HEIGHT: f32 = 50.0;
    pub const GRID_ORIGIN_X: f32 = 10.0;
    pub const GRID_ORIGIN_Y: f32 = 10.0;
    pub const GRID_PITCH_X: f32 = 120.0;
    pub const GRID_PITCH_Y: f32 = 70.0;

    /// Fading-ball modifier: opacity lost per point of score
    pub const FADE_PER_POINT: i64 = 20;
    /// Speed-up modifier: speed gained per point of current score
    pub const SPEED_GAIN_PER_POINT: f32 = 0.1;

    /// How long the round-over score display holds (3 s at 30 Hz)
    pub const ROUND_OVER_HOLD_TICKS: u32 = 3 * TICK_RATE;

    /// Corner band for the historical minimum-penetration bounce: equal-ish
    /// penetrations within this many px flip both axes
    pub const CORNER_BAND: f32 = 10.0;

    /// Versus mode: ticks the ball holds still at the start of a round
    pub const SERVE_DELAY_TICKS: u32 = 50;

    /// Versus mode entity sizing, as the old two-player build shipped it
    pub const VERSUS_PADDLE_WIDTH: f32 = 330.0;
    pub const VERSUS_PADDLE_HEIGHT: f32 = 35.0;
    pub const VERSUS_PADDLE_SPEED: f32 = 15.0;
    pub const VERSUS_BALL_RADIUS: f32 = 20.0;
    pub const VERSUS_BALL_SPEED: f32 = 6.0;
}
