//! Runtime game configuration
//!
//! Field dimensions, entity sizing, and mode live here so the sim never
//! reads globals. An optional JSON file can override the defaults; it is
//! only ever read, never written.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::GameMode;

/// Everything tunable about a session, captured at session start
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field_width: f32,
    pub field_height: f32,
    /// Simulation/render tick rate in Hz. Constant for the whole session:
    /// difficulty lives in entity speeds, never in the clock.
    pub tick_rate: u32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub ball_radius: f32,
    pub ball_speed: f32,
    pub mode: GameMode,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            tick_rate: TICK_RATE,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            ball_radius: BALL_RADIUS,
            ball_speed: BALL_SPEED,
            mode: GameMode::Solo,
        }
    }
}

impl GameConfig {
    /// Default config file path, next to the binary
    pub const FILE_PATH: &'static str = "brickfall.json";

    /// Switch modes, applying the mode's historical entity sizing. The old
    /// two-player build shipped a wider, faster paddle and a bigger ball.
    pub fn apply_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        match mode {
            GameMode::Solo => {
                self.paddle_width = PADDLE_WIDTH;
                self.paddle_height = PADDLE_HEIGHT;
                self.paddle_speed = PADDLE_SPEED;
                self.ball_radius = BALL_RADIUS;
                self.ball_speed = BALL_SPEED;
            }
            GameMode::Versus => {
                self.paddle_width = VERSUS_PADDLE_WIDTH;
                self.paddle_height = VERSUS_PADDLE_HEIGHT;
                self.paddle_speed = VERSUS_PADDLE_SPEED;
                self.ball_radius = VERSUS_BALL_RADIUS;
                self.ball_speed = VERSUS_BALL_SPEED;
            }
        }
    }

    /// Load config from a JSON file, falling back to defaults on any
    /// failure. A missing file is the normal case; a malformed one is
    /// worth a warning but never fatal.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => {
                    log::info!("loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("ignoring malformed config {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no config file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }
}
