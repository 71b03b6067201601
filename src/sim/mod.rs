//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::BouncePolicy;
pub use rect::{Rect, first_intersection};
pub use state::{
    Ball, BlockGrid, GameMode, GamePhase, GameSession, Modifier, Paddle, PaddleDir, Player, Rgb,
    Sign,
};
pub use tick::{TickInput, tick};
