//! Collision detection and response
//!
//! The bug-prone part of the game: deciding, per tick, how the ball's travel
//! signs react to walls, the paddle, and a destroyed block. Responses only
//! ever flip a sign; speed and axis-alignment are untouchable here.
//!
//! Two block/paddle bounce heuristics exist and are deliberately kept apart:
//! the canonical per-axis edge-crossing test, and the historical
//! minimum-penetration test from the old two-player build. They behave
//! differently near corners and must never be blended.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::{Ball, PaddleDir, Sign};
use crate::consts::CORNER_BAND;

/// Which bounce heuristic a session runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BouncePolicy {
    /// Canonical: independent leading-edge crossing tests per axis. Both
    /// axes may flip in the same tick, producing a straight 180° reversal
    /// on deep corner hits. Long-observed behavior, preserved on purpose.
    #[default]
    AxisCrossing,
    /// Historical: compare penetration depths and flip the shallower axis
    /// only, except inside a ±10 px corner band where both flip.
    MinPenetration,
}

/// Reflect off the side and top walls.
///
/// Horizontal: reflect when the ball's center leaves `[radius, field_width -
/// radius]`. Vertical: reflect only at the top; the bottom edge is the loss
/// condition and belongs to the state machine, not to collision response.
pub fn wall_bounce(ball: &mut Ball, field_width: f32) {
    let cx = ball.rect.centerx();
    if cx < ball.radius || cx > field_width - ball.radius {
        ball.reflect_x();
        log::debug!("wall bounce, dx now {:?}", ball.dx);
    }
    if ball.rect.centery() < ball.radius {
        ball.reflect_y();
        log::debug!("ceiling bounce, dy now {:?}", ball.dy);
    }
}

/// Resolve a ball/paddle collision. Returns true if the ball bounced.
///
/// Only a downward-moving ball can hit the paddle; an upward ball passing
/// through the paddle band is left alone so it cannot be captured.
pub fn paddle_bounce(
    ball: &mut Ball,
    paddle_rect: &Rect,
    paddle_dir: Option<PaddleDir>,
    policy: BouncePolicy,
) -> bool {
    if ball.dy != Sign::Pos || !ball.rect.intersects(paddle_rect) {
        return false;
    }

    match policy {
        BouncePolicy::AxisCrossing => {
            // Spin mechanic: the paddle's own motion steers the ball's
            // horizontal sign. A stationary paddle leaves dx alone.
            match paddle_dir {
                Some(PaddleDir::Left) => ball.dx = Sign::Neg,
                Some(PaddleDir::Right) => ball.dx = Sign::Pos,
                None => {}
            }
            ball.reflect_y();
        }
        BouncePolicy::MinPenetration => {
            // The old build ran its block heuristic against the paddle too,
            // with no spin coupling
            min_penetration_bounce(ball, paddle_rect);
        }
    }
    true
}

/// Resolve the bounce against a block the ball just destroyed
pub fn block_bounce(ball: &mut Ball, block: &Rect, policy: BouncePolicy) {
    match policy {
        BouncePolicy::AxisCrossing => axis_crossing_bounce(ball, block),
        BouncePolicy::MinPenetration => min_penetration_bounce(ball, block),
    }
}

/// Canonical heuristic: for each axis, flip the sign only if the ball's
/// leading edge has crossed the block's near edge on that axis.
///
/// The two tests are independent: a deep corner hit crosses both
/// thresholds and reverses the ball outright.
fn axis_crossing_bounce(ball: &mut Ball, block: &Rect) {
    let crossed_x = match ball.dx {
        Sign::Pos => ball.rect.right() > block.left() && ball.rect.left() < block.left(),
        Sign::Neg => ball.rect.left() < block.right() && ball.rect.right() > block.right(),
    };
    let crossed_y = match ball.dy {
        Sign::Pos => ball.rect.bottom() > block.top() && ball.rect.top() < block.top(),
        Sign::Neg => ball.rect.top() < block.bottom() && ball.rect.bottom() > block.bottom(),
    };

    if crossed_x {
        ball.reflect_x();
    }
    if crossed_y {
        ball.reflect_y();
    }
}

/// Historical heuristic: measure how far the leading edges have penetrated
/// on each axis and flip the axis with the shallower penetration. Inside the
/// corner band both flip.
fn min_penetration_bounce(ball: &mut Ball, block: &Rect) {
    let delta_x = match ball.dx {
        Sign::Pos => ball.rect.right() - block.left(),
        Sign::Neg => block.right() - ball.rect.left(),
    };
    let delta_y = match ball.dy {
        Sign::Pos => ball.rect.bottom() - block.top(),
        Sign::Neg => block.bottom() - ball.rect.top(),
    };

    if (delta_x - delta_y).abs() < CORNER_BAND {
        ball.reflect_x();
        ball.reflect_y();
    } else if delta_x > delta_y {
        ball.reflect_y();
    } else {
        ball.reflect_x();
    }
}
