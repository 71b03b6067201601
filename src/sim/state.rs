//! Game state and core simulation types
//!
//! Everything the simulation mutates lives here: paddle, ball, block grid,
//! and the session that owns them. All randomness (ball spawn, block colors,
//! tie-breaks) flows through RNGs derived from the session seed so a session
//! replays identically from the same seed and inputs.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::GameConfig;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to pick a modifier (or quit)
    SelectingModifier,
    /// Active gameplay
    Playing,
    /// Ball fell past the paddle (or the grid was cleared in versus);
    /// final score is on display
    RoundOver,
    /// Session ended, the loop should exit
    Terminated,
}

/// Game mode: the canonical single-player game, or the historical
/// two-player best-of-two match it grew out of.
///
/// The two modes keep behaviorally distinct bounce heuristics on purpose;
/// see [`super::collision::BouncePolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Solo,
    Versus,
}

impl GameMode {
    /// Each mode is welded to its own bounce heuristic
    pub fn bounce_policy(self) -> super::collision::BouncePolicy {
        match self {
            GameMode::Solo => super::collision::BouncePolicy::AxisCrossing,
            GameMode::Versus => super::collision::BouncePolicy::MinPenetration,
        }
    }
}

/// Player slot, only meaningful in versus mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

/// Horizontal travel/steer direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleDir {
    Left,
    Right,
}

/// Per-axis travel direction of the ball.
///
/// The ball's velocity is `speed * sign` on each axis: collisions reflect a
/// sign, never rotate or rescale the direction, so a two-variant enum makes
/// the "always a unit sign" invariant structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sign {
    Neg,
    Pos,
}

impl Sign {
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Sign::Neg => Sign::Pos,
            Sign::Pos => Sign::Neg,
        }
    }

    #[inline]
    pub fn as_f32(self) -> f32 {
        match self {
            Sign::Neg => -1.0,
            Sign::Pos => 1.0,
        }
    }
}

/// An RGB block color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Uniform random color with every channel in [30, 256), bright enough
    /// to read against the background
    pub fn random(rng: &mut Pcg32) -> Self {
        Self {
            r: rng.random_range(30..=255),
            g: rng.random_range(30..=255),
            b: rng.random_range(30..=255),
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    pub speed: f32,
}

impl Paddle {
    /// Paddle centered at the bottom of the field
    pub fn new(config: &GameConfig) -> Self {
        Self {
            rect: Rect::new(
                config.field_width / 2.0 - config.paddle_width / 2.0,
                config.field_height - config.paddle_height - PADDLE_MARGIN_BOTTOM,
                config.paddle_width,
                config.paddle_height,
            ),
            speed: config.paddle_speed,
        }
    }

    /// Shift the paddle one step left or right.
    ///
    /// The boundary check reads the edge *before* moving, so a step taken
    /// right at the boundary can overshoot by up to `speed` px. That
    /// one-frame slack is long-standing observable behavior and is kept
    /// rather than tightened.
    pub fn move_toward(&mut self, dir: PaddleDir, field_width: f32) {
        match dir {
            PaddleDir::Left if self.rect.left() > 0.0 => self.rect.pos.x -= self.speed,
            PaddleDir::Right if self.rect.right() < field_width => self.rect.pos.x += self.speed,
            _ => {}
        }
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub rect: Rect,
    pub radius: f32,
    pub speed: f32,
    /// Horizontal travel sign
    pub dx: Sign,
    /// Vertical travel sign (screen coordinates: Neg is up)
    pub dy: Sign,
    /// Opacity for the fading-ball modifier (255 = opaque)
    pub alpha: u8,
}

impl Ball {
    /// Spawn at a random x within playable bounds, mid-field height,
    /// heading up and to the right
    pub fn spawn(config: &GameConfig, rng: &mut Pcg32) -> Self {
        let radius = config.ball_radius;
        let cx = rng.random_range(radius..config.field_width - radius);
        let size = Vec2::splat(radius * 2.0);
        Self {
            rect: Rect::from_center(Vec2::new(cx, config.field_height / 2.0), size),
            radius,
            speed: config.ball_speed,
            dx: Sign::Pos,
            dy: Sign::Neg,
            alpha: 255,
        }
    }

    /// Advance one tick along the current travel signs
    pub fn advance(&mut self) {
        self.rect.pos += Vec2::new(self.speed * self.dx.as_f32(), self.speed * self.dy.as_f32());
    }

    #[inline]
    pub fn reflect_x(&mut self) {
        self.dx = self.dx.flipped();
    }

    #[inline]
    pub fn reflect_y(&mut self) {
        self.dy = self.dy.flipped();
    }

    /// Linear opacity decay, re-derived from the absolute score each call
    /// (not cumulative): alpha = clamp(255 - 20*score, 0, 255)
    pub fn fade(&mut self, score: u32) {
        let alpha = 255 - (score as i64).saturating_mul(FADE_PER_POINT);
        self.alpha = alpha.clamp(0, 255) as u8;
    }
}

/// The destructible block grid: two parallel sequences indexed identically
///
/// Positions are deterministic; colors come from the round RNG. The
/// sequences stay equal length at all times: removal is atomic at one
/// index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockGrid {
    rects: Vec<Rect>,
    colors: Vec<Rgb>,
}

impl BlockGrid {
    /// Fixed 10x4 arrangement: 100x50 cells at origin (10,10), pitch (120,70)
    pub fn generate(rng: &mut Pcg32) -> Self {
        let mut rects = Vec::with_capacity(BLOCK_COLS * BLOCK_ROWS);
        for col in 0..BLOCK_COLS {
            for row in 0..BLOCK_ROWS {
                rects.push(Rect::new(
                    GRID_ORIGIN_X + GRID_PITCH_X * col as f32,
                    GRID_ORIGIN_Y + GRID_PITCH_Y * row as f32,
                    BLOCK_WIDTH,
                    BLOCK_HEIGHT,
                ));
            }
        }
        let colors = (0..rects.len()).map(|_| Rgb::random(rng)).collect();
        Self { rects, colors }
    }

    #[inline]
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Remove the block and its color at `index` atomically, returning them.
    ///
    /// An out-of-range index means collision detection handed us a stale
    /// hit, an internal invariant violation. Fatal in debug, no-op in
    /// release.
    pub fn remove(&mut self, index: usize) -> Option<(Rect, Rgb)> {
        if index >= self.rects.len() {
            debug_assert!(false, "block index {index} out of range ({})", self.rects.len());
            return None;
        }
        let rect = self.rects.remove(index);
        let color = self.colors.remove(index);
        Some((rect, color))
    }
}

/// Score-driven gameplay modifier, chosen once before play begins.
///
/// A closed enum: the selection screen offers exactly these two. "Player
/// closed the window during selection" is the quit event on the input
/// boundary, not a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modifier {
    /// Ball gradually becomes invisible as the score rises
    Invisible,
    /// Ball and paddle speed up with every block destroyed
    SpeedUp,
}

impl Modifier {
    /// Per-variant hook, run right after a block is destroyed
    pub fn on_block_destroyed(self, ball: &mut Ball, paddle: &mut Paddle, score: u32) {
        match self {
            Modifier::Invisible => ball.fade(score),
            Modifier::SpeedUp => {
                // Cumulative and proportional to the current score, so the
                // ramp steepens as the round goes on
                ball.speed += SPEED_GAIN_PER_POINT * score as f32;
                paddle.speed += SPEED_GAIN_PER_POINT * score as f32;
            }
        }
    }
}

/// One full game session: owns the paddle, ball, and grid for its lifetime
/// and replaces them wholesale on round reset. The mode lives on the config
/// so there is exactly one source of truth for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    /// Session seed for reproducibility
    pub seed: u64,
    pub config: GameConfig,
    pub phase: GamePhase,
    /// None until the selection screen resolves (and always None in versus)
    pub modifier: Option<Modifier>,
    /// Blocks destroyed this round; increments by exactly 1 per block
    pub score: u32,
    pub paddle: Paddle,
    pub ball: Ball,
    pub grid: BlockGrid,
    /// The paddle's movement direction this tick, feeding the spin mechanic
    pub paddle_dir: Option<PaddleDir>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Ticks left on the round-over score display (solo)
    pub round_over_ticks: u32,
    /// Ticks the ball still holds at its spawn point (versus serve delay)
    pub serve_ticks: u32,
    /// Round index: 0 in solo, 0..=1 in versus
    pub round: u8,
    /// Final score of each finished round (versus)
    pub round_scores: [Option<u32>; 2],
    /// Match winner, set when a versus session terminates
    pub winner: Option<Player>,
}

impl GameSession {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mode = config.mode;
        let mut rng = round_rng(seed, 0);
        let paddle = Paddle::new(&config);
        let ball = Ball::spawn(&config, &mut rng);
        let grid = BlockGrid::generate(&mut rng);

        let phase = match mode {
            // The selection screen gates play in the canonical game
            GameMode::Solo => GamePhase::SelectingModifier,
            // The historical match had no modifiers; straight into play
            GameMode::Versus => GamePhase::Playing,
        };
        let serve_ticks = match mode {
            GameMode::Solo => 0,
            GameMode::Versus => SERVE_DELAY_TICKS,
        };

        log::info!("new {mode:?} session, seed {seed}");

        Self {
            seed,
            config,
            phase,
            modifier: None,
            score: 0,
            paddle,
            ball,
            grid,
            paddle_dir: None,
            time_ticks: 0,
            round_over_ticks: 0,
            serve_ticks,
            round: 0,
            round_scores: [None; 2],
            winner: None,
        }
    }

    /// Replace paddle, ball, and grid for the next round (versus only) and
    /// zero the per-round state. Entities are rebuilt, not patched, so no
    /// stale speed or fade carries across rounds.
    pub fn reset_round(&mut self) {
        self.round += 1;
        let mut rng = round_rng(self.seed, self.round);
        self.paddle = Paddle::new(&self.config);
        self.ball = Ball::spawn(&self.config, &mut rng);
        self.grid = BlockGrid::generate(&mut rng);
        self.score = 0;
        self.paddle_dir = None;
        self.serve_ticks = SERVE_DELAY_TICKS;
        self.phase = GamePhase::Playing;
        log::info!("round {} begins", self.round + 1);
    }

    /// Decide the versus match from the two round scores. Ties go to a
    /// seed-derived coin flip, as the old two-player build settled them.
    pub fn decide_winner(&mut self) -> Player {
        let p1 = self.round_scores[0].unwrap_or(0);
        let p2 = self.round_scores[1].unwrap_or(0);
        let winner = if p1 > p2 {
            Player::One
        } else if p2 > p1 {
            Player::Two
        } else {
            let mut rng = Pcg32::seed_from_u64(self.seed ^ TIE_BREAK_STREAM);
            if rng.random_range(0..2) == 0 {
                Player::One
            } else {
                Player::Two
            }
        };
        self.winner = Some(winner);
        winner
    }
}

/// Per-round RNG, derived from the session seed so round 2 of a versus
/// match gets a fresh but reproducible grid
fn round_rng(seed: u64, round: u8) -> Pcg32 {
    Pcg32::seed_from_u64(seed.wrapping_add((round as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)))
}

/// Stream selector for the tie-break draw, kept apart from round RNGs
const TIE_BREAK_STREAM: u64 = 0x5DEE_CE66;
