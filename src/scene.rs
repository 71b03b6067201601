//! Render-boundary scene description
//!
//! The simulation never draws. Once per tick the loop snapshots the session
//! into a [`Scene`] (remaining blocks with their colors, paddle, ball with
//! its opacity, and the HUD facts) and hands it to whatever presentation
//! layer is attached. The presentation reads the scene; it never reaches
//! back into the session.

use crate::assets::Background;
use crate::sim::{GamePhase, GameSession, Rect, Rgb};

/// The ball as the presentation sees it: a rect plus opacity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallSprite {
    pub rect: Rect,
    pub alpha: u8,
}

/// One frame's worth of drawable state
#[derive(Debug, Clone)]
pub struct Scene<'a> {
    /// Background image, if the asset loaded
    pub background: Option<&'a Background>,
    /// Remaining blocks, paired with their colors in grid order
    pub blocks: Vec<(Rect, Rgb)>,
    pub paddle: Rect,
    pub ball: BallSprite,
    /// HUD facts: the score readout and which screen to show
    pub score: u32,
    pub phase: GamePhase,
}

impl<'a> Scene<'a> {
    /// Snapshot the session for this tick
    pub fn from_session(session: &GameSession, background: Option<&'a Background>) -> Self {
        let blocks = session
            .grid
            .rects()
            .iter()
            .copied()
            .zip(session.grid.colors().iter().copied())
            .collect();

        Self {
            background,
            blocks,
            paddle: session.paddle.rect,
            ball: BallSprite {
                rect: session.ball.rect,
                alpha: session.ball.alpha,
            },
            score: session.score,
            phase: session.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::GameSession;

    #[test]
    fn test_scene_snapshot_matches_session() {
        let mut session = GameSession::new(GameConfig::default(), 21);
        session.grid.remove(3);
        session.score = 1;
        session.ball.alpha = 120;

        let scene = Scene::from_session(&session, None);
        assert_eq!(scene.blocks.len(), 39);
        assert_eq!(scene.paddle, session.paddle.rect);
        assert_eq!(scene.ball.rect, session.ball.rect);
        assert_eq!(scene.ball.alpha, 120);
        assert_eq!(scene.score, 1);
        assert_eq!(scene.phase, session.phase);
        assert!(scene.background.is_none());
    }

    #[test]
    fn test_scene_pairs_blocks_with_colors() {
        let session = GameSession::new(GameConfig::default(), 21);
        let scene = Scene::from_session(&session, None);
        for (i, (rect, color)) in scene.blocks.iter().enumerate() {
            assert_eq!(*rect, session.grid.rects()[i]);
            assert_eq!(*color, session.grid.colors()[i]);
        }
    }
}
