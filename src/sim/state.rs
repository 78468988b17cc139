//! Frame state and core simulation types
//!
//! One `FrameState` is created before the first frame and mutated in place by
//! every tick. It is owned by the frame driver; nothing here is global.

use glam::IVec2;

use super::input::InputAccumulator;
use super::rect::Rect;
use crate::config::DemoConfig;

/// Logical viewport the bodies bounce inside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// A textured rectangle that moves with an integer velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Body {
    /// Position and cached texture size
    pub rect: Rect,
    /// Pixels per frame
    pub vel: IVec2,
}

impl Body {
    pub fn new(pos: IVec2, size: IVec2, vel: IVec2) -> Self {
        Self {
            rect: Rect::new(pos.x, pos.y, size.x, size.y),
            vel,
        }
    }

    #[inline]
    pub fn pos(&self) -> IVec2 {
        self.rect.position()
    }

    #[inline]
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.rect.w, self.rect.h)
    }
}

/// Everything the Pong loop mutates between frames
#[derive(Debug, Clone)]
pub struct FrameState {
    pub viewport: Viewport,
    pub paddle: Body,
    pub ball: Body,
    pub input: InputAccumulator,
    /// Horizontal paddle speed while a key is held
    pub paddle_speed: i32,
    /// Number of completed ticks
    pub frame: u64,
}

impl FrameState {
    /// Paddle centred-ish on the bottom edge, ball in the middle of the view
    pub fn new(
        viewport: Viewport,
        paddle_size: IVec2,
        ball_size: IVec2,
        ball_vel: IVec2,
        paddle_speed: i32,
    ) -> Self {
        let paddle_pos = IVec2::new(viewport.width / 2, viewport.height - paddle_size.y);
        let ball_pos = IVec2::new(viewport.width / 2, viewport.height / 2);

        Self {
            viewport,
            paddle: Body::new(paddle_pos, paddle_size, IVec2::ZERO),
            ball: Body::new(ball_pos, ball_size, ball_vel),
            input: InputAccumulator::new(),
            paddle_speed,
            frame: 0,
        }
    }

    /// Initial state for the configured viewport and speeds
    pub fn from_config(config: &DemoConfig, paddle_size: IVec2, ball_size: IVec2) -> Self {
        Self::new(
            config.viewport(),
            paddle_size,
            ball_size,
            IVec2::from_array(config.ball_velocity),
            config.paddle_speed,
        )
    }

    /// Text shown in the top-left corner
    pub fn status_text(&self) -> String {
        format!("X: {} Y: {}", self.ball.rect.x, self.ball.rect.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let state = FrameState::new(
            Viewport::new(1024, 600),
            IVec2::new(128, 32),
            IVec2::new(32, 32),
            IVec2::new(5, 5),
            5,
        );

        assert_eq!(state.paddle.rect, Rect::new(512, 568, 128, 32));
        assert_eq!(state.paddle.vel, IVec2::ZERO);
        assert_eq!(state.ball.rect, Rect::new(512, 300, 32, 32));
        assert_eq!(state.ball.vel, IVec2::new(5, 5));
        assert!(state.input.is_idle());
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn test_from_default_config() {
        let config = DemoConfig::default();
        let state = FrameState::from_config(&config, IVec2::new(100, 20), IVec2::new(32, 32));
        assert_eq!(state.viewport, Viewport::new(1024, 600));
        assert_eq!(state.paddle.pos(), IVec2::new(512, 580));
        assert_eq!(state.ball.vel, IVec2::new(5, 5));
        assert_eq!(state.paddle_speed, 5);
    }

    #[test]
    fn test_status_text() {
        let mut state = FrameState::new(
            Viewport::new(1024, 600),
            IVec2::new(128, 32),
            IVec2::new(32, 32),
            IVec2::new(5, 5),
            5,
        );
        assert_eq!(state.status_text(), "X: 512 Y: 300");

        state.ball.rect.set_position(IVec2::new(-5, 0));
        assert_eq!(state.status_text(), "X: -5 Y: 0");
    }
}
