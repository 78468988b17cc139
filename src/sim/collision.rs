//! Collision detection and response
//!
//! Every check looks at the position before integration. Nothing predicts the
//! contact instant, so fast or thin bodies can tunnel and a ball sitting in a
//! corner next to the paddle gets reflected more than once in a single tick.

use glam::IVec2;

use super::rect::Rect;
use super::state::Viewport;

/// A reflection applied during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Ball overlaps the paddle (vertical flip)
    Paddle,
    /// Ball reached the bottom edge (vertical flip)
    Bottom,
    /// Ball reached the top edge (vertical flip)
    Top,
    /// Ball reached the right edge (horizontal flip)
    Right,
    /// Ball reached the left edge (horizontal flip)
    Left,
}

impl Contact {
    /// Apply this contact's reflection to a velocity
    #[inline]
    pub fn reflect(self, vel: IVec2) -> IVec2 {
        match self {
            Contact::Paddle | Contact::Bottom | Contact::Top => IVec2::new(vel.x, -vel.y),
            Contact::Right | Contact::Left => IVec2::new(-vel.x, vel.y),
        }
    }
}

/// Check whether the ball overlaps the paddle
#[inline]
pub fn ball_paddle_collision(ball: &Rect, paddle: &Rect) -> bool {
    ball.intersects(paddle)
}

/// Edges the ball is touching or past, in check order.
///
/// The checks are independent: a ball wider than the viewport touches both
/// side edges at once and both are reported.
pub fn ball_edge_contacts(ball: &Rect, viewport: Viewport) -> Vec<Contact> {
    let mut contacts = Vec::with_capacity(2);

    if ball.y >= viewport.height - ball.h {
        contacts.push(Contact::Bottom);
    }
    if ball.y <= 0 {
        contacts.push(Contact::Top);
    }
    if ball.x >= viewport.width - ball.w {
        contacts.push(Contact::Right);
    }
    if ball.x <= 0 {
        contacts.push(Contact::Left);
    }

    contacts
}
