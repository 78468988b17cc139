//! Per-frame simulation tick
//!
//! Input, collision response and integration, always in that order.

use super::collision::{Contact, ball_edge_contacts, ball_paddle_collision};
use super::input::KeyEvent;
use super::state::FrameState;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Reflections applied to the ball, in application order
    pub contacts: Vec<Contact>,
}

/// Reflect the ball off the paddle and the viewport edges.
///
/// Uses the positions from before this tick's integration. Each contact flips
/// its velocity component independently, so two vertical contacts in one tick
/// cancel out.
pub fn resolve_collisions(state: &mut FrameState) -> Vec<Contact> {
    let mut contacts = Vec::new();

    if ball_paddle_collision(&state.ball.rect, &state.paddle.rect) {
        contacts.push(Contact::Paddle);
    }
    contacts.extend(ball_edge_contacts(&state.ball.rect, state.viewport));

    for contact in &contacts {
        state.ball.vel = contact.reflect(state.ball.vel);
    }

    contacts
}

/// Advance both bodies by one frame of velocity. No clamping.
pub fn integrate(state: &mut FrameState) {
    state.paddle.rect.translate(state.paddle.vel);
    state.ball.rect.translate(state.ball.vel);
}

/// Advance the frame state by one frame
pub fn tick<I>(state: &mut FrameState, events: I) -> TickReport
where
    I: IntoIterator<Item = KeyEvent>,
{
    state.input.drain(events);
    state.paddle.vel = state.input.paddle_velocity(state.paddle_speed);

    let contacts = resolve_collisions(state);
    for contact in &contacts {
        log::trace!("frame {}: ball contact {:?}", state.frame, contact);
    }

    integrate(state);
    state.frame += 1;

    TickReport { contacts }
}

#[cfg(test)]
mod tests {
    use glam::IVec2;
    use proptest::prelude::*;

    use super::*;
    use crate::sim::input::Direction;
    use crate::sim::rect::Rect;
    use crate::sim::state::Viewport;

    fn new_state() -> FrameState {
        FrameState::new(
            Viewport::new(1024, 600),
            IVec2::new(128, 32),
            IVec2::new(32, 32),
            IVec2::new(5, 5),
            5,
        )
    }

    #[test]
    fn test_first_tick_moves_ball() {
        let mut state = new_state();
        let report = tick(&mut state, []);
        assert!(report.contacts.is_empty());
        assert_eq!(state.ball.pos(), IVec2::new(517, 305));
        assert_eq!(state.paddle.pos(), IVec2::new(512, 568));
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_top_edge_reflects() {
        let mut state = new_state();
        state.ball.rect.set_position(IVec2::new(300, 0));
        state.ball.vel = IVec2::new(5, 5);

        let report = tick(&mut state, []);
        assert_eq!(report.contacts, vec![Contact::Top]);
        assert_eq!(state.ball.vel, IVec2::new(5, -5));
        // Reflection happens before integration, no clamping afterwards
        assert_eq!(state.ball.pos(), IVec2::new(305, -5));
    }

    #[test]
    fn test_bottom_edge_reflects() {
        let mut state = new_state();
        state.paddle.rect.set_position(IVec2::new(0, 568));
        state.ball.rect.set_position(IVec2::new(600, 568));
        state.ball.vel = IVec2::new(5, 5);

        tick(&mut state, []);
        assert_eq!(state.ball.vel, IVec2::new(5, -5));
    }

    #[test]
    fn test_side_edges_reflect() {
        let mut state = new_state();
        state.ball.rect.set_position(IVec2::new(992, 300));
        state.ball.vel = IVec2::new(5, 5);
        tick(&mut state, []);
        assert_eq!(state.ball.vel, IVec2::new(-5, 5));

        state.ball.rect.set_position(IVec2::new(0, 300));
        state.ball.vel = IVec2::new(-5, 5);
        tick(&mut state, []);
        assert_eq!(state.ball.vel, IVec2::new(5, 5));
    }

    #[test]
    fn test_overshoot_reflects_back_next_frame() {
        let mut state = new_state();
        state.ball.rect.set_position(IVec2::new(300, 2));
        state.ball.vel = IVec2::new(0, -5);

        tick(&mut state, []);
        assert_eq!(state.ball.pos(), IVec2::new(300, -3));
        assert_eq!(state.ball.vel, IVec2::new(0, -5));

        tick(&mut state, []);
        assert_eq!(state.ball.vel, IVec2::new(0, 5));
        assert_eq!(state.ball.pos(), IVec2::new(300, 2));
    }

    #[test]
    fn test_paddle_hit_reflects() {
        let mut state = new_state();
        state.ball.rect.set_position(IVec2::new(540, 540));
        state.ball.vel = IVec2::new(5, 5);

        let report = tick(&mut state, []);
        assert_eq!(report.contacts, vec![Contact::Paddle]);
        assert_eq!(state.ball.vel, IVec2::new(5, -5));
    }

    #[test]
    fn test_double_bounce_cancels() {
        // Paddle moved to the top edge: the ball touches both in one frame
        let mut state = new_state();
        state.paddle.rect.set_position(IVec2::new(300, 0));
        state.ball.rect.set_position(IVec2::new(310, 0));
        state.ball.vel = IVec2::new(5, -5);

        let report = tick(&mut state, []);
        assert_eq!(report.contacts, vec![Contact::Paddle, Contact::Top]);
        assert_eq!(state.ball.vel, IVec2::new(5, -5));
    }

    #[test]
    fn test_held_key_moves_paddle() {
        let mut state = new_state();
        tick(&mut state, [KeyEvent::pressed(Direction::Left)]);
        assert_eq!(state.paddle.vel, IVec2::new(-5, 0));
        assert_eq!(state.paddle.pos(), IVec2::new(507, 568));

        // Still held with no new events
        tick(&mut state, []);
        assert_eq!(state.paddle.pos(), IVec2::new(502, 568));

        tick(&mut state, [KeyEvent::released(Direction::Left)]);
        assert_eq!(state.paddle.vel, IVec2::ZERO);
        assert_eq!(state.paddle.pos(), IVec2::new(502, 568));
    }

    #[test]
    fn test_paddle_is_not_clamped() {
        let mut state = new_state();
        state.paddle.rect.set_position(IVec2::new(2, 568));
        tick(&mut state, [KeyEvent::pressed(Direction::Left)]);
        assert_eq!(state.paddle.pos(), IVec2::new(-3, 568));
    }

    #[test]
    fn test_paddle_held_left_forever_stops_at_range_limit() {
        let mut state = new_state();
        state.paddle.rect.set_position(IVec2::new(i32::MIN + 7, 568));
        tick(&mut state, [KeyEvent::pressed(Direction::Left)]);
        tick(&mut state, []);
        tick(&mut state, []);
        assert_eq!(state.paddle.pos(), IVec2::new(i32::MIN, 568));
        assert_eq!(state.frame, 3);
    }

    #[test]
    fn test_vertical_keys_leave_paddle_row() {
        let mut state = new_state();
        tick(
            &mut state,
            [
                KeyEvent::pressed(Direction::Up),
                KeyEvent::pressed(Direction::Right),
            ],
        );
        assert_eq!(state.paddle.vel, IVec2::new(5, 0));
        assert_eq!(state.paddle.pos(), IVec2::new(517, 568));
    }

    #[test]
    fn test_ball_speed_is_conserved_over_many_frames() {
        let mut state = new_state();
        for _ in 0..10_000 {
            tick(&mut state, []);
            assert_eq!(state.ball.vel.x.abs(), 5);
            assert_eq!(state.ball.vel.y.abs(), 5);
        }
    }

    #[test]
    fn test_empty_ball_rect_never_hits_paddle() {
        let mut state = new_state();
        state.ball.rect = Rect::new(540, 570, 0, 0);
        let contacts = resolve_collisions(&mut state);
        assert!(!contacts.contains(&Contact::Paddle));
    }

    proptest! {
        #[test]
        fn prop_paddle_overlap_inverts_vy(
            paddle_x in 100i32..800,
            paddle_y in 100i32..450,
            dx in -31i32..128,
            dy in -31i32..32,
            vx in -20i32..20,
            vy in prop_oneof![-20i32..-1, 1i32..20],
        ) {
            let mut state = new_state();
            state.paddle.rect.set_position(IVec2::new(paddle_x, paddle_y));
            state.ball.rect.set_position(IVec2::new(paddle_x + dx, paddle_y + dy));
            state.ball.vel = IVec2::new(vx, vy);
            prop_assume!(ball_edge_contacts(&state.ball.rect, state.viewport).is_empty());

            let contacts = resolve_collisions(&mut state);
            prop_assert_eq!(contacts, vec![Contact::Paddle]);
            prop_assert_eq!(state.ball.vel, IVec2::new(vx, -vy));
        }

        #[test]
        fn prop_no_input_keeps_paddle_still(frames in 1usize..500) {
            let mut state = new_state();
            let start = state.paddle.rect;
            for _ in 0..frames {
                tick(&mut state, []);
                prop_assert_eq!(state.paddle.vel, IVec2::ZERO);
            }
            prop_assert_eq!(state.paddle.rect, start);
        }

        #[test]
        fn prop_edge_contacts_flip_matching_axis(
            x in -10i32..1030,
            y in -10i32..610,
        ) {
            let mut state = new_state();
            state.paddle.rect.set_position(IVec2::new(-10_000, -10_000));
            state.ball.rect.set_position(IVec2::new(x, y));
            state.ball.vel = IVec2::new(5, 5);

            let contacts = resolve_collisions(&mut state);
            let vertical = contacts
                .iter()
                .filter(|c| matches!(c, Contact::Top | Contact::Bottom))
                .count();
            let horizontal = contacts.len() - vertical;

            let expect_y = if vertical % 2 == 1 { -5 } else { 5 };
            let expect_x = if horizontal % 2 == 1 { -5 } else { 5 };
            prop_assert_eq!(state.ball.vel, IVec2::new(expect_x, expect_y));
        }
    }
}
