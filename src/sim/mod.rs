//! Deterministic simulation module
//!
//! All Pong logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - One tick per frame, integer positions and velocities
//! - Input arrives as already-queued key events
//! - Collision checks use pre-integration positions

pub mod collision;
pub mod input;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{Contact, ball_edge_contacts, ball_paddle_collision};
pub use input::{Direction, InputAccumulator, KeyEvent, KeyState, normalize_diagonal};
pub use rect::Rect;
pub use state::{Body, FrameState, Viewport};
pub use tick::{TickReport, integrate, resolve_collisions, tick};
