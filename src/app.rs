//! Pong frame driver
//!
//! `PongApp::frame` is the per-frame callback: drain input, update velocities,
//! resolve collisions, integrate, render, present. The host scheduler decides
//! when it runs; `FramePacer` holds a faster host loop to the target rate.

use crate::assets::PongAssets;
use crate::config::DemoConfig;
use crate::renderer::{Canvas, Color, StatusLabel};
use crate::sim::{FrameState, KeyEvent, TickReport, tick};

/// Admits host callbacks at a fixed cadence.
///
/// `requestAnimationFrame` fires at the display rate, which may be higher
/// than the target. Callbacks that arrive early are skipped. After a stall
/// the schedule restarts from the late callback instead of running a burst
/// of catch-up frames.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval_ms: f64,
    next_due_ms: Option<f64>,
}

impl FramePacer {
    /// Timestamps jitter by a fraction of a millisecond between callbacks
    const TOLERANCE_MS: f64 = 1.0;

    pub fn new(fps: u32) -> Self {
        Self {
            interval_ms: 1000.0 / fps.max(1) as f64,
            next_due_ms: None,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Whether a frame should run for a callback at `now_ms`
    pub fn should_run(&mut self, now_ms: f64) -> bool {
        match self.next_due_ms {
            None => {
                self.next_due_ms = Some(now_ms + self.interval_ms);
                true
            }
            Some(due) if now_ms + Self::TOLERANCE_MS >= due => {
                let next = due + self.interval_ms;
                self.next_due_ms = Some(if next <= now_ms {
                    now_ms + self.interval_ms
                } else {
                    next
                });
                true
            }
            Some(_) => false,
        }
    }
}

/// The Pong loop: frame state plus the resources it draws with
pub struct PongApp<C: Canvas> {
    state: FrameState,
    background: Color,
    /// Frames between coordinate log lines, about one second's worth
    log_every: u64,
    paddle_tex: C::Texture,
    ball_tex: C::Texture,
    status: Option<StatusLabel<C::Texture>>,
}

impl<C: Canvas> PongApp<C> {
    /// Upload textures and build the initial frame state
    pub fn new(canvas: &mut C, config: &DemoConfig, assets: PongAssets) -> Result<Self, C::Error> {
        let paddle_tex = canvas.create_texture(&assets.paddle.image)?;
        let ball_tex = canvas.create_texture(&assets.ball.image)?;
        let status = assets.text.map(StatusLabel::new);

        let state = FrameState::from_config(config, assets.paddle.size(), assets.ball.size());
        canvas.set_draw_color(config.background);

        Ok(Self {
            state,
            background: config.background,
            log_every: u64::from(config.fps.max(1)),
            paddle_tex,
            ball_tex,
            status,
        })
    }

    pub fn state(&self) -> &FrameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut FrameState {
        &mut self.state
    }

    pub fn status(&self) -> Option<&StatusLabel<C::Texture>> {
        self.status.as_ref()
    }

    /// Window lost focus: key releases will not be delivered
    pub fn release_keys(&mut self) {
        self.state.input.release_all();
    }

    /// Run one frame
    pub fn frame<I>(&mut self, canvas: &mut C, events: I) -> Result<TickReport, C::Error>
    where
        I: IntoIterator<Item = KeyEvent>,
    {
        let report = tick(&mut self.state, events);
        self.render(canvas)?;

        if self.state.frame % self.log_every == 0 {
            log::debug!("frame {}: {}", self.state.frame, self.state.status_text());
        }

        Ok(report)
    }

    fn render(&mut self, canvas: &mut C) -> Result<(), C::Error> {
        canvas.set_draw_color(self.background);
        canvas.clear();
        canvas.copy(&self.paddle_tex, self.state.paddle.rect);
        canvas.copy(&self.ball_tex, self.state.ball.rect);

        if let Some(status) = &mut self.status {
            status.set_text(canvas, &self.state.status_text())?;
            status.draw(canvas);
        }

        canvas.present()
    }
}
