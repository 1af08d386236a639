//! The per-frame loop: measure time, update the active scene, draw.

use std::time::Instant;

use crate::context::RenderContext;
use crate::input::Input;
use crate::scene::{Frame, SceneManager};

/// Something that can put the render context on screen.
pub trait FrameRenderer {
    /// Draw the current state of `ctx`.
    ///
    /// Gets mutable access so it can drain resources released since the
    /// previous frame.
    fn render(&mut self, ctx: &mut RenderContext);

    /// The drawable surface changed size, in physical pixels.
    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// Monotonic frame clock.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
        }
    }

    /// Seconds since the previous call (or since creation).
    pub fn lap(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }

    pub fn since_start(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives one frame at a time: dt, scene update, render.
///
/// The render call happens every tick, whether or not a scene is active and
/// whatever the scene did during its update.
#[derive(Debug, Default)]
pub struct FrameDriver {
    clock: FrameClock,
    max_dt: Option<f32>,
    elapsed: f32,
    frames: u64,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamp every frame's dt to at most `max_dt` seconds.
    pub fn with_max_dt(mut self, max_dt: Option<f32>) -> Self {
        self.max_dt = max_dt;
        self
    }

    /// Run one frame using the wall clock.
    pub fn tick<R: FrameRenderer + ?Sized>(
        &mut self,
        manager: &mut SceneManager,
        ctx: &mut RenderContext,
        input: &Input,
        renderer: &mut R,
    ) -> f32 {
        let dt = self.clock.lap();
        self.tick_with_dt(dt, manager, ctx, input, renderer)
    }

    /// Run one frame with a caller-supplied dt. Returns the dt the scene saw.
    pub fn tick_with_dt<R: FrameRenderer + ?Sized>(
        &mut self,
        dt: f32,
        manager: &mut SceneManager,
        ctx: &mut RenderContext,
        input: &Input,
        renderer: &mut R,
    ) -> f32 {
        let dt = self.clamp(dt);
        self.elapsed += dt;
        self.frames += 1;

        let mut frame = Frame {
            ctx,
            input,
            dt,
            time: self.elapsed,
        };
        manager.update(&mut frame);

        renderer.render(ctx);
        dt
    }

    /// Follow a window resize. Zero sizes and repeats are ignored.
    pub fn resize<R: FrameRenderer + ?Sized>(
        &mut self,
        ctx: &mut RenderContext,
        renderer: &mut R,
        width: u32,
        height: u32,
        scale_factor: f32,
    ) -> bool {
        if !ctx.set_viewport(width, height, scale_factor) {
            return false;
        }
        log::debug!("viewport now {width}x{height} @ {scale_factor}");
        renderer.resize(width, height);
        true
    }

    fn clamp(&self, dt: f32) -> f32 {
        // NaN fails the comparison and becomes zero
        let dt = if dt > 0.0 { dt } else { 0.0 };
        match self.max_dt {
            Some(max) => dt.min(max),
            None => dt,
        }
    }

    /// Scene time accumulated so far.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }
}
