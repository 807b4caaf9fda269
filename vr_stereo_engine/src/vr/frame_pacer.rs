/// Frame pacer - fixed time step loop decoupled from the mirror monitor.
///
/// The pacer runs `update` + `display` at the HMD's native rate. Buffer swap
/// and event polling on the mirror window happen on every iteration, whether
/// a step ran or not. Vsync on the mirror window is disabled because the
/// monitor's refresh rate differs from the headset's.

use std::time::{Duration, Instant};

use crate::config::VrConfig;
use crate::error::Result;

const SOURCE: &str = "stereo3d::FramePacer";

/// Monotonic time source
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin
    fn now(&self) -> Duration;
}

/// Wall clock based on `Instant`
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Mirror window event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// Framebuffer size changed
    Resized { width: u32, height: u32 },
}

/// Mirror window driven by the pacer
pub trait MirrorWindow {
    /// User asked to close the window
    fn should_close(&self) -> bool;

    /// Present the back buffer
    fn swap_buffers(&mut self);

    /// Process pending window-system events
    fn poll_events(&mut self) -> Vec<WindowEvent>;

    /// Set the buffer swap interval (0 disables vsync)
    fn set_swap_interval(&mut self, interval: i32);
}

/// Receives the paced callbacks
pub trait FrameHandler {
    /// Advance the application by one fixed step
    fn update(&mut self) -> Result<()>;

    /// Render one frame
    fn display(&mut self) -> Result<()>;

    /// Mirror window was resized
    fn resize(&mut self, width: u32, height: u32) -> Result<()>;
}

/// Fixed time step pacer
pub struct FramePacer<C: Clock> {
    clock: C,
    step: Duration,
    max_catch_up_steps: u32,
    swap_interval: i32,
    reference: Duration,
    steps_executed: u64,
    steps_dropped: u64,
}

impl<C: Clock> FramePacer<C> {
    /// Create a pacer. The reference time starts at `clock.now()`.
    ///
    /// A `max_catch_up_steps` of 0 is raised to 1 so the pacer always renders.
    pub fn new(clock: C, config: &VrConfig) -> Self {
        let reference = clock.now();
        if config.max_catch_up_steps == 0 {
            crate::engine_warn!(SOURCE, "max_catch_up_steps is 0, using 1");
        }
        Self {
            clock,
            step: config.time_step(),
            max_catch_up_steps: config.max_catch_up_steps.max(1),
            swap_interval: config.mirror_swap_interval,
            reference,
            steps_executed: 0,
            steps_dropped: 0,
        }
    }

    /// Execute every step that is due
    ///
    /// Runs `floor(elapsed / step)` steps (capped at `max_catch_up_steps`)
    /// and advances the reference time by one step per step. A backlog
    /// beyond the cap is dropped. Returns the number of steps executed.
    pub fn poll<H: FrameHandler + ?Sized>(&mut self, handler: &mut H) -> Result<u32> {
        if self.step.is_zero() {
            return Ok(0);
        }

        let elapsed = self.clock.now().saturating_sub(self.reference);
        let due = elapsed.as_nanos() / self.step.as_nanos();
        let run = due.min(self.max_catch_up_steps as u128) as u32;

        for _ in 0..run {
            handler.update()?;
            handler.display()?;
            self.reference += self.step;
            self.steps_executed += 1;
        }

        let dropped = due - run as u128;
        if dropped > 0 {
            let dropped = dropped as u32;
            self.reference += self.step * dropped;
            self.steps_dropped += dropped as u64;
            crate::engine_warn!(SOURCE, "Dropped {} frame step(s), render loop is behind", dropped);
        }

        Ok(run)
    }

    /// Drive `handler` until the window should close
    ///
    /// Applies the configured swap interval once, then per iteration: poll,
    /// swap buffers, poll window events and forward resizes.
    pub fn run<W, H>(&mut self, window: &mut W, handler: &mut H) -> Result<()>
    where
        W: MirrorWindow + ?Sized,
        H: FrameHandler + ?Sized,
    {
        window.set_swap_interval(self.swap_interval);
        self.reference = self.clock.now();

        crate::engine_info!(SOURCE, "Running at a fixed step of {:?}", self.step);

        while !window.should_close() {
            self.poll(handler)?;
            window.swap_buffers();
            for event in window.poll_events() {
                match event {
                    WindowEvent::Resized { width, height } => handler.resize(width, height)?,
                }
            }
        }

        crate::engine_info!(SOURCE, "Loop finished after {} steps ({} dropped)",
            self.steps_executed, self.steps_dropped);
        Ok(())
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Total steps executed
    pub fn steps_executed(&self) -> u64 {
        self.steps_executed
    }

    /// Total steps dropped by the catch-up cap
    pub fn steps_dropped(&self) -> u64 {
        self.steps_dropped
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
#[path = "frame_pacer_tests.rs"]
mod tests;
