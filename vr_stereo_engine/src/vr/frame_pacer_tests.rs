//! Unit tests for FramePacer

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::config::VrConfig;
use crate::error::{Error, Result};
use crate::vr::{Clock, FramePacer, FrameHandler, MirrorWindow, WindowEvent};

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Simulated clock shared with the test body
#[derive(Clone, Default)]
struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

#[derive(Default)]
struct CountingHandler {
    log: Vec<String>,
    fail_display: bool,
}

impl CountingHandler {
    fn count(&self, name: &str) -> usize {
        self.log.iter().filter(|e| e.as_str() == name).count()
    }
}

impl FrameHandler for CountingHandler {
    fn update(&mut self) -> Result<()> {
        self.log.push("update".to_string());
        Ok(())
    }

    fn display(&mut self) -> Result<()> {
        if self.fail_display {
            return Err(Error::CreationError("no target".to_string()));
        }
        self.log.push("display".to_string());
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.log.push(format!("resize {}x{}", width, height));
        Ok(())
    }
}

/// Window closing after a fixed number of iterations, advancing the clock
/// on every swap
struct ScriptedWindow {
    clock: ManualClock,
    advance: Duration,
    iterations_left: usize,
    swaps: usize,
    swap_interval: Option<i32>,
    swap_interval_calls: usize,
    events: Vec<Vec<WindowEvent>>,
}

impl MirrorWindow for ScriptedWindow {
    fn should_close(&self) -> bool {
        self.iterations_left == 0
    }

    fn swap_buffers(&mut self) {
        self.swaps += 1;
        self.clock.advance(self.advance);
    }

    fn poll_events(&mut self) -> Vec<WindowEvent> {
        self.iterations_left -= 1;
        if self.events.is_empty() {
            Vec::new()
        } else {
            self.events.remove(0)
        }
    }

    fn set_swap_interval(&mut self, interval: i32) {
        self.swap_interval = Some(interval);
        self.swap_interval_calls += 1;
    }
}

fn step_90hz() -> Duration {
    Duration::from_secs_f64(1.0 / 90.0)
}

// ============================================================================
// poll
// ============================================================================

#[test]
fn test_poll_1_30_over_1_90_runs_three_steps() {
    let clock = ManualClock::default();
    let mut pacer = FramePacer::new(clock.clone(), &VrConfig::default());
    let mut handler = CountingHandler::default();

    for round in 1..=10 {
        clock.advance(Duration::from_secs_f64(1.0 / 30.0));
        let steps = pacer.poll(&mut handler).unwrap();
        assert_eq!(steps, 3, "round {}", round);
    }

    assert_eq!(handler.count("update"), 30);
    assert_eq!(handler.count("display"), 30);
    assert_eq!(pacer.steps_dropped(), 0);
}

#[test]
fn test_poll_update_precedes_display() {
    let clock = ManualClock::default();
    let mut pacer = FramePacer::new(clock.clone(), &VrConfig::default());
    let mut handler = CountingHandler::default();

    clock.advance(step_90hz() * 2);
    pacer.poll(&mut handler).unwrap();

    assert_eq!(handler.log, vec!["update", "display", "update", "display"]);
}

#[test]
fn test_poll_before_step_elapsed_does_nothing() {
    let clock = ManualClock::default();
    let mut pacer = FramePacer::new(clock.clone(), &VrConfig::default());
    let mut handler = CountingHandler::default();

    clock.advance(step_90hz() / 2);
    assert_eq!(pacer.poll(&mut handler).unwrap(), 0);

    // Remainder is kept: the second half completes the step
    clock.advance(step_90hz() / 2 + Duration::from_nanos(1));
    assert_eq!(pacer.poll(&mut handler).unwrap(), 1);
}

#[test]
fn test_poll_caps_catch_up_and_drops_backlog() {
    let clock = ManualClock::default();
    let config = VrConfig { max_catch_up_steps: 4, ..VrConfig::default() };
    let mut pacer = FramePacer::new(clock.clone(), &config);
    let mut handler = CountingHandler::default();

    clock.advance(step_90hz() * 10);
    assert_eq!(pacer.poll(&mut handler).unwrap(), 4);
    assert_eq!(pacer.steps_dropped(), 6);

    // Backlog is gone
    assert_eq!(pacer.poll(&mut handler).unwrap(), 0);
}

#[test]
fn test_zero_catch_up_limit_still_runs_one_step() {
    let clock = ManualClock::default();
    let config = VrConfig { max_catch_up_steps: 0, ..VrConfig::default() };
    let mut pacer = FramePacer::new(clock.clone(), &config);
    let mut handler = CountingHandler::default();

    clock.advance(step_90hz() * 3);
    assert_eq!(pacer.poll(&mut handler).unwrap(), 1);
    assert_eq!(pacer.steps_executed(), 1);
    assert_eq!(pacer.steps_dropped(), 2);

    clock.advance(step_90hz());
    assert_eq!(pacer.poll(&mut handler).unwrap(), 1);
    assert_eq!(pacer.steps_executed(), 2);
}

#[test]
fn test_poll_propagates_handler_error() {
    let clock = ManualClock::default();
    let mut pacer = FramePacer::new(clock.clone(), &VrConfig::default());
    let mut handler = CountingHandler { fail_display: true, ..Default::default() };

    clock.advance(step_90hz());
    assert!(matches!(pacer.poll(&mut handler), Err(Error::CreationError(_))));
    assert_eq!(pacer.steps_executed(), 0);
}

// ============================================================================
// run
// ============================================================================

#[test]
fn test_run_disables_vsync_once_and_swaps_every_iteration() {
    let clock = ManualClock::default();
    let mut pacer = FramePacer::new(clock.clone(), &VrConfig::default());
    let mut handler = CountingHandler::default();
    let mut window = ScriptedWindow {
        clock: clock.clone(),
        advance: step_90hz() / 4,
        iterations_left: 12,
        swaps: 0,
        swap_interval: None,
        swap_interval_calls: 0,
        events: Vec::new(),
    };

    pacer.run(&mut window, &mut handler).unwrap();

    assert_eq!(window.swap_interval, Some(0));
    assert_eq!(window.swap_interval_calls, 1);
    assert_eq!(window.swaps, 12);
    // 12 quarter steps: 11 elapsed at the last poll
    assert_eq!(handler.count("display"), 2);
}

#[test]
fn test_run_forwards_resize_events() {
    let clock = ManualClock::default();
    let mut pacer = FramePacer::new(clock.clone(), &VrConfig::default());
    let mut handler = CountingHandler::default();
    let mut window = ScriptedWindow {
        clock: clock.clone(),
        advance: Duration::ZERO,
        iterations_left: 2,
        swaps: 0,
        swap_interval: None,
        swap_interval_calls: 0,
        events: vec![vec![WindowEvent::Resized { width: 1280, height: 720 }]],
    };

    pacer.run(&mut window, &mut handler).unwrap();

    assert_eq!(handler.log, vec!["resize 1280x720"]);
}

#[test]
fn test_run_closed_window_never_steps() {
    let clock = ManualClock::default();
    let mut pacer = FramePacer::new(clock.clone(), &VrConfig::default());
    let mut handler = CountingHandler::default();
    let mut window = ScriptedWindow {
        clock: clock.clone(),
        advance: step_90hz(),
        iterations_left: 0,
        swaps: 0,
        swap_interval: None,
        swap_interval_calls: 0,
        events: Vec::new(),
    };

    pacer.run(&mut window, &mut handler).unwrap();
    assert!(handler.log.is_empty());
    assert_eq!(window.swaps, 0);
}
