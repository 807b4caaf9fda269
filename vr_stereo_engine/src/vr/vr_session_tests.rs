//! Unit tests for VrSession

use std::rc::Rc;
use glam::Mat4;

use crate::config::VrConfig;
use crate::error::Result;
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;
use crate::graphics_device::GraphicsDevice;
use crate::scene::{SimpleSceneManager, RenderItem};
use crate::vr::mock_vr_runtime::MockVrRuntime;
use crate::vr::{VrSession, ItemDrawer, DrawContext, ControllerState};

struct NullDrawer;

impl ItemDrawer for NullDrawer {
    fn draw(&mut self, _item: &RenderItem<'_>, _context: &DrawContext<'_>) -> Result<()> {
        Ok(())
    }
}

fn setup() -> (Rc<MockGraphicsDevice>, VrSession<MockVrRuntime>) {
    let mock = Rc::new(MockGraphicsDevice::new());
    let device: Rc<dyn GraphicsDevice> = mock.clone();
    let mut runtime = MockVrRuntime::new();
    runtime.push_poses(&[(0, Mat4::IDENTITY)]);
    let session = VrSession::new(runtime, device, VrConfig::default()).unwrap();
    (mock, session)
}

// ============================================================================
// Frames
// ============================================================================

#[test]
fn test_session_mirror_starts_at_recommended_size() {
    let (_mock, session) = setup();
    assert_eq!(session.render_loop().mirror_size(), (1512, 1680));
}

#[test]
fn test_session_display_and_resize() {
    let (_mock, mut session) = setup();
    let mut scene = SimpleSceneManager::default();

    session.display(&mut scene, &mut NullDrawer).unwrap();
    assert_eq!(session.runtime().submitted.len(), 2);

    session.resize(640, 480).unwrap();
    assert_eq!(session.render_loop().target().unwrap().width(), 640);
}

// ============================================================================
// Controllers
// ============================================================================

#[test]
fn test_session_controller_predicates() {
    let (_mock, mut session) = setup();
    session.runtime_mut().controller_states[5] = Some(ControllerState {
        packet_num: 1,
        button_pressed: 0,
        button_touched: 4,
    });

    assert!(session.side_touched(5));
    assert!(!session.trigger_touched(5));
    // Absent controller reads as untouched
    assert!(!session.side_touched(9));
}

#[test]
fn test_session_haptic_pulse() {
    let (_mock, mut session) = setup();
    session.trigger_haptic_pulse(3, 0.5);
    assert_eq!(session.runtime().calls.last().unwrap(), "haptic 3 0 1500");
}

// ============================================================================
// Shutdown
// ============================================================================

#[test]
fn test_session_shutdown_order() {
    let mock = Rc::new(MockGraphicsDevice::new());
    let device: Rc<dyn GraphicsDevice> = mock.clone();
    let mut runtime = MockVrRuntime::new();
    runtime.push_poses(&[(0, Mat4::IDENTITY)]);
    let mut session = VrSession::new(runtime, device, VrConfig::default()).unwrap();
    session.display(&mut SimpleSceneManager::default(), &mut NullDrawer).unwrap();
    assert_eq!(mock.live_handle_count(), 3);

    session.runtime_mut().calls.clear();
    session.shutdown_inner();

    assert_eq!(mock.live_handle_count(), 0);
    assert_eq!(session.runtime().calls, vec!["wait_get_poses", "shutdown"]);
    assert!(session.runtime().is_shut_down);

    // Second shutdown (drop) is a no-op
    session.shutdown_inner();
    assert_eq!(session.runtime().count_calls("shutdown"), 1);
}

#[test]
fn test_session_shutdown_survives_drain_failure() {
    let (_mock, mut session) = setup();
    session.runtime_mut().fail_wait = true;

    session.shutdown_inner();
    assert!(session.runtime().is_shut_down);
}

#[test]
fn test_session_drop_releases_everything() {
    let (mock, mut session) = setup();
    session.display(&mut SimpleSceneManager::default(), &mut NullDrawer).unwrap();

    drop(session);
    assert_eq!(mock.live_handle_count(), 0);
}
