/// Translation of winit window events into mirror window events
///
/// Hosts driving their mirror window with winit forward each event through
/// `translate_window_event` from their `MirrorWindow::poll_events`.

use vr_stereo_engine::stereo3d::vr::WindowEvent;

/// Engine event for a winit window event (None if the engine ignores it)
pub fn translate_window_event(event: &winit::event::WindowEvent) -> Option<WindowEvent> {
    match event {
        winit::event::WindowEvent::Resized(size) if size.width > 0 && size.height > 0 => {
            Some(WindowEvent::Resized { width: size.width, height: size.height })
        }
        _ => None,
    }
}
