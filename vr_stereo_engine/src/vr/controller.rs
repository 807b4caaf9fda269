//! Controller input state.
//!
//! Touch state is a packed 64-bit mask whose bit layout is fixed by the VR
//! runtime ABI: bit 1 and bit 2 are the side (grip) buttons, bit 33 is the
//! trigger.

/// Side button touch bits (bit 1 or bit 2)
pub const SIDE_TOUCH_MASK: u64 = (1 << 1) | (1 << 2);

/// Trigger touch bit (bit 33)
pub const TRIGGER_TOUCH_MASK: u64 = 1 << 33;

/// Controller input sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerState {
    /// Runtime packet counter
    pub packet_num: u32,
    /// Pressed buttons bitmask
    pub button_pressed: u64,
    /// Touched buttons bitmask
    pub button_touched: u64,
}

impl ControllerState {
    pub fn side_touched(&self) -> bool {
        is_side_touched(self.button_touched)
    }

    pub fn trigger_touched(&self) -> bool {
        is_trigger_touched(self.button_touched)
    }
}

pub fn is_side_touched(touched: u64) -> bool {
    touched & SIDE_TOUCH_MASK != 0
}

pub fn is_trigger_touched(touched: u64) -> bool {
    touched & TRIGGER_TOUCH_MASK != 0
}

/// Haptic pulse length in microseconds for a duration in seconds
///
/// `round(3 * seconds / 1e-3)`, clamped to the runtime's `u16` range.
pub fn haptic_pulse_micros(seconds: f32) -> u16 {
    let micros = (3.0 * seconds as f64 / 1e-3).round();
    if micros <= 0.0 {
        0
    } else if micros >= u16::MAX as f64 {
        u16::MAX
    } else {
        micros as u16
    }
}
