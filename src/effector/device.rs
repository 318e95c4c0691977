//! Haptic device boundary.

use glam::Vec3;

/// Cursor state reported by the device at one haptic tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DeviceSample {
    /// Cursor position in device-local coordinates.
    pub position: Vec3,
    /// Cursor velocity in device-local coordinates.
    pub velocity: Vec3,
}

impl DeviceSample {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self { position, velocity }
    }

    /// A cursor at rest.
    pub fn at_rest(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
        }
    }
}

/// A force-feedback device driven from its own state-changed callback.
///
/// Implementations wrap the vendor driver; the effector never talks to the
/// hardware directly.
pub trait HapticDevice {
    /// Latest cursor sample.
    fn sample(&self) -> DeviceSample;

    /// Command a cursor force in device-local coordinates.
    fn set_force(&mut self, force: Vec3);

    /// Stop commanding force.
    fn release(&mut self);
}
