//! Haptic-side force evaluation.
//!
//! Runs inside the device's state-changed callback at ~1000 Hz. The only
//! synchronization is the snapshot read; everything else is a handful of
//! vector operations.

use std::sync::Arc;

use glam::Vec3;

use super::controls::{EffectorControls, EffectorState};
use super::device::{DeviceSample, HapticDevice};
use super::snapshot::{ProxySnapshot, SnapshotReader};

/// Output of one haptic tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForceCommand {
    /// Send no force. Used while not in contact to avoid the drag caused by the
    /// proxy lagging behind the cursor.
    Release,
    /// Apply this force to the cursor.
    Apply(Vec3),
}

impl ForceCommand {
    /// Force vector, zero for [`ForceCommand::Release`].
    pub fn force(&self) -> Vec3 {
        match self {
            Self::Release => Vec3::ZERO,
            Self::Apply(force) => *force,
        }
    }

    pub fn is_release(&self) -> bool {
        matches!(self, Self::Release)
    }

    /// Deliver this command through the device's command channel.
    #[inline]
    pub fn send_to<D: HapticDevice + ?Sized>(self, device: &mut D) {
        match self {
            Self::Release => device.release(),
            Self::Apply(force) => device.set_force(force),
        }
    }
}

/// Spring-damper law pulling the cursor toward the proxy.
#[inline]
pub fn spring_damper_force(
    proxy_position: Vec3,
    cursor_position: Vec3,
    cursor_velocity: Vec3,
    stiffness: f32,
    damping: f32,
) -> Vec3 {
    (proxy_position - cursor_position) * stiffness - cursor_velocity * damping
}

/// Decide the command for one tick from already-read inputs.
#[inline]
pub fn evaluate_force(
    snapshot: ProxySnapshot,
    state: EffectorState,
    sample: &DeviceSample,
) -> ForceCommand {
    if !state.force_enabled || (state.collision_detection && !snapshot.collision_active) {
        return ForceCommand::Release;
    }
    ForceCommand::Apply(spring_damper_force(
        snapshot.position,
        sample.position,
        sample.velocity,
        state.stiffness,
        state.damping,
    ))
}

/// Haptic-thread half of the effector.
#[derive(Debug, Clone)]
pub struct ForceEvaluator {
    snapshot: SnapshotReader,
    controls: Arc<EffectorControls>,
}

impl ForceEvaluator {
    pub fn new(snapshot: SnapshotReader, controls: Arc<EffectorControls>) -> Self {
        Self { snapshot, controls }
    }

    /// Compute the command for a device sample.
    #[inline]
    pub fn evaluate(&self, sample: &DeviceSample) -> ForceCommand {
        evaluate_force(self.snapshot.read(), self.controls.state(), sample)
    }

    /// Device state-changed handler: sample, evaluate, send.
    pub fn on_device_state_changed<D>(&self, device: &mut D) -> ForceCommand
    where
        D: HapticDevice + ?Sized,
    {
        let command = self.evaluate(&device.sample());
        command.send_to(device);
        command
    }

    pub fn controls(&self) -> &Arc<EffectorControls> {
        &self.controls
    }
}
