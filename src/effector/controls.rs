//! Operator tunables shared between the UI, simulation and haptic threads.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::config::EffectorConfig;

use super::collision::TrackingGate;

/// Plain copy of the effector tunables at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectorState {
    pub force_enabled: bool,
    pub collision_detection: bool,
    /// Spring constant (N/m).
    pub stiffness: f32,
    /// Velocity damping constant (N·s/m).
    pub damping: f32,
}

impl EffectorState {
    /// Gate applied to collider enter/exit events.
    #[inline]
    pub fn gate(&self) -> TrackingGate {
        TrackingGate {
            force_enabled: self.force_enabled,
            collision_detection: self.collision_detection,
        }
    }
}

impl From<&EffectorConfig> for EffectorState {
    fn from(config: &EffectorConfig) -> Self {
        Self {
            force_enabled: config.force_enabled,
            collision_detection: config.collision_detection,
            stiffness: config.stiffness,
            damping: config.damping,
        }
    }
}

/// Lock-free storage for [`EffectorState`].
///
/// Each field is independent, so relaxed ordering is enough: the haptic thread
/// only needs to eventually observe a toggle, not order it against the snapshot.
#[derive(Debug)]
pub struct EffectorControls {
    force_enabled: AtomicBool,
    collision_detection: AtomicBool,
    stiffness: AtomicU32,
    damping: AtomicU32,
}

impl EffectorControls {
    pub fn new(state: EffectorState) -> Self {
        Self {
            force_enabled: AtomicBool::new(state.force_enabled),
            collision_detection: AtomicBool::new(state.collision_detection),
            stiffness: AtomicU32::new(state.stiffness.to_bits()),
            damping: AtomicU32::new(state.damping.to_bits()),
        }
    }

    pub fn from_config(config: &EffectorConfig) -> Self {
        Self::new(EffectorState::from(config))
    }

    /// Read all tunables.
    #[inline]
    pub fn state(&self) -> EffectorState {
        EffectorState {
            force_enabled: self.force_enabled(),
            collision_detection: self.collision_detection(),
            stiffness: self.stiffness(),
            damping: self.damping(),
        }
    }

    #[inline]
    pub fn gate(&self) -> TrackingGate {
        TrackingGate {
            force_enabled: self.force_enabled(),
            collision_detection: self.collision_detection(),
        }
    }

    #[inline]
    pub fn force_enabled(&self) -> bool {
        self.force_enabled.load(Ordering::Relaxed)
    }

    pub fn set_force_enabled(&self, enabled: bool) {
        self.force_enabled.store(enabled, Ordering::Relaxed);
        tracing::debug!(enabled, "force output toggled");
    }

    /// Flip force output, returning the new value.
    pub fn toggle_force(&self) -> bool {
        let enabled = !self.force_enabled.fetch_xor(true, Ordering::Relaxed);
        tracing::debug!(enabled, "force output toggled");
        enabled
    }

    #[inline]
    pub fn collision_detection(&self) -> bool {
        self.collision_detection.load(Ordering::Relaxed)
    }

    pub fn set_collision_detection(&self, enabled: bool) {
        self.collision_detection.store(enabled, Ordering::Relaxed);
        tracing::debug!(enabled, "collision detection toggled");
    }

    /// Flip collision detection, returning the new value.
    pub fn toggle_collision_detection(&self) -> bool {
        let enabled = !self.collision_detection.fetch_xor(true, Ordering::Relaxed);
        tracing::debug!(enabled, "collision detection toggled");
        enabled
    }

    #[inline]
    pub fn stiffness(&self) -> f32 {
        f32::from_bits(self.stiffness.load(Ordering::Relaxed))
    }

    /// Any value is accepted; validation belongs to the config layer.
    pub fn set_stiffness(&self, stiffness: f32) {
        self.stiffness.store(stiffness.to_bits(), Ordering::Relaxed);
    }

    #[inline]
    pub fn damping(&self) -> f32 {
        f32::from_bits(self.damping.load(Ordering::Relaxed))
    }

    pub fn set_damping(&self, damping: f32) {
        self.damping.store(damping.to_bits(), Ordering::Relaxed);
    }
}

impl Default for EffectorControls {
    fn default() -> Self {
        Self::from_config(&EffectorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_config() {
        let controls = EffectorControls::default();
        let state = controls.state();
        assert!(!state.force_enabled);
        assert!(state.collision_detection);
        assert_eq!(state.stiffness, 400.0);
        assert_eq!(state.damping, 1.0);
    }

    #[test]
    fn test_toggles_return_new_value() {
        let controls = EffectorControls::default();
        assert!(controls.toggle_force());
        assert!(controls.force_enabled());
        assert!(!controls.toggle_force());

        assert!(!controls.toggle_collision_detection());
        assert!(!controls.collision_detection());
        assert!(controls.toggle_collision_detection());
    }

    #[test]
    fn test_tunables_roundtrip_bits() {
        let controls = EffectorControls::default();
        controls.set_stiffness(812.25);
        controls.set_damping(0.125);
        assert_eq!(controls.stiffness(), 812.25);
        assert_eq!(controls.damping(), 0.125);
    }

    #[test]
    fn test_gate_tracks_toggles() {
        let controls = EffectorControls::default();
        assert!(!controls.gate().is_open());
        controls.set_force_enabled(true);
        assert!(controls.gate().is_open());
        assert_eq!(controls.gate(), controls.state().gate());
    }
}
