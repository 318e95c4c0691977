//! Physics-driven haptic effector.
//!
//! # Architecture
//!
//! Two loops run at unrelated rates and share one [`ProxySnapshot`]:
//!
//! 1. **Simulation thread** (60–120 Hz): collision enter/exit events update the
//!    [`CollisionTracker`]; each fixed tick [`ProxyUpdater::fixed_update`] writes
//!    the proxy position and the derived collision flag.
//! 2. **Haptic thread** (~1000 Hz): every device state change calls
//!    [`ForceEvaluator::on_device_state_changed`], which reads the snapshot and
//!    either releases the device or applies the spring-damper force.
//!
//! Operator toggles and gains live in [`EffectorControls`] and can be changed
//! from any thread.
//!
//! The proxy lags the cursor by up to one physics tick, which is felt as drag
//! while moving through free space. With collision detection enabled the
//! evaluator only outputs force while the proxy is in contact.

pub mod collision;
pub mod contact;
pub mod controls;
pub mod device;
pub mod force;
pub mod snapshot;
pub mod updater;

use std::sync::Arc;

use crate::config::EffectorConfig;

pub use self::collision::{ColliderId, CollisionTracker, TrackingGate};
pub use self::contact::{CollisionEvent, ContactTransitions};
pub use self::controls::{EffectorControls, EffectorState};
pub use self::device::{DeviceSample, HapticDevice};
pub use self::force::{evaluate_force, spring_damper_force, ForceCommand, ForceEvaluator};
pub use self::snapshot::{snapshot_channel, ProxySnapshot, SnapshotReader, SnapshotWriter};
pub use self::updater::ProxyUpdater;

/// An effector split into its simulation-side and haptic-side halves.
///
/// Move `updater` to the simulation thread and `evaluator` to the device
/// callback; keep `controls` for the operator interface.
#[derive(Debug)]
pub struct PhysicsHapticEffector {
    pub updater: ProxyUpdater,
    pub evaluator: ForceEvaluator,
    pub controls: Arc<EffectorControls>,
}

impl PhysicsHapticEffector {
    /// Create an effector from its configuration.
    pub fn new(config: &EffectorConfig) -> Self {
        let controls = Arc::new(EffectorControls::from_config(config));
        let (writer, reader) = snapshot_channel();
        tracing::debug!(
            stiffness = config.stiffness,
            damping = config.damping,
            force_enabled = config.force_enabled,
            collision_detection = config.collision_detection,
            "haptic effector created"
        );
        Self {
            updater: ProxyUpdater::new(writer, controls.clone()),
            evaluator: ForceEvaluator::new(reader, controls.clone()),
            controls,
        }
    }

    pub fn into_parts(self) -> (ProxyUpdater, ForceEvaluator, Arc<EffectorControls>) {
        (self.updater, self.evaluator, self.controls)
    }
}

impl Default for PhysicsHapticEffector {
    fn default() -> Self {
        Self::new(&EffectorConfig::default())
    }
}
