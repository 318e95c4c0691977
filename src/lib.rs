//! Rein Haptics
//!
//! Physics-driven force feedback for haptic devices: a physics proxy body
//! follows the device cursor, and the force sent back to the device pulls the
//! cursor toward the proxy.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **effector** - Snapshot store, contact tracking and force evaluation
//! 2. **config** - Tunables, validation and JSON loading (feature = "serde")
//! 3. **timing** - Loop rates and fixed-step scheduling
//! 4. **workspace** - Moving and scaling the device workspace
//! 5. **ecs** - hecs ECS integration (feature = "ecs")

pub mod config;
pub mod effector;
pub mod timing;
pub mod workspace;

#[cfg(feature = "ecs")]
pub mod ecs;

// Re-export commonly used types
pub use config::{ConfigError, EffectorConfig, HapticsConfig};

pub use effector::{
    ColliderId, CollisionEvent, CollisionTracker, ContactTransitions, DeviceSample,
    EffectorControls, EffectorState, ForceCommand, ForceEvaluator, HapticDevice,
    PhysicsHapticEffector, ProxySnapshot, ProxyUpdater,
};

pub use timing::{FixedTimestep, LoopRates, RateMeter};

pub use workspace::{
    CalibrationMode, RotationCounter, WorkspaceCalibrator, WorkspacePose, WorkspaceScaleConfig,
};

#[cfg(feature = "ecs")]
pub use ecs::prelude::*;

// Re-export glam for convenience
pub use glam;
