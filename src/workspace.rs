//! Workspace calibration: moving and scaling the device workspace in the scene.
//!
//! While the operator holds the grip button the workspace follows the cursor
//! in reverse (so the cursor stays put in the scene) and rolling the grip
//! scales it.

use glam::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::{check_gain, ConfigError};

/// Counts full turns around one axis from a stream of wrapped angles.
///
/// Angles are in degrees in `[0, 360)`. A jump larger than `threshold` between
/// two updates is taken as a wrap rather than a real rotation.
#[derive(Debug, Clone)]
pub struct RotationCounter {
    threshold: f32,
    base_angle: f32,
    previous_angle: f32,
    turns: i32,
    total_rotation: f32,
}

impl RotationCounter {
    /// Default wrap detection threshold in degrees.
    pub const DEFAULT_THRESHOLD: f32 = 330.0;

    pub fn new(angle: f32) -> Self {
        Self::with_threshold(angle, Self::DEFAULT_THRESHOLD)
    }

    pub fn with_threshold(angle: f32, threshold: f32) -> Self {
        Self {
            threshold,
            base_angle: angle,
            previous_angle: angle,
            turns: 0,
            total_rotation: 0.0,
        }
    }

    /// Restart counting from `angle`.
    pub fn reset(&mut self, angle: f32) {
        self.turns = 0;
        self.base_angle = angle;
        self.previous_angle = angle;
        self.total_rotation = 0.0;
    }

    /// Feed the current angle and return the total rotation in turns.
    pub fn update(&mut self, angle: f32) -> f32 {
        if angle - self.previous_angle > self.threshold {
            self.turns -= 1;
        } else if self.previous_angle - angle > self.threshold {
            self.turns += 1;
        }
        self.previous_angle = angle;
        self.total_rotation = self.turns as f32 + (angle - self.base_angle) / 360.0;
        self.total_rotation
    }

    /// Rotation since the last reset, in turns (signed).
    pub fn total_rotation(&self) -> f32 {
        self.total_rotation
    }
}

/// Position and uniform scale of the device workspace in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkspacePose {
    pub position: Vec3,
    pub uniform_scale: f32,
}

impl Default for WorkspacePose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            uniform_scale: 1.0,
        }
    }
}

impl WorkspacePose {
    /// Map a device-local cursor position into the scene.
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.position + local * self.uniform_scale
    }

    /// Map a scene position into device-local coordinates.
    pub fn to_local(&self, world: Vec3) -> Vec3 {
        (world - self.position) / self.uniform_scale
    }
}

/// Moves the workspace against the cursor displacement.
#[derive(Debug, Clone, Copy)]
pub struct WorkspaceOffset {
    base_position: Vec3,
    cursor_base: Vec3,
}

impl WorkspaceOffset {
    /// Capture the workspace and cursor positions when calibration starts.
    pub fn begin(workspace_position: Vec3, cursor_local: Vec3) -> Self {
        Self {
            base_position: workspace_position,
            cursor_base: cursor_local,
        }
    }

    /// New workspace position for the current cursor.
    pub fn update(&self, cursor_local: Vec3, workspace_scale: Vec3) -> Vec3 {
        self.base_position - (cursor_local - self.cursor_base) * workspace_scale
    }
}

/// Limits for grip-roll scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct WorkspaceScaleConfig {
    /// Scale change per turn, times ten. Default: 0.5.
    pub scaling_factor: f32,
    /// Default: 1.
    pub minimum_scale: f32,
    /// Default: 5.
    pub maximum_scale: f32,
    /// Wrap detection threshold in degrees. Default: 330.
    pub rotation_threshold: f32,
}

impl Default for WorkspaceScaleConfig {
    fn default() -> Self {
        Self {
            scaling_factor: 0.5,
            minimum_scale: 1.0,
            maximum_scale: 5.0,
            rotation_threshold: RotationCounter::DEFAULT_THRESHOLD,
        }
    }
}

impl WorkspaceScaleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_gain("scaling_factor", self.scaling_factor)?;
        check_gain("minimum_scale", self.minimum_scale)?;
        check_gain("maximum_scale", self.maximum_scale)?;
        check_gain("rotation_threshold", self.rotation_threshold)?;
        if self.minimum_scale > self.maximum_scale {
            return Err(ConfigError::ScaleRange {
                min: self.minimum_scale,
                max: self.maximum_scale,
            });
        }
        Ok(())
    }
}

/// Scales the workspace from grip roll.
#[derive(Debug, Clone, Copy)]
pub struct WorkspaceScale {
    config: WorkspaceScaleConfig,
    base_scale: f32,
}

impl WorkspaceScale {
    pub fn begin(config: WorkspaceScaleConfig, base_scale: f32) -> Self {
        Self { config, base_scale }
    }

    /// Scale for the given rotation (in turns since calibration started).
    pub fn update(&self, total_rotation: f32) -> f32 {
        let scale = self.base_scale - total_rotation * self.config.scaling_factor * 10.0;
        // Unvalidated configs may carry inverted or NaN bounds, which `f32::clamp` rejects.
        scale
            .max(self.config.minimum_scale)
            .min(self.config.maximum_scale)
    }
}

/// Which parts of the workspace a calibration gesture adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationMode {
    Offset,
    Scale,
    Both,
}

impl CalibrationMode {
    fn offset(self) -> bool {
        matches!(self, Self::Offset | Self::Both)
    }

    fn scale(self) -> bool {
        matches!(self, Self::Scale | Self::Both)
    }
}

/// Drives a calibration gesture from begin to end.
#[derive(Debug, Clone)]
pub struct WorkspaceCalibrator {
    config: WorkspaceScaleConfig,
    rotation: RotationCounter,
    offset: Option<WorkspaceOffset>,
    scale: Option<WorkspaceScale>,
}

impl WorkspaceCalibrator {
    pub fn new(config: WorkspaceScaleConfig) -> Self {
        Self {
            config,
            rotation: RotationCounter::with_threshold(0.0, config.rotation_threshold),
            offset: None,
            scale: None,
        }
    }

    /// Start a gesture. `roll` is the grip angle in degrees.
    pub fn begin(
        &mut self,
        mode: CalibrationMode,
        pose: WorkspacePose,
        cursor_local: Vec3,
        roll: f32,
    ) {
        self.offset = mode
            .offset()
            .then(|| WorkspaceOffset::begin(pose.position, cursor_local));
        self.scale = mode
            .scale()
            .then(|| WorkspaceScale::begin(self.config, pose.uniform_scale));
        self.rotation.reset(roll);
        tracing::debug!(?mode, "workspace calibration started");
    }

    pub fn is_active(&self) -> bool {
        self.offset.is_some() || self.scale.is_some()
    }

    /// Apply the gesture to `pose` for the current cursor and grip roll.
    pub fn update(&mut self, pose: WorkspacePose, cursor_local: Vec3, roll: f32) -> WorkspacePose {
        let mut pose = pose;
        let turns = self.rotation.update(roll);
        if let Some(scale) = &self.scale {
            pose.uniform_scale = scale.update(turns);
        }
        if let Some(offset) = &self.offset {
            pose.position = offset.update(cursor_local, Vec3::splat(pose.uniform_scale));
        }
        pose
    }

    pub fn end(&mut self) {
        self.offset = None;
        self.scale = None;
        tracing::debug!("workspace calibration ended");
    }
}

impl Default for WorkspaceCalibrator {
    fn default() -> Self {
        Self::new(WorkspaceScaleConfig::default())
    }
}
