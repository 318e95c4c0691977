//! ECS components (transform, haptic proxy).

pub mod haptics;
pub mod transform;

pub use haptics::*;
pub use transform::*;
