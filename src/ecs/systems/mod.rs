//! ECS systems.

pub mod haptics;

pub use haptics::haptic_proxy_system;
