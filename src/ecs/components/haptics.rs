//! Haptic proxy components.

/// Marks the entity whose transform drives the haptic effector.
#[derive(Debug, Clone, Copy, Default)]
pub struct HapticProxy;

/// Entities in contact with this entity after the last physics step.
///
/// Filled by the host physics engine; the haptic system only reads it.
#[derive(Debug, Clone, Default)]
pub struct Contacts(pub Vec<hecs::Entity>);
