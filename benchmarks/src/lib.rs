//! Shared setup helpers for rein-haptics benchmarks.
//!
//! ## Running
//!
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench effector
//!
//! Filter by group:
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench effector -- snapshot

use glam::Vec3;
use rein_haptics::ecs::components::{Contacts, HapticProxy, Transform};
use rein_haptics::{ColliderId, DeviceSample, EffectorConfig, PhysicsHapticEffector};

/// Effector with force on, holding a proxy in contact at the origin.
pub fn setup_contact_effector() -> PhysicsHapticEffector {
    let mut effector = PhysicsHapticEffector::new(&EffectorConfig {
        force_enabled: true,
        ..Default::default()
    });
    effector.updater.on_collision_enter(ColliderId(1));
    effector.updater.fixed_update(Vec3::ZERO);
    effector
}

/// `n` cursor samples along a small circle, as a device would stream them.
pub fn cursor_samples(n: usize) -> Vec<DeviceSample> {
    (0..n)
        .map(|i| {
            let a = i as f32 / n as f32 * std::f32::consts::TAU;
            DeviceSample::new(
                Vec3::new(a.cos(), a.sin(), 0.0) * 0.01,
                Vec3::new(-a.sin(), a.cos(), 0.0) * 0.1,
            )
        })
        .collect()
}

/// World with one haptic proxy touching `contacts` static entities.
pub fn setup_proxy_world(contacts: usize) -> hecs::World {
    let mut world = hecs::World::new();
    let touched: Vec<hecs::Entity> = (0..contacts)
        .map(|i| world.spawn((Transform::from_position(Vec3::new(i as f32, 0.0, 0.0)),)))
        .collect();
    world.spawn((Transform::identity(), HapticProxy, Contacts(touched)));
    world
}
