//! ECS haptic proxy system.
//!
//! Run once per fixed physics step, after the physics engine has updated
//! transforms and [`Contacts`].

use crate::ecs::components::haptics::{Contacts, HapticProxy};
use crate::ecs::components::transform::Transform;
use crate::effector::{ColliderId, ContactTransitions, ProxySnapshot, ProxyUpdater};

/// Publish the haptic proxy's state for this tick.
///
/// Returns `None` when no entity carries [`HapticProxy`] and a [`Transform`].
pub fn haptic_proxy_system(
    world: &hecs::World,
    transitions: &mut ContactTransitions,
    updater: &mut ProxyUpdater,
) -> Option<ProxySnapshot> {
    let mut query = world.query::<(&Transform, &HapticProxy, Option<&Contacts>)>();
    let mut proxies = query.iter();
    let (entity, (transform, _, contacts)) = proxies.next()?;
    if proxies.next().is_some() {
        tracing::warn!(?entity, "multiple haptic proxies found, using the first");
    }

    let current: Vec<ColliderId> = contacts
        .map(|c| c.0.iter().map(|&e| ColliderId::from(e)).collect())
        .unwrap_or_default();
    for event in transitions.update(current) {
        updater.handle(event);
    }

    Some(updater.fixed_update(transform.position))
}
