//! Simulation-side half of the effector.

use std::sync::Arc;

use glam::Vec3;

use super::collision::{ColliderId, CollisionTracker};
use super::contact::CollisionEvent;
use super::controls::EffectorControls;
use super::snapshot::{ProxySnapshot, SnapshotReader, SnapshotWriter};

/// Publishes the proxy body state once per fixed simulation tick.
///
/// Owns the only [`SnapshotWriter`] and the contact set; both stay on the
/// simulation thread.
#[derive(Debug)]
pub struct ProxyUpdater {
    writer: SnapshotWriter,
    tracker: CollisionTracker,
    controls: Arc<EffectorControls>,
}

impl ProxyUpdater {
    pub fn new(writer: SnapshotWriter, controls: Arc<EffectorControls>) -> Self {
        Self {
            writer,
            tracker: CollisionTracker::new(),
            controls,
        }
    }

    /// Collision-enter callback from the physics engine.
    pub fn on_collision_enter(&mut self, collider: ColliderId) {
        if self.tracker.on_enter(collider, self.controls.gate()) {
            tracing::debug!(
                collider = collider.0,
                touched = self.tracker.count(),
                "proxy contact began"
            );
        }
    }

    /// Collision-exit callback from the physics engine.
    pub fn on_collision_exit(&mut self, collider: ColliderId) {
        if self.tracker.on_exit(collider, self.controls.gate()) {
            tracing::debug!(
                collider = collider.0,
                touched = self.tracker.count(),
                "proxy contact ended"
            );
        }
    }

    pub fn handle(&mut self, event: CollisionEvent) {
        match event {
            CollisionEvent::Enter(id) => self.on_collision_enter(id),
            CollisionEvent::Exit(id) => self.on_collision_exit(id),
        }
    }

    /// Write the snapshot for this tick from the proxy's local position.
    pub fn fixed_update(&mut self, proxy_position: Vec3) -> ProxySnapshot {
        let collision_active = self
            .tracker
            .collision_active(self.controls.collision_detection());
        let snapshot = self.writer.write(proxy_position, collision_active);
        tracing::trace!(?proxy_position, collision_active, "proxy snapshot written");
        snapshot
    }

    pub fn tracker(&self) -> &CollisionTracker {
        &self.tracker
    }

    pub fn controls(&self) -> &Arc<EffectorControls> {
        &self.controls
    }

    /// Another read handle on the snapshot this updater writes.
    pub fn reader(&self) -> SnapshotReader {
        self.writer.reader()
    }
}
