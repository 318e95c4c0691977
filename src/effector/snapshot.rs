//! Cross-rate snapshot of the physics proxy.
//!
//! The simulation thread writes one [`ProxySnapshot`] per fixed tick and the
//! haptic thread reads it at ~1000 Hz. Both sides only hold the lock long
//! enough to copy a `Vec3` and a `bool`.
//!
//! Ownership is encoded in the handle types: there is exactly one
//! [`SnapshotWriter`] (not `Clone`, `write` takes `&mut self`) and any number of
//! [`SnapshotReader`]s.

use std::sync::Arc;

use glam::Vec3;
use parking_lot::RwLock;

/// Proxy state captured at the last simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProxySnapshot {
    /// Local position of the proxy body.
    pub position: Vec3,
    /// True iff collision detection is enabled and the proxy touches at least one collider.
    pub collision_active: bool,
}

/// Create a connected writer/reader pair holding a default snapshot.
pub fn snapshot_channel() -> (SnapshotWriter, SnapshotReader) {
    let cell = Arc::new(RwLock::new(ProxySnapshot::default()));
    (
        SnapshotWriter { cell: cell.clone() },
        SnapshotReader { cell },
    )
}

/// Exclusive write side of the snapshot store.
#[derive(Debug)]
pub struct SnapshotWriter {
    cell: Arc<RwLock<ProxySnapshot>>,
}

impl SnapshotWriter {
    /// Replace the whole snapshot.
    #[inline]
    pub fn write(&mut self, position: Vec3, collision_active: bool) -> ProxySnapshot {
        let snapshot = ProxySnapshot {
            position,
            collision_active,
        };
        *self.cell.write() = snapshot;
        snapshot
    }

    /// Create another reader attached to this store.
    pub fn reader(&self) -> SnapshotReader {
        SnapshotReader {
            cell: self.cell.clone(),
        }
    }
}

/// Shared read side of the snapshot store.
#[derive(Debug, Clone)]
pub struct SnapshotReader {
    cell: Arc<RwLock<ProxySnapshot>>,
}

impl SnapshotReader {
    /// Copy out the latest snapshot.
    #[inline]
    pub fn read(&self) -> ProxySnapshot {
        *self.cell.read()
    }
}
