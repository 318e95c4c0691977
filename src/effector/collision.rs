//! Set of colliders currently touched by the proxy body.

/// Identity of a collider as reported by the host physics engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderId(pub u64);

#[cfg(feature = "ecs")]
impl From<hecs::Entity> for ColliderId {
    fn from(entity: hecs::Entity) -> Self {
        Self(entity.to_bits().get())
    }
}

/// Toggles that decide whether contact changes are recorded at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackingGate {
    pub force_enabled: bool,
    pub collision_detection: bool,
}

impl TrackingGate {
    /// Contacts are only tracked while force output and detection are both on.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.force_enabled && self.collision_detection
    }
}

/// Ordered set of touched colliders.
///
/// Mutated only on the simulation thread. When a toggle changes between an
/// enter and its exit the entry stays behind; that is harmless because
/// [`CollisionTracker::collision_active`] is always gated on detection.
#[derive(Debug, Clone, Default)]
pub struct CollisionTracker {
    touched: Vec<ColliderId>,
}

impl CollisionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the start of a contact. Returns true if the set changed.
    pub fn on_enter(&mut self, id: ColliderId, gate: TrackingGate) -> bool {
        if !gate.is_open() || self.touched.contains(&id) {
            return false;
        }
        self.touched.push(id);
        true
    }

    /// Record the end of a contact. Returns true if the set changed.
    pub fn on_exit(&mut self, id: ColliderId, gate: TrackingGate) -> bool {
        if !gate.is_open() {
            return false;
        }
        match self.touched.iter().position(|t| *t == id) {
            Some(index) => {
                self.touched.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of touched colliders.
    #[inline]
    pub fn count(&self) -> usize {
        self.touched.len()
    }

    pub fn is_touching(&self, id: ColliderId) -> bool {
        self.touched.contains(&id)
    }

    /// Touched colliders in the order they were entered.
    pub fn touched(&self) -> &[ColliderId] {
        &self.touched
    }

    /// The oldest contact still held, if any.
    pub fn first_touched(&self) -> Option<ColliderId> {
        self.touched.first().copied()
    }

    /// Collision flag as published in the snapshot.
    #[inline]
    pub fn collision_active(&self, collision_detection: bool) -> bool {
        collision_detection && !self.touched.is_empty()
    }
}
