//! Contact begin/end events for the proxy body.
//!
//! Engines that only report the contacts present after each step (a list of
//! manifolds rather than enter/exit callbacks) can feed that list through
//! [`ContactTransitions`] to obtain the events the tracker expects.

use std::collections::BTreeSet;

use super::collision::ColliderId;

/// A change in contact state between the proxy and one collider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent {
    /// The proxy started touching the collider.
    Enter(ColliderId),
    /// The proxy stopped touching the collider.
    Exit(ColliderId),
}

impl CollisionEvent {
    pub fn collider(&self) -> ColliderId {
        match self {
            Self::Enter(id) | Self::Exit(id) => *id,
        }
    }
}

/// Diffs consecutive per-tick contact lists into enter/exit events.
#[derive(Debug, Clone, Default)]
pub struct ContactTransitions {
    previous: BTreeSet<ColliderId>,
}

impl ContactTransitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare the contacts of this tick against the last one.
    ///
    /// Exits are reported before enters; duplicates in `current` are ignored.
    pub fn update<I>(&mut self, current: I) -> Vec<CollisionEvent>
    where
        I: IntoIterator<Item = ColliderId>,
    {
        let current: BTreeSet<ColliderId> = current.into_iter().collect();

        let mut events: Vec<CollisionEvent> = self
            .previous
            .difference(&current)
            .map(|id| CollisionEvent::Exit(*id))
            .collect();
        events.extend(
            current
                .difference(&self.previous)
                .map(|id| CollisionEvent::Enter(*id)),
        );

        self.previous = current;
        events
    }

    /// Contacts seen at the last update.
    pub fn current(&self) -> impl Iterator<Item = ColliderId> + '_ {
        self.previous.iter().copied()
    }

    /// Forget all contacts, returning an exit for each.
    pub fn clear(&mut self) -> Vec<CollisionEvent> {
        std::mem::take(&mut self.previous)
            .into_iter()
            .map(CollisionEvent::Exit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_contact_enters() {
        let mut transitions = ContactTransitions::new();
        let events = transitions.update([ColliderId(1), ColliderId(2)]);
        assert_eq!(
            events,
            vec![
                CollisionEvent::Enter(ColliderId(1)),
                CollisionEvent::Enter(ColliderId(2)),
            ]
        );
    }

    #[test]
    fn test_steady_contact_is_silent() {
        let mut transitions = ContactTransitions::new();
        transitions.update([ColliderId(1)]);
        assert!(transitions.update([ColliderId(1), ColliderId(1)]).is_empty());
    }

    #[test]
    fn test_exit_before_enter() {
        let mut transitions = ContactTransitions::new();
        transitions.update([ColliderId(1)]);
        let events = transitions.update([ColliderId(2)]);
        assert_eq!(
            events,
            vec![
                CollisionEvent::Exit(ColliderId(1)),
                CollisionEvent::Enter(ColliderId(2)),
            ]
        );
        assert_eq!(transitions.current().collect::<Vec<_>>(), vec![ColliderId(2)]);
    }

    #[test]
    fn test_clear_exits_everything() {
        let mut transitions = ContactTransitions::new();
        transitions.update([ColliderId(4), ColliderId(3)]);
        let events = transitions.clear();
        assert_eq!(
            events,
            vec![
                CollisionEvent::Exit(ColliderId(3)),
                CollisionEvent::Exit(ColliderId(4)),
            ]
        );
        assert_eq!(transitions.current().count(), 0);
        assert_eq!(events[0].collider(), ColliderId(3));
    }
}
