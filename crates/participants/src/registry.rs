use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use billsplit_core::{DomainError, DomainResult, Entity, ParticipantHandle};

/// A registered identity that can pay or owe money.
///
/// Created once via registration; never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    handle: ParticipantHandle,
    name: String,
}

impl Participant {
    pub fn handle(&self) -> &ParticipantHandle {
        &self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Entity for Participant {
    type Id = ParticipantHandle;

    fn id(&self) -> &Self::Id {
        &self.handle
    }
}

/// Identity store mapping a unique handle to a participant.
///
/// Iteration follows registration order; equal splits and balance statements
/// rely on it.
#[derive(Debug, Clone, Default)]
pub struct ParticipantRegistry {
    participants: IndexMap<ParticipantHandle, Participant>,
    capacity: Option<usize>,
}

impl ParticipantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that refuses registrations beyond `limit` participants.
    ///
    /// Simplification cost grows exponentially with group size, so bounding
    /// the registry bounds the search.
    pub fn with_capacity_limit(limit: usize) -> Self {
        Self {
            participants: IndexMap::new(),
            capacity: Some(limit),
        }
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        handle: ParticipantHandle,
    ) -> DomainResult<&Participant> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.participants.contains_key(&handle) {
            return Err(DomainError::DuplicateParticipant(handle));
        }
        if let Some(limit) = self.capacity {
            if self.participants.len() >= limit {
                return Err(DomainError::ParticipantLimit { limit });
            }
        }

        tracing::info!(handle = %handle, "participant registered");
        let entry = self
            .participants
            .entry(handle.clone())
            .or_insert(Participant { handle, name });
        Ok(&*entry)
    }

    pub fn lookup(&self, handle: &ParticipantHandle) -> DomainResult<&Participant> {
        self.participants
            .get(handle)
            .ok_or_else(|| DomainError::UnknownParticipant(handle.clone()))
    }

    pub fn contains(&self, handle: &ParticipantHandle) -> bool {
        self.participants.contains_key(handle)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Participants in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values()
    }

    /// Handles in registration order.
    pub fn handles(&self) -> impl Iterator<Item = &ParticipantHandle> {
        self.participants.keys()
    }

    /// Display name for a handle, if registered.
    pub fn name_of(&self, handle: &ParticipantHandle) -> Option<&str> {
        self.participants.get(handle).map(Participant::name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(s: &str) -> ParticipantHandle {
        ParticipantHandle::parse(s).unwrap()
    }

    #[test]
    fn register_then_lookup() {
        let mut registry = ParticipantRegistry::new();
        let p = registry.register("Nayan", handle("nayan@gmail.com")).unwrap().clone();
        assert_eq!(p.name(), "Nayan");
        assert_eq!(p.id(), &handle("nayan@gmail.com"));

        let found = registry.lookup(&handle("nayan@gmail.com")).unwrap();
        assert_eq!(found, &p);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_handle_is_rejected_and_first_kept() {
        let mut registry = ParticipantRegistry::new();
        registry.register("Existing User", handle("test@example.com")).unwrap();

        let err = registry
            .register("New User", handle("test@example.com"))
            .unwrap_err();
        assert_eq!(err, DomainError::DuplicateParticipant(handle("test@example.com")));
        assert_eq!(registry.name_of(&handle("test@example.com")), Some("Existing User"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn lookup_of_unregistered_handle_fails() {
        let registry = ParticipantRegistry::new();
        let err = registry.lookup(&handle("ghost@example.com")).unwrap_err();
        assert!(matches!(err, DomainError::UnknownParticipant(_)));
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut registry = ParticipantRegistry::new();
        let err = registry.register("   ", handle("a@b.co")).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn iteration_follows_registration_order() {
        let mut registry = ParticipantRegistry::new();
        for h in ["c@x.io", "a@x.io", "b@x.io"] {
            registry.register(h, handle(h)).unwrap();
        }
        let order: Vec<&str> = registry.handles().map(ParticipantHandle::as_str).collect();
        assert_eq!(order, vec!["c@x.io", "a@x.io", "b@x.io"]);
    }

    #[test]
    fn capacity_limit_is_enforced() {
        let mut registry = ParticipantRegistry::with_capacity_limit(2);
        registry.register("A", handle("a@x.io")).unwrap();
        registry.register("B", handle("b@x.io")).unwrap();
        let err = registry.register("C", handle("c@x.io")).unwrap_err();
        assert_eq!(err, DomainError::ParticipantLimit { limit: 2 });
    }
}
