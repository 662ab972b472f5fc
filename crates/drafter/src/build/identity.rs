use indexmap::IndexMap;
use log::{trace, warn};

use drafter_core::canvas::ShapeHandle;

/// Logical ids of built shapes and connectors mapped to their canvas handles.
///
/// Scoped to one import. Registering an id twice keeps the later handle.
#[derive(Debug, Clone, Default)]
pub struct IdentityMap {
    entries: IndexMap<String, ShapeHandle>,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `id` to `handle`, replacing an earlier registration.
    pub fn register(&mut self, id: &str, handle: ShapeHandle) {
        if let Some(previous) = self.entries.insert(id.to_string(), handle) {
            warn!(id, previous:% = previous, handle:% = handle; "Duplicate id, keeping the later item");
        } else {
            trace!(id, handle:% = handle; "Registered id");
        }
    }

    pub fn get(&self, id: &str) -> Option<ShapeHandle> {
        self.entries.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the registrations in first-registration order.
    pub fn entries(&self) -> &IndexMap<String, ShapeHandle> {
        &self.entries
    }

    pub fn into_entries(self) -> IndexMap<String, ShapeHandle> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_registration_wins() {
        let mut identities = IdentityMap::new();

        identities.register("a", ShapeHandle::new(1));
        identities.register("b", ShapeHandle::new(2));
        identities.register("a", ShapeHandle::new(3));

        assert_eq!(identities.get("a"), Some(ShapeHandle::new(3)));
        assert_eq!(identities.len(), 2);
        let ids: Vec<_> = identities.entries().keys().map(String::as_str).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn test_into_entries_keeps_order() {
        let mut identities = IdentityMap::new();
        identities.register("b", ShapeHandle::new(2));
        identities.register("a", ShapeHandle::new(1));

        let entries = identities.into_entries();

        let ids: Vec<_> = entries.keys().map(String::as_str).collect();
        assert_eq!(ids, ["b", "a"]);
    }
}
