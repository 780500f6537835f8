//! Slot assignment.
//!
//! Walks the finalized registry in insertion order with a running counter:
//! - layered groups (0, 1) take three consecutive slots keyed
//!   `super`, `directory`, `file`, whatever tags were scanned;
//! - every other group takes one slot per scanned tag, in tag order.
//!
//! `COUNT` is last, so its single slot equals the number of slots before it.

use serde::Serialize;

use crate::registry::{Collision, FinalizedRegistry, Group, COUNT_NAME};

/// Fixed keys of a layered definition, in slot order.
pub const LAYERED_ROLES: [&str; 3] = ["super", "directory", "file"];

/// A numbered `(name, key)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub key: String,
    pub index: usize,
}

/// A definition with every key bound to a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedDefinition {
    pub name: String,
    pub group: Group,
    pub slots: Vec<Slot>,
}

/// The frozen, fully numbered registry consumed by the emitter.
#[derive(Debug, Clone, Serialize)]
pub struct IndexedRegistry {
    definitions: Vec<IndexedDefinition>,
    collisions: Vec<Collision>,
    table_size: usize,
}

impl IndexedRegistry {
    pub fn definitions(&self) -> &[IndexedDefinition] {
        &self.definitions
    }

    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Number of slots before `COUNT`; the lookup table length.
    pub fn table_size(&self) -> usize {
        self.table_size
    }

    pub fn get(&self, name: &str) -> Option<&IndexedDefinition> {
        self.definitions.iter().find(|d| d.name == name)
    }

    /// Slot bound to the `COUNT` constant.
    pub fn count_slot(&self) -> Option<usize> {
        self.get(COUNT_NAME)
            .and_then(|d| d.slots.first())
            .map(|s| s.index)
    }

    /// `(index, name, key)` for every slot that backs a real record.
    ///
    /// Terminal-group slots are skipped. Order follows the registry, not the
    /// slot numbers.
    pub fn record_slots(&self) -> impl Iterator<Item = (usize, &str, &str)> {
        self.definitions
            .iter()
            .filter(|d| !d.group.is_terminal())
            .flat_map(|d| {
                d.slots
                    .iter()
                    .map(move |s| (s.index, d.name.as_str(), s.key.as_str()))
            })
    }
}

/// Assigns contiguous slots starting at 0.
pub fn assign_indices(registry: FinalizedRegistry) -> IndexedRegistry {
    let (definitions, collisions) = registry.into_parts();
    let mut next = 0usize;
    let mut indexed = Vec::with_capacity(definitions.len());
    let mut table_size = 0usize;

    for def in definitions {
        let (name, group, extensions) = def.into_parts();

        let keys: Vec<String> = if group.is_layered() {
            LAYERED_ROLES.iter().map(|r| r.to_string()).collect()
        } else {
            extensions
        };

        if group.is_terminal() && name == COUNT_NAME {
            table_size = next;
        }

        let slots = keys
            .into_iter()
            .map(|key| {
                let slot = Slot { key, index: next };
                next += 1;
                slot
            })
            .collect();

        indexed.push(IndexedDefinition { name, group, slots });
    }

    tracing::debug!(slots = next, table_size, "indices assigned");

    IndexedRegistry {
        definitions: indexed,
        collisions,
        table_size,
    }
}
