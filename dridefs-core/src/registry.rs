//! Definition registry and group collision detection.
//!
//! The registry maps driver names to their group and the extension tags seen
//! for them. Insertion order of names, and of tags within a name, is kept:
//! slot numbering is derived from it later.
//!
//! Lifecycle:
//! - [`Registry`] is mutable and only grows during the scan.
//! - [`Registry::finalize`] appends the terminal `COUNT` entry and freezes it
//!   into a [`FinalizedRegistry`], ready for [`crate::index::assign_indices`].

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Name of the synthetic terminal entry.
pub const COUNT_NAME: &str = "COUNT";

/// Integer group tag of a driver definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Group(i64);

/// How a group is laid out in the slot table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// Groups 0 and 1: always three slots (super, directory, file).
    Layered,
    /// One slot per extension tag.
    Ordinary,
    /// Group -1: the `COUNT` entry. Gets constants but no records.
    Terminal,
}

impl Group {
    /// Group of the synthetic `COUNT` entry.
    pub const TERMINAL: Group = Group(-1);

    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i64 {
        self.0
    }

    pub const fn kind(self) -> GroupKind {
        match self.0 {
            0 | 1 => GroupKind::Layered,
            -1 => GroupKind::Terminal,
            _ => GroupKind::Ordinary,
        }
    }

    pub const fn is_layered(self) -> bool {
        matches!(self.kind(), GroupKind::Layered)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self.kind(), GroupKind::Terminal)
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A driver definition before slot assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    name: String,
    group: Group,
    extensions: Vec<String>,
}

impl Definition {
    fn new(name: String, group: Group, extension: String) -> Self {
        Self {
            name,
            group,
            extensions: vec![extension],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> Group {
        self.group
    }

    /// Extension tags in first-registration order.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub(crate) fn into_parts(self) -> (String, Group, Vec<String>) {
        (self.name, self.group, self.extensions)
    }
}

/// A rejected attempt to re-register a name under a different group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    pub name: String,
    /// Group stored by the first successful registration.
    pub existing: Group,
    /// Group of the rejected registration.
    pub attempted: Group,
    pub extension: String,
}

/// What a single [`Registry::register`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// First registration of this name.
    Inserted,
    /// Known name, same group, new extension tag.
    Extended,
    /// Known name, same group, tag already present. Nothing changed.
    Duplicate,
    /// Known name, different group. Nothing changed; the collision is counted.
    Collision(Collision),
}

impl RegisterOutcome {
    pub fn is_collision(&self) -> bool {
        matches!(self, Self::Collision(_))
    }
}

/// Insertion-ordered registry of driver definitions.
#[derive(Debug, Default)]
pub struct Registry {
    definitions: Vec<Definition>,
    positions: HashMap<String, usize>,
    collisions: Vec<Collision>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `(group, name, extension)`.
    ///
    /// The name `COUNT` is reserved for the terminal entry; scanning it is
    /// reported as a collision against the terminal group.
    pub fn register(&mut self, group: Group, name: &str, extension: &str) -> RegisterOutcome {
        if name == COUNT_NAME {
            return self.collide(Group::TERMINAL, group, name, extension);
        }
        self.insert(group, name, extension)
    }

    fn insert(&mut self, group: Group, name: &str, extension: &str) -> RegisterOutcome {
        let Some(pos) = self.positions.get(name).copied() else {
            self.positions.insert(name.to_string(), self.definitions.len());
            self.definitions.push(Definition::new(
                name.to_string(),
                group,
                extension.to_string(),
            ));
            return RegisterOutcome::Inserted;
        };

        let existing = &mut self.definitions[pos];
        if existing.group != group {
            let stored = existing.group;
            return self.collide(stored, group, name, extension);
        }

        if existing.extensions.iter().any(|e| e == extension) {
            RegisterOutcome::Duplicate
        } else {
            existing.extensions.push(extension.to_string());
            RegisterOutcome::Extended
        }
    }

    fn collide(
        &mut self,
        existing: Group,
        attempted: Group,
        name: &str,
        extension: &str,
    ) -> RegisterOutcome {
        let collision = Collision {
            name: name.to_string(),
            existing,
            attempted,
            extension: extension.to_string(),
        };
        self.collisions.push(collision.clone());
        RegisterOutcome::Collision(collision)
    }

    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.positions.get(name).map(|&pos| &self.definitions[pos])
    }

    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Appends the terminal `COUNT` entry and freezes the registry.
    pub fn finalize(mut self) -> FinalizedRegistry {
        let outcome = self.insert(Group::TERMINAL, COUNT_NAME, "");
        debug_assert_eq!(outcome, RegisterOutcome::Inserted);

        FinalizedRegistry {
            definitions: self.definitions,
            collisions: self.collisions,
        }
    }
}

/// A registry whose last entry is `COUNT`. No further registrations.
#[derive(Debug)]
pub struct FinalizedRegistry {
    definitions: Vec<Definition>,
    collisions: Vec<Collision>,
}

impl FinalizedRegistry {
    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    pub(crate) fn into_parts(self) -> (Vec<Definition>, Vec<Collision>) {
        (self.definitions, self.collisions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_kinds() {
        assert_eq!(Group::new(0).kind(), GroupKind::Layered);
        assert_eq!(Group::new(1).kind(), GroupKind::Layered);
        assert_eq!(Group::new(2).kind(), GroupKind::Ordinary);
        assert_eq!(Group::new(-1).kind(), GroupKind::Terminal);
        assert_eq!(Group::new(-5).kind(), GroupKind::Ordinary);
    }

    #[test]
    fn test_insert_then_extend() {
        let mut reg = Registry::new();
        assert_eq!(reg.register(Group::new(2), "fatfs", "read"), RegisterOutcome::Inserted);
        assert_eq!(reg.register(Group::new(2), "fatfs", "write"), RegisterOutcome::Extended);

        let def = reg.get("fatfs").unwrap();
        assert_eq!(def.group(), Group::new(2));
        assert_eq!(def.extensions(), ["read", "write"]);
        assert!(reg.collisions().is_empty());
    }

    #[test]
    fn test_repeat_tag_is_idempotent() {
        let mut reg = Registry::new();
        reg.register(Group::new(3), "uart", "");
        assert_eq!(reg.register(Group::new(3), "uart", ""), RegisterOutcome::Duplicate);
        assert_eq!(reg.get("uart").unwrap().extensions(), [""]);
        assert!(reg.collisions().is_empty());
    }

    #[test]
    fn test_collision_leaves_definition_untouched() {
        let mut reg = Registry::new();
        reg.register(Group::new(2), "fatfs", "read");
        let outcome = reg.register(Group::new(3), "fatfs", "x");

        assert!(outcome.is_collision());
        let def = reg.get("fatfs").unwrap();
        assert_eq!(def.group(), Group::new(2));
        assert_eq!(def.extensions(), ["read"]);
        assert_eq!(
            reg.collisions(),
            [Collision {
                name: "fatfs".to_string(),
                existing: Group::new(2),
                attempted: Group::new(3),
                extension: "x".to_string(),
            }]
        );
    }

    #[test]
    fn test_each_offending_call_counts() {
        let mut reg = Registry::new();
        reg.register(Group::new(0), "ext2", "super");
        reg.register(Group::new(1), "ext2", "super");
        reg.register(Group::new(1), "ext2", "super");
        reg.register(Group::new(0), "ext2", "file");
        assert_eq!(reg.collisions().len(), 2);
        assert_eq!(reg.get("ext2").unwrap().extensions(), ["super", "file"]);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut reg = Registry::new();
        reg.register(Group::new(2), "rtc", "");
        assert_eq!(reg.register(Group::new(3), "RTC", ""), RegisterOutcome::Inserted);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut reg = Registry::new();
        reg.register(Group::new(4), "b", "");
        reg.register(Group::new(4), "a", "");
        reg.register(Group::new(4), "b", "z");
        let names: Vec<_> = reg.definitions().iter().map(Definition::name).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn test_count_name_is_reserved() {
        let mut reg = Registry::new();
        assert!(reg.register(Group::new(2), COUNT_NAME, "").is_collision());
        assert!(reg.is_empty());

        let fin = reg.finalize();
        assert_eq!(fin.definitions().len(), 1);
        assert_eq!(fin.collisions().len(), 1);
    }

    #[test]
    fn test_finalize_appends_count_last() {
        let mut reg = Registry::new();
        reg.register(Group::new(3), "rtc", "");
        let fin = reg.finalize();

        let last = fin.definitions().last().unwrap();
        assert_eq!(last.name(), COUNT_NAME);
        assert_eq!(last.group(), Group::TERMINAL);
        assert_eq!(last.extensions(), [""]);
    }

    #[test]
    fn test_finalize_empty_registry() {
        let fin = Registry::new().finalize();
        assert_eq!(fin.definitions().len(), 1);
        assert!(fin.collisions().is_empty());
    }
}
