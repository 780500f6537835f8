//! Run summary output - plaintext and JSON.

use serde::Serialize;
use serde_json::json;

use crate::builder::Generation;
use crate::index::IndexedDefinition;
use crate::registry::Collision;

/// What a run produced, in a serializable shape.
#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub files_scanned: usize,
    pub table_size: usize,
    pub definitions: &'a [IndexedDefinition],
    pub collisions: &'a [Collision],
}

impl<'a> Summary<'a> {
    pub fn new(generation: &'a Generation) -> Self {
        Self {
            files_scanned: generation.files_scanned,
            table_size: generation.registry.table_size(),
            definitions: generation.registry.definitions(),
            collisions: generation.registry.collisions(),
        }
    }
}

/// Prints the summary in plain text format.
pub fn print_plain(summary: &Summary<'_>) {
    println!(
        "Scanned {} source file(s), {} definition(s), {} slot(s).",
        summary.files_scanned,
        summary.definitions.len().saturating_sub(1),
        summary.table_size
    );
    for def in summary.definitions.iter().filter(|d| !d.group.is_terminal()) {
        let keys: Vec<String> = def
            .slots
            .iter()
            .map(|s| format!("{}={}", display_key(&s.key), s.index))
            .collect();
        println!("- {} (group {}): {}", def.name, def.group, keys.join(", "));
    }
    for c in summary.collisions {
        println!(
            "COLLISION: {} registered as group {} but already group {}",
            c.name, c.attempted, c.existing
        );
    }
    println!("Collision Counter: {}", summary.collisions.len());
}

fn display_key(key: &str) -> &str {
    if key.is_empty() {
        "<default>"
    } else {
        key
    }
}

/// Prints the summary in JSON format.
pub fn print_json(summary: &Summary<'_>) {
    match serde_json::to_string_pretty(summary) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("[WARN] JSON serialization failed: {}", e);
            println!("{}", json!({ "collisions": summary.collisions.len() }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::assign_indices;
    use crate::registry::{Group, Registry};

    #[test]
    fn test_summary_serializes() {
        let mut reg = Registry::new();
        reg.register(Group::new(2), "fatfs", "read");
        reg.register(Group::new(3), "fatfs", "x");
        let generation = Generation {
            files_scanned: 2,
            registry: assign_indices(reg.finalize()),
        };

        let value = serde_json::to_value(Summary::new(&generation)).unwrap();
        assert_eq!(value["files_scanned"], 2);
        assert_eq!(value["table_size"], 1);
        assert_eq!(value["definitions"][0]["name"], "fatfs");
        assert_eq!(value["definitions"][0]["group"], 2);
        assert_eq!(value["definitions"][0]["slots"][0]["key"], "read");
        assert_eq!(value["collisions"][0]["attempted"], 3);
    }
}
