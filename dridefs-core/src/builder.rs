//! Builder API tying the pipeline together.
//!
//! ```rust,ignore
//! use dridefs_core::prelude::*;
//!
//! let generation = Generator::new("ARC_REGISTER_DRIVER", "src/c")
//!     .with_config(&config)
//!     .generate()?;
//!
//! Emitter::new(config.naming())
//!     .write_artifacts(&generation.registry, header, source, today())?;
//! std::process::exit(generation.exit_code());
//! ```
//!
//! Data flows one way: files, raw tuples, registry, indexed registry.

use std::path::{Path, PathBuf};

use crate::config::{DridefsConfig, ScanSettings};
use crate::error::DridefsResult;
use crate::extract::MarkerExtractor;
use crate::index::{assign_indices, IndexedRegistry};
use crate::registry::{RegisterOutcome, Registry};
use crate::scan::gather_source_files;

/// Highest representable process status.
const MAX_EXIT_CODE: usize = 255;

/// Builder for configuring a generation run.
#[derive(Debug, Clone)]
pub struct Generator {
    marker: String,
    root: PathBuf,
    scan: ScanSettings,
}

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct Generation {
    /// Number of source files scanned
    pub files_scanned: usize,
    /// Fully numbered registry, including `COUNT`
    pub registry: IndexedRegistry,
}

impl Generation {
    pub fn collision_count(&self) -> usize {
        self.registry.collisions().len()
    }

    /// Process status for this run: the collision count, saturated at 255.
    pub fn exit_code(&self) -> i32 {
        // MAX_EXIT_CODE fits in i32
        self.collision_count().min(MAX_EXIT_CODE) as i32
    }
}

impl Generator {
    /// Create a generator searching `root` for lines containing `marker`.
    pub fn new(marker: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            marker: marker.into(),
            root: root.into(),
            scan: ScanSettings::default(),
        }
    }

    /// Apply the `[scan]` section of a config file.
    pub fn with_config(mut self, config: &DridefsConfig) -> Self {
        self.scan = config.scan_settings();
        self
    }

    /// Replace the scanned file suffixes.
    pub fn extensions(mut self, extensions: Vec<String>) -> Self {
        self.scan.extensions = extensions;
        self
    }

    /// Sort discovered files by path before scanning.
    pub fn sort(mut self, enabled: bool) -> Self {
        self.scan.sort = enabled;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn scan_settings(&self) -> &ScanSettings {
        &self.scan
    }

    /// Discover, scan, register and index.
    pub fn generate(&self) -> DridefsResult<Generation> {
        let extractor = MarkerExtractor::new(&self.marker)?;
        let files = gather_source_files(&self.root, &self.scan)?;
        let registry = scan_files(&extractor, &files)?;
        Ok(index(registry, files.len()))
    }
}

/// Feeds the tuples of every file, in order, into a fresh registry.
pub fn scan_files(extractor: &MarkerExtractor, files: &[PathBuf]) -> DridefsResult<Registry> {
    let mut registry = Registry::new();

    for file in files {
        tracing::debug!(file = %file.display(), "found source file");

        for tuple in extractor.extract_file(file)? {
            let outcome = registry.register(tuple.group, &tuple.name, &tuple.extension);
            if let RegisterOutcome::Collision(c) = outcome {
                tracing::warn!(
                    file = %file.display(),
                    line = tuple.line,
                    name = %c.name,
                    existing = c.existing.value(),
                    attempted = c.attempted.value(),
                    "group collision"
                );
            }
        }
    }

    Ok(registry)
}

fn index(registry: Registry, files_scanned: usize) -> Generation {
    let indexed = assign_indices(registry.finalize());

    let collisions = indexed.collisions().len();
    if collisions > 0 {
        tracing::error!(collisions, "driver definition collisions detected");
    }
    tracing::info!(
        files = files_scanned,
        definitions = indexed.definitions().len(),
        table_size = indexed.table_size(),
        collisions,
        "driver definitions indexed"
    );

    Generation {
        files_scanned,
        registry: indexed,
    }
}
