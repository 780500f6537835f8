//! dridefs-core: driver definition index generation.
//!
//! Scans a C source tree for a driver registration marker, gives every
//! registered `(name, extension)` pair a stable slot number and renders the
//! `dri_defs.h` / `dri_defs.c` pair consumed by the kernel build.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use dridefs_core::prelude::*;
//!
//! let generation = Generator::new("ARC_REGISTER_DRIVER", "src/c").generate()?;
//! Emitter::default().write_artifacts(
//!     &generation.registry,
//!     "dri_defs.h".as_ref(),
//!     "dri_defs.c".as_ref(),
//!     today(),
//! )?;
//! ```
//!
//! # Module Organization
//!
//! - [`scan`]: Source file discovery
//! - [`extract`]: Marker line extraction
//! - [`registry`]: Definition registry and collision detection
//! - [`index`]: Slot assignment
//! - [`emit`]: Artifact rendering
//! - [`builder`]: Pipeline orchestration
//! - [`report`]: Run summary output
//! - [`config`]: `dridefs.toml` loading
//! - [`error`]: Typed error handling

pub mod builder;
pub mod config;
pub mod emit;
pub mod error;
pub mod extract;
pub mod index;
pub mod logging;
pub mod prelude;
pub mod registry;
pub mod report;
pub mod scan;

// Error types
pub use error::{DridefsError, DridefsResult, IoResultExt};

// Builder API
pub use builder::{scan_files, Generation, Generator};

// Configuration
pub use config::{
    load_config, load_config_file, DridefsConfig, Naming, OutputConfig, ScanConfig, ScanSettings,
    CONFIG_FILE_NAME,
};

// Pipeline stages
pub use emit::{format_generation_date, today, Emitter, TERMINATOR_VALUE};
pub use extract::{MarkerExtractor, MarkerTuple};
pub use index::{assign_indices, IndexedDefinition, IndexedRegistry, Slot, LAYERED_ROLES};
pub use registry::{
    Collision, Definition, FinalizedRegistry, Group, GroupKind, RegisterOutcome, Registry,
    COUNT_NAME,
};
pub use scan::gather_source_files;

// Logging
pub use logging::{init_structured_logging, log_error, log_info, DEFAULT_FILTER};

// Reporting
pub use report::{print_json, print_plain, Summary};
