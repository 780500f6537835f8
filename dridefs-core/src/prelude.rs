//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use dridefs_core::prelude::*;
//! ```

pub use crate::error::{DridefsError, DridefsResult};

pub use crate::builder::{Generation, Generator};

pub use crate::config::{load_config, load_config_file, DridefsConfig, Naming};

pub use crate::emit::{today, Emitter};

pub use crate::index::IndexedRegistry;

pub use crate::registry::{Group, Registry};

pub use crate::report::{print_json, print_plain, Summary};
