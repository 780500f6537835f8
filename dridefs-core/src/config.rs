//! Configuration loading from dridefs.toml.
//!
//! Every field is optional. Missing fields fall back to the names the kernel
//! build has always used, so an absent file reproduces the historical output.

use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::{DridefsError, DridefsResult, IoResultExt};

/// File name looked up in the scan root when no explicit config is given.
pub const CONFIG_FILE_NAME: &str = "dridefs.toml";

/// Main configuration structure for dridefs.toml.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct DridefsConfig {
    /// Source discovery settings.
    pub scan: Option<ScanConfig>,
    /// Generated artifact naming.
    pub output: Option<OutputConfig>,
}

/// `[scan]` table.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// File suffixes to scan, without the leading dot.
    pub extensions: Option<Vec<String>>,
    /// Directory names pruned during traversal.
    pub exclude: Option<Vec<String>>,
    /// Sort discovered files by path before scanning.
    pub sort: Option<bool>,
}

/// `[output]` table.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub constant_prefix: Option<String>,
    pub record_type: Option<String>,
    pub record_prefix: Option<String>,
    pub table_name: Option<String>,
    pub include_guard: Option<String>,
    pub resource_include: Option<String>,
    pub header_include: Option<String>,
    pub terminator_name: Option<String>,
    pub generator: Option<String>,
}

/// Resolved scan settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSettings {
    pub extensions: Vec<String>,
    pub exclude: Vec<String>,
    pub sort: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            extensions: vec!["c".to_string()],
            exclude: vec![".git".to_string()],
            sort: true,
        }
    }
}

/// Resolved names used by the emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Naming {
    /// Prefix of every slot constant (`ARC_DRIDEF_<NAME>_<KEY>`).
    pub constant_prefix: String,
    /// C type of a driver-definition record.
    pub record_type: String,
    /// Prefix of every extern record symbol (`__driver_<name>_<key>`).
    pub record_prefix: String,
    pub table_name: String,
    pub include_guard: String,
    /// Shared resource header pulled into the declarations artifact.
    pub resource_include: String,
    /// How the definitions artifact includes the declarations artifact.
    pub header_include: String,
    pub terminator_name: String,
    /// Tool name written into the generated banner.
    pub generator: String,
}

impl Default for Naming {
    fn default() -> Self {
        Self {
            constant_prefix: "ARC_DRIDEF".to_string(),
            record_type: "struct ARC_DriverDef".to_string(),
            record_prefix: "__driver".to_string(),
            table_name: "__DRIVER_LOOKUP_TABLE".to_string(),
            include_guard: "AUTOGEN_ARC_DRIVERS_DRI_DEFS".to_string(),
            resource_include: "lib/resource.h".to_string(),
            header_include: "drivers/dri_defs.h".to_string(),
            terminator_name: "ARC_DRIDEF_PCI_TERMINATOR".to_string(),
            generator: "dridefs".to_string(),
        }
    }
}

impl DridefsConfig {
    /// Scan settings with defaults filled in.
    pub fn scan_settings(&self) -> ScanSettings {
        let mut settings = ScanSettings::default();
        if let Some(scan) = &self.scan {
            if let Some(ext) = &scan.extensions {
                settings.extensions = ext
                    .iter()
                    .map(|e| e.trim_start_matches('.').to_string())
                    .collect();
            }
            if let Some(exclude) = &scan.exclude {
                settings.exclude = exclude.clone();
            }
            if let Some(sort) = scan.sort {
                settings.sort = sort;
            }
        }
        settings
    }

    /// Artifact naming with defaults filled in.
    pub fn naming(&self) -> Naming {
        let mut naming = Naming::default();
        let Some(out) = &self.output else {
            return naming;
        };

        let overrides = [
            (&out.constant_prefix, &mut naming.constant_prefix),
            (&out.record_type, &mut naming.record_type),
            (&out.record_prefix, &mut naming.record_prefix),
            (&out.table_name, &mut naming.table_name),
            (&out.include_guard, &mut naming.include_guard),
            (&out.resource_include, &mut naming.resource_include),
            (&out.header_include, &mut naming.header_include),
            (&out.terminator_name, &mut naming.terminator_name),
            (&out.generator, &mut naming.generator),
        ];
        for (value, slot) in overrides {
            if let Some(v) = value {
                *slot = v.clone();
            }
        }
        naming
    }
}

/// Parses a config file at an explicit path.
pub fn load_config_file(path: &Path) -> DridefsResult<DridefsConfig> {
    let content = fs::read_to_string(path).with_path(path)?;
    let cfg: DridefsConfig =
        toml::from_str(&content).map_err(|e| DridefsError::config(path, e.to_string()))?;

    let settings = cfg.scan_settings();
    if settings.extensions.iter().any(|e| e.is_empty()) {
        return Err(DridefsError::config(path, "empty entry in scan.extensions"));
    }
    Ok(cfg)
}

/// Loads configuration from dridefs.toml in `root` if it exists.
pub fn load_config(root: &Path) -> DridefsResult<Option<DridefsConfig>> {
    let path = root.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(None);
    }
    load_config_file(&path).map(Some)
}
