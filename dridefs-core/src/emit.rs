//! Rendering of the two generated C artifacts.
//!
//! - declarations (`dri_defs.h`): slot constants, extern records, the
//!   terminator constant, the lookup table declaration and the placeholder
//!   function prototypes.
//! - definitions (`dri_defs.c`): the sparse lookup table and the placeholder
//!   function bodies.
//!
//! Output is a pure function of the indexed registry, the naming and the
//! generation date. Constants follow registry order, not slot order.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use crate::config::Naming;
use crate::error::{DridefsResult, IoResultExt};
use crate::index::IndexedRegistry;

/// Placeholder prototypes, shared by both artifacts.
const EMPTY_INT_FN: &str = "int dridefs_int_func_empty()";
const EMPTY_SIZE_FN: &str = "size_t dridefs_size_t_func_empty()";
const EMPTY_PTR_FN: &str = "void *dridefs_void_func_empty()";

/// Value of the end-of-list terminator constant.
pub const TERMINATOR_VALUE: &str = "0xFFFFFFFF";

/// Formats the banner date (`DD-MM-YYYY`).
pub fn format_generation_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// Today's date in local time.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Renders artifacts with a fixed naming scheme.
#[derive(Debug, Clone, Default)]
pub struct Emitter {
    naming: Naming,
}

impl Emitter {
    pub fn new(naming: Naming) -> Self {
        Self { naming }
    }

    fn banner(&self, out: &mut String, date: NaiveDate) {
        out.push_str("/*\n");
        out.push_str(&format!(
            " * This file was autogenerated by {}.\n",
            self.naming.generator
        ));
        out.push_str(&format!(
            " * Date of Generation: {}\n",
            format_generation_date(date)
        ));
        out.push_str("*/\n");
    }

    /// `ARC_DRIDEF_<NAME>` or `ARC_DRIDEF_<NAME>_<KEY>`.
    pub fn constant_name(&self, name: &str, key: &str) -> String {
        if key.is_empty() {
            format!("{}_{}", self.naming.constant_prefix, name.to_uppercase())
        } else {
            format!(
                "{}_{}_{}",
                self.naming.constant_prefix,
                name.to_uppercase(),
                key.to_uppercase()
            )
        }
    }

    /// `__driver_<name>_<key>`; an empty key keeps the trailing underscore.
    ///
    /// Name and key are lower-cased, so a mixed-case registration such as
    /// `(3, NvMe, Ns)` expects a record symbol `__driver_nvme_ns`.
    pub fn record_name(&self, name: &str, key: &str) -> String {
        format!(
            "{}_{}_{}",
            self.naming.record_prefix,
            name.to_lowercase(),
            key.to_lowercase()
        )
    }

    /// Renders the declarations (header) artifact.
    pub fn render_declarations(&self, registry: &IndexedRegistry, date: NaiveDate) -> String {
        let n = &self.naming;
        let mut out = String::new();

        self.banner(&mut out, date);
        out.push_str(&format!("#ifndef {}\n", n.include_guard));
        out.push_str(&format!("#define {}\n", n.include_guard));
        out.push_str(&format!("#include <{}>\n\n", n.resource_include));

        for def in registry.definitions() {
            for slot in &def.slots {
                out.push_str(&format!(
                    "#define {} {}\n",
                    self.constant_name(&def.name, &slot.key),
                    slot.index
                ));
                if !def.group.is_terminal() {
                    out.push_str(&format!(
                        "extern {} {};\n",
                        n.record_type,
                        self.record_name(&def.name, &slot.key)
                    ));
                }
            }
        }

        out.push_str(&format!("#define {} {}\n", n.terminator_name, TERMINATOR_VALUE));
        out.push_str(&format!("extern {} *{}[];\n", n.record_type, n.table_name));
        out.push_str(&format!("{};\n", EMPTY_INT_FN));
        out.push_str(&format!("{};\n", EMPTY_SIZE_FN));
        out.push_str(&format!("{};\n", EMPTY_PTR_FN));
        out.push_str(&format!("#endif // {}\n", n.include_guard));
        out
    }

    /// Renders the definitions (source) artifact.
    pub fn render_definitions(&self, registry: &IndexedRegistry, date: NaiveDate) -> String {
        let n = &self.naming;
        let mut out = String::new();

        self.banner(&mut out, date);
        out.push_str(&format!("#include <{}>\n", n.header_include));
        out.push_str(&format!("{} *{}[] = {{\n", n.record_type, n.table_name));
        for (index, name, key) in registry.record_slots() {
            out.push_str(&format!("\t[{}] = &{},\n", index, self.record_name(name, key)));
        }
        out.push_str("};\n");

        out.push_str(&format!("{} {{ return -1; }}\n", EMPTY_INT_FN));
        out.push_str(&format!("{} {{ return 0; }}\n", EMPTY_SIZE_FN));
        out.push_str(&format!("{} {{ return NULL; }}\n", EMPTY_PTR_FN));
        out
    }

    /// Writes both artifacts, creating parent directories as needed.
    ///
    /// Files are created or truncated; a failure part way leaves whatever was
    /// written so far.
    pub fn write_artifacts(
        &self,
        registry: &IndexedRegistry,
        header_path: &Path,
        source_path: &Path,
        date: NaiveDate,
    ) -> DridefsResult<()> {
        write_file(header_path, &self.render_declarations(registry, date))?;
        write_file(source_path, &self.render_definitions(registry, date))?;

        tracing::info!(
            header = %header_path.display(),
            source = %source_path.display(),
            table_size = registry.table_size(),
            "artifacts written"
        );
        Ok(())
    }
}

fn write_file(path: &Path, content: &str) -> DridefsResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_path(parent)?;
    }
    fs::write(path, content).with_path(path)
}
