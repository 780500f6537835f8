//! Source file discovery with early directory pruning.
//!
//! Traversal is sequential. With `sort` enabled (the default) the discovered
//! paths are ordered lexicographically, so slot numbering depends only on the
//! tree contents and not on the order the filesystem hands entries back.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ScanSettings;
use crate::error::{DridefsError, DridefsResult};

/// Checks if a directory entry should be pruned (excluded from traversal).
///
/// The root itself is never pruned, whatever its name.
#[inline]
fn is_excluded_dir(entry: &walkdir::DirEntry, excludes: &HashSet<&str>) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| excludes.contains(name))
}

#[inline]
fn has_source_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want == ext))
}

/// Gathers every file under `root` whose extension is listed in `settings`.
pub fn gather_source_files(root: &Path, settings: &ScanSettings) -> DridefsResult<Vec<PathBuf>> {
    let excludes: HashSet<&str> = settings.exclude.iter().map(String::as_str).collect();
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(e, &excludes))
    {
        let entry = entry.map_err(|e| {
            let path = e.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
            DridefsError::io(path, e.into())
        })?;

        let path = entry.path();
        if path.is_file() && has_source_extension(path, &settings.extensions) {
            files.push(path.to_path_buf());
        }
    }

    if settings.sort {
        files.sort();
    }

    tracing::debug!(root = %root.display(), count = files.len(), "source files gathered");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn create_tree(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("dridefs_scan_{}_{}", name, std::process::id()));
        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }

        // root/
        //   b.c
        //   a.h
        //   sysdev/
        //     rtc.c
        //     nvme/nvme.c
        //   .git/
        //     hook.c
        fs::create_dir_all(dir.join("sysdev/nvme")).unwrap();
        fs::create_dir_all(dir.join(".git")).unwrap();
        fs::write(dir.join("b.c"), "").unwrap();
        fs::write(dir.join("a.h"), "").unwrap();
        fs::write(dir.join("sysdev/rtc.c"), "").unwrap();
        fs::write(dir.join("sysdev/nvme/nvme.c"), "").unwrap();
        fs::write(dir.join(".git/hook.c"), "").unwrap();
        dir
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| {
                f.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_gathers_sorted_c_files() {
        let dir = create_tree("sorted");
        let files = gather_source_files(&dir, &ScanSettings::default()).unwrap();

        assert_eq!(
            relative(&dir, &files),
            vec!["b.c", "sysdev/nvme/nvme.c", "sysdev/rtc.c"]
        );

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_custom_extensions_and_excludes() {
        let dir = create_tree("custom");
        let settings = ScanSettings {
            extensions: vec!["c".to_string(), "h".to_string()],
            exclude: vec!["nvme".to_string()],
            sort: true,
        };
        let files = gather_source_files(&dir, &settings).unwrap();

        assert_eq!(
            relative(&dir, &files),
            vec![".git/hook.c", "a.h", "b.c", "sysdev/rtc.c"]
        );

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_root_is_io_error() {
        let dir = std::env::temp_dir().join("dridefs_scan_does_not_exist_at_all");
        let err = gather_source_files(&dir, &ScanSettings::default()).unwrap_err();
        assert!(matches!(err, DridefsError::Io { .. }));
    }
}
