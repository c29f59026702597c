//! File-set resolver: recursive directory scan with extension filter
//!
//! Produces the flat, order-stable file list that both the checksum and
//! encryption engines consume. Neither engine walks directories itself.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::ScanConfig;

/// Collect all regular files under `root` recursively, respecting config.
///
/// `ext` keeps only files with that extension (a leading `.` is tolerated).
/// The result is sorted so repeated scans yield the same order.
pub fn collect_files(root: &Path, ext: Option<&str>, config: &ScanConfig) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let exclude_matchers: Vec<glob::Pattern> = config
        .exclude_patterns
        .iter()
        .filter_map(|p| glob::Pattern::new(p).ok())
        .collect();
    let ext = ext.map(|e| e.trim_start_matches('.'));

    collect_files_inner(root, &mut files, ext, config, &exclude_matchers)?;
    files.sort(); // deterministic order
    debug!(root = %root.display(), count = files.len(), "scan complete");
    Ok(files)
}

fn collect_files_inner(
    dir: &Path,
    out: &mut Vec<PathBuf>,
    ext: Option<&str>,
    config: &ScanConfig,
    excludes: &[glob::Pattern],
) -> Result<()> {
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("reading dir: {}", dir.display()))?
    {
        let entry = entry.context("reading dir entry")?;
        let path = entry.path();
        let meta = entry.metadata().context("stat dir entry")?;

        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if excludes.iter().any(|p| p.matches(name)) {
                continue;
            }
            if name.starts_with('.') && !config.include_hidden {
                continue;
            }

            if meta.is_dir() {
                collect_files_inner(&path, out, ext, config, excludes)?;
            } else if meta.is_file() {
                match ext {
                    Some(want) => {
                        if path.extension().and_then(|e| e.to_str()) == Some(want) {
                            out.push(path);
                        }
                    }
                    None => out.push(path),
                }
            }
        }
    }
    Ok(())
}
