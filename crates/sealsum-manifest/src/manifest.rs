//! Checksum list generation and verification

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::algo::HashAlgo;
use crate::hash::hash_file;

/// Progress callback type (entries_done, entries_total, message)
pub type ProgressFn = Box<dyn Fn(u64, u64, &str) + Send + Sync>;

#[derive(Debug, Error)]
pub enum ManifestError {
    /// Verify was pointed at a list that does not exist. Nothing can be
    /// reported against it, so this aborts the whole operation.
    #[error("checksum list not found: {}", .0.display())]
    ListNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A file skipped during generation, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a generate run.
#[derive(Debug, Serialize)]
pub struct GenerateReport {
    pub list_path: PathBuf,
    /// Number of entries written, in input order.
    pub written: usize,
    /// Unreadable files left out of the list.
    pub skipped: Vec<SkippedFile>,
}

impl GenerateReport {
    pub fn ok(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Per-entry verification outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyStatus {
    Ok,
    Mismatch,
    Missing,
    /// The line could not be parsed, or the file could not be read back.
    Malformed(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyEntry {
    pub path: String,
    pub status: VerifyStatus,
}

/// Full verification report, one entry per list line, in list order.
#[derive(Debug, Serialize)]
pub struct VerifyReport {
    pub list_path: PathBuf,
    pub entries: Vec<VerifyEntry>,
}

impl VerifyReport {
    /// Overall success iff every entry verified clean.
    pub fn ok(&self) -> bool {
        self.entries
            .iter()
            .all(|e| e.status == VerifyStatus::Ok)
    }
}

/// Compute digests for `files` and write them to `list_path`, one
/// `<digest>  <path>` line per file, input order preserved.
///
/// Unreadable files are skipped (no line written) and recorded in the
/// report; an unwritable list file is fatal.
pub fn generate(
    files: &[PathBuf],
    algo: HashAlgo,
    list_path: &Path,
    progress: Option<&ProgressFn>,
) -> Result<GenerateReport, ManifestError> {
    let out = File::create(list_path)?;
    let mut out = BufWriter::new(out);

    let mut written = 0usize;
    let mut skipped = Vec::new();

    for (i, path) in files.iter().enumerate() {
        if let Some(cb) = progress {
            cb(i as u64, files.len() as u64, &path.display().to_string());
        }
        match hash_file(path, algo) {
            Ok(digest) => {
                writeln!(out, "{digest}  {}", path.display())?;
                written += 1;
                debug!(path = %path.display(), %algo, "hashed");
            }
            Err(e) => {
                warn!(path = %path.display(), "skipping unreadable file: {e}");
                skipped.push(SkippedFile {
                    path: path.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    out.flush()?;
    Ok(GenerateReport {
        list_path: list_path.to_path_buf(),
        written,
        skipped,
    })
}

/// Recompute digests for every entry of an existing list and compare.
///
/// All lines are processed; negative outcomes land in the report rather
/// than aborting. Only a missing list file is fatal.
pub fn verify(
    list_path: &Path,
    algo: HashAlgo,
    progress: Option<&ProgressFn>,
) -> Result<VerifyReport, ManifestError> {
    if !list_path.is_file() {
        return Err(ManifestError::ListNotFound(list_path.to_path_buf()));
    }

    let content = std::fs::read_to_string(list_path)?;
    let lines: Vec<&str> = content.lines().collect();
    let mut entries = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(cb) = progress {
            cb(i as u64, lines.len() as u64, line);
        }

        let Some((expected, path_str)) = split_entry(line) else {
            warn!(line, "malformed checksum line");
            entries.push(VerifyEntry {
                path: line.to_string(),
                status: VerifyStatus::Malformed("missing digest/path separator".into()),
            });
            continue;
        };

        let path = Path::new(path_str);
        let status = if !path.is_file() {
            VerifyStatus::Missing
        } else {
            match hash_file(path, algo) {
                Ok(actual) if actual.eq_ignore_ascii_case(expected) => VerifyStatus::Ok,
                Ok(_) => VerifyStatus::Mismatch,
                Err(e) => VerifyStatus::Malformed(e.to_string()),
            }
        };

        debug!(path = path_str, ?status, "verified");
        entries.push(VerifyEntry {
            path: path_str.to_string(),
            status,
        });
    }

    Ok(VerifyReport {
        list_path: list_path.to_path_buf(),
        entries,
    })
}

/// Split a list line on the first whitespace run into `(digest, path)`.
/// The path keeps interior whitespace.
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let (digest, rest) = line.split_once(|c: char| c.is_whitespace())?;
    let path = rest.trim_start();
    if digest.is_empty() || path.is_empty() {
        return None;
    }
    Some((digest, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::hash_bytes;
    use proptest::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn split_entry_two_spaces() {
        assert_eq!(
            split_entry("abc123  some/file.txt"),
            Some(("abc123", "some/file.txt"))
        );
    }

    #[test]
    fn split_entry_single_space_and_tab() {
        assert_eq!(split_entry("abc file"), Some(("abc", "file")));
        assert_eq!(split_entry("abc\tfile"), Some(("abc", "file")));
    }

    #[test]
    fn split_entry_path_with_spaces() {
        assert_eq!(
            split_entry("abc123  my file name.txt"),
            Some(("abc123", "my file name.txt"))
        );
    }

    #[test]
    fn split_entry_rejects_digest_only() {
        assert_eq!(split_entry("abc123"), None);
    }

    #[test]
    fn generate_writes_shasum_lines() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a.txt");
        std::fs::write(&a, b"hello").unwrap();

        let list = tmp.path().join("out.sha256sum");
        let report = generate(&[a.clone()], HashAlgo::Sha256, &list, None).unwrap();
        assert!(report.ok());
        assert_eq!(report.written, 1);

        let content = std::fs::read_to_string(&list).unwrap();
        let expected = format!(
            "{}  {}\n",
            hash_bytes(b"hello", HashAlgo::Sha256),
            a.display()
        );
        assert_eq!(content, expected);
    }

    #[test]
    fn generate_skips_unreadable_files() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a.txt");
        std::fs::write(&a, b"aaa").unwrap();
        let ghost = tmp.path().join("ghost.txt");

        let list = tmp.path().join("out.sha256sum");
        let report = generate(&[a, ghost.clone()], HashAlgo::Sha256, &list, None).unwrap();

        assert!(!report.ok());
        assert_eq!(report.written, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].path, ghost);

        // No line was written for the unreadable file
        let content = std::fs::read_to_string(&list).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn verify_missing_list_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let err = verify(&tmp.path().join("nope.sha256sum"), HashAlgo::Sha256, None).unwrap_err();
        assert!(matches!(err, ManifestError::ListNotFound(_)));
    }

    #[test]
    fn verify_reports_malformed_line_and_continues() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a.txt");
        std::fs::write(&a, b"aaa").unwrap();

        let list = tmp.path().join("list");
        let good = format!("{}  {}", hash_bytes(b"aaa", HashAlgo::Sha256), a.display());
        std::fs::write(&list, format!("not-a-valid-line\n{good}\n")).unwrap();

        let report = verify(&list, HashAlgo::Sha256, None).unwrap();
        assert!(!report.ok());
        assert_eq!(report.entries.len(), 2);
        assert!(matches!(report.entries[0].status, VerifyStatus::Malformed(_)));
        assert_eq!(report.entries[1].status, VerifyStatus::Ok);
    }

    #[test]
    fn verify_accepts_uppercase_digest() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a.txt");
        std::fs::write(&a, b"aaa").unwrap();

        let digest = hash_bytes(b"aaa", HashAlgo::Sha256).to_uppercase();
        let list = tmp.path().join("list");
        std::fs::write(&list, format!("{digest}  {}\n", a.display())).unwrap();

        let report = verify(&list, HashAlgo::Sha256, None).unwrap();
        assert!(report.ok());
    }

    proptest! {
        #[test]
        fn line_format_parse_roundtrip(
            digest in "[0-9a-f]{32,64}",
            // no leading/trailing whitespace, no control chars
            path in "[a-zA-Z0-9_][a-zA-Z0-9_ ./-]{0,40}[a-zA-Z0-9_]",
        ) {
            let line = format!("{digest}  {path}");
            let parsed = split_entry(&line);
            prop_assert_eq!(parsed, Some((digest.as_str(), path.as_str())));
        }
    }
}
