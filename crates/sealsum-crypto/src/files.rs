//! Batch file orchestration: encrypt/decrypt a resolved file set
//!
//! Files are processed independently, each with its own salt, IV, and
//! derived key. A failure on one file never aborts the rest; every file
//! gets its own outcome in the report.

use std::fmt;
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cipher::{decrypt, encrypt};
use crate::error::CryptoError;

/// Suffix appended to encrypted output files and stripped on decryption.
pub const ENC_SUFFIX: &str = ".enc";

/// Progress callback type (files_done, files_total, message)
pub type ProgressFn = Box<dyn Fn(u64, u64, &str) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptMode {
    Encrypt,
    Decrypt,
}

impl fmt::Display for CryptMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CryptMode::Encrypt => "encrypt",
            CryptMode::Decrypt => "decrypt",
        })
    }
}

/// Result for a single file in a batch.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub input: PathBuf,
    /// Written output path; `None` when the file failed.
    pub output: Option<PathBuf>,
    pub error: Option<String>,
}

/// Per-file outcomes for a whole batch, in input order.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    /// Overall success iff no file failed.
    pub fn ok(&self) -> bool {
        self.outcomes.iter().all(|o| o.error.is_none())
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.error.is_some()).count()
    }

    pub fn processed(&self) -> usize {
        self.outcomes.len() - self.failed()
    }
}

/// Encrypt or decrypt every file in `files`, writing results into `out_dir`.
///
/// `out_dir` is created first; failure to create it is fatal. Per-file
/// failures (unreadable input, bad payload, wrong password, write error)
/// are recorded and processing continues.
pub fn process_files(
    files: &[PathBuf],
    mode: CryptMode,
    password: &SecretString,
    out_dir: &Path,
    progress: Option<&ProgressFn>,
) -> Result<BatchReport, CryptoError> {
    std::fs::create_dir_all(out_dir)?;

    let mut outcomes = Vec::with_capacity(files.len());
    for (i, input) in files.iter().enumerate() {
        if let Some(cb) = progress {
            cb(i as u64, files.len() as u64, &input.display().to_string());
        }
        match process_one(input, mode, password, out_dir) {
            Ok(output) => {
                debug!(input = %input.display(), output = %output.display(), %mode, "done");
                outcomes.push(FileOutcome {
                    input: input.clone(),
                    output: Some(output),
                    error: None,
                });
            }
            Err(e) => {
                warn!(input = %input.display(), "{mode} failed: {e}");
                outcomes.push(FileOutcome {
                    input: input.clone(),
                    output: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    Ok(BatchReport { outcomes })
}

fn process_one(
    input: &Path,
    mode: CryptMode,
    password: &SecretString,
    out_dir: &Path,
) -> Result<PathBuf, CryptoError> {
    let name = output_name(input, mode).ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name")
    })?;

    let data = std::fs::read(input)?;
    let transformed = match mode {
        CryptMode::Encrypt => encrypt(&data, password),
        CryptMode::Decrypt => decrypt(&data, password)?,
    };

    let out_path = out_dir.join(name);
    std::fs::write(&out_path, transformed)?;
    Ok(out_path)
}

/// Output file name: `<name>.enc` when encrypting; trailing `.enc`
/// stripped when decrypting, name kept as-is when absent.
fn output_name(input: &Path, mode: CryptMode) -> Option<String> {
    let name = input.file_name()?.to_string_lossy();
    Some(match mode {
        CryptMode::Encrypt => format!("{name}{ENC_SUFFIX}"),
        CryptMode::Decrypt => name.strip_suffix(ENC_SUFFIX).unwrap_or(&name).to_string(),
    })
}
