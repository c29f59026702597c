//! sealsum-manifest: checksum manifest engine
//!
//! Manifest format (plain text, newline-terminated, shasum-compatible):
//! ```text
//! <lowercase-hex-digest>␠␠<file-path>
//! ```
//!
//! No header, no footer, no algorithm marker. The digest algorithm is not
//! self-describing: the caller supplies it again at verify time, and a
//! wrong algorithm simply mismatches every entry.

pub mod algo;
pub mod hash;
pub mod manifest;

pub use algo::HashAlgo;
pub use hash::{hash_bytes, hash_file};
pub use manifest::{
    generate, verify, GenerateReport, ManifestError, ProgressFn, SkippedFile, VerifyEntry,
    VerifyReport, VerifyStatus,
};
