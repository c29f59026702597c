//! Supported digest algorithms

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A digest algorithm usable in checksum manifests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgo {
    Sha256,
    Sha1,
    Md5,
}

#[derive(Debug, Error)]
#[error("unknown hash algorithm: {0} (expected sha256, sha1, or md5)")]
pub struct UnknownAlgo(String);

impl HashAlgo {
    /// Lowercase algorithm name as it appears in CLI flags and file names.
    pub fn name(self) -> &'static str {
        match self {
            HashAlgo::Sha256 => "sha256",
            HashAlgo::Sha1 => "sha1",
            HashAlgo::Md5 => "md5",
        }
    }

    /// Digest length in bytes (hex rendering is twice this).
    pub fn digest_len(self) -> usize {
        match self {
            HashAlgo::Sha256 => 32,
            HashAlgo::Sha1 => 20,
            HashAlgo::Md5 => 16,
        }
    }

    /// Default manifest file name, e.g. `checksums.sha256sum`.
    pub fn default_list_name(self) -> String {
        format!("checksums.{}sum", self.name())
    }
}

impl fmt::Display for HashAlgo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgo {
    type Err = UnknownAlgo;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" => Ok(HashAlgo::Sha256),
            "sha1" => Ok(HashAlgo::Sha1),
            "md5" => Ok(HashAlgo::Md5),
            other => Err(UnknownAlgo(other.to_string())),
        }
    }
}
