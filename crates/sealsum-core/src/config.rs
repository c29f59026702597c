use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration (loaded from sealsum.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SealsumConfig {
    pub scan: ScanConfig,
    pub checksum: ChecksumConfig,
    pub crypt: CryptConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Include dotfiles and descend into dot-directories
    pub include_hidden: bool,
    /// Glob patterns to exclude, matched against file/directory names
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecksumConfig {
    /// Default digest algorithm: "sha256", "sha1", or "md5"
    pub algo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptConfig {
    /// Default output directory for encryption
    pub encrypt_dir: String,
    /// Default output directory for decryption
    pub decrypt_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (default: info)
    pub level: String,
    /// Log format: "json" or "text"
    pub format: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            include_hidden: false,
            exclude_patterns: Vec::new(),
        }
    }
}

impl Default for ChecksumConfig {
    fn default() -> Self {
        Self {
            algo: "sha256".into(),
        }
    }
}

impl Default for CryptConfig {
    fn default() -> Self {
        Self {
            encrypt_dir: "encrypted".into(),
            decrypt_dir: "decrypted".into(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

impl SealsumConfig {
    /// Load from a TOML file; a missing file falls back to defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading config: {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("parsing config: {}", path.display()))
        } else {
            tracing::debug!(
                "config file not found: {}  (using defaults)",
                path.display()
            );
            Ok(Self::default())
        }
    }
}
