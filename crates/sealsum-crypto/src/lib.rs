//! sealsum-crypto: password-based file encryption engine
//!
//! Encrypted payload format (binary):
//! ```text
//! [16 bytes: random salt][16 bytes: random IV][N×16 bytes: AES-256-CBC ciphertext]
//! ```
//!
//! The 256-bit key is derived per file from (password, salt) via
//! PBKDF2-HMAC-SHA256 at a fixed 100,000 iterations; plaintext is
//! PKCS#7-padded before encryption. Each file carries its own salt and IV,
//! so no key material is shared across files.
//!
//! The format carries no authentication tag: confidentiality only.
//! Tampering surfaces as a padding failure or garbage plaintext, never as
//! a detected-tamper signal. Wire-compatible implementations must keep
//! this property.

pub mod cipher;
pub mod error;
pub mod files;
pub mod kdf;

pub use cipher::{decrypt, encrypt, encrypt_with};
pub use error::CryptoError;
pub use files::{process_files, BatchReport, CryptMode, FileOutcome, ProgressFn};
pub use kdf::{derive_key, DerivedKey};

/// Size of the per-file KDF salt in bytes
pub const SALT_SIZE: usize = 16;

/// Size of the CBC initialization vector in bytes
pub const IV_SIZE: usize = 16;

/// Size of the derived AES-256 key in bytes
pub const KEY_SIZE: usize = 32;

/// AES block size in bytes; ciphertext length is always a multiple of this
pub const BLOCK_SIZE: usize = 16;

/// PBKDF2 iteration count. Wire-compatibility critical: previously
/// encrypted files can only be decrypted with this exact count.
pub const PBKDF2_ITERATIONS: u32 = 100_000;
