//! Key derivation: PBKDF2-HMAC-SHA256 password → AES key

use pbkdf2::pbkdf2_hmac;
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use zeroize::Zeroize;

use crate::{KEY_SIZE, PBKDF2_ITERATIONS, SALT_SIZE};

/// A 256-bit key derived from a password and per-file salt.
///
/// Zeroized on drop. Owned by the single encrypt/decrypt operation that
/// requested it and never cached across files, since each file carries
/// its own salt.
#[derive(Clone)]
pub struct DerivedKey {
    bytes: [u8; KEY_SIZE],
}

impl DerivedKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Derive a 256-bit key from a password and 16-byte salt.
///
/// Always runs the fixed iteration count; files encrypted under any other
/// count cannot be decrypted, so the constant must never drift.
pub fn derive_key(password: &SecretString, salt: &[u8; SALT_SIZE]) -> DerivedKey {
    derive_key_with(password, salt, PBKDF2_ITERATIONS)
}

fn derive_key_with(password: &SecretString, salt: &[u8], iterations: u32) -> DerivedKey {
    let mut key = [0u8; KEY_SIZE];
    pbkdf2_hmac::<Sha256>(
        password.expose_secret().as_bytes(),
        salt,
        iterations,
        &mut key,
    );
    DerivedKey::from_bytes(key)
}
