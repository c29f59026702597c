use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    /// Payload shorter than the salt + IV header.
    #[error("malformed payload: {len} bytes (salt and IV header requires 32)")]
    TruncatedPayload { len: usize },

    /// Wrong password, corrupted ciphertext, and padding failures are
    /// indistinguishable without a MAC; all of them surface as this one
    /// error so nothing leaks about the cause.
    #[error("decryption failed")]
    Decrypt,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
