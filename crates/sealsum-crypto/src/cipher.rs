//! Payload encryption/decryption: `salt || iv || AES-256-CBC ciphertext`

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use secrecy::SecretString;

use crate::error::CryptoError;
use crate::kdf::{derive_key, DerivedKey};
use crate::{BLOCK_SIZE, IV_SIZE, SALT_SIZE};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Encrypt a plaintext buffer under a password.
///
/// Draws a fresh random salt and IV from the OS CSPRNG for every call, so
/// encrypting the same input twice yields different payloads.
///
/// Returns: `[16-byte salt][16-byte IV][ciphertext]`
pub fn encrypt(plaintext: &[u8], password: &SecretString) -> Vec<u8> {
    let mut salt = [0u8; SALT_SIZE];
    let mut iv = [0u8; IV_SIZE];
    rand::thread_rng().fill_bytes(&mut salt);
    rand::thread_rng().fill_bytes(&mut iv);

    encrypt_with(plaintext, password, &salt, &iv)
}

/// Deterministic encryption with caller-supplied salt and IV.
///
/// `encrypt` delegates here after drawing randomness; tests inject fixed
/// values to get reproducible payloads.
pub fn encrypt_with(
    plaintext: &[u8],
    password: &SecretString,
    salt: &[u8; SALT_SIZE],
    iv: &[u8; IV_SIZE],
) -> Vec<u8> {
    let key = derive_key(password, salt);
    let ciphertext = cbc_encrypt(&key, iv, plaintext);

    let mut payload = Vec::with_capacity(SALT_SIZE + IV_SIZE + ciphertext.len());
    payload.extend_from_slice(salt);
    payload.extend_from_slice(iv);
    payload.extend_from_slice(&ciphertext);
    payload
}

/// Decrypt a payload produced by [`encrypt`].
///
/// The salt is read back out of the payload and the key re-derived from
/// it; the only secret input is the password.
pub fn decrypt(payload: &[u8], password: &SecretString) -> Result<Vec<u8>, CryptoError> {
    if payload.len() < SALT_SIZE + IV_SIZE {
        return Err(CryptoError::TruncatedPayload { len: payload.len() });
    }

    let mut salt = [0u8; SALT_SIZE];
    salt.copy_from_slice(&payload[..SALT_SIZE]);
    let mut iv = [0u8; IV_SIZE];
    iv.copy_from_slice(&payload[SALT_SIZE..SALT_SIZE + IV_SIZE]);
    let ciphertext = &payload[SALT_SIZE + IV_SIZE..];

    let key = derive_key(password, &salt);
    cbc_decrypt(&key, &iv, ciphertext)
}

/// PKCS#7-pad and encrypt. A full padding block is appended when the
/// plaintext length is already a block multiple, never zero-length padding.
fn cbc_encrypt(key: &DerivedKey, iv: &[u8; IV_SIZE], plaintext: &[u8]) -> Vec<u8> {
    Aes256CbcEnc::new(key.as_bytes().into(), iv.into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}

fn cbc_decrypt(
    key: &DerivedKey,
    iv: &[u8; IV_SIZE],
    ciphertext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    // Valid ciphertext always holds at least the padding block.
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(CryptoError::Decrypt);
    }

    Aes256CbcDec::new(key.as_bytes().into(), iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CryptoError::Decrypt)
}
