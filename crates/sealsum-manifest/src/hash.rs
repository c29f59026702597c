//! Streaming content digests for files and byte slices

use std::io::Read;
use std::path::Path;

use digest::DynDigest;

use crate::algo::HashAlgo;

/// Read buffer for streaming file hashing. Files are never held in memory
/// whole, so arbitrarily large inputs hash in constant space.
const READ_BUF_SIZE: usize = 64 * 1024;

/// Static algorithm → digest constructor table.
fn new_digest(algo: HashAlgo) -> Box<dyn DynDigest> {
    match algo {
        HashAlgo::Sha256 => Box::new(sha2::Sha256::default()),
        HashAlgo::Sha1 => Box::new(sha1::Sha1::default()),
        HashAlgo::Md5 => Box::new(md5::Md5::default()),
    }
}

/// Hash a byte slice in memory, rendered as lowercase hex.
pub fn hash_bytes(data: &[u8], algo: HashAlgo) -> String {
    let mut hasher = new_digest(algo);
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Hash a file from disk using the streaming interface.
///
/// The empty file yields the algorithm's digest of zero bytes.
pub fn hash_file(path: &Path, algo: HashAlgo) -> std::io::Result<String> {
    let mut file = std::fs::File::open(path)?;
    let mut hasher = new_digest(algo);
    let mut buf = vec![0u8; READ_BUF_SIZE];

    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}
