//! Model snapshot file: a JSON envelope around a base64 payload with a SHA-256 checksum.
//! The payload is the JSON form of whatever the caller persists; floats round-trip exactly.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

const FORMAT: &str = "lifepattern-model";
const VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot io: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot payload is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("snapshot checksum mismatch (expected {expected}, got {actual})")]
    ChecksumMismatch { expected: String, actual: String },
    #[error("unsupported snapshot {format} v{version}")]
    UnsupportedVersion { format: String, version: u32 },
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    format: String,
    version: u32,
    checksum: String,
    payload: String,
}

fn checksum(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, SnapshotError> {
    let payload = serde_json::to_vec(value)?;
    let envelope = Envelope {
        format: FORMAT.to_string(),
        version: VERSION,
        checksum: checksum(&payload),
        payload: BASE64.encode(&payload),
    };
    Ok(serde_json::to_vec_pretty(&envelope)?)
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SnapshotError> {
    let envelope: Envelope = serde_json::from_slice(bytes)?;
    if envelope.format != FORMAT || envelope.version != VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            format: envelope.format,
            version: envelope.version,
        });
    }
    let payload = BASE64.decode(envelope.payload.as_bytes())?;
    let actual = checksum(&payload);
    if actual != envelope.checksum {
        return Err(SnapshotError::ChecksumMismatch {
            expected: envelope.checksum,
            actual,
        });
    }
    Ok(serde_json::from_slice(&payload)?)
}

/// Write atomically-ish: temp file in the same directory, then rename.
pub fn write<T: Serialize>(path: &Path, value: &T) -> Result<(), SnapshotError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let bytes = encode(value)?;
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

pub fn read<T: DeserializeOwned>(path: &Path) -> Result<T, SnapshotError> {
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}
