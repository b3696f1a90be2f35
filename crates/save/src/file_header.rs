// ---------------------------------------------------------------------------
// file_header – Save file header with magic bytes, version, and checksum
// ---------------------------------------------------------------------------
//
// Header format (28 bytes, fixed-size, little-endian):
//   [0..4]   Magic bytes: "SKYL"
//   [4..8]   Format version (u32)
//   [8..12]  Flags (u32: bit 0 = lz4 compressed)
//   [12..20] Timestamp (Unix epoch seconds, u64)
//   [20..24] Uncompressed payload size (u32)
//   [24..28] xxHash32 checksum of the stored payload (everything after the header)

use xxhash_rust::xxh32::xxh32;

use crate::save_error::SaveError;

/// Magic bytes identifying a Skyline save file.
pub const MAGIC: [u8; 4] = *b"SKYL";

/// Size of the file header in bytes.
pub const HEADER_SIZE: usize = 28;

/// Version of the header layout. Payload schema changes are not versioned.
pub const HEADER_FORMAT_VERSION: u32 = 1;

/// The payload is an lz4 block with its uncompressed size prepended.
pub const FLAG_COMPRESSED: u32 = 1;

/// Seed for xxHash32 checksum.
const XXHASH_SEED: u32 = 0;

/// Parsed file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub format_version: u32,
    pub flags: u32,
    pub timestamp: u64,
    pub uncompressed_size: u32,
    pub checksum: u32,
}

impl FileHeader {
    pub fn is_compressed(&self) -> bool {
        self.flags & FLAG_COMPRESSED != 0
    }
}

/// Wrap a stored payload with a file header.
///
/// Returns bytes: [header (28 bytes)] ++ [payload].
pub fn wrap_with_header(payload: &[u8], flags: u32, uncompressed_size: usize) -> Vec<u8> {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&HEADER_FORMAT_VERSION.to_le_bytes());
    out.extend_from_slice(&flags.to_le_bytes());
    out.extend_from_slice(&timestamp.to_le_bytes());
    out.extend_from_slice(&(uncompressed_size as u32).to_le_bytes());
    out.extend_from_slice(&xxh32(payload, XXHASH_SEED).to_le_bytes());
    out.extend_from_slice(payload);
    out
}

fn le_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Parse and validate the header, returning it and the payload slice.
///
/// # Errors
///
/// Returns [`SaveError::Header`] if the magic bytes are missing, the buffer
/// is shorter than a header, the format version is from a newer build, or
/// the checksum does not match.
pub fn unwrap_header(bytes: &[u8]) -> Result<(FileHeader, &[u8]), SaveError> {
    if bytes.len() < MAGIC.len() || bytes[..4] != MAGIC {
        return Err(SaveError::Header("not a Skyline save (bad magic)".into()));
    }
    if bytes.len() < HEADER_SIZE {
        return Err(SaveError::Header(format!(
            "file too short ({} bytes, need at least {HEADER_SIZE})",
            bytes.len()
        )));
    }

    let format_version = le_u32(bytes, 4);
    let flags = le_u32(bytes, 8);
    let mut ts = [0u8; 8];
    ts.copy_from_slice(&bytes[12..20]);
    let timestamp = u64::from_le_bytes(ts);
    let uncompressed_size = le_u32(bytes, 20);
    let checksum = le_u32(bytes, 24);

    if format_version > HEADER_FORMAT_VERSION {
        return Err(SaveError::Header(format!(
            "header format version {format_version} is newer than supported \
             version {HEADER_FORMAT_VERSION}"
        )));
    }

    let payload = &bytes[HEADER_SIZE..];
    let computed = xxh32(payload, XXHASH_SEED);
    if computed != checksum {
        return Err(SaveError::Header(format!(
            "checksum mismatch (expected {checksum:#010X}, got {computed:#010X})"
        )));
    }

    Ok((
        FileHeader {
            format_version,
            flags,
            timestamp,
            uncompressed_size,
            checksum,
        },
        payload,
    ))
}
