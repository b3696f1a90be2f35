// ---------------------------------------------------------------------------
// SaveError: error types for save/load operations
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that can occur during save/load operations.
///
/// None of these reach the simulation: the load path falls back to a fresh
/// city and the autosave path logs and carries on.
#[derive(Debug)]
pub enum SaveError {
    /// I/O error (permission denied, disk full, etc.)
    Io(std::io::Error),
    /// Payload failed to decompress or decode (corrupt or foreign data).
    Decode(String),
    /// Header missing, truncated, from a newer build, or checksum mismatch.
    Header(String),
    /// The store holds no save.
    NoData,
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "I/O error: {e}"),
            SaveError::Decode(msg) => write!(f, "Decoding error: {msg}"),
            SaveError::Header(msg) => write!(f, "Invalid save header: {msg}"),
            SaveError::NoData => write!(f, "No save data available to load"),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<bitcode::Error> for SaveError {
    fn from(e: bitcode::Error) -> Self {
        SaveError::Decode(e.to_string())
    }
}

impl From<lz4_flex::block::DecompressError> for SaveError {
    fn from(e: lz4_flex::block::DecompressError) -> Self {
        SaveError::Decode(format!("lz4: {e}"))
    }
}
