//! GameState <-> bytes.
//!
//! Layout: `file_header` followed by an lz4 block (size-prepended) holding
//! the bitcode-encoded [`GameState`].

use simulation::state::GameState;

use crate::file_header::{unwrap_header, wrap_with_header, FLAG_COMPRESSED};
use crate::save_error::SaveError;

/// Encode the full state into a self-describing save blob.
pub fn encode_state(state: &GameState) -> Vec<u8> {
    let raw = bitcode::encode(state);
    let compressed = lz4_flex::compress_prepend_size(&raw);
    wrap_with_header(&compressed, FLAG_COMPRESSED, raw.len())
}

/// Decode a blob produced by [`encode_state`].
///
/// Returns the state exactly as saved; achievement reconciliation and
/// derived-field repair happen in [`crate::load`].
pub fn decode_state(bytes: &[u8]) -> Result<GameState, SaveError> {
    let (header, payload) = unwrap_header(bytes)?;

    let raw = if header.is_compressed() {
        lz4_flex::decompress_size_prepended(payload)?
    } else {
        payload.to_vec()
    };

    if raw.len() != header.uncompressed_size as usize {
        return Err(SaveError::Decode(format!(
            "payload is {} bytes, header says {}",
            raw.len(),
            header.uncompressed_size
        )));
    }

    Ok(bitcode::decode(&raw)?)
}
