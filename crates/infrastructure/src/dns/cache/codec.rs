use bytes::Bytes;
use tierdns_domain::{CacheEntry, DomainError};

/// Serializes cache entries for the shared tier.
///
/// JSON keeps every `CacheEntry` field, including the signed record TTLs
/// and both timestamps, so a decoded entry classifies exactly like the
/// one that was written.
pub struct EntryCodec;

impl EntryCodec {
    pub fn encode(entry: &CacheEntry) -> Result<Bytes, DomainError> {
        serde_json::to_vec(entry)
            .map(Bytes::from)
            .map_err(|e| DomainError::SerializationError(format!("Failed to encode entry: {}", e)))
    }

    pub fn decode(raw: &[u8]) -> Result<CacheEntry, DomainError> {
        serde_json::from_slice(raw)
            .map_err(|e| DomainError::SerializationError(format!("Failed to decode entry: {}", e)))
    }
}
