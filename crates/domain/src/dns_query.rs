use super::RecordType;
use std::sync::Arc;

/// DNS query (domain + record type).
/// Uses `Arc<str>` for zero-cost cloning across resolver → cache → repopulation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DnsQuery {
    pub domain: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuery {
    pub fn new(domain: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            domain: domain.into(),
            record_type,
        }
    }

    /// Query with an optional type; omitted types default to `A`.
    pub fn with_optional_type(domain: impl Into<Arc<str>>, record_type: Option<RecordType>) -> Self {
        Self::new(domain, record_type.unwrap_or_default())
    }
}
