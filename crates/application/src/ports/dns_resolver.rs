use async_trait::async_trait;
use tierdns_domain::{DnsAnswer, DnsQuery, DomainError};

/// Upstream recursive resolver.
///
/// Implementations own their timeout and retry policy. A server that
/// answers with an error rcode is `Ok` with a negative [`DnsAnswer`];
/// `Err` means no usable answer came back at all.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsAnswer, DomainError>;
}
