pub mod udp;

use async_trait::async_trait;
use std::time::Duration;
use tierdns_domain::DomainError;

pub use udp::UdpTransport;

/// Sends one raw DNS message and returns the raw reply
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(&self, message_bytes: &[u8], timeout: Duration) -> Result<Vec<u8>, DomainError>;
}
