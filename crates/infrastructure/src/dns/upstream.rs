use super::forwarding::{MessageBuilder, ResponseParser};
use super::transport::{DnsTransport, UdpTransport};
use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;
use tierdns_application::ports::DnsResolver;
use tierdns_domain::{DnsAnswer, DnsQuery, DomainError, UpstreamConfig};
use tracing::{debug, warn};

/// Plain recursive resolution against a list of UDP servers.
///
/// Servers are tried in order; the whole list is walked `retries + 1`
/// times before giving up. A negative rcode from a server is an answer,
/// not a failure.
pub struct UdpUpstreamResolver {
    transports: Vec<UdpTransport>,
    timeout: Duration,
    retries: u32,
}

impl UdpUpstreamResolver {
    pub fn new(servers: Vec<SocketAddr>, timeout: Duration, retries: u32) -> Result<Self, DomainError> {
        if servers.is_empty() {
            return Err(DomainError::ConfigurationError(
                "at least one upstream server is required".into(),
            ));
        }

        Ok(Self {
            transports: servers.into_iter().map(UdpTransport::new).collect(),
            timeout,
            retries,
        })
    }

    pub fn from_config(config: &UpstreamConfig) -> Result<Self, DomainError> {
        let servers = config
            .servers
            .iter()
            .map(|server| {
                server.parse::<SocketAddr>().map_err(|e| {
                    DomainError::ConfigurationError(format!(
                        "invalid upstream server '{}': {}",
                        server, e
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(servers, Duration::from_millis(config.timeout_ms), config.retries)
    }

    pub fn servers(&self) -> Vec<SocketAddr> {
        self.transports.iter().map(|t| t.server_addr()).collect()
    }

    async fn exchange(
        &self,
        transport: &UdpTransport,
        query: &DnsQuery,
    ) -> Result<DnsAnswer, DomainError> {
        let (id, request) = MessageBuilder::build_query(&query.domain, &query.record_type)?;
        let reply = transport.send(&request, self.timeout).await?;

        match ResponseParser::response_id(&reply) {
            Some(reply_id) if reply_id == id => {}
            other => {
                return Err(DomainError::InvalidDnsResponse(format!(
                    "response id {:?} does not match query id {}",
                    other, id
                )));
            }
        }

        let response = ResponseParser::parse(&reply)?;
        if response.truncated {
            warn!(
                server = %transport.server_addr(),
                domain = %query.domain,
                "Truncated UDP response, using partial answer"
            );
        }

        Ok(response.answer)
    }
}

#[async_trait]
impl DnsResolver for UdpUpstreamResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsAnswer, DomainError> {
        let mut last_error = None;

        for attempt in 0..=self.retries {
            for transport in &self.transports {
                match self.exchange(transport, query).await {
                    Ok(answer) => {
                        debug!(
                            server = %transport.server_addr(),
                            domain = %query.domain,
                            record_type = %query.record_type,
                            rcode = %answer.rcode,
                            records = answer.records.len(),
                            "Upstream answered"
                        );
                        return Ok(answer);
                    }
                    Err(e @ DomainError::InvalidDomainName(_)) => return Err(e),
                    Err(e) => {
                        warn!(
                            server = %transport.server_addr(),
                            domain = %query.domain,
                            attempt = attempt,
                            error = %e,
                            "Upstream attempt failed"
                        );
                        last_error = Some(e);
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            DomainError::ResolverError("no upstream server answered".into())
        }))
    }
}
