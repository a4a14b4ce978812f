use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Cache configuration error: {0}")]
    ConfigurationError(String),

    #[error("Upstream resolver failed: {0}")]
    ResolverError(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Cache entry could not be decoded: {0}")]
    SerializationError(String),

    #[error("Cache tier read failed: {0}")]
    TierReadError(String),

    #[error("Cache tier write failed: {0}")]
    TierWriteError(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

impl DomainError {
    /// Errors that originate from the upstream exchange. These are the only
    /// errors a resolve surfaces to its caller; tier and codec errors are
    /// absorbed as cache misses.
    pub fn is_resolver_failure(&self) -> bool {
        matches!(
            self,
            DomainError::ResolverError(_)
                | DomainError::QueryTimeout
                | DomainError::InvalidDnsResponse(_)
                | DomainError::InvalidDomainName(_)
                | DomainError::IoError(_)
        )
    }
}
