use crate::{DnsQuery, RecordType};
use std::fmt;
use std::sync::Arc;

/// Cache key - host plus record type.
///
/// Hosts are compared case-insensitively and with or without the root
/// dot, so `Example.COM.` and `example.com` share one key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub host: Arc<str>,
    pub record_type: RecordType,
}

impl CacheKey {
    #[inline]
    pub fn new(host: &str, record_type: RecordType) -> Self {
        Self {
            host: Arc::from(normalize_host(host).as_str()),
            record_type,
        }
    }

    /// Build a key for an optional record type. Omitted types key as `A`.
    #[inline]
    pub fn build(host: &str, record_type: Option<RecordType>) -> Self {
        Self::new(host, record_type.unwrap_or_default())
    }

    #[inline]
    pub fn from_query(query: &DnsQuery) -> Self {
        Self::new(&query.domain, query.record_type)
    }

    /// Flat string form used by tiers that key on strings: `TYPE:host`.
    ///
    /// The type comes first because type names never contain `:`, which
    /// keeps the rendering injective for any host.
    pub fn storage_key(&self) -> String {
        let type_str = self.record_type.as_str();
        let mut key = String::with_capacity(type_str.len() + 1 + self.host.len());
        key.push_str(type_str);
        key.push(':');
        key.push_str(&self.host);
        key
    }

    /// Inverse of [`CacheKey::storage_key`].
    pub fn from_storage_key(raw: &str) -> Option<Self> {
        let (type_str, host) = raw.split_once(':')?;
        let record_type = type_str.parse().ok()?;
        Some(Self {
            host: Arc::from(host),
            record_type,
        })
    }

    pub fn to_query(&self) -> DnsQuery {
        DnsQuery::new(Arc::clone(&self.host), self.record_type)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.record_type, self.host)
    }
}

fn normalize_host(host: &str) -> String {
    let trimmed = match host.strip_suffix('.') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => host,
    };
    trimmed.to_ascii_lowercase()
}
