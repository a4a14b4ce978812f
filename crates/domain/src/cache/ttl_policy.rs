use crate::DnsRecord;

/// Which record TTL decides the lifetime of a whole answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TtlPolicy {
    /// TTL of the first record
    #[default]
    First,
    /// Smallest TTL across all records
    Minimise,
}

impl TtlPolicy {
    pub fn from_minimise(minimise_ttl: bool) -> Self {
        if minimise_ttl {
            Self::Minimise
        } else {
            Self::First
        }
    }

    /// `None` when there is no record to take a TTL from. Negative
    /// record TTLs clamp to zero.
    pub fn select(&self, records: &[DnsRecord]) -> Option<u32> {
        let ttl = match self {
            Self::First => records.first().map(|r| r.ttl)?,
            Self::Minimise => records.iter().map(|r| r.ttl).min()?,
        };
        Some(ttl.clamp(0, i64::from(u32::MAX)) as u32)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Minimise => "minimise",
        }
    }
}
