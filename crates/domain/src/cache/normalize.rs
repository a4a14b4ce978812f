use super::CacheEntry;
use crate::DnsAnswer;

/// Rewrites record TTLs to what remains of them at read time.
///
/// Always hands back a copy; the stored entry (and its `stored_at_ms`)
/// is left alone so concurrent readers age the same base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlNormalizer {
    enabled: bool,
}

impl TtlNormalizer {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn normalize(&self, entry: &CacheEntry, now_ms: u64) -> DnsAnswer {
        if !self.enabled {
            return entry.answer.clone();
        }

        let elapsed = elapsed_secs(entry.stored_at_ms, now_ms);
        DnsAnswer {
            records: entry
                .answer
                .records
                .iter()
                .map(|record| record.decayed(elapsed))
                .collect(),
            rcode: entry.answer.rcode,
        }
    }
}

impl Default for TtlNormalizer {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Whole seconds elapsed between two millisecond timestamps.
/// A clock that went backwards counts as no time elapsed.
#[inline]
pub fn elapsed_secs(stored_at_ms: u64, now_ms: u64) -> i64 {
    (now_ms.saturating_sub(stored_at_ms) / 1000) as i64
}
