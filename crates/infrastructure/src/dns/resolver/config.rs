use tierdns_domain::{CacheConfig, StalenessWindow, TtlNormalizer, TtlPolicy};

/// Per-instance cache behaviour, derived from `[cache]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheOptions {
    /// Rewrite record TTLs to their remaining lifetime on read
    pub normalise_ttl: bool,

    /// Lifetime for negative answers; `None` disables negative caching
    pub negative_ttl: Option<u32>,

    pub ttl_policy: TtlPolicy,

    /// How long past expiry an entry may still be served, in seconds
    pub max_stale: u64,

    /// Refresh stale entries in the background instead of on the caller's path
    pub repopulate: bool,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            normalise_ttl: true,
            negative_ttl: None,
            ttl_policy: TtlPolicy::First,
            max_stale: 0,
            repopulate: false,
        }
    }
}

impl CacheOptions {
    pub fn from_config(config: &CacheConfig) -> Self {
        Self {
            normalise_ttl: config.normalise_ttl,
            negative_ttl: config.negative_ttl,
            ttl_policy: TtlPolicy::from_minimise(config.minimise_ttl),
            max_stale: config.max_stale,
            repopulate: config.repopulate,
        }
    }

    pub fn with_max_stale(mut self, max_stale: u64) -> Self {
        self.max_stale = max_stale;
        self
    }

    pub fn with_repopulate(mut self, repopulate: bool) -> Self {
        self.repopulate = repopulate;
        self
    }

    pub fn with_negative_ttl(mut self, negative_ttl: Option<u32>) -> Self {
        self.negative_ttl = negative_ttl;
        self
    }

    pub fn with_minimise_ttl(mut self, minimise: bool) -> Self {
        self.ttl_policy = TtlPolicy::from_minimise(minimise);
        self
    }

    pub fn with_normalise_ttl(mut self, normalise: bool) -> Self {
        self.normalise_ttl = normalise;
        self
    }

    /// Negative answers are cached only with a non-zero lifetime.
    pub fn negative_caching(&self) -> bool {
        self.negative_ttl.is_some_and(|ttl| ttl > 0)
    }

    pub fn staleness_window(&self) -> StalenessWindow {
        StalenessWindow::from_secs(self.max_stale)
    }

    pub fn normalizer(&self) -> TtlNormalizer {
        TtlNormalizer::new(self.normalise_ttl)
    }
}
