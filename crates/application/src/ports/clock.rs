/// Wall-clock source, injected so cache ageing can be driven by tests.
pub trait Clock: Send + Sync {
    /// Milliseconds since UNIX epoch
    fn now_ms(&self) -> u64;
}
