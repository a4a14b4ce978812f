use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tierdns_application::ports::DnsResolver;
use tierdns_domain::{DnsAnswer, DnsQuery, DomainError};

/// Upstream that counts calls and can be told to fail or to be slow.
#[derive(Clone)]
pub struct CountingUpstream {
    call_count: Arc<AtomicU64>,
    should_fail: Arc<AtomicBool>,
    answer: Arc<Mutex<DnsAnswer>>,
    delay: Arc<Mutex<Option<Duration>>>,
}

impl CountingUpstream {
    pub fn new(answer: DnsAnswer) -> Self {
        Self {
            call_count: Arc::new(AtomicU64::new(0)),
            should_fail: Arc::new(AtomicBool::new(false)),
            answer: Arc::new(Mutex::new(answer)),
            delay: Arc::new(Mutex::new(None)),
        }
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn set_answer(&self, answer: DnsAnswer) {
        *self.answer.lock().unwrap() = answer;
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }
}

#[async_trait]
impl DnsResolver for CountingUpstream {
    async fn resolve(&self, _query: &DnsQuery) -> Result<DnsAnswer, DomainError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::QueryTimeout);
        }

        Ok(self.answer.lock().unwrap().clone())
    }
}
