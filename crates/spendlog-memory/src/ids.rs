use std::sync::atomic::{AtomicU64, Ordering};

use spendlog_core::IdGenerator;

/// Millisecond-epoch ids that never repeat.
///
/// Two requests in the same millisecond get `last + 1`, so ids may run a
/// little ahead of the wall clock under load.
pub struct MonotonicMillis {
    last: AtomicU64,
}

impl Default for MonotonicMillis {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicMillis {
    pub fn new() -> Self {
        Self { last: AtomicU64::new(0) }
    }

    fn now_millis() -> u64 {
        let nanos = time::OffsetDateTime::now_utc().unix_timestamp_nanos();
        u64::try_from(nanos / 1_000_000).unwrap_or(0)
    }
}

impl IdGenerator for MonotonicMillis {
    fn next_id(&self) -> u64 {
        let now = Self::now_millis();
        let mut prev = self.last.load(Ordering::SeqCst);
        loop {
            let next = now.max(prev + 1);
            match self.last.compare_exchange_weak(prev, next, Ordering::SeqCst, Ordering::SeqCst) {
                Ok(_) => return next,
                Err(actual) => prev = actual,
            }
        }
    }
}

/// Plain counter starting at 1.
pub struct Sequential {
    counter: AtomicU64,
}

impl Default for Sequential {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequential {
    pub fn new() -> Self {
        Self { counter: AtomicU64::new(1) }
    }
}

impl IdGenerator for Sequential {
    fn next_id(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::SeqCst)
    }
}
