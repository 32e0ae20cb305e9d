use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Shared token bucket limiting table reads to the provisioned capacity.
pub(crate) struct ReadThrottle {
    inner: Mutex<TokenBucket>,
}

impl ReadThrottle {
    pub(crate) fn new(per_sec: u32) -> Self {
        Self {
            inner: Mutex::new(TokenBucket::new(per_sec, per_sec)),
        }
    }

    pub(crate) fn allow(&self) -> bool {
        // Poisoned mutex means a logic bug; deny instead of panic.
        if let Ok(mut g) = self.inner.lock() {
            g.allow()
        } else {
            false
        }
    }
}

#[derive(Debug)]
struct TokenBucket {
    rps: u32,
    capacity: u32,
    tokens: u32,
    last: Instant,
}

impl TokenBucket {
    fn new(rps: u32, burst: u32) -> Self {
        let rps = rps.max(1);
        let capacity = burst.max(1);
        Self {
            rps,
            capacity,
            tokens: capacity,
            last: Instant::now(),
        }
    }

    fn allow(&mut self) -> bool {
        self.refill();

        if self.tokens == 0 {
            return false;
        }
        self.tokens -= 1;
        true
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        if elapsed < Duration::from_millis(50) {
            return;
        }

        let add = (elapsed.as_millis() as u64 * self.rps as u64 / 1000) as u32;
        if add > 0 {
            self.tokens = (self.tokens + add).min(self.capacity);
            self.last = now;
        }
    }
}
