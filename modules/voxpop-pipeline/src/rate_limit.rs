use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Token-bucket limiter for outbound search calls, parameterized by
/// requests-per-second and burst capacity. The refill arithmetic takes the
/// current instant as an argument, so tests drive it without a wall clock.
pub struct RateLimiter {
    bucket: Mutex<Bucket>,
}

impl RateLimiter {
    pub fn new(rate_per_sec: f64, burst: u32) -> Self {
        Self {
            bucket: Mutex::new(Bucket::new(rate_per_sec, burst)),
        }
    }

    /// Take one token, sleeping until the bucket refills if necessary.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut bucket = self.bucket.lock().expect("rate limiter lock poisoned");
                bucket.try_take(Instant::now())
            };
            match wait {
                None => return,
                Some(d) => tokio::time::sleep(d).await,
            }
        }
    }
}

struct Bucket {
    capacity: f64,
    tokens: f64,
    refill_per_sec: f64,
    last: Instant,
}

impl Bucket {
    fn new(rate_per_sec: f64, burst: u32) -> Self {
        assert!(rate_per_sec > 0.0, "rate must be positive");
        assert!(burst >= 1, "burst must be at least 1");
        let capacity = burst as f64;
        Self {
            capacity,
            tokens: capacity,
            refill_per_sec: rate_per_sec,
            last: Instant::now(),
        }
    }

    /// Refill for elapsed time, then take a token if one is available.
    /// Returns the duration to wait before retrying when the bucket is empty.
    fn try_take(&mut self, now: Instant) -> Option<Duration> {
        let elapsed = now.saturating_duration_since(self.last).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.refill_per_sec).min(self.capacity);
        self.last = now;

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            None
        } else {
            Some(Duration::from_secs_f64(
                (1.0 - self.tokens) / self.refill_per_sec,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_tokens_available_immediately() {
        let mut bucket = Bucket::new(1.0, 3);
        let now = Instant::now();
        assert!(bucket.try_take(now).is_none());
        assert!(bucket.try_take(now).is_none());
        assert!(bucket.try_take(now).is_none());
        assert!(bucket.try_take(now).is_some());
    }

    #[test]
    fn empty_bucket_reports_refill_wait() {
        let mut bucket = Bucket::new(2.0, 1);
        let now = Instant::now();
        assert!(bucket.try_take(now).is_none());
        let wait = bucket.try_take(now).expect("bucket should be empty");
        // 2 req/s means a full token every 500ms.
        assert!((wait.as_secs_f64() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn tokens_refill_over_time() {
        let mut bucket = Bucket::new(1.0, 1);
        let start = Instant::now();
        assert!(bucket.try_take(start).is_none());
        assert!(bucket.try_take(start).is_some());
        assert!(bucket.try_take(start + Duration::from_secs(1)).is_none());
    }

    #[test]
    fn refill_capped_at_burst() {
        let mut bucket = Bucket::new(10.0, 2);
        let start = Instant::now();
        // A long idle period must not accumulate more than `burst` tokens.
        let later = start + Duration::from_secs(60);
        assert!(bucket.try_take(later).is_none());
        assert!(bucket.try_take(later).is_none());
        assert!(bucket.try_take(later).is_some());
    }
}
