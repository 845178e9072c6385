//! Fixed-delay request pacing

use std::time::{Duration, Instant};

/// Keeps successive requests at least `delay` apart
///
/// The first call to [`wait`](Throttle::wait) returns immediately. The delay
/// is static; it does not adapt to server responses.
#[derive(Debug)]
pub struct Throttle {
    delay: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self { delay, last: None }
    }

    /// Sleeps until `delay` has passed since the previous call returned
    pub async fn wait(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.delay {
                tokio::time::sleep(self.delay - elapsed).await;
            }
        }
        self.last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_wait_is_immediate() {
        let mut throttle = Throttle::new(Duration::from_secs(60));
        let start = Instant::now();
        throttle.wait().await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_successive_waits_are_spaced() {
        let mut throttle = Throttle::new(Duration::from_millis(50));
        let start = Instant::now();
        throttle.wait().await;
        throttle.wait().await;
        throttle.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_zero_delay_never_sleeps() {
        let mut throttle = Throttle::new(Duration::ZERO);
        let start = Instant::now();
        for _ in 0..10 {
            throttle.wait().await;
        }
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
