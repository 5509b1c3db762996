use std::time::Duration;

use rand::Rng;

pub const DEFAULT_MIN_DELAY_MS: u64 = 1_000;
pub const DEFAULT_MAX_DELAY_MS: u64 = 3_000;

/// Inclusive range of pauses taken between two site requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    min_ms: u64,
    max_ms: u64,
}

impl DelayRange {
    /// Returns `None` when `min_ms > max_ms`.
    pub fn new(min_ms: u64, max_ms: u64) -> Option<Self> {
        match min_ms <= max_ms {
            true => Some(DelayRange { min_ms, max_ms }),
            false => None,
        }
    }

    pub fn none() -> Self {
        DelayRange { min_ms: 0, max_ms: 0 }
    }

    pub fn sample(&self) -> Duration {
        let ms = rand::thread_rng().gen_range(self.min_ms..=self.max_ms);
        Duration::from_millis(ms)
    }

    pub async fn pause(&self) {
        let delay = self.sample();
        if delay.is_zero() {
            return;
        }
        log::debug!("Waiting {} ms before next request", delay.as_millis());
        tokio::time::sleep(delay).await;
    }
}

impl Default for DelayRange {
    fn default() -> Self {
        DelayRange {
            min_ms: DEFAULT_MIN_DELAY_MS,
            max_ms: DEFAULT_MAX_DELAY_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_delays_stay_between_one_and_three_seconds() {
        let range = DelayRange::default();
        for _ in 0..100 {
            let delay = range.sample();
            assert!(delay >= Duration::from_secs(1), "{:?}", delay);
            assert!(delay <= Duration::from_secs(3), "{:?}", delay);
        }
    }

    #[test]
    fn inverted_range_is_refused() {
        assert_eq!(DelayRange::new(3_000, 1_000), None);
        assert!(DelayRange::new(5, 5).is_some());
    }

    #[test]
    fn fixed_range_always_samples_its_value() {
        let range = DelayRange::new(250, 250).unwrap();
        for _ in 0..10 {
            assert_eq!(range.sample(), Duration::from_millis(250));
        }
        assert_eq!(DelayRange::none().sample(), Duration::ZERO);
    }
}
