//! Retry delays for polling a service socket that is not up yet.

use std::time::Duration;

/// Retry delay growth.
#[derive(Debug, Clone)]
pub struct BackoffConfig {
    /// Sleep after the first failed attempt.
    pub initial_delay: Duration,
    /// Upper bound on any single sleep.
    pub max_delay: Duration,
    /// Growth factor per failed attempt.
    pub multiplier: f64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(50),
            max_delay: Duration::from_secs(1),
            multiplier: 2.0,
        }
    }
}

/// Sequence of retry delays: initial, then multiplied per attempt up to the cap.
#[derive(Debug)]
pub struct Backoff {
    config: BackoffConfig,
    next: Duration,
    attempts: u32,
}

impl Backoff {
    pub fn new(config: BackoffConfig) -> Self {
        Self {
            next: config.initial_delay.min(config.max_delay),
            config,
            attempts: 0,
        }
    }

    /// Count a failed attempt and return how long to sleep before the next one.
    pub fn next_delay(&mut self) -> Duration {
        self.attempts += 1;
        let delay = self.next;
        let grown = Duration::from_secs_f64(delay.as_secs_f64() * self.config.multiplier);
        self.next = grown.min(self.config.max_delay);
        delay
    }

    /// Failed attempts so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(BackoffConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_grow_from_fifty_ms_to_one_second() {
        let mut backoff = Backoff::default();
        let delays: Vec<_> = (0..7).map(|_| backoff.next_delay().as_millis()).collect();
        assert_eq!(delays, vec![50, 100, 200, 400, 800, 1000, 1000]);
        assert_eq!(backoff.attempts(), 7);
    }

    #[test]
    fn fresh_backoff_has_no_attempts() {
        assert_eq!(Backoff::default().attempts(), 0);
    }

    #[test]
    fn initial_delay_is_capped() {
        let mut backoff = Backoff::new(BackoffConfig {
            initial_delay: Duration::from_secs(5),
            max_delay: Duration::from_secs(1),
            multiplier: 2.0,
        });
        assert_eq!(backoff.next_delay(), Duration::from_secs(1));
    }

    #[test]
    fn multiplier_of_one_keeps_delay_constant() {
        let mut backoff = Backoff::new(BackoffConfig {
            initial_delay: Duration::from_millis(30),
            max_delay: Duration::from_secs(1),
            multiplier: 1.0,
        });
        assert_eq!(backoff.next_delay(), Duration::from_millis(30));
        assert_eq!(backoff.next_delay(), Duration::from_millis(30));
    }
}
