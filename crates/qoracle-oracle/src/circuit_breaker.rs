//! Emergency pause and staleness detection.
//!
//! While paused, the committee refuses every price update. Independently,
//! consumers ask [`CircuitBreaker::check_operational`] before relying on the
//! current price: if no observation newer than [`DEFAULT_STALENESS_THRESHOLD`]
//! seconds has been accepted, the price is considered stale.

use crate::{OracleError, Result};

/// Default staleness threshold in seconds (1 hour).
pub const DEFAULT_STALENESS_THRESHOLD: u64 = 3600;

/// Tracks pause state and the timestamp of the last accepted observation.
#[derive(Debug, Clone)]
pub struct CircuitBreaker {
    /// Timestamp of the last accepted observation.
    last_update_time: u64,
    /// Staleness threshold in seconds.
    staleness_threshold: u64,
    /// Whether updates are paused.
    paused: bool,
}

impl CircuitBreaker {
    /// Create a breaker with the default staleness threshold.
    pub fn new(initial_time: u64) -> Self {
        Self::with_threshold(initial_time, DEFAULT_STALENESS_THRESHOLD)
    }

    /// Create a breaker with a custom staleness threshold.
    pub fn with_threshold(initial_time: u64, staleness_threshold: u64) -> Self {
        Self {
            last_update_time: initial_time,
            staleness_threshold,
            paused: false,
        }
    }

    /// Record an accepted observation.
    pub fn record_update(&mut self, update_time: u64) {
        self.last_update_time = update_time;
    }

    /// Whether more than the threshold has elapsed since the last update.
    pub fn check_staleness(&self, current_time: u64) -> bool {
        current_time.saturating_sub(self.last_update_time) > self.staleness_threshold
    }

    /// Fail unless the oracle is unpaused and fresh.
    ///
    /// # Errors
    ///
    /// - [`OracleError::Paused`] if paused (checked first)
    /// - [`OracleError::StaleData`] if the data is stale
    pub fn check_operational(&self, current_time: u64) -> Result<()> {
        self.check_not_paused()?;
        if self.check_staleness(current_time) {
            return Err(OracleError::StaleData {
                last_update: self.last_update_time,
                current: current_time,
                threshold: self.staleness_threshold,
            });
        }
        Ok(())
    }

    /// Fail if paused.
    ///
    /// # Errors
    ///
    /// - [`OracleError::Paused`] if paused
    pub fn check_not_paused(&self) -> Result<()> {
        if self.paused {
            return Err(OracleError::Paused);
        }
        Ok(())
    }

    /// Stop accepting price updates.
    pub fn trigger_pause(&mut self) {
        tracing::warn!("circuit breaker: oracle paused");
        self.paused = true;
    }

    /// Resume accepting price updates.
    pub fn resume(&mut self) {
        tracing::info!("circuit breaker: oracle resumed");
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn last_update_time(&self) -> u64 {
        self.last_update_time
    }

    pub fn staleness_threshold(&self) -> u64 {
        self.staleness_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_within_threshold() {
        let cb = CircuitBreaker::new(1000);
        assert!(!cb.check_staleness(1000 + DEFAULT_STALENESS_THRESHOLD));
        assert!(cb.check_staleness(1000 + DEFAULT_STALENESS_THRESHOLD + 1));
    }

    #[test]
    fn test_clock_behind_last_update_is_fresh() {
        let cb = CircuitBreaker::new(5000);
        assert!(!cb.check_staleness(0));
    }

    #[test]
    fn test_record_update_resets_staleness() {
        let mut cb = CircuitBreaker::with_threshold(0, 60);
        assert!(cb.check_staleness(61));
        cb.record_update(61);
        assert!(!cb.check_staleness(61));
        assert_eq!(cb.last_update_time(), 61);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut cb = CircuitBreaker::new(1000);
        cb.trigger_pause();
        assert!(cb.is_paused());
        assert!(matches!(cb.check_not_paused(), Err(OracleError::Paused)));
        cb.resume();
        cb.check_operational(1000).expect("operational after resume");
    }

    #[test]
    fn test_paused_reported_before_stale() {
        let mut cb = CircuitBreaker::with_threshold(0, 10);
        cb.trigger_pause();
        let err = cb.check_operational(1_000).expect_err("paused and stale");
        assert!(matches!(err, OracleError::Paused));
    }

    #[test]
    fn test_stale_error_fields() {
        let cb = CircuitBreaker::with_threshold(100, 10);
        let err = cb.check_operational(111).expect_err("stale");
        assert!(matches!(
            err,
            OracleError::StaleData {
                last_update: 100,
                current: 111,
                threshold: 10
            }
        ));
    }
}
