//! Oracle committee state and entry points.
//!
//! [`CommitteeState`] is the data the engine owns: the trusted reporter keys,
//! the last accepted observation, and the bounded history. It can only be
//! changed by committing an update that passed
//! [`validate_update`](crate::quorum::validate_update), so it
//! never holds an unvalidated observation.
//!
//! [`OracleCommittee`] wraps the state with its verifier, configuration and
//! circuit breaker, and exposes the boolean entry points a host contract
//! registers, alongside `try_*` variants that report the rejection reason.

use qoracle_crypto::blake3::{key_set_fingerprint, short_fingerprint, short_hex};
use qoracle_crypto::PqVerifier;
use qoracle_types::{PriceObservation, PriceUpdateRequest, ReporterKeySet};

use crate::circuit_breaker::CircuitBreaker;
use crate::config::CommitteeConfig;
use crate::history::PriceHistoryStore;
use crate::quorum;
use crate::{OracleError, Result};

/// Persistent state of one oracle committee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitteeState {
    trusted_keys: ReporterKeySet,
    key_set_id: [u8; 32],
    last_accepted: PriceObservation,
    history: PriceHistoryStore,
}

impl CommitteeState {
    /// Fresh state: the given keys, a zero price at timestamp zero, and an
    /// empty history of capacity `max_history`.
    pub fn new(trusted_keys: ReporterKeySet, decimals: u8, max_history: usize) -> Self {
        Self {
            key_set_id: key_set_fingerprint(&trusted_keys),
            trusted_keys,
            last_accepted: PriceObservation::genesis(decimals),
            history: PriceHistoryStore::new(max_history),
        }
    }

    pub fn trusted_keys(&self) -> &ReporterKeySet {
        &self.trusted_keys
    }

    /// Fingerprint of the trusted key set; identifies the committee.
    pub fn key_set_id(&self) -> &[u8; 32] {
        &self.key_set_id
    }

    pub fn last_accepted(&self) -> &PriceObservation {
        &self.last_accepted
    }

    pub fn history(&self) -> &PriceHistoryStore {
        &self.history
    }

    /// Replace the current price and record it in history.
    fn accept(&mut self, observation: PriceObservation) -> Option<PriceObservation> {
        self.last_accepted = observation;
        self.history.append(observation)
    }
}

/// An update that passed validation and may be committed.
///
/// Only [`OracleCommittee::validate_update`] creates these. Committing fails
/// on a committee with a different key set, or if another update was
/// accepted in between.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a validated update has no effect until committed"]
pub struct ValidatedUpdate {
    observation: PriceObservation,
    key_set_id: [u8; 32],
    baseline_timestamp: u64,
}

impl ValidatedUpdate {
    /// The observation that will become the current price.
    pub fn observation(&self) -> &PriceObservation {
        &self.observation
    }
}

/// One consuming token's oracle committee.
#[derive(Debug)]
pub struct OracleCommittee<V> {
    config: CommitteeConfig,
    verifier: V,
    state: Option<CommitteeState>,
    breaker: CircuitBreaker,
}

impl<V: PqVerifier> OracleCommittee<V> {
    /// Create an uninitialized committee.
    pub fn new(config: CommitteeConfig, verifier: V) -> Self {
        let breaker = CircuitBreaker::with_threshold(0, config.staleness_threshold_secs);
        Self {
            config,
            verifier,
            state: None,
            breaker,
        }
    }

    /// Install the trusted reporter keys. Only the first call has any effect.
    ///
    /// # Errors
    ///
    /// - [`OracleError::AlreadyInitialized`] on every call after the first
    pub fn try_initialize(&mut self, trusted_keys: ReporterKeySet) -> Result<()> {
        if self.state.is_some() {
            return Err(OracleError::AlreadyInitialized);
        }

        for (index, key) in trusted_keys.iter().enumerate() {
            tracing::debug!(
                index,
                fingerprint = %short_fingerprint(key.as_bytes()),
                "trusted reporter key"
            );
        }

        let state = CommitteeState::new(
            trusted_keys,
            self.config.decimals,
            self.config.max_history,
        );
        tracing::info!(
            key_set = %short_hex(state.key_set_id()),
            decimals = self.config.decimals,
            max_history = self.config.max_history,
            "oracle committee initialized"
        );
        self.state = Some(state);
        Ok(())
    }

    /// [`try_initialize`](Self::try_initialize), silently ignoring repeat calls.
    ///
    /// Returns `true` if this call performed the initialization.
    pub fn initialize(&mut self, trusted_keys: ReporterKeySet) -> bool {
        match self.try_initialize(trusted_keys) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "initialize ignored");
                false
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Read-only view of the committee state.
    pub fn state(&self) -> Option<&CommitteeState> {
        self.state.as_ref()
    }

    pub fn config(&self) -> &CommitteeConfig {
        &self.config
    }

    /// Run the acceptance pipeline without changing anything.
    ///
    /// # Errors
    ///
    /// - [`OracleError::NotInitialized`] before initialization
    /// - [`OracleError::Paused`] while the circuit breaker is paused
    /// - [`OracleError::Validation`] if any gate rejects the update
    pub fn validate_update(
        &self,
        request: &PriceUpdateRequest,
        now: u64,
    ) -> Result<ValidatedUpdate> {
        let state = self.state.as_ref().ok_or(OracleError::NotInitialized)?;
        self.breaker.check_not_paused()?;
        quorum::validate_update(state, request, now, &self.verifier)?;
        Ok(ValidatedUpdate {
            observation: request.observation,
            key_set_id: state.key_set_id,
            baseline_timestamp: state.last_accepted.timestamp,
        })
    }

    /// Make a validated update the current price and append it to history.
    ///
    /// # Errors
    ///
    /// - [`OracleError::NotInitialized`] before initialization
    /// - [`OracleError::Paused`] while the circuit breaker is paused
    /// - [`OracleError::ForeignValidation`] if another committee validated the update
    /// - [`OracleError::StaleValidation`] if the committee moved on since validation
    pub fn commit(&mut self, update: ValidatedUpdate) -> Result<PriceObservation> {
        self.breaker.check_not_paused()?;
        let state = self.state.as_mut().ok_or(OracleError::NotInitialized)?;
        if state.key_set_id != update.key_set_id {
            return Err(OracleError::ForeignValidation {
                validated_by: short_hex(&update.key_set_id),
                current: short_hex(&state.key_set_id),
            });
        }
        if state.last_accepted.timestamp != update.baseline_timestamp {
            return Err(OracleError::StaleValidation {
                validated_against: update.baseline_timestamp,
                current: state.last_accepted.timestamp,
            });
        }

        let observation = update.observation;
        let evicted = state.accept(observation);
        self.breaker.record_update(observation.timestamp);

        tracing::info!(
            price = observation.price,
            decimals = observation.decimals,
            timestamp = observation.timestamp,
            history_len = state.history.len(),
            evicted = ?evicted.map(|e| e.timestamp),
            "price update accepted"
        );
        Ok(observation)
    }

    /// Validate and, on success, commit `request`.
    ///
    /// # Errors
    ///
    /// Any error from [`validate_update`](Self::validate_update). State is
    /// unchanged on every error path.
    pub fn try_submit_price_update(
        &mut self,
        request: &PriceUpdateRequest,
        now: u64,
    ) -> Result<()> {
        let validated = self.validate_update(request, now).inspect_err(|e| {
            tracing::debug!(
                error = %e,
                price = request.observation.price,
                timestamp = request.observation.timestamp,
                signatures = request.signatures.len(),
                now,
                "price update rejected"
            );
        })?;
        self.commit(validated)?;
        Ok(())
    }

    /// [`try_submit_price_update`](Self::try_submit_price_update) collapsed
    /// to accepted / rejected.
    pub fn submit_price_update(&mut self, request: &PriceUpdateRequest, now: u64) -> bool {
        self.try_submit_price_update(request, now).is_ok()
    }

    /// The last accepted observation (the genesis zero price until the first
    /// update), or `None` before initialization.
    pub fn get_current_price(&self) -> Option<PriceObservation> {
        self.state.as_ref().map(|s| s.last_accepted)
    }

    /// Retained observations from oldest to newest. Empty before initialization.
    pub fn get_price_history(&self) -> Vec<PriceObservation> {
        self.state
            .as_ref()
            .map(|s| s.history.to_vec())
            .unwrap_or_default()
    }

    /// The current price for consumers that must not act on stale data.
    ///
    /// # Errors
    ///
    /// - [`OracleError::NotInitialized`] before initialization
    /// - [`OracleError::NoPrice`] if nothing has been accepted yet
    /// - [`OracleError::Paused`] / [`OracleError::StaleData`] from the circuit breaker
    pub fn fresh_price(&self, now: u64) -> Result<PriceObservation> {
        let state = self.state.as_ref().ok_or(OracleError::NotInitialized)?;
        if state.last_accepted.timestamp == 0 {
            return Err(OracleError::NoPrice);
        }
        self.breaker.check_operational(now)?;
        Ok(state.last_accepted)
    }

    /// Stop accepting price updates.
    pub fn pause(&mut self) {
        self.breaker.trigger_pause();
    }

    /// Resume accepting price updates.
    pub fn resume(&mut self) {
        self.breaker.resume();
    }

    pub fn is_paused(&self) -> bool {
        self.breaker.is_paused()
    }

    pub fn circuit_breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }
}
