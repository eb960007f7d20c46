//! Synthetic-asset mint, burn, and quote.
//!
//! ```text
//! minted = collateral_amount * price
//! ```
//!
//! All arithmetic is checked. A mint either commits the price update, the
//! holder's new balance, and the new total supply together, or changes
//! nothing at all.

use qoracle_crypto::PqVerifier;
use qoracle_oracle::OracleCommittee;
use qoracle_types::arith::{safe_add, safe_mul, safe_sub};
use qoracle_types::{AccountId, PriceUpdateRequest, SYNTHETIC_PRICE_DECIMALS};

use crate::ledger::TokenLedger;
use crate::{Result, SynthError};

/// A synthetic token backed by a ledger and priced by an oracle committee.
#[derive(Debug, Clone)]
pub struct SyntheticToken<L> {
    ledger: L,
    total_supply: u64,
    decimals: u8,
}

impl<L: TokenLedger> SyntheticToken<L> {
    /// Create a token with zero supply and the synthetic price scale.
    pub fn new(ledger: L) -> Self {
        Self {
            ledger,
            total_supply: 0,
            decimals: SYNTHETIC_PRICE_DECIMALS,
        }
    }

    /// Mint against a fresh price update.
    ///
    /// The update must pass the committee's acceptance pipeline; on success
    /// it becomes the committee's current price. Returns the amount minted.
    ///
    /// # Errors
    ///
    /// - [`SynthError::InvalidAmount`] if `collateral_amount` is zero
    /// - [`SynthError::Oracle`] if the committee rejects the update
    /// - [`SynthError::Arithmetic`] if the minted amount, balance, or supply overflows
    pub fn mint<V: PqVerifier>(
        &mut self,
        committee: &mut OracleCommittee<V>,
        user: &AccountId,
        collateral_amount: u64,
        request: &PriceUpdateRequest,
        now: u64,
    ) -> Result<u64> {
        if collateral_amount == 0 {
            return Err(SynthError::InvalidAmount(collateral_amount));
        }

        let validated = committee.validate_update(request, now)?;
        let price = validated.observation().price;

        let minted = safe_mul(collateral_amount, price)?;
        let new_balance = safe_add(self.ledger.balance_of(user), minted)?;
        let new_supply = safe_add(self.total_supply, minted)?;

        committee.commit(validated)?;
        self.ledger.set_balance(user, new_balance);
        self.total_supply = new_supply;

        tracing::info!(
            collateral_amount,
            price,
            minted,
            total_supply = new_supply,
            "synthetic mint"
        );
        Ok(minted)
    }

    /// Burn `amount` from `user`.
    ///
    /// # Errors
    ///
    /// - [`SynthError::InvalidAmount`] if `amount` is zero
    /// - [`SynthError::InsufficientBalance`] if `user` holds less than `amount`
    /// - [`SynthError::Arithmetic`] if the supply would underflow
    pub fn burn(&mut self, user: &AccountId, amount: u64) -> Result<()> {
        if amount == 0 {
            return Err(SynthError::InvalidAmount(amount));
        }

        let available = self.ledger.balance_of(user);
        let new_balance =
            safe_sub(available, amount).map_err(|_| SynthError::InsufficientBalance {
                available,
                requested: amount,
            })?;
        let new_supply = safe_sub(self.total_supply, amount)?;

        self.ledger.set_balance(user, new_balance);
        self.total_supply = new_supply;

        tracing::info!(amount, total_supply = new_supply, "synthetic burn");
        Ok(())
    }

    /// Value of `collateral_amount` at the committee's current price.
    ///
    /// # Errors
    ///
    /// - [`SynthError::Oracle`] if no fresh price is available
    /// - [`SynthError::Arithmetic`] on overflow
    pub fn quote<V: PqVerifier>(
        &self,
        committee: &OracleCommittee<V>,
        collateral_amount: u64,
        now: u64,
    ) -> Result<u64> {
        let observation = committee.fresh_price(now)?;
        Ok(safe_mul(collateral_amount, observation.price)?)
    }

    pub fn balance_of(&self, owner: &AccountId) -> u64 {
        self.ledger.balance_of(owner)
    }

    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::BalanceMap;
    use qoracle_crypto::mock::{reporter_signers, MockSigner, MockVerifier};
    use qoracle_oracle::canonical::canonicalize;
    use qoracle_oracle::{CommitteeConfig, OracleError, ValidationError};
    use qoracle_types::{
        ArithmeticError, PriceObservation, ReporterKeySet, ReporterSignature, TrustedReporterKey,
    };

    const ALICE: AccountId = [0xA1; 32];

    fn setup() -> (
        Vec<MockSigner>,
        OracleCommittee<MockVerifier>,
        SyntheticToken<BalanceMap>,
    ) {
        let signers = reporter_signers();
        let keys = ReporterKeySet::new(std::array::from_fn(|i| {
            TrustedReporterKey::from_bytes(signers[i].public_key())
        }));
        let mut committee = OracleCommittee::new(CommitteeConfig::synthetic(), MockVerifier);
        assert!(committee.initialize(keys));
        (signers, committee, SyntheticToken::new(BalanceMap::new()))
    }

    fn request(signers: &[MockSigner], price: u64, timestamp: u64) -> PriceUpdateRequest {
        let observation = PriceObservation::new(price, SYNTHETIC_PRICE_DECIMALS, timestamp);
        let message = canonicalize(&observation);
        let signatures = (0..5u64)
            .map(|i| ReporterSignature::new(i, signers[i as usize].sign(message.as_ref())))
            .collect();
        PriceUpdateRequest::new(observation, signatures)
    }

    #[test]
    fn test_mint_commits_price_and_balance() {
        let (signers, mut committee, mut token) = setup();
        let req = request(&signers, 3, 1_000);
        let minted = token
            .mint(&mut committee, &ALICE, 1_000, &req, 1_000)
            .expect("mint");
        assert_eq!(minted, 3_000);
        assert_eq!(token.balance_of(&ALICE), 3_000);
        assert_eq!(token.total_supply(), 3_000);
        assert_eq!(committee.get_current_price(), Some(req.observation));
        assert_eq!(committee.get_price_history().len(), 1);
    }

    #[test]
    fn test_mint_accumulates() {
        let (signers, mut committee, mut token) = setup();
        token
            .mint(&mut committee, &ALICE, 10, &request(&signers, 2, 1_000), 1_000)
            .expect("first");
        token
            .mint(&mut committee, &ALICE, 10, &request(&signers, 5, 1_001), 1_001)
            .expect("second");
        assert_eq!(token.balance_of(&ALICE), 70);
        assert_eq!(token.total_supply(), 70);
    }

    #[test]
    fn test_mint_zero_rejected() {
        let (signers, mut committee, mut token) = setup();
        let err = token
            .mint(&mut committee, &ALICE, 0, &request(&signers, 3, 1_000), 1_000)
            .expect_err("zero");
        assert!(matches!(err, SynthError::InvalidAmount(0)));
        assert!(committee.get_price_history().is_empty());
    }

    #[test]
    fn test_replayed_update_rejected() {
        let (signers, mut committee, mut token) = setup();
        let req = request(&signers, 3, 1_000);
        token
            .mint(&mut committee, &ALICE, 1, &req, 1_000)
            .expect("first");
        let err = token
            .mint(&mut committee, &ALICE, 1, &req, 1_000)
            .expect_err("replay");
        assert!(matches!(
            err,
            SynthError::Oracle(OracleError::Validation(
                ValidationError::NonMonotonicTimestamp { .. }
            ))
        ));
        assert_eq!(token.balance_of(&ALICE), 3);
    }

    #[test]
    fn test_overflow_changes_nothing() {
        let (signers, mut committee, mut token) = setup();
        let req = request(&signers, 100_000_000_000, 1_000);
        let err = token
            .mint(&mut committee, &ALICE, u64::MAX / 2, &req, 1_000)
            .expect_err("overflow");
        assert!(matches!(
            err,
            SynthError::Arithmetic(ArithmeticError::Overflow)
        ));
        assert_eq!(token.total_supply(), 0);
        assert_eq!(token.balance_of(&ALICE), 0);
        // The price update was not committed either.
        assert_eq!(committee.get_current_price().map(|p| p.timestamp), Some(0));
        assert!(committee.get_price_history().is_empty());
    }

    #[test]
    fn test_burn() {
        let (signers, mut committee, mut token) = setup();
        token
            .mint(&mut committee, &ALICE, 100, &request(&signers, 1, 1_000), 1_000)
            .expect("mint");
        token.burn(&ALICE, 40).expect("burn");
        assert_eq!(token.balance_of(&ALICE), 60);
        assert_eq!(token.total_supply(), 60);

        let err = token.burn(&ALICE, 61).expect_err("too much");
        assert!(matches!(
            err,
            SynthError::InsufficientBalance {
                available: 60,
                requested: 61
            }
        ));
        assert!(matches!(token.burn(&ALICE, 0), Err(SynthError::InvalidAmount(0))));
        assert_eq!(token.total_supply(), 60);
    }

    #[test]
    fn test_quote_requires_fresh_price() {
        let (signers, mut committee, mut token) = setup();
        assert!(matches!(
            token.quote(&committee, 10, 1_000),
            Err(SynthError::Oracle(OracleError::NoPrice))
        ));

        token
            .mint(&mut committee, &ALICE, 1, &request(&signers, 7, 1_000), 1_000)
            .expect("mint");
        assert_eq!(token.quote(&committee, 10, 1_500).ok(), Some(70));
        assert!(matches!(
            token.quote(&committee, 10, 1_000 + 3_601),
            Err(SynthError::Oracle(OracleError::StaleData { .. }))
        ));

        committee.pause();
        assert!(matches!(
            token.quote(&committee, 10, 1_500),
            Err(SynthError::Oracle(OracleError::Paused))
        ));
    }

    #[test]
    fn test_decimals() {
        let (_, _, token) = setup();
        assert_eq!(token.decimals(), 8);
    }
}
