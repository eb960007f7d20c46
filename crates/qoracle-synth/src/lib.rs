//! # qoracle-synth
//!
//! Synthetic-asset token whose mint rate follows the oracle committee price.
//!
//! Minting submits a fresh reporter-signed price update together with the
//! collateral amount. The update goes through the full acceptance pipeline;
//! only if it passes and every balance computation stays in range are the
//! price, the holder's balance, and the total supply committed together.
//!
//! ## Modules
//!
//! - [`ledger`]: token ledger boundary and an in-memory implementation
//! - [`token`]: mint, burn, and quote against the committee price

pub mod ledger;
pub mod token;

pub use ledger::{BalanceMap, TokenLedger};
pub use token::SyntheticToken;

use qoracle_oracle::OracleError;
use qoracle_types::ArithmeticError;

/// Error types for synthetic-asset operations.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    /// Zero amounts are not accepted.
    #[error("invalid amount: {0}")]
    InvalidAmount(u64),

    /// The holder's balance does not cover the burn.
    #[error("insufficient balance: have {available}, need {requested}")]
    InsufficientBalance {
        /// Current balance.
        available: u64,
        /// Requested burn.
        requested: u64,
    },

    /// A balance or supply computation left the u64 range.
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),

    /// The oracle refused the price update or price read.
    #[error("oracle error: {0}")]
    Oracle(#[from] OracleError),
}

/// Convenience result type for synthetic-asset operations.
pub type Result<T> = std::result::Result<T, SynthError>;
