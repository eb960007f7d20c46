//! Checked 64-bit integer arithmetic.
//!
//! Every place balances or prices are combined must go through these helpers.
//! None of them panic; a failed operation returns an [`ArithmeticError`] and
//! the caller is expected to abandon the computation without mutating state.

/// Failure modes of the checked arithmetic helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ArithmeticError {
    /// The result exceeds `u64::MAX`.
    #[error("arithmetic overflow")]
    Overflow,

    /// The result would be negative.
    #[error("arithmetic underflow")]
    Underflow,

    /// Division or remainder by zero.
    #[error("division by zero")]
    DivideByZero,
}

/// Convenience result type for arithmetic operations.
pub type Result<T> = std::result::Result<T, ArithmeticError>;

/// `a + b`, failing if the sum exceeds `u64::MAX`.
pub fn safe_add(a: u64, b: u64) -> Result<u64> {
    a.checked_add(b).ok_or(ArithmeticError::Overflow)
}

/// `a - b`, failing if `a < b`.
pub fn safe_sub(a: u64, b: u64) -> Result<u64> {
    a.checked_sub(b).ok_or(ArithmeticError::Underflow)
}

/// `a * b`, failing if `a != 0 && b > u64::MAX / a`.
pub fn safe_mul(a: u64, b: u64) -> Result<u64> {
    a.checked_mul(b).ok_or(ArithmeticError::Overflow)
}

/// `a / b`, failing if `b == 0`.
pub fn safe_div(a: u64, b: u64) -> Result<u64> {
    a.checked_div(b).ok_or(ArithmeticError::DivideByZero)
}

/// `a % b`, failing if `b == 0`.
pub fn safe_mod(a: u64, b: u64) -> Result<u64> {
    a.checked_rem(b).ok_or(ArithmeticError::DivideByZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_boundary() {
        assert_eq!(safe_add(u64::MAX - 1, 1), Ok(u64::MAX));
        assert_eq!(safe_add(u64::MAX, 1), Err(ArithmeticError::Overflow));
    }

    #[test]
    fn test_sub_underflow() {
        assert_eq!(safe_sub(6, 5), Ok(1));
        assert_eq!(safe_sub(5, 5), Ok(0));
        assert_eq!(safe_sub(5, 6), Err(ArithmeticError::Underflow));
    }

    #[test]
    fn test_mul_overflow() {
        let two_pow_32 = 1u64 << 32;
        assert_eq!(safe_mul(two_pow_32, two_pow_32), Err(ArithmeticError::Overflow));
        assert_eq!(safe_mul(two_pow_32, two_pow_32 - 1), Ok(u64::MAX - (two_pow_32 - 1)));
    }

    #[test]
    fn test_mul_by_zero_never_overflows() {
        assert_eq!(safe_mul(0, u64::MAX), Ok(0));
        assert_eq!(safe_mul(u64::MAX, 0), Ok(0));
        assert_eq!(safe_mul(u64::MAX, 1), Ok(u64::MAX));
    }

    #[test]
    fn test_div_and_mod_by_zero() {
        for x in [0, 1, 42, u64::MAX] {
            assert_eq!(safe_div(x, 0), Err(ArithmeticError::DivideByZero));
            assert_eq!(safe_mod(x, 0), Err(ArithmeticError::DivideByZero));
        }
    }

    #[test]
    fn test_div_and_mod_values() {
        assert_eq!(safe_div(17, 5), Ok(3));
        assert_eq!(safe_mod(17, 5), Ok(2));
        assert_eq!(safe_div(u64::MAX, 256), Ok(u64::MAX >> 8));
        assert_eq!(safe_mod(u64::MAX, 256), Ok(0xFF));
    }
}
