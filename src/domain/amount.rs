//! Conversion between on-chain base units and human-readable whole units.
//!
//! Both the native currency and the reward token use 18 decimals, so
//! `10^18` base units make one whole unit.

use alloy_primitives::U256;
use rust_decimal::Decimal;

use super::error::DomainError;

/// Decimals of the native currency and of the reward token.
pub const TOKEN_DECIMALS: u32 = 18;

/// Largest mantissa a [`Decimal`] can hold (96 bits).
const MAX_MANTISSA: u128 = (1u128 << 96) - 1;

/// Largest scale a [`Decimal`] can hold.
const MAX_SCALE: u32 = 28;

/// Convert an integer base-unit amount to whole units (`units / 10^decimals`).
///
/// Amounts whose exact value needs more than 28 significant digits lose
/// their lowest fractional digits (truncated, never rounded up).
///
/// # Errors
///
/// Returns [`DomainError::AmountOverflow`] if the whole-unit part alone does
/// not fit in a `Decimal`.
pub fn to_whole_units(units: U256, decimals: u32) -> Result<Decimal, DomainError> {
    let ten = U256::from(10u8);
    let max = U256::from(MAX_MANTISSA);

    let mut value = units;
    let mut scale = decimals;
    while scale > 0 && (value > max || scale > MAX_SCALE) {
        value /= ten;
        scale -= 1;
    }

    let overflow = || DomainError::AmountOverflow {
        amount: units.to_string(),
        decimals,
    };
    if value > max {
        return Err(overflow());
    }
    let mantissa = i128::try_from(u128::try_from(value).map_err(|_| overflow())?)
        .map_err(|_| overflow())?;

    Decimal::try_from_i128_with_scale(mantissa, scale)
        .map(|d| d.normalize())
        .map_err(|_| overflow())
}

/// Convert a whole-unit amount to integer base units (`amount * 10^decimals`).
///
/// Digits beyond `decimals` are truncated.
///
/// # Errors
///
/// Returns [`DomainError::NegativeAmount`] for negative input and
/// [`DomainError::AmountOverflow`] if the result exceeds 256 bits.
pub fn to_base_units(amount: Decimal, decimals: u32) -> Result<U256, DomainError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(DomainError::NegativeAmount { amount });
    }

    let overflow = || DomainError::AmountOverflow {
        amount: amount.to_string(),
        decimals,
    };
    let ten = U256::from(10u8);
    let mantissa = U256::from(amount.mantissa().unsigned_abs());
    let scale = amount.scale();

    if decimals >= scale {
        let factor = ten
            .checked_pow(U256::from(decimals - scale))
            .ok_or_else(overflow)?;
        mantissa.checked_mul(factor).ok_or_else(overflow)
    } else {
        let divisor = ten
            .checked_pow(U256::from(scale - decimals))
            .ok_or_else(overflow)?;
        Ok(mantissa / divisor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    fn units(s: &str) -> U256 {
        U256::from_str(s).unwrap()
    }

    #[test]
    fn thousand_tokens_in_base_units_is_one_thousand() {
        let amount = to_whole_units(units("1000000000000000000000"), TOKEN_DECIMALS).unwrap();
        assert_eq!(amount, dec!(1000));
        assert_eq!(amount.to_string(), "1000");
    }

    #[test]
    fn single_base_unit_is_smallest_fraction() {
        let amount = to_whole_units(U256::from(1u8), TOKEN_DECIMALS).unwrap();
        assert_eq!(amount, dec!(0.000000000000000001));
    }

    #[test]
    fn zero_base_units_is_zero() {
        assert_eq!(to_whole_units(U256::ZERO, TOKEN_DECIMALS).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn fractional_ether_converts_exactly() {
        // 1.5 ETH
        let amount = to_whole_units(units("1500000000000000000"), TOKEN_DECIMALS).unwrap();
        assert_eq!(amount, dec!(1.5));
    }

    #[test]
    fn huge_balance_truncates_lowest_digits() {
        // 10^30 + 1 base units: the trailing wei cannot be represented
        let amount =
            to_whole_units(units("1000000000000000000000000000001"), TOKEN_DECIMALS).unwrap();
        assert_eq!(amount, dec!(1000000000000));
    }

    #[test]
    fn max_u256_overflows() {
        let result = to_whole_units(U256::MAX, TOKEN_DECIMALS);
        assert!(matches!(result, Err(DomainError::AmountOverflow { .. })));
    }

    #[test]
    fn mint_amount_converts_to_base_units() {
        let result = to_base_units(dec!(1000), TOKEN_DECIMALS).unwrap();
        assert_eq!(result, units("1000000000000000000000"));
    }

    #[test]
    fn base_units_truncate_extra_decimals() {
        let result = to_base_units(dec!(1.1234567), 6).unwrap();
        assert_eq!(result, U256::from(1_123_456u64));
    }

    #[test]
    fn negative_amount_is_rejected() {
        let result = to_base_units(dec!(-0.5), TOKEN_DECIMALS);
        assert!(matches!(result, Err(DomainError::NegativeAmount { .. })));
    }

    #[test]
    fn conversion_is_stable_for_representable_amounts() {
        let original = dec!(123.456789);
        let back = to_whole_units(to_base_units(original, TOKEN_DECIMALS).unwrap(), TOKEN_DECIMALS)
            .unwrap();
        assert_eq!(back, original);
    }
}
