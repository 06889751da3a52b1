// programs/helios_launchpad/src/math.rs
//
// Fixed-Point and Decimal-Normalization Helpers
// =============================================
// All amounts are carried internally as 18-fractional-digit "unit" values
// (u128). USD prices carry 8 fractional digits. Percentages use a
// 10_000_000 denominator. Division always floors.

use anchor_lang::prelude::*;
use crate::errors::LaunchpadError;

/// 100% in 7-decimal fixed point
pub const PERCENT_ONE: u64 = 10_000_000;

/// USD prices per whole token/asset carry 8 fractional digits
pub const PRICE_SCALE: u128 = 100_000_000;

/// Canonical fractional digits for internal unit amounts
pub const UNIT_DECIMALS: u8 = 18;

pub fn pow10(exp: u8) -> Result<u128> {
    10u128
        .checked_pow(exp as u32)
        .ok_or_else(|| error!(LaunchpadError::MathOverflow))
}

/// a * b / d with intermediate u128 precision, flooring
pub fn mul_div(a: u128, b: u128, d: u128) -> Result<u128> {
    require!(d > 0, LaunchpadError::MathOverflow);
    a.checked_mul(b)
        .and_then(|v| v.checked_div(d))
        .ok_or_else(|| error!(LaunchpadError::MathOverflow))
}

/// Normalize a native mint amount to the 18-decimal unit scale
pub fn to_unit_amount(native: u64, decimals: u8) -> Result<u128> {
    if decimals <= UNIT_DECIMALS {
        let factor = pow10(UNIT_DECIMALS - decimals)?;
        (native as u128)
            .checked_mul(factor)
            .ok_or_else(|| error!(LaunchpadError::MathOverflow))
    } else {
        let factor = pow10(decimals - UNIT_DECIMALS)?;
        Ok((native as u128) / factor)
    }
}

/// Scale a unit amount back down to a native mint amount, flooring
pub fn to_native_amount(unit: u128, decimals: u8) -> Result<u64> {
    let scaled = if decimals <= UNIT_DECIMALS {
        let factor = pow10(UNIT_DECIMALS - decimals)?;
        unit / factor
    } else {
        let factor = pow10(decimals - UNIT_DECIMALS)?;
        unit.checked_mul(factor)
            .ok_or_else(|| error!(LaunchpadError::MathOverflow))?
    };
    u64::try_from(scaled).map_err(|_| error!(LaunchpadError::MathOverflow))
}

/// USD unit value of an asset/token unit amount at an 8-decimal price
pub fn usd_value(unit_amount: u128, usd_price: u64) -> Result<u128> {
    mul_div(unit_amount, usd_price as u128, PRICE_SCALE)
}

/// Token unit amount purchasable for a USD unit value at an 8-decimal price
pub fn tokens_for_usd(usd: u128, price: u64) -> Result<u128> {
    mul_div(usd, PRICE_SCALE, price as u128)
}

/// Asset unit amount corresponding to a USD unit value at an 8-decimal price
pub fn asset_for_usd(usd: u128, price: u64) -> Result<u128> {
    mul_div(usd, PRICE_SCALE, price as u128)
}

/// amount * percent / PERCENT_ONE
pub fn apply_percent(amount: u128, percent: u64) -> Result<u128> {
    mul_div(amount, percent as u128, PERCENT_ONE as u128)
}

/// numer / denom as a PERCENT_ONE-scaled ratio, 0 when denom is 0, capped at 100%
pub fn percent_ratio(numer: u128, denom: u128) -> Result<u64> {
    if denom == 0 {
        return Ok(0);
    }
    let ratio = mul_div(numer, PERCENT_ONE as u128, denom)?;
    Ok(ratio.min(PERCENT_ONE as u128) as u64)
}

// ==================== UNIT TESTS ====================

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn test_to_unit_amount_six_decimals() {
        // 1_000 USDC (6 decimals) -> 1000 * 10^18
        let unit = to_unit_amount(1_000_000_000, 6).unwrap();
        assert_eq!(unit, 1_000 * UNIT);
    }

    #[test]
    fn test_to_unit_amount_eighteen_decimals_identity() {
        let unit = to_unit_amount(123_456, 18).unwrap();
        assert_eq!(unit, 123_456);
    }

    #[test]
    fn test_to_native_amount_floors() {
        // 1.5 tokens in unit scale, 0-decimal mint -> floors to 1
        let native = to_native_amount(UNIT + UNIT / 2, 0).unwrap();
        assert_eq!(native, 1);
    }

    #[test]
    fn test_unit_native_round_trip_nine_decimals() {
        let native = 5_000_000_000u64; // 5 tokens at 9 decimals
        let unit = to_unit_amount(native, 9).unwrap();
        assert_eq!(to_native_amount(unit, 9).unwrap(), native);
    }

    #[test]
    fn test_usd_value_at_one_dollar() {
        // 1000 units at $1.00 (1e8) -> $1000 in units
        let usd = usd_value(1_000 * UNIT, 100_000_000).unwrap();
        assert_eq!(usd, 1_000 * UNIT);
    }

    #[test]
    fn test_usd_value_fractional_price() {
        // 200 units at $0.25 -> $50
        let usd = usd_value(200 * UNIT, 25_000_000).unwrap();
        assert_eq!(usd, 50 * UNIT);
    }

    #[test]
    fn test_tokens_for_usd() {
        // $1000 at $1.00/token -> 1000 tokens
        let tokens = tokens_for_usd(1_000 * UNIT, 100_000_000).unwrap();
        assert_eq!(tokens, 1_000 * UNIT);

        // $1000 at $0.50/token -> 2000 tokens
        let tokens = tokens_for_usd(1_000 * UNIT, 50_000_000).unwrap();
        assert_eq!(tokens, 2_000 * UNIT);
    }

    #[test]
    fn test_apply_percent() {
        // 20% bonus on 1000 base -> bought = 1200
        let bought = apply_percent(1_000 * UNIT, PERCENT_ONE + 2_000_000).unwrap();
        assert_eq!(bought, 1_200 * UNIT);
    }

    #[test]
    fn test_apply_percent_zero() {
        assert_eq!(apply_percent(1_000 * UNIT, 0).unwrap(), 0);
    }

    #[test]
    fn test_percent_ratio() {
        assert_eq!(percent_ratio(500, 1_000).unwrap(), PERCENT_ONE / 2);
        assert_eq!(percent_ratio(0, 1_000).unwrap(), 0);
        // zero denominator reads as zero progress, not an error
        assert_eq!(percent_ratio(500, 0).unwrap(), 0);
        // capped at 100%
        assert_eq!(percent_ratio(2_000, 1_000).unwrap(), PERCENT_ONE);
    }

    #[test]
    fn test_mul_div_zero_denominator_errors() {
        assert!(mul_div(1, 1, 0).is_err());
    }

    #[test]
    fn test_mul_div_overflow_errors() {
        assert!(mul_div(u128::MAX, 2, 1).is_err());
    }
}
