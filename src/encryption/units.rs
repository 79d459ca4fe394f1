//! Display value ⇄ base unit conversion.
//!
//! Amounts are handled as decimal strings and converted with integer
//! arithmetic only. Digits beyond the eighth decimal place round half up.

use crate::error::{ClientError, ClientResult};

/// Decimal places of the base unit.
pub const BASE_UNIT_DECIMALS: usize = 8;

/// Base units per whole coin.
pub const BASE_UNITS_PER_COIN: u64 = 100_000_000;

/// Convert a non-negative decimal string (`"1.5"`, `"0.00000001"`) to base units.
pub fn to_base_units(value: &str) -> ClientResult<u64> {
    let value = value.trim();
    let invalid = || ClientError::Validation(format!("Invalid amount '{}'", value));

    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (value, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let overflow = || ClientError::Validation(format!("Amount '{}' exceeds the representable range", value));

    let mut units: u128 = 0;
    for digit in whole.bytes() {
        units = units
            .checked_mul(10)
            .and_then(|u| u.checked_add(u128::from(digit - b'0')))
            .ok_or_else(overflow)?;
    }
    units = units
        .checked_mul(u128::from(BASE_UNITS_PER_COIN))
        .ok_or_else(overflow)?;

    let fraction = fraction.as_bytes();
    let mut fractional: u128 = 0;
    for place in 0..BASE_UNIT_DECIMALS {
        let digit = fraction.get(place).map_or(0, |b| b - b'0');
        fractional = fractional * 10 + u128::from(digit);
    }
    if fraction.get(BASE_UNIT_DECIMALS).is_some_and(|&b| b >= b'5') {
        fractional += 1;
    }

    let total = units.checked_add(fractional).ok_or_else(overflow)?;
    u64::try_from(total).map_err(|_| overflow())
}

/// Render base units as a decimal string without trailing zeros.
pub fn from_base_units(amount: u64) -> String {
    let whole = amount / BASE_UNITS_PER_COIN;
    let fraction = amount % BASE_UNITS_PER_COIN;
    if fraction == 0 {
        return whole.to_string();
    }

    let digits = format!("{:0width$}", fraction, width = BASE_UNIT_DECIMALS);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}
