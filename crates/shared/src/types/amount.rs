//! Lenient amount parsing and guarded percentages.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Tracking sheets store monthly spend as free-form strings; this is the one
//! place where those strings become `Decimal`, with zero as the fallback for
//! anything that does not parse.
//!
//! Parsed cells can be as large as `Decimal::MAX`, so sums over input data
//! saturate instead of overflowing.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Parses a stringly-typed amount, returning zero for malformed input.
///
/// Surrounding whitespace, currency symbols and thousands separators are
/// ignored, so `"$1,250.50"` parses as `1250.50`. Scientific notation is
/// accepted.
#[must_use]
pub fn parse_amount(raw: &str) -> Decimal {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | '€' | '£' | ' ' | '_'))
        .collect();

    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .unwrap_or(Decimal::ZERO)
}

/// Returns true when a tracking cell carries a value.
///
/// Empty cells and the literal `"0"` placeholder count as missing.
#[must_use]
pub fn is_filled_cell(raw: &str) -> bool {
    let trimmed = raw.trim();
    !trimmed.is_empty() && trimmed != "0"
}

/// Returns `part / whole * 100`, or zero when `whole` is zero or the
/// division overflows.
#[must_use]
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// Sums amounts, clamping at `Decimal::MAX` / `Decimal::MIN` instead of
/// overflowing.
#[must_use]
pub fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}
