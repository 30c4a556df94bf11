//! Brazilian-locale amount parsing and currency formatting

use bigdecimal::{BigDecimal, RoundingMode};
use std::str::FromStr;

use crate::types::*;

/// Currency prefix used for every rendered amount
pub const CURRENCY_PREFIX: &str = "R$ ";

/// Parse a locale-formatted amount such as `"1.500,00"` into an exact decimal
///
/// All `.` characters are dropped as thousands separators, then `,` becomes
/// the decimal point. Only an optional sign, digits and one decimal point are
/// accepted; exponent notation is rejected.
pub fn parse_br_amount(text: &str) -> AnalysisResult<BigDecimal> {
    let cleaned = text.trim().replace('.', "").replace(',', ".");
    if !is_plain_decimal(&cleaned) {
        return Err(AnalysisError::Parse(text.to_string()));
    }
    BigDecimal::from_str(&cleaned).map_err(|_| AnalysisError::Parse(text.to_string()))
}

fn is_plain_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    !(integer.is_empty() && fraction.is_empty()) && all_digits(integer) && all_digits(fraction)
}

/// Resolve a raw cell to an exact decimal
///
/// Numeric cells pass through untouched; only text is rewritten.
pub fn parse_amount(raw: &RawAmount) -> AnalysisResult<BigDecimal> {
    match raw {
        RawAmount::Number(value) => Ok(value.clone()),
        RawAmount::Text(text) => parse_br_amount(text),
    }
}

/// Render an amount as `R$ 1.234,56`
///
/// Rounds half-to-even to two fractional digits.
pub fn format_brl(value: &BigDecimal) -> String {
    let rounded = value.with_scale_round(2, RoundingMode::HalfEven);
    let negative = rounded < BigDecimal::from(0);
    let (cents, _) = rounded.as_bigint_and_exponent();

    let digits = cents.to_string();
    let digits = digits.trim_start_matches('-');
    let padded = format!("{:0>3}", digits);
    let (integer, fraction) = padded.split_at(padded.len() - 2);

    format!(
        "{}{}{},{}",
        CURRENCY_PREFIX,
        if negative { "-" } else { "" },
        group_thousands(integer),
        fraction
    )
}

fn group_thousands(integer: &str) -> String {
    let len = integer.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}
