//! Amount parsing for both loader policies.
//!
//! - [`parse_plain`]: strict decimal literal, `None` on anything else.
//! - [`parse_currency`]: `$1,234.56` style, leading symbol and group
//!   separators stripped.
//! - [`parse_currency_or_zero`]: the parse-or-zero policy used by currency
//!   sources. Never fails.

use crate::config::AmountFormat;

/// Strict decimal parse. Surrounding whitespace is ignored; `NaN` and
/// infinities are rejected.
pub fn parse_plain(s: &str) -> Option<f64> {
    let value: f64 = s.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Parse a currency cell such as `$1,234.56` or `-$12.50`: an optional
/// sign, then an optional leading `$`, then digits with `,` group
/// separators. Anything else is `None`.
pub fn parse_currency(s: &str) -> Option<f64> {
    let s = s.trim();
    let (negative, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let amount: String = unsigned
        .strip_prefix('$')
        .unwrap_or(unsigned)
        .chars()
        .filter(|&c| c != ',')
        .collect();

    // A second sign or symbol after the prefix is malformed.
    if !amount.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }
    let value = parse_plain(&amount)?;
    Some(if negative { -value } else { value })
}

/// Currency parse with the zero fallback: blank or garbage reads as `0.0`.
pub fn parse_currency_or_zero(s: &str) -> f64 {
    parse_currency(s).unwrap_or(0.0)
}

/// Read one amount cell under the given policy. `None` only for
/// [`AmountFormat::Plain`] cells that fail to parse.
pub fn read_amount(s: &str, format: AmountFormat) -> Option<f64> {
    match format {
        AmountFormat::Plain => parse_plain(s),
        AmountFormat::Currency => Some(parse_currency_or_zero(s)),
    }
}
