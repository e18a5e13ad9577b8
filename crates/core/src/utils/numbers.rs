//! Number parsing and formatting for user-facing amount fields.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Parses user-typed numeric text, tolerating locale formatting.
///
/// Accepts either `.` or `,` as the decimal separator. When both appear, the
/// last one is the decimal separator and the other is grouping. A separator
/// repeated with no other separator present is treated as grouping
/// (`1,234,567`). Whitespace, `_` and `'` are ignored, and scientific notation
/// is supported. Returns `None` for empty or malformed input.
pub fn parse_number(raw: &str) -> Option<Decimal> {
    let compact: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '\'')
        .collect();
    if compact.is_empty() {
        return None;
    }

    let (negative, unsigned) = match compact.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, compact.strip_prefix('+').unwrap_or(&compact)),
    };

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(idx) => (&unsigned[..idx], Some(&unsigned[idx + 1..])),
        None => (unsigned, None),
    };

    if !mantissa.chars().any(|c| c.is_ascii_digit())
        || !mantissa
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
    {
        return None;
    }

    let mut candidate = normalize_separators(mantissa)?;
    if candidate.starts_with('.') {
        candidate.insert(0, '0');
    }
    if candidate.ends_with('.') {
        candidate.pop();
    }
    if candidate.is_empty() {
        return None;
    }
    if negative {
        candidate.insert(0, '-');
    }
    if let Some(exp) = exponent {
        let valid_exp = exp
            .strip_prefix(['-', '+'])
            .unwrap_or(exp)
            .chars()
            .all(|c| c.is_ascii_digit());
        if exp.is_empty() || !valid_exp {
            return None;
        }
        candidate = format!("{}e{}", candidate, exp);
        return Decimal::from_scientific(&candidate).ok();
    }

    Decimal::from_str(&candidate)
        .or_else(|_| Decimal::from_scientific(&candidate))
        .ok()
}

/// Rewrites `mantissa` so that `.` is the only separator left.
fn normalize_separators(mantissa: &str) -> Option<String> {
    let dots = mantissa.matches('.').count();
    let commas = mantissa.matches(',').count();

    let decimal_sep = match (mantissa.rfind('.'), mantissa.rfind(',')) {
        (Some(dot), Some(comma)) => Some(if comma > dot { ',' } else { '.' }),
        (Some(_), None) if dots == 1 => Some('.'),
        (None, Some(_)) if commas == 1 => Some(','),
        _ => None,
    };

    match decimal_sep {
        Some(sep) => {
            let group_sep = if sep == ',' { '.' } else { ',' };
            let occurrences = if sep == ',' { commas } else { dots };
            if occurrences > 1 {
                return None;
            }
            let (int_part, frac_part) = mantissa.rsplit_once(sep)?;
            if frac_part.contains(group_sep) || !is_grouped(int_part, group_sep) {
                return None;
            }
            Some(format!("{}.{}", int_part.replace(group_sep, ""), frac_part))
        }
        None => {
            let group_sep = if dots > 0 { '.' } else { ',' };
            if !is_grouped(mantissa, group_sep) {
                return None;
            }
            Some(mantissa.replace(group_sep, ""))
        }
    }
}

/// Checks thousands grouping: a leading group of 1-3 digits followed by
/// groups of exactly 3. Text without `sep` is always accepted.
fn is_grouped(int_part: &str, sep: char) -> bool {
    if !int_part.contains(sep) {
        return true;
    }
    let mut groups = int_part.split(sep);
    let leading_ok = groups
        .next()
        .is_some_and(|g| (1..=3).contains(&g.len()));
    leading_ok && groups.all(|g| g.len() == 3)
}

/// Same as [`parse_number`], degrading to zero when the text is not a number.
///
/// Keystroke-level input is expected to be transiently malformed, so the
/// fallback is only logged at debug level.
pub fn parse_number_or_zero(raw: &str) -> Decimal {
    match parse_number(raw) {
        Some(value) => value,
        None => {
            if !raw.trim().is_empty() {
                log::debug!("Treating unparsable amount '{}' as zero", raw);
            }
            Decimal::ZERO
        }
    }
}

/// Rounds `value` half away from zero to `dp` places and pads the scale so
/// that the display always shows exactly `dp` decimals.
pub fn decimals_max(value: Decimal, dp: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    rounded
}

/// Formats `amount` in `currency` with thousands grouping, e.g. `$1,234.56`.
///
/// Currencies without a well-known sign fall back to a code suffix
/// (`1,234.56 CHF`).
pub fn format_currency(amount: Decimal, currency: &str, dp: u32) -> String {
    let rounded = decimals_max(amount, dp);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = group_thousands(&rounded.abs().to_string());

    match currency_sign(currency) {
        Some(symbol) => format!("{}{}{}", sign, symbol, digits),
        None => format!("{}{} {}", sign, digits, currency),
    }
}

/// Formats a crypto amount for listing, trimming trailing zeros after
/// rounding to at most `dp` places.
pub fn format_amount(amount: Decimal, symbol: &str, dp: u32) -> String {
    let rounded = amount
        .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    format!("{} {}", rounded, symbol)
}

fn currency_sign(currency: &str) -> Option<&'static str> {
    match currency.to_ascii_uppercase().as_str() {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

fn group_thousands(plain: &str) -> String {
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{}.{}", grouped, frac),
        None => grouped,
    }
}
