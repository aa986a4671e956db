//! Locale-aware normalization of numeric tokens.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Normalize a locale-formatted, optionally sign-suffixed numeric token into
/// a canonical decimal string.
///
/// Bills render negative values with a trailing minus ("19,52-" means
/// -19.52); both that form and the leading minus collapse to exactly one
/// leading `-`. The comma decimal separator becomes a dot. Tokens that are
/// not numbers pass through with only the sign/separator treatment applied;
/// an empty (or all-whitespace) token comes back empty.
pub fn normalize_signed(token: &str) -> String {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }

    let (body, negative) = if let Some(rest) = trimmed.strip_prefix('-') {
        (rest, true)
    } else if let Some(rest) = trimmed.strip_suffix('-') {
        (rest, true)
    } else {
        (trimmed, false)
    };

    let body = body.replace(',', ".");
    if negative {
        format!("-{body}")
    } else {
        body
    }
}

/// Normalize a token and parse it as a decimal.
pub fn parse_decimal(token: &str) -> Option<Decimal> {
    let normalized = normalize_signed(token);
    if normalized.is_empty() {
        return None;
    }
    Decimal::from_str(&normalized).ok()
}
