//! Value normalization shared by the listing and detail parsers.
//!
//! Everything here is pure string/URL work with no knowledge of the
//! surrounding markup; [`crate::parse`] and [`crate::pagination`] locate the
//! raw values and hand them over.

use std::str::FromStr;

use rust_decimal::Decimal;
use url::Url;

/// Ordinal rating words as they appear in the `star-rating` class list,
/// paired with their star count.
pub const RATING_WORDS: [(&str, u8); 5] = [
    ("One", 1),
    ("Two", 2),
    ("Three", 3),
    ("Four", 4),
    ("Five", 5),
];

/// `U+00C2`, left in front of `£` when UTF-8 bytes are decoded as Latin-1.
const LATIN1_MOJIBAKE: char = 'Â';
const CURRENCY_SYMBOL: char = '£';

/// Maps an ordinal rating word to its star count.
///
/// Matching is exact and case-sensitive. Returns `None` for anything outside
/// [`RATING_WORDS`]; callers record that as an unknown rating.
#[must_use]
pub fn rating_from_word(word: &str) -> Option<u8> {
    RATING_WORDS
        .iter()
        .find(|(name, _)| *name == word)
        .map(|&(_, stars)| stars)
}

/// Parses a displayed price such as `"£51.77"` into a non-negative decimal.
///
/// The currency symbol and any `Â` mojibake preceding it are dropped before
/// parsing, so `"Â£51.77"` and `"£51.77"` both yield `51.77`.
///
/// # Errors
///
/// Returns a human-readable reason when the remainder is empty, is not a
/// decimal number, or is negative.
pub fn parse_price(raw: &str) -> Result<Decimal, String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != CURRENCY_SYMBOL && *c != LATIN1_MOJIBAKE)
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return Err("no digits after removing the currency symbol".to_owned());
    }

    let amount =
        Decimal::from_str(cleaned).map_err(|e| format!("\"{cleaned}\" is not a decimal: {e}"))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(format!("negative amount {amount}"));
    }
    Ok(amount)
}

/// Resolves a site-relative path against a fixed root rather than the page
/// it was found on.
///
/// Leading `./` and `../` segments are discarded first, which keeps the
/// result beneath `root` even when the root has a non-empty path. Absolute
/// URLs pass through unchanged.
///
/// # Errors
///
/// Returns the `url` parse error message when the joined URL is invalid.
pub fn resolve_against_root(root: &Url, href: &str) -> Result<Url, String> {
    let mut relative = href.trim();
    loop {
        if let Some(rest) = relative.strip_prefix("../") {
            relative = rest;
        } else if let Some(rest) = relative.strip_prefix("./") {
            relative = rest;
        } else {
            break;
        }
    }
    root.join(relative).map_err(|e| e.to_string())
}

/// Trims surrounding whitespace and collapses interior runs of whitespace
/// (including newlines from indented markup) to a single space.
#[must_use]
pub fn clean_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
