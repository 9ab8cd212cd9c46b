//! Original (pre-discount) price derivation from store-formatted prices.

use once_cell::sync::Lazy;
use regex::Regex;

/// The only discount factor for which an original price is shown.
pub const SUPPORTED_DISCOUNT: f64 = 0.5;

static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9,.]+").expect("valid regex"));
static SYMBOL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9,.]+").expect("valid regex"));

/// Derive the undiscounted price from a localized price string such as
/// `"9,99 €"` or `"$4.99"`.
///
/// The first run of digits, commas and periods is the amount (first comma read
/// as the decimal separator). The first run of anything else, trimmed, is the
/// currency symbol and is always appended after the amount: `"€9.99"` gives
/// `"19.98€"`. Returns `None` for any other discount factor or when no amount
/// can be parsed.
pub fn derive_original_price(formatted: &str, discount: f64) -> Option<String> {
    if discount != SUPPORTED_DISCOUNT {
        return None;
    }

    let amount = AMOUNT_RE.find(formatted)?.as_str().replacen(',', ".", 1);
    let discounted = amount.parse::<f64>().ok().filter(|v| v.is_finite())?;
    let original = discounted / SUPPORTED_DISCOUNT;

    let symbol = SYMBOL_RE
        .find(formatted)
        .map(|m| m.as_str().trim())
        .unwrap_or_default();

    Some(format!("{original:.2}{symbol}"))
}
