//! First-number extraction from free text.

use std::sync::LazyLock;

use regex::Regex;

/// Optional sign, then either digits with an optional fraction or a bare fraction.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SIGNED_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+]?(?:\d+\.?\d*|\.\d+)").expect("valid regex"));

/// Pull the first signed decimal number out of a string.
///
/// Thousands separators are removed before matching; currency symbols, units
/// and surrounding prose are ignored. Ranges such as `"3-5%"` resolve to
/// their first number.
///
/// # Examples
/// ```
/// use logic_auditor::numeric::extract_number;
///
/// assert_eq!(extract_number("$3,250.75"), Some(3250.75));
/// assert_eq!(extract_number("-2.5%"), Some(-2.5));
/// assert_eq!(extract_number("inflation is high"), None);
/// ```
pub fn extract_number(text: &str) -> Option<f64> {
    if text.is_empty() {
        return None;
    }
    let cleaned = text.replace(',', "");
    SIGNED_DECIMAL
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}
