//! Display price arithmetic
//!
//! Prices are stored as the text the storefront displays (`"₦5,000"`). The
//! numeric value is derived on demand, and totals are formatted back into the
//! same zero-decimal currency style.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Everything that is not an ASCII digit, `.` or `-`
static NON_NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9.\-]").expect("static pattern is valid"));

/// Parse display price text into a number
///
/// Strips every character except digits, `.` and `-`, then reads the longest
/// leading decimal number. Absent, empty or unparseable text is 0.
///
/// ```rust
/// use cart_core::parse_price;
///
/// assert_eq!(parse_price(Some("₦1,500")), 1500.0);
/// assert_eq!(parse_price(Some("abc")), 0.0);
/// assert_eq!(parse_price(None), 0.0);
/// ```
#[must_use]
pub fn parse_price(text: Option<&str>) -> f64 {
    let Some(text) = text.filter(|t| !t.is_empty()) else {
        return 0.0;
    };
    let stripped = NON_NUMERIC.replace_all(text, "");
    leading_number(&stripped).unwrap_or(0.0)
}

/// Longest prefix of the form `-?digits[.digits]` with at least one digit
fn leading_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        let frac_digits = frac_end - frac_start;
        if digits + frac_digits > 0 {
            end = frac_end;
            digits += frac_digits;
        }
    }
    if digits == 0 {
        return None;
    }
    s[..end].parse::<f64>().ok()
}

/// Zero-decimal currency formatting
///
/// Defaults to Nigerian Naira as the storefront displays it: `₦1,500`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceFormat {
    /// Currency symbol placed before the amount
    pub symbol: String,
    /// Separator between groups of three digits
    pub thousands_separator: String,
}

impl PriceFormat {
    /// Naira formatting (`₦12,345`)
    #[inline]
    #[must_use]
    pub fn naira() -> Self {
        Self {
            symbol: "₦".to_string(),
            thousands_separator: ",".to_string(),
        }
    }

    /// With currency symbol
    #[inline]
    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Format value rounded half away from zero, no decimals
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        let value = if value.is_finite() { value } else { 0.0 };
        let rounded = value.round();
        let negative = rounded < 0.0;
        let digits = format!("{:.0}", rounded.abs());

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push_str(&self.thousands_separator);
            }
            grouped.push(ch);
        }

        if negative {
            format!("-{}{}", self.symbol, grouped)
        } else {
            format!("{}{}", self.symbol, grouped)
        }
    }
}

impl Default for PriceFormat {
    fn default() -> Self {
        Self::naira()
    }
}
