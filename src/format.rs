//! Display formatting for monetary values.

pub const CURRENCY_SYMBOL: &str = "₹";

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn split_sign(text: String) -> (&'static str, String) {
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().any(|c| c != '0' && c != '.') => ("-", rest.to_string()),
        Some(rest) => ("", rest.to_string()),
        None => ("", text),
    }
}

/// Two-decimal amount with thousands separators, e.g. `105,499.06`.
pub fn format_number(value: f64) -> String {
    let (sign, text) = split_sign(format!("{value:.2}"));
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{sign}{}.{frac}", group_thousands(whole))
}

/// `₹ 105,499.06`
pub fn format_currency(value: f64) -> String {
    format!("{CURRENCY_SYMBOL} {}", format_number(value))
}

/// Whole-unit amount used while a counter is animating, e.g. `₹ 8,791`.
pub fn format_currency_whole(value: f64) -> String {
    let (sign, text) = split_sign(format!("{:.0}", value.floor()));
    format!("{CURRENCY_SYMBOL} {sign}{}", group_thousands(&text))
}
