//! Money formatting for price labels

/// Formats a value with `,` thousands separators and up to two fraction digits.
///
/// Trailing fraction zeros are dropped, so whole amounts render without a
/// decimal point.
///
/// ```
/// use shop_frontend::shared::format::format_amount;
/// assert_eq!(format_amount(1234.5), "1,234.5");
/// assert_eq!(format_amount(35.0), "35");
/// ```
pub fn format_amount(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let formatted = format!("{:.2}", value.abs());

    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, d.trim_end_matches('0')),
        None => (formatted.as_str(), ""),
    };

    // Group the integer part by three digits from the right
    let mut grouped = String::with_capacity(integer_part.len() + integer_part.len() / 3);
    for (i, c) in integer_part.chars().enumerate() {
        if i > 0 && (integer_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let negative = value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.');
    let sign = if negative { "-" } else { "" };

    if decimal_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, decimal_part)
    }
}

/// Currency label such as `£1,234.5`
pub fn format_currency(value: f64, symbol: &str) -> String {
    format!("{}{}", symbol, format_amount(value))
}
