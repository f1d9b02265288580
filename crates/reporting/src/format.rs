//! Display formatting for KPI tiles and tables.

/// `₹1,234,568` style: currency symbol, thousands separators, no decimals.
/// Halves round to even.
pub fn format_currency(value: f64, symbol: &str) -> String {
    let rounded = value.round_ties_even();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{symbol}{}", group_thousands(&format!("{:.0}", rounded.abs())))
}

/// Two decimals with a trailing `x`, e.g. `2.50x`.
pub fn format_ratio(value: f64) -> String {
    format!("{value:.2}x")
}

pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Two decimals with thousands separators, for table cells.
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{}.{frac}", group_thousands(whole))
}

/// Insert `,` every three digits of an unsigned digit string.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency() {
        assert_eq!(format_currency(0.0, "₹"), "₹0");
        assert_eq!(format_currency(999.4, "₹"), "₹999");
        assert_eq!(format_currency(1_234_567.8, "₹"), "₹1,234,568");
        assert_eq!(format_currency(-2500.0, "$"), "-$2,500");
    }

    #[test]
    fn test_currency_half_rounds_to_even() {
        assert_eq!(format_currency(1000.5, "₹"), "₹1,000");
        assert_eq!(format_currency(1001.5, "₹"), "₹1,002");
        assert_eq!(format_currency(-0.5, "₹"), "₹0");
    }

    #[test]
    fn test_currency_beyond_u64_range() {
        assert_eq!(format_currency(1e20, "₹"), "₹100,000,000,000,000,000,000");
        assert_eq!(format_amount(1e20), "100,000,000,000,000,000,000.00");
    }

    #[test]
    fn test_ratio() {
        assert_eq!(format_ratio(2.5), "2.50x");
        assert_eq!(format_ratio(0.0), "0.00x");
        assert_eq!(format_ratio(1.0 / 3.0), "0.33x");
    }

    #[test]
    fn test_count_and_amount() {
        assert_eq!(format_count(50), "50");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_amount(12_345.678), "12,345.68");
        assert_eq!(format_amount(0.5), "0.50");
    }
}
