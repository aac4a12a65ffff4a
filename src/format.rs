//! Currency rounding and display helpers (Swiss conventions)

/// Round to the nearest franc, halves away from zero
pub fn round_currency(amount: f64) -> f64 {
    amount.round()
}

/// Group digits by thousands with an apostrophe: 1234567 -> 1'234'567
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('\'');
        }
        grouped.push(ch);
    }
    grouped
}

/// Format an amount in whole francs, e.g. `CHF 1'996`
pub fn format_chf(amount: f64) -> String {
    let rounded = round_currency(amount);
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("CHF {}{}", sign, group_thousands(&format!("{:.0}", rounded.abs())))
}

/// Format an amount with rappen, e.g. `CHF 1'234.50`
pub fn format_chf_cents(amount: f64) -> String {
    let cents = (amount * 100.0).round();
    let sign = if cents < 0.0 { "-" } else { "" };
    let text = format!("{:.2}", cents.abs() / 100.0);
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("CHF {}{}.{}", sign, group_thousands(whole), fraction)
}

/// Format a fraction as a percentage with one decimal, e.g. 0.5 -> `50.0%`
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_currency() {
        assert_eq!(round_currency(372.27), 372.0);
        assert_eq!(round_currency(646.5), 647.0);
        assert_eq!(round_currency(-2.5), -3.0);
    }

    #[test]
    fn test_format_chf() {
        assert_eq!(format_chf(0.0), "CHF 0");
        assert_eq!(format_chf(999.4), "CHF 999");
        assert_eq!(format_chf(1996.0), "CHF 1'996");
        assert_eq!(format_chf(1_234_567.0), "CHF 1'234'567");
        assert_eq!(format_chf(-25_000.0), "CHF -25'000");
        assert_eq!(format_chf(-0.2), "CHF 0");
    }

    #[test]
    fn test_format_chf_cents() {
        assert_eq!(format_chf_cents(1234.5), "CHF 1'234.50");
        assert_eq!(format_chf_cents(0.05), "CHF 0.05");
        assert_eq!(format_chf_cents(-98_765.432), "CHF -98'765.43");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.5), "50.0%");
        assert_eq!(format_percent(13.0 / 44.0), "29.5%");
        assert_eq!(format_percent(1.0), "100.0%");
    }
}
