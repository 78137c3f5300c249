//! Display formatting for prices and percentage deltas

/// Format a USD amount with thousands separators and two decimals
pub fn format_usd(amount: f64) -> String {
    let rounded = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let mut grouped = String::new();
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, frac_part)
}

/// Format a percentage with an explicit sign, e.g. "+4.00%" or "-1.23%"
pub fn format_signed_pct(pct: f64) -> String {
    if pct >= 0.0 {
        format!("+{:.2}%", pct)
    } else {
        format!("{:.2}%", pct)
    }
}

/// Percentage delta of a predicted price versus the current price
pub fn prediction_delta_pct(current_price: f64, predicted_price: f64) -> f64 {
    (predicted_price - current_price) / current_price * 100.0
}
