//! Accepted currencies, the static PKR exchange-rate table, and amount
//! formatting.

use crate::error::CoreError;

pub const PKR: &str = "PKR";
pub const USD: &str = "USD";
pub const EUR: &str = "EUR";
pub const GBP: &str = "GBP";
pub const AED: &str = "AED";
pub const SAR: &str = "SAR";

/// All currencies a donation may be made in.
pub const VALID_CURRENCIES: &[&str] = &[PKR, USD, EUR, GBP, AED, SAR];

/// Currency used when the caller does not specify one.
pub const DEFAULT_CURRENCY: &str = PKR;

/// Units of PKR per one unit of `currency`. `None` for unknown codes.
pub fn exchange_rate(currency: &str) -> Option<f64> {
    match currency {
        PKR => Some(1.0),
        USD => Some(280.0),
        EUR => Some(300.0),
        GBP => Some(350.0),
        AED => Some(76.0),
        SAR => Some(75.0),
        _ => None,
    }
}

/// Result of converting an amount into PKR.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub converted_amount: f64,
    pub exchange_rate: f64,
}

/// Convert `amount` in `currency` into PKR using the static table.
///
/// Unknown currencies fall back to a rate of 1 so the stored converted
/// amount is never empty.
pub fn convert_to_pkr(amount: f64, currency: &str) -> Conversion {
    let rate = exchange_rate(currency).unwrap_or(1.0);
    Conversion {
        converted_amount: amount * rate,
        exchange_rate: rate,
    }
}

/// ISO 4217 numeric code sent to the payment gateway.
pub fn iso_numeric_code(currency: &str) -> Option<u16> {
    match currency {
        PKR => Some(586),
        USD => Some(840),
        EUR => Some(978),
        GBP => Some(826),
        AED => Some(784),
        SAR => Some(682),
        _ => None,
    }
}

fn symbol(currency: &str) -> &str {
    match currency {
        PKR => "₨",
        USD => "$",
        EUR => "€",
        GBP => "£",
        other => other,
    }
}

/// Render an amount as `"<symbol> 1,234.50"`.
pub fn format_amount(amount: f64, currency: &str) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{} {sign}{grouped}.{frac}", symbol(currency))
}

pub fn validate_currency(currency: &str) -> Result<(), CoreError> {
    if VALID_CURRENCIES.contains(&currency) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid currency. Accepted currencies: {}",
            VALID_CURRENCIES.join(", ")
        )))
    }
}
