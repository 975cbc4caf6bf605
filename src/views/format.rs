use crate::models::Purpose;

/// Shown when a listing has no photos
pub const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1600596542815-2495db98dada?auto=format&fit=crop&q=80&w=800";

pub const CURRENCY: &str = "JOD";

/// Group thousands with commas and keep at most three decimals, e.g. `1,250,000.5`
pub fn format_number(value: f64) -> String {
    let rounded = format!("{:.3}", value.abs());
    // Sign only survives if something non-zero is left after rounding
    let negative = value < 0.0 && rounded.bytes().any(|b| matches!(b, b'1'..=b'9'));
    let (whole, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let fraction = fraction.trim_end_matches('0');
    let sign = if negative { "-" } else { "" };
    if fraction.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, fraction)
    }
}

pub fn format_price(price: f64) -> String {
    format!("{} {}", format_number(price), CURRENCY)
}

pub fn purpose_badge(purpose: Purpose) -> &'static str {
    match purpose {
        Purpose::Buy => "Sale",
        Purpose::Rent => "Rent",
    }
}

/// Public URL of an uploaded file
pub fn upload_url(uploads_base_url: &str, file_name: &str) -> String {
    format!("{}/{}", uploads_base_url.trim_end_matches('/'), file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(950.0), "950");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(1_250_000.0), "1,250,000");
        assert_eq!(format_number(123_456.5), "123,456.5");
    }

    #[test]
    fn negative_values_that_round_to_zero_lose_their_sign() {
        assert_eq!(format_number(-0.0001), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-1500.25), "-1,500.25");
    }

    #[test]
    fn price_has_currency_suffix() {
        assert_eq!(format_price(85_000.0), "85,000 JOD");
    }

    #[test]
    fn upload_url_joins_without_double_slash() {
        assert_eq!(
            upload_url("http://localhost:8080/uploads/", "a.jpg"),
            "http://localhost:8080/uploads/a.jpg"
        );
    }
}
