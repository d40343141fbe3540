//! Presentation helpers
//!
//! Two-decimal amounts with thousands separators, and labelled nutrition facts.

use serde::Serialize;

use crate::models::{Nutrient, Nutrients};

/// Format an amount with exactly two decimals and comma thousands separators.
///
/// Rounds the shortest decimal form of `value` half away from zero, so `0.125` is
/// `"0.13"` and `1.005` is `"1.01"`.
pub fn format_amount(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞".to_string() } else { "-∞".to_string() };
    }

    let sign = if value.is_sign_negative() { "-" } else { "" };
    let (int_part, frac_part) = round_to_cents(value.abs());

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Integer digits and two fraction digits of a finite, non-negative value
fn round_to_cents(value: f64) -> (String, String) {
    // Display never uses exponent notation and gives the shortest round-trip digits
    let shortest = value.to_string();
    let (int_part, frac_part) = shortest.split_once('.').unwrap_or((&shortest, ""));

    let mut digits: Vec<u8> = int_part.bytes().collect();
    digits.extend(frac_part.bytes().chain(std::iter::repeat(b'0')).take(2));

    if frac_part.as_bytes().get(2).is_some_and(|&d| d >= b'5') {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - 2;
    let frac = String::from_utf8_lossy(&digits[split..]).into_owned();
    digits.truncate(split);
    (String::from_utf8_lossy(&digits).into_owned(), frac)
}

/// One line of a nutrition facts panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionFact {
    pub nutrient: Nutrient,
    pub label: &'static str,
    pub amount: f64,
    /// Formatted amount with unit suffix, e.g. "1,234.56mg"
    pub display: String,
}

pub fn nutrition_fact(nutrient: Nutrient, amount: f64) -> NutritionFact {
    NutritionFact {
        nutrient,
        label: nutrient.label(),
        amount,
        display: format!("{}{}", format_amount(amount), nutrient.unit()),
    }
}

/// All ten nutrients as facts, in fixed order
pub fn nutrition_facts(nutrients: &Nutrients) -> Vec<NutritionFact> {
    nutrients
        .iter()
        .map(|(nutrient, amount)| nutrition_fact(nutrient, amount))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1234.56), "1,234.56");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(110.0), "110.00");
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
        assert_eq!(format_amount(999.999), "1,000.00");
        assert_eq!(format_amount(-4321.5), "-4,321.50");
    }

    #[test]
    fn test_format_amount_rounds_half_away_from_zero() {
        assert_eq!(format_amount(0.125), "0.13");
        assert_eq!(format_amount(1.375), "1.38");
        assert_eq!(format_amount(-0.625), "-0.63");
        assert_eq!(format_amount(1.005), "1.01");
        assert_eq!(format_amount(0.124), "0.12");
        assert_eq!(format_amount(99999.995), "100,000.00");
        assert_eq!(format_amount(0.001), "0.00");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_amount(f64::NAN), "NaN");
        assert_eq!(format_amount(f64::INFINITY), "∞");
        assert_eq!(format_amount(f64::NEG_INFINITY), "-∞");
    }

    #[test]
    fn test_nutrition_facts() {
        let nutrients = Nutrients {
            nf_calories: 320.0,
            nf_sodium: 1758.0,
            ..Nutrients::zero()
        };
        let facts = nutrition_facts(&nutrients);
        assert_eq!(facts.len(), 10);
        assert_eq!(facts[0].label, "Calories");
        assert_eq!(facts[0].display, "320.00");
        assert_eq!(facts[4].display, "1,758.00mg");
        assert_eq!(facts[1].display, "0.00g");
    }
}
