//! Meal model
//!
//! A saved meal is a title plus the query string that reproduces it. The query string
//! carries one `title` parameter and one `ingredient` parameter per ingredient, each
//! encoded as `name|unit|qty`.

use rmcp::schemars;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use super::IngredientRecord;

const TITLE_PARAM: &str = "title";
const INGREDIENT_PARAM: &str = "ingredient";
const REF_SEPARATOR: char = '|';

/// A named meal as persisted in the meal store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub title: String,
    /// Query string (without leading '?') describing the meal
    pub path: String,
}

impl Meal {
    pub fn new(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
        }
    }

    /// Build a meal from a title and its ingredients, generating the path
    pub fn from_ingredients(title: &str, ingredients: &[IngredientRecord]) -> Self {
        let query = MealQuery {
            title: title.to_string(),
            ingredients: ingredients.iter().map(IngredientRef::from).collect(),
        };
        Self::new(title, query.to_path())
    }

    /// Decode the meal's path
    pub fn query(&self) -> MealQuery {
        MealQuery::parse(&self.path)
    }
}

/// Reference to an ingredient by name with a serving selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct IngredientRef {
    pub food_name: String,
    pub selected_unit: String,
    pub selected_qty: f64,
}

impl IngredientRef {
    pub fn new(food_name: impl Into<String>, selected_unit: impl Into<String>, selected_qty: f64) -> Self {
        Self {
            food_name: food_name.into(),
            selected_unit: selected_unit.into(),
            selected_qty,
        }
    }

    /// Encode as `name|unit|qty`
    pub fn encode(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            self.food_name,
            self.selected_unit,
            self.selected_qty,
            sep = REF_SEPARATOR
        )
    }

    /// Decode `name|unit|qty`. A missing unit becomes empty; a missing or
    /// unreadable quantity becomes NaN, an empty one zero. Extra segments are ignored.
    pub fn decode(s: &str) -> Self {
        let mut parts = s.split(REF_SEPARATOR);
        let food_name = parts.next().unwrap_or_default().to_string();
        let selected_unit = parts.next().unwrap_or_default().to_string();
        let selected_qty = match parts.next() {
            None => f64::NAN,
            Some(raw) => parse_quantity(raw),
        };
        Self {
            food_name,
            selected_unit,
            selected_qty,
        }
    }
}

impl From<&IngredientRecord> for IngredientRef {
    fn from(ing: &IngredientRecord) -> Self {
        Self::new(ing.food_name.clone(), ing.selected_unit.clone(), ing.selected_qty)
    }
}

/// Read a quantity the way a browser's `Number(string)` does: surrounding whitespace
/// is ignored, empty is zero, `Infinity` and `0x`/`0o`/`0b` integers are accepted, and
/// anything else that is not a plain decimal literal is NaN.
fn parse_quantity(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix_integer(&trimmed[2..], radix);
    }

    // Rust also accepts "inf" and "nan", which are not numeric literals here
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix_integer(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        })
        .unwrap_or(f64::NAN)
}

/// Decoded form of a meal path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MealQuery {
    /// First `title` value, or empty
    pub title: String,
    pub ingredients: Vec<IngredientRef>,
}

impl MealQuery {
    /// Parse a form-urlencoded query string. A leading '?' is accepted.
    pub fn parse(path: &str) -> Self {
        let raw = path.strip_prefix('?').unwrap_or(path);
        let mut query = MealQuery::default();
        let mut title_seen = false;

        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                TITLE_PARAM if !title_seen => {
                    query.title = value.into_owned();
                    title_seen = true;
                }
                INGREDIENT_PARAM => query.ingredients.push(IngredientRef::decode(&value)),
                _ => {}
            }
        }

        query
    }

    /// Serialize back to a query string. Empty titles are omitted.
    pub fn to_path(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for ing in &self.ingredients {
            serializer.append_pair(INGREDIENT_PARAM, &ing.encode());
        }
        if !self.title.is_empty() {
            serializer.append_pair(TITLE_PARAM, &self.title);
        }
        serializer.finish()
    }
}
