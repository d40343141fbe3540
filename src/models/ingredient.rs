//! Ingredient model
//!
//! An ingredient as resolved from the nutrition database, plus the user's serving selection.

use serde::{Deserialize, Serialize};

use super::Nutrients;

/// An alternative serving description an ingredient can be selected in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServingMeasure {
    /// Label shown to the user, e.g. "cup chopped"
    pub measure: String,
    /// Grams corresponding to `qty` of this measure
    pub serving_weight: f64,
    pub qty: f64,
    #[serde(default)]
    pub seq: Option<i64>,
}

impl ServingMeasure {
    pub fn new(measure: impl Into<String>, serving_weight: f64, qty: f64) -> Self {
        Self {
            measure: measure.into(),
            serving_weight,
            qty,
            seq: None,
        }
    }

    /// Grams in a single unit of this measure
    pub fn grams_per_qty(&self) -> f64 {
        self.serving_weight / self.qty
    }
}

/// Food group tag attached by the nutrition database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodTag {
    pub item: String,
    #[serde(default)]
    pub measure: Option<String>,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub food_group: Option<i64>,
    #[serde(default)]
    pub tag_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub thumb: String,
    #[serde(default)]
    pub highres: Option<String>,
    #[serde(default)]
    pub is_user_uploaded: bool,
}

/// A fully resolved ingredient with its current serving selection
///
/// The nutrient profile and `serving_weight_grams` describe one reference serving
/// and never change after lookup; only `selected_qty` and `selected_unit` are edited.
/// `food_name` is the identity key within a meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientRecord {
    pub food_name: String,
    #[serde(default)]
    pub brand_name: Option<String>,
    pub serving_qty: f64,
    pub serving_unit: String,
    /// Reference serving weight every measure is scaled against
    pub serving_weight_grams: f64,
    #[serde(flatten)]
    pub nutrients: Nutrients,
    /// Phosphorus (mg), only shown in single ingredient detail
    #[serde(default)]
    pub nf_p: Option<f64>,
    #[serde(default)]
    pub alt_measures: Vec<ServingMeasure>,
    #[serde(default)]
    pub tags: Option<FoodTag>,
    #[serde(default)]
    pub photo: Option<Photo>,
    pub selected_qty: f64,
    pub selected_unit: String,
}

impl IngredientRecord {
    /// First measure whose label equals `label`
    pub fn find_measure(&self, label: &str) -> Option<&ServingMeasure> {
        self.alt_measures.iter().find(|m| m.measure == label)
    }

    /// Measure matching the current selection, if any
    pub fn selected_measure(&self) -> Option<&ServingMeasure> {
        self.find_measure(&self.selected_unit)
    }

    /// Reset the selection to the database's default serving
    pub fn with_default_selection(mut self) -> Self {
        self.selected_qty = self.serving_qty;
        self.selected_unit = self.serving_unit.clone();
        self
    }

    pub fn with_selection(mut self, qty: f64, unit: impl Into<String>) -> Self {
        self.selected_qty = qty;
        self.selected_unit = unit.into();
        self
    }
}

/// Search hit from the instant search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientSummary {
    pub food_name: String,
    #[serde(default)]
    pub serving_unit: Option<String>,
    #[serde(default)]
    pub serving_qty: Option<f64>,
    #[serde(default)]
    pub tag_name: Option<String>,
    #[serde(default)]
    pub tag_id: Option<String>,
    #[serde(default)]
    pub photo: Option<SummaryPhoto>,
    #[serde(default)]
    pub locale: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryPhoto {
    pub thumb: Option<String>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Reference ingredients shared by tests across the crate.

    use super::*;

    pub fn broccoli() -> IngredientRecord {
        IngredientRecord {
            food_name: "Broccoli".to_string(),
            brand_name: None,
            serving_qty: 1.0,
            serving_unit: "cup chopped".to_string(),
            serving_weight_grams: 91.0,
            nutrients: Nutrients {
                nf_calories: 55.0,
                nf_total_fat: 0.6,
                nf_saturated_fat: 0.1,
                nf_cholesterol: 0.0,
                nf_sodium: 81.0,
                nf_total_carbohydrate: 11.0,
                nf_dietary_fiber: 5.1,
                nf_sugars: 2.2,
                nf_protein: 4.3,
                nf_potassium: 457.0,
            },
            nf_p: Some(116.0),
            alt_measures: vec![
                ServingMeasure::new("cup chopped", 91.0, 1.0),
                ServingMeasure::new("stalk, medium (7-1/2\" - 8\" long)", 156.0, 1.0),
                ServingMeasure::new("head, small (about 5\" dia)", 151.0, 1.0),
                ServingMeasure::new("head, medium (about 5-3/4\" dia)", 180.0, 1.0),
                ServingMeasure::new("head, large (about 7\" dia)", 766.0, 1.0),
                ServingMeasure::new("spear", 28.35, 1.0),
            ],
            tags: Some(FoodTag {
                item: "broccoli".to_string(),
                measure: None,
                quantity: Some("1.0".to_string()),
                food_group: Some(4),
                tag_id: Some(510),
            }),
            photo: None,
            selected_qty: 2.0,
            selected_unit: "cup chopped".to_string(),
        }
    }

    pub fn banana() -> IngredientRecord {
        let medium = "medium (7\" to 7-7/8\" long)";
        IngredientRecord {
            food_name: "Banana".to_string(),
            brand_name: None,
            serving_qty: 1.0,
            serving_unit: medium.to_string(),
            serving_weight_grams: 118.0,
            nutrients: Nutrients {
                nf_calories: 105.0,
                nf_total_fat: 0.4,
                nf_saturated_fat: 0.1,
                nf_cholesterol: 0.0,
                nf_sodium: 1.0,
                nf_total_carbohydrate: 27.0,
                nf_dietary_fiber: 3.1,
                nf_sugars: 14.4,
                nf_protein: 1.3,
                nf_potassium: 422.0,
            },
            nf_p: Some(26.0),
            alt_measures: vec![
                ServingMeasure::new("extra small (less than 6\" long)", 101.0, 1.0),
                ServingMeasure::new(medium, 118.0, 1.0),
                ServingMeasure::new("large (8\" to 8-7/8\" long)", 136.0, 1.0),
                ServingMeasure::new("cup, mashed", 226.0, 1.0),
                ServingMeasure::new("cup, sliced", 225.0, 1.0),
            ],
            tags: None,
            photo: None,
            selected_qty: 2.0,
            selected_unit: medium.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::broccoli;
    use super::*;

    #[test]
    fn test_find_measure_first_match() {
        let mut ing = broccoli();
        ing.alt_measures.push(ServingMeasure::new("spear", 99.0, 1.0));
        assert_eq!(ing.find_measure("spear").map(|m| m.serving_weight), Some(28.35));
        assert!(ing.find_measure("bunch").is_none());
    }

    #[test]
    fn test_default_selection() {
        let ing = broccoli().with_selection(3.0, "spear").with_default_selection();
        assert_eq!(ing.selected_qty, 1.0);
        assert_eq!(ing.selected_unit, "cup chopped");
    }

    #[test]
    fn test_deserialize_flattened_nutrients() {
        let json = serde_json::json!({
            "food_name": "egg",
            "serving_qty": 1,
            "serving_unit": "large",
            "serving_weight_grams": 50,
            "nf_calories": 71.5,
            "nf_total_fat": 4.76,
            "nf_saturated_fat": 1.56,
            "nf_cholesterol": 186,
            "nf_sodium": 71,
            "nf_total_carbohydrate": 0.36,
            "nf_dietary_fiber": 0,
            "nf_sugars": 0.19,
            "nf_protein": 6.28,
            "nf_potassium": 69,
            "alt_measures": [{"serving_weight": 50, "measure": "large", "seq": 1, "qty": 1}],
            "selected_qty": 1,
            "selected_unit": "large"
        });
        let ing: IngredientRecord = serde_json::from_value(json).unwrap();
        assert_eq!(ing.nutrients.nf_calories, 71.5);
        assert_eq!(ing.nutrients.nf_cholesterol, 186.0);
        assert_eq!(ing.alt_measures[0].seq, Some(1));
        assert_eq!(ing.selected_measure().map(|m| m.grams_per_qty()), Some(50.0));
    }
}
