//! Food MCP Tools
//!
//! Search the nutrition database and show a single ingredient's scaled nutrients.

use serde::Serialize;

use crate::lookup::IngredientLookup;
use crate::models::{IngredientRecord, IngredientSummary, Nutrients};
use crate::nutrition::{
    display_ratio, format_amount, nutrition_facts, scaled_nutrients, scaled_phosphorus,
    serving_ratio, NutritionFact,
};

/// Response for search_foods
#[derive(Debug, Serialize)]
pub struct SearchFoodsResponse {
    pub items: Vec<IngredientSummary>,
    pub total: usize,
}

/// One serving option an ingredient can be selected in
#[derive(Debug, Serialize)]
pub struct MeasureOption {
    pub measure: String,
    pub serving_weight: f64,
    pub qty: f64,
}

/// Full ingredient detail scaled to a selection
#[derive(Debug, Serialize)]
pub struct IngredientDetail {
    pub food_name: String,
    pub brand_name: Option<String>,
    pub serving_qty: f64,
    pub serving_unit: String,
    pub serving_weight_grams: f64,
    pub selected_qty: f64,
    pub selected_unit: String,
    /// False when the selected unit is not one of `measures` (shown unscaled)
    pub unit_matched: bool,
    pub ratio: f64,
    pub nutrients: Nutrients,
    pub facts: Vec<NutritionFact>,
    pub phosphorus: Option<String>,
    pub tag: Option<String>,
    pub thumbnail: Option<String>,
    pub measures: Vec<MeasureOption>,
}

impl From<&IngredientRecord> for IngredientDetail {
    fn from(ing: &IngredientRecord) -> Self {
        let nutrients = scaled_nutrients(ing);
        Self {
            food_name: ing.food_name.clone(),
            brand_name: ing.brand_name.clone(),
            serving_qty: ing.serving_qty,
            serving_unit: ing.serving_unit.clone(),
            serving_weight_grams: ing.serving_weight_grams,
            selected_qty: ing.selected_qty,
            selected_unit: ing.selected_unit.clone(),
            unit_matched: serving_ratio(ing).is_some(),
            ratio: display_ratio(ing),
            facts: nutrition_facts(&nutrients),
            nutrients,
            phosphorus: scaled_phosphorus(ing).map(|p| format!("{}mg", format_amount(p))),
            tag: ing.tags.as_ref().map(|t| t.item.clone()),
            thumbnail: ing.photo.as_ref().map(|p| p.thumb.clone()),
            measures: ing
                .alt_measures
                .iter()
                .map(|m| MeasureOption {
                    measure: m.measure.clone(),
                    serving_weight: m.serving_weight,
                    qty: m.qty,
                })
                .collect(),
        }
    }
}

/// Search common foods by name
pub async fn search_foods<L: IngredientLookup + ?Sized>(
    lookup: &L,
    query: &str,
    limit: usize,
) -> Result<SearchFoodsResponse, String> {
    let limit = limit.clamp(1, 50);
    let mut items = lookup
        .search(query)
        .await
        .map_err(|e| format!("Search failed: {}", e))?;
    items.truncate(limit);
    let total = items.len();

    Ok(SearchFoodsResponse { items, total })
}

/// Resolve one ingredient, optionally with a serving selection
pub async fn lookup_ingredient<L: IngredientLookup + ?Sized>(
    lookup: &L,
    food_name: &str,
    selected_qty: Option<f64>,
    selected_unit: Option<&str>,
) -> Result<Option<IngredientDetail>, String> {
    let name = food_name.trim();
    if name.is_empty() {
        return Err("food_name cannot be empty".to_string());
    }

    let found = lookup
        .fetch_ingredient(name)
        .await
        .map_err(|e| format!("Lookup failed: {}", e))?;

    Ok(found.map(|mut ing| {
        if let Some(qty) = selected_qty {
            ing.selected_qty = qty;
        }
        if let Some(unit) = selected_unit {
            ing.selected_unit = unit.to_string();
        }
        IngredientDetail::from(&ing)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::testing::FakeLookup;
    use crate::models::fixtures::{banana, broccoli};

    #[tokio::test]
    async fn test_lookup_with_selection() {
        let lookup = FakeLookup::with(vec![broccoli()]);
        let detail = lookup_ingredient(&lookup, " Broccoli ", Some(2.0), Some("cup chopped"))
            .await
            .unwrap()
            .unwrap();
        assert!(detail.unit_matched);
        assert_eq!(detail.ratio, 2.0);
        assert_eq!(detail.nutrients.nf_calories, 110.0);
        assert_eq!(detail.facts[0].display, "110.00");
        assert_eq!(detail.phosphorus.as_deref(), Some("232.00mg"));
        assert_eq!(detail.tag.as_deref(), Some("broccoli"));
        assert_eq!(detail.measures.len(), 6);
    }

    #[tokio::test]
    async fn test_lookup_unknown_unit_shows_reference_serving() {
        let lookup = FakeLookup::with(vec![banana()]);
        let detail = lookup_ingredient(&lookup, "Banana", Some(3.0), Some("bunch"))
            .await
            .unwrap()
            .unwrap();
        assert!(!detail.unit_matched);
        assert_eq!(detail.ratio, 1.0);
        assert_eq!(detail.nutrients.nf_calories, 105.0);
    }

    #[tokio::test]
    async fn test_lookup_missing_and_empty() {
        let lookup = FakeLookup::default();
        assert!(lookup_ingredient(&lookup, "Durian", None, None).await.unwrap().is_none());
        assert!(lookup_ingredient(&lookup, "  ", None, None).await.is_err());
    }

    #[tokio::test]
    async fn test_search_limit() {
        let mut kale = broccoli();
        kale.food_name = "Baby kale".to_string();
        let lookup = FakeLookup::with(vec![banana(), kale]);
        let result = search_foods(&lookup, "ba", 1).await.unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.items[0].food_name, "Baby kale");
    }
}
