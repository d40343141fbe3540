//! Serving-size normalization and meal totals
//!
//! Every nutrient value on an ingredient is per reference serving
//! (`serving_weight_grams`). A selection of `qty` x `measure` is converted to grams
//! through the measure's weight, then divided by the reference weight to get the
//! ratio the profile is scaled by.
//!
//! A selection whose unit matches no measure is handled differently by the two
//! callers: a meal total skips the ingredient, a single ingredient display
//! falls back to a ratio of one.

use crate::models::{IngredientRecord, MealTotals, Nutrients};

/// Ratio of the selected serving to the reference serving.
///
/// `None` when the selected unit matches none of the ingredient's measures.
/// A zero reference weight is not guarded and yields an infinite or NaN ratio.
pub fn serving_ratio(ingredient: &IngredientRecord) -> Option<f64> {
    let measure = ingredient.selected_measure()?;
    Some((ingredient.selected_qty * measure.grams_per_qty()) / ingredient.serving_weight_grams)
}

/// Ratio used when showing a single ingredient: unmatched units mean no scaling.
pub fn display_ratio(ingredient: &IngredientRecord) -> f64 {
    serving_ratio(ingredient).unwrap_or(1.0)
}

/// An ingredient's nutrients scaled to its current selection, for single item display
pub fn scaled_nutrients(ingredient: &IngredientRecord) -> Nutrients {
    ingredient.nutrients.scale(display_ratio(ingredient))
}

/// Phosphorus scaled the same way as [`scaled_nutrients`]
pub fn scaled_phosphorus(ingredient: &IngredientRecord) -> Option<f64> {
    ingredient.nf_p.map(|p| p * display_ratio(ingredient))
}

/// Sum every ingredient's nutrients, each scaled to its selected serving.
///
/// Ingredients are visited in slice order and fields in `Nutrient::ALL` order, so
/// repeated calls on the same input are bit-identical. Ingredients whose selected
/// unit has no matching measure contribute nothing.
pub fn aggregate(ingredients: &[IngredientRecord]) -> MealTotals {
    ingredients
        .iter()
        .filter_map(|ingredient| serving_ratio(ingredient).map(|ratio| ingredient.nutrients * ratio))
        .sum()
}
