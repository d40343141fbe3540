//! Ingredient list keyed by food name

use std::collections::HashMap;

use crate::models::{IngredientRecord, IngredientRef, MealTotals};
use crate::nutrition::aggregate;

/// Ordered ingredients of one meal, unique by `food_name`.
///
/// Inserting a name that is already present overwrites the existing entry in place.
/// Totals are recomputed from scratch on request; nothing is cached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientList {
    items: Vec<IngredientRecord>,
    index: HashMap<String, usize>,
}

impl IngredientList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from records, later duplicates overwriting earlier ones
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = IngredientRecord>,
    {
        let mut list = Self::new();
        list.add_many(records);
        list
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, food_name: &str) -> Option<&IngredientRecord> {
        self.index.get(food_name).map(|&i| &self.items[i])
    }

    pub fn contains(&self, food_name: &str) -> bool {
        self.index.contains_key(food_name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IngredientRecord> {
        self.items.iter()
    }

    /// Insert or overwrite by name
    pub fn add(&mut self, ingredient: IngredientRecord) {
        match self.index.get(&ingredient.food_name) {
            Some(&i) => self.items[i] = ingredient,
            None => {
                self.index.insert(ingredient.food_name.clone(), self.items.len());
                self.items.push(ingredient);
            }
        }
    }

    pub fn add_many<I>(&mut self, ingredients: I)
    where
        I: IntoIterator<Item = IngredientRecord>,
    {
        for ingredient in ingredients {
            self.add(ingredient);
        }
    }

    /// Replace the entry with the same name. Returns false if there was none.
    pub fn update(&mut self, ingredient: IngredientRecord) -> bool {
        match self.index.get(&ingredient.food_name) {
            Some(&i) => {
                self.items[i] = ingredient;
                true
            }
            None => false,
        }
    }

    /// Change one ingredient's serving selection
    pub fn select(&mut self, food_name: &str, qty: f64, unit: &str) -> bool {
        match self.index.get(food_name) {
            Some(&i) => {
                let item = &mut self.items[i];
                item.selected_qty = qty;
                item.selected_unit = unit.to_string();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, food_name: &str) -> Option<IngredientRecord> {
        let i = self.index.remove(food_name)?;
        let removed = self.items.remove(i);
        for slot in self.index.values_mut() {
            if *slot > i {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    pub fn reset(&mut self) {
        self.items.clear();
        self.index.clear();
    }

    /// Nutrient totals for the current contents
    pub fn totals(&self) -> MealTotals {
        aggregate(&self.items)
    }

    /// Name and selection of every ingredient, for encoding into a meal path
    pub fn refs(&self) -> Vec<IngredientRef> {
        self.items.iter().map(IngredientRef::from).collect()
    }
}

impl IntoIterator for IngredientList {
    type Item = IngredientRecord;
    type IntoIter = std::vec::IntoIter<IngredientRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a IngredientList {
    type Item = &'a IngredientRecord;
    type IntoIter = std::slice::Iter<'a, IngredientRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
