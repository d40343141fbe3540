//! Shared nutrient data structure
//!
//! The ten-field profile used for per-serving ingredient values and for meal totals.

use serde::{Deserialize, Serialize};

/// One of the ten tracked nutrients, in fixed iteration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    Calories,
    TotalFat,
    SaturatedFat,
    Cholesterol,
    Sodium,
    TotalCarbohydrate,
    DietaryFiber,
    Sugars,
    Protein,
    Potassium,
}

impl Nutrient {
    /// All nutrients in declaration order. Sums always walk this order.
    pub const ALL: [Nutrient; 10] = [
        Nutrient::Calories,
        Nutrient::TotalFat,
        Nutrient::SaturatedFat,
        Nutrient::Cholesterol,
        Nutrient::Sodium,
        Nutrient::TotalCarbohydrate,
        Nutrient::DietaryFiber,
        Nutrient::Sugars,
        Nutrient::Protein,
        Nutrient::Potassium,
    ];

    /// Nutritionix wire name
    pub fn key(&self) -> &'static str {
        match self {
            Nutrient::Calories => "nf_calories",
            Nutrient::TotalFat => "nf_total_fat",
            Nutrient::SaturatedFat => "nf_saturated_fat",
            Nutrient::Cholesterol => "nf_cholesterol",
            Nutrient::Sodium => "nf_sodium",
            Nutrient::TotalCarbohydrate => "nf_total_carbohydrate",
            Nutrient::DietaryFiber => "nf_dietary_fiber",
            Nutrient::Sugars => "nf_sugars",
            Nutrient::Protein => "nf_protein",
            Nutrient::Potassium => "nf_potassium",
        }
    }

    /// Human readable label for nutrition facts
    pub fn label(&self) -> &'static str {
        match self {
            Nutrient::Calories => "Calories",
            Nutrient::TotalFat => "Total Fat",
            Nutrient::SaturatedFat => "Saturated Fat",
            Nutrient::Cholesterol => "Cholesterol",
            Nutrient::Sodium => "Sodium",
            Nutrient::TotalCarbohydrate => "Total Carbohydrate",
            Nutrient::DietaryFiber => "Dietary Fiber",
            Nutrient::Sugars => "Sugars",
            Nutrient::Protein => "Protein",
            Nutrient::Potassium => "Potassium",
        }
    }

    /// Display unit ("" for calories)
    pub fn unit(&self) -> &'static str {
        match self {
            Nutrient::Calories => "",
            Nutrient::Cholesterol | Nutrient::Sodium | Nutrient::Potassium => "mg",
            _ => "g",
        }
    }
}

/// Nutrient amounts, per reference serving for an ingredient or summed for a meal
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    pub nf_calories: f64,
    pub nf_total_fat: f64,          // grams
    pub nf_saturated_fat: f64,      // grams
    pub nf_cholesterol: f64,        // milligrams
    pub nf_sodium: f64,             // milligrams
    pub nf_total_carbohydrate: f64, // grams
    pub nf_dietary_fiber: f64,      // grams
    pub nf_sugars: f64,             // grams
    pub nf_protein: f64,            // grams
    pub nf_potassium: f64,          // milligrams
}

/// Meal totals share the profile's shape. Always derived, never stored.
pub type MealTotals = Nutrients;

impl Nutrients {
    /// Create a new Nutrients with all zeros
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.nf_calories,
            Nutrient::TotalFat => self.nf_total_fat,
            Nutrient::SaturatedFat => self.nf_saturated_fat,
            Nutrient::Cholesterol => self.nf_cholesterol,
            Nutrient::Sodium => self.nf_sodium,
            Nutrient::TotalCarbohydrate => self.nf_total_carbohydrate,
            Nutrient::DietaryFiber => self.nf_dietary_fiber,
            Nutrient::Sugars => self.nf_sugars,
            Nutrient::Protein => self.nf_protein,
            Nutrient::Potassium => self.nf_potassium,
        }
    }

    pub fn get_mut(&mut self, nutrient: Nutrient) -> &mut f64 {
        match nutrient {
            Nutrient::Calories => &mut self.nf_calories,
            Nutrient::TotalFat => &mut self.nf_total_fat,
            Nutrient::SaturatedFat => &mut self.nf_saturated_fat,
            Nutrient::Cholesterol => &mut self.nf_cholesterol,
            Nutrient::Sodium => &mut self.nf_sodium,
            Nutrient::TotalCarbohydrate => &mut self.nf_total_carbohydrate,
            Nutrient::DietaryFiber => &mut self.nf_dietary_fiber,
            Nutrient::Sugars => &mut self.nf_sugars,
            Nutrient::Protein => &mut self.nf_protein,
            Nutrient::Potassium => &mut self.nf_potassium,
        }
    }

    /// Iterate `(nutrient, amount)` pairs in fixed order
    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, f64)> + '_ {
        Nutrient::ALL.iter().map(move |n| (*n, self.get(*n)))
    }

    /// Scale nutrient values by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        let mut scaled = *self;
        for nutrient in Nutrient::ALL {
            *scaled.get_mut(nutrient) *= multiplier;
        }
        scaled
    }

    /// Add another profile to this one
    pub fn add(&self, other: &Nutrients) -> Self {
        let mut sum = *self;
        for nutrient in Nutrient::ALL {
            *sum.get_mut(nutrient) += other.get(nutrient);
        }
        sum
    }
}

impl std::ops::Add for Nutrients {
    type Output = Nutrients;

    fn add(self, other: Nutrients) -> Nutrients {
        Nutrients::add(&self, &other)
    }
}

impl std::ops::Mul<f64> for Nutrients {
    type Output = Nutrients;

    fn mul(self, multiplier: f64) -> Nutrients {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for Nutrients {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Nutrients::zero(), |acc, n| acc + n)
    }
}
