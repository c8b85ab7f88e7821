//! Fridge inventory items.
//!
//! Products are merged on add: a product whose name matches an existing entry
//! (case-insensitive) with the same unit increases that entry's quantity instead
//! of creating a duplicate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Gram,
    Milliliter,
    Piece,
    Kilogram,
    Liter,
    Tablespoon,
    Teaspoon,
    Cup,
    Package,
}

impl Unit {
    pub const ALL: [Unit; 9] = [
        Unit::Gram,
        Unit::Milliliter,
        Unit::Piece,
        Unit::Kilogram,
        Unit::Liter,
        Unit::Tablespoon,
        Unit::Teaspoon,
        Unit::Cup,
        Unit::Package,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Gram => "gram",
            Unit::Milliliter => "milliliter",
            Unit::Piece => "piece",
            Unit::Kilogram => "kilogram",
            Unit::Liter => "liter",
            Unit::Tablespoon => "tablespoon",
            Unit::Teaspoon => "teaspoon",
            Unit::Cup => "cup",
            Unit::Package => "package",
        }
    }

    /// Short label shown next to a quantity.
    pub fn display_name(&self) -> &'static str {
        match self {
            Unit::Gram => "g",
            Unit::Milliliter => "ml",
            Unit::Piece => "pcs",
            Unit::Kilogram => "kg",
            Unit::Liter => "l",
            Unit::Tablespoon => "tbsp",
            Unit::Teaspoon => "tsp",
            Unit::Cup => "cup",
            Unit::Package => "pkg",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Unit::ALL
            .into_iter()
            .find(|u| u.as_str() == key)
            .ok_or_else(|| {
                format!(
                    "Invalid unit '{}'. Valid options: gram, milliliter, piece, kilogram, liter, tablespoon, teaspoon, cup, package",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Vegetables,
    Fruits,
    Meat,
    Dairy,
    Grains,
    #[default]
    Other,
}

impl Category {
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Vegetables => "Vegetables",
            Category::Fruits => "Fruits",
            Category::Meat => "Meat",
            Category::Dairy => "Dairy",
            Category::Grains => "Grains",
            Category::Other => "Other",
        }
    }
}

/// Optional nutrition facts attached to a product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    #[serde(default)]
    pub proteins: f64,
    #[serde(default)]
    pub fats: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub calories: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: Unit,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub nutrition: Option<Nutrition>,
    pub added_at: DateTime<Utc>,
}

impl Product {
    /// Whether an added product with this name and unit folds into this entry.
    pub fn merges_with(&self, name: &str, unit: Unit) -> bool {
        self.unit == unit && self.name.to_lowercase() == name.to_lowercase()
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.name,
            format_quantity(self.quantity),
            self.unit.display_name()
        )
    }
}

/// Raw fields from the add-product form.
///
/// Quantity and unit are kept as entered so that validation can report a missing
/// or non-numeric value against the field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub proteins: Option<f64>,
    pub fats: Option<f64>,
    pub carbs: Option<f64>,
    pub calories: Option<f64>,
}

impl ProductInput {
    pub fn new(
        name: impl Into<String>,
        quantity: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            unit: unit.into(),
            ..Default::default()
        }
    }

    /// Nutrition is recorded only when at least one value was supplied.
    pub fn nutrition(&self) -> Option<Nutrition> {
        if self.proteins.is_none()
            && self.fats.is_none()
            && self.carbs.is_none()
            && self.calories.is_none()
        {
            return None;
        }
        // Non-finite values cannot be stored as JSON.
        let value = |v: Option<f64>| v.filter(|v| v.is_finite()).unwrap_or(0.0);
        Some(Nutrition {
            proteins: value(self.proteins),
            fats: value(self.fats),
            carbs: value(self.carbs),
            calories: value(self.calories),
        })
    }
}

/// Replacement values for an existing product's editable fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub quantity: f64,
    pub unit: Unit,
}

/// Format a quantity, removing unnecessary decimal places.
pub fn format_quantity(qty: f64) -> String {
    if qty.fract() == 0.0 {
        format!("{}", qty as i64)
    } else {
        format!("{:.1}", qty)
    }
}
