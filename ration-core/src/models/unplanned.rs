use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::macros::Macros;

/// A consumption entry the user added outside the planned meals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UnplannedMeal {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fats: f64,
    #[serde(default)]
    pub calories: f64,
    pub added_at: DateTime<Utc>,
}

impl UnplannedMeal {
    pub fn macros(&self) -> Macros {
        Macros {
            protein: self.protein,
            carbs: self.carbs,
            fats: self.fats,
            calories: self.calories,
        }
    }
}

impl fmt::Display for UnplannedMeal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.macros())
    }
}

/// Fields for a new unplanned meal. Absent numbers count as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnplannedMealInput {
    pub name: String,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
    pub calories: Option<f64>,
}

impl UnplannedMealInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_macros(mut self, macros: Macros) -> Self {
        self.protein = Some(macros.protein);
        self.carbs = Some(macros.carbs);
        self.fats = Some(macros.fats);
        self.calories = Some(macros.calories);
        self
    }

    pub fn macros(&self) -> Macros {
        Macros {
            protein: self.protein.unwrap_or(0.0),
            carbs: self.carbs.unwrap_or(0.0),
            fats: self.fats.unwrap_or(0.0),
            calories: self.calories.unwrap_or(0.0),
        }
    }
}
