//! Macro-nutrient quantities and current/target pairs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// Targets used until the user completes onboarding.
pub const DEFAULT_PROTEIN_TARGET: f64 = 120.0;
pub const DEFAULT_CARBS_TARGET: f64 = 250.0;
pub const DEFAULT_FATS_TARGET: f64 = 80.0;
pub const DEFAULT_CALORIES_TARGET: f64 = 2000.0;

/// Protein, carbs and fats in grams plus energy in kcal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub calories: f64,
}

impl Add for Macros {
    type Output = Macros;

    fn add(self, rhs: Macros) -> Macros {
        Macros {
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fats: self.fats + rhs.fats,
            calories: self.calories + rhs.calories,
        }
    }
}

impl AddAssign for Macros {
    fn add_assign(&mut self, rhs: Macros) {
        *self = *self + rhs;
    }
}

impl fmt::Display for Macros {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P: {}g • C: {}g • F: {}g • {} kcal",
            self.protein, self.carbs, self.fats, self.calories
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroPair {
    pub current: f64,
    pub target: f64,
}

/// Consumed-versus-target totals for each macro.
///
/// Always derived from the eaten set and the unplanned list; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroTotals {
    pub protein: MacroPair,
    pub carbs: MacroPair,
    pub fats: MacroPair,
    pub calories: MacroPair,
}

impl MacroTotals {
    pub fn with_targets(targets: Macros) -> Self {
        Self {
            protein: MacroPair {
                current: 0.0,
                target: targets.protein,
            },
            carbs: MacroPair {
                current: 0.0,
                target: targets.carbs,
            },
            fats: MacroPair {
                current: 0.0,
                target: targets.fats,
            },
            calories: MacroPair {
                current: 0.0,
                target: targets.calories,
            },
        }
    }

    pub fn current(&self) -> Macros {
        Macros {
            protein: self.protein.current,
            carbs: self.carbs.current,
            fats: self.fats.current,
            calories: self.calories.current,
        }
    }

    pub fn set_current(&mut self, current: Macros) {
        self.protein.current = current.protein;
        self.carbs.current = current.carbs;
        self.fats.current = current.fats;
        self.calories.current = current.calories;
    }
}

impl Default for MacroTotals {
    fn default() -> Self {
        Self::with_targets(Macros {
            protein: DEFAULT_PROTEIN_TARGET,
            carbs: DEFAULT_CARBS_TARGET,
            fats: DEFAULT_FATS_TARGET,
            calories: DEFAULT_CALORIES_TARGET,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macros_add() {
        let a = Macros {
            protein: 1.0,
            carbs: 2.0,
            fats: 3.0,
            calories: 4.0,
        };
        let mut b = a + a;
        b += a;
        assert_eq!(b.protein, 3.0);
        assert_eq!(b.calories, 12.0);
    }

    #[test]
    fn test_default_totals_targets() {
        let totals = MacroTotals::default();
        assert_eq!(totals.protein.target, 120.0);
        assert_eq!(totals.carbs.target, 250.0);
        assert_eq!(totals.fats.target, 80.0);
        assert_eq!(totals.calories.target, 2000.0);
        assert_eq!(totals.current(), Macros::default());
    }

    #[test]
    fn test_set_current_keeps_targets() {
        let mut totals = MacroTotals::default();
        totals.set_current(Macros {
            protein: 10.0,
            carbs: 20.0,
            fats: 5.0,
            calories: 160.0,
        });
        assert_eq!(totals.protein.current, 10.0);
        assert_eq!(totals.protein.target, 120.0);
    }
}
