//! Derived-state calculations.
//!
//! Daily targets come from the Mifflin-St Jeor equation scaled by an activity
//! factor and split 25/45/30 between protein, carbs and fats. Inputs are not
//! range-checked: implausible values flow through the arithmetic unchanged.

use std::collections::BTreeSet;

use crate::models::{ActivityLevel, MealCatalog, Macros, Sex, UnplannedMeal};

const PROTEIN_SHARE: f64 = 0.25;
const CARBS_SHARE: f64 = 0.45;
const FATS_SHARE: f64 = 0.30;

const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
const KCAL_PER_GRAM_CARBS: f64 = 4.0;
const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Gram targets for a day, rounded to whole grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacroTargets {
    pub protein: i64,
    pub carbs: i64,
    pub fats: i64,
}

/// Basal metabolic rate in kcal/day.
pub fn compute_bmr(sex: Sex, age_years: f64, height_cm: f64, weight_kg: f64) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years;
    match sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    }
}

/// Daily calorie target: BMR scaled by the activity factor, rounded.
pub fn compute_daily_calories(bmr: f64, activity: ActivityLevel) -> i64 {
    (bmr * activity.multiplier()).round() as i64
}

pub fn compute_macro_targets(daily_calories: i64) -> MacroTargets {
    let calories = daily_calories as f64;
    MacroTargets {
        protein: (calories * PROTEIN_SHARE / KCAL_PER_GRAM_PROTEIN).round() as i64,
        carbs: (calories * CARBS_SHARE / KCAL_PER_GRAM_CARBS).round() as i64,
        fats: (calories * FATS_SHARE / KCAL_PER_GRAM_FAT).round() as i64,
    }
}

/// Macros consumed so far: every eaten meal's dishes plus every unplanned meal.
///
/// Eaten ids are resolved against the catalog, so ids with no matching meal
/// contribute nothing.
pub fn compute_current_macros(
    catalog: &MealCatalog,
    eaten: &BTreeSet<String>,
    unplanned: &[UnplannedMeal],
) -> Macros {
    let mut total = Macros::default();

    for meal in catalog.meals() {
        if eaten.contains(&meal.id) {
            total += meal.macros();
        }
    }

    for meal in unplanned {
        total += meal.macros();
    }

    total
}

/// Share of the target reached, clamped to 0..=100.
///
/// A target of zero or less yields 0 rather than dividing by it.
pub fn percent_of_target(current: f64, target: f64) -> f64 {
    if target <= 0.0 || !target.is_finite() {
        return 0.0;
    }
    let pct = current / target * 100.0;
    if pct.is_nan() {
        return 0.0;
    }
    pct.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dish, Meal};
    use chrono::Utc;

    fn catalog() -> MealCatalog {
        MealCatalog::new(vec![
            Meal::new("breakfast", "08:00", "Breakfast").with_dish(
                Dish::new("dish-1", "Oatmeal").with_macros(12.0, 45.0, 8.0, 295.0),
            ),
            Meal::new("lunch", "13:00", "Lunch").with_dish(
                Dish::new("dish-2", "Chicken").with_macros(35.0, 40.0, 5.0, 340.0),
            ),
        ])
    }

    fn unplanned(name: &str, protein: f64, calories: f64) -> UnplannedMeal {
        UnplannedMeal {
            id: format!("u-{}", name),
            name: name.into(),
            protein,
            carbs: 0.0,
            fats: 0.0,
            calories,
            added_at: Utc::now(),
        }
    }

    #[test]
    fn test_bmr_male() {
        // 10 * 80 + 6.25 * 180 - 5 * 30 + 5
        let bmr = compute_bmr(Sex::Male, 30.0, 180.0, 80.0);
        assert_eq!(bmr, 1780.0);
    }

    #[test]
    fn test_bmr_female() {
        let bmr = compute_bmr(Sex::Female, 30.0, 180.0, 80.0);
        assert_eq!(bmr, 1614.0);
    }

    #[test]
    fn test_bmr_zero_inputs_are_not_guarded() {
        assert_eq!(compute_bmr(Sex::Male, 0.0, 0.0, 0.0), 5.0);
        assert_eq!(compute_bmr(Sex::Female, 0.0, 0.0, 0.0), -161.0);
    }

    #[test]
    fn test_targets_from_bmr_1792_5_moderate() {
        let daily = compute_daily_calories(1792.5, ActivityLevel::Moderate);
        assert_eq!(daily, 2778);

        let targets = compute_macro_targets(daily);
        assert_eq!(targets.protein, 174);
        assert_eq!(targets.carbs, 313);
        assert_eq!(targets.fats, 93);

        let energy = targets.protein * 4 + targets.carbs * 4 + targets.fats * 9;
        assert_eq!(energy - daily, 7);
    }

    #[test]
    fn test_male_30_180_80_moderate_chain() {
        let bmr = compute_bmr(Sex::Male, 30.0, 180.0, 80.0);
        let daily = compute_daily_calories(bmr, ActivityLevel::Moderate);
        assert_eq!(daily, 2759);

        let targets = compute_macro_targets(daily);
        assert_eq!(
            targets,
            MacroTargets {
                protein: 172,
                carbs: 310,
                fats: 92,
            }
        );
    }

    #[test]
    fn test_daily_calories_matches_multiplier_table() {
        let bmr = 1500.0;
        for level in ActivityLevel::ALL {
            let expected = (bmr * level.multiplier()).round() as i64;
            assert_eq!(compute_daily_calories(bmr, level), expected);
        }
        assert_eq!(compute_daily_calories(bmr, ActivityLevel::VeryActive), 2850);
    }

    #[test]
    fn test_unknown_activity_behaves_as_sedentary() {
        let bmr = 1700.0;
        assert_eq!(
            compute_daily_calories(bmr, ActivityLevel::from_key("athlete")),
            compute_daily_calories(bmr, ActivityLevel::Sedentary)
        );
    }

    #[test]
    fn test_macro_targets_energy_within_rounding_drift() {
        // Each gram target is off by at most half a gram: 2 + 2 + 4.5 kcal.
        for calories in 0..=5000 {
            let t = compute_macro_targets(calories);
            assert!(t.protein >= 0 && t.carbs >= 0 && t.fats >= 0);
            let energy = t.protein * 4 + t.carbs * 4 + t.fats * 9;
            assert!(
                (energy - calories).abs() <= 8,
                "calories {} gave {} kcal of macros",
                calories,
                energy
            );
        }
    }

    #[test]
    fn test_current_macros_from_eaten_and_unplanned() {
        let catalog = catalog();
        let eaten: BTreeSet<String> = ["lunch".to_string()].into_iter().collect();
        let extra = vec![unplanned("Tea", 1.0, 10.0)];

        let current = compute_current_macros(&catalog, &eaten, &extra);
        assert_eq!(current.protein, 36.0);
        assert_eq!(current.carbs, 40.0);
        assert_eq!(current.fats, 5.0);
        assert_eq!(current.calories, 350.0);
    }

    #[test]
    fn test_current_macros_ignores_stale_ids() {
        let catalog = catalog();
        let eaten: BTreeSet<String> = ["dinner".to_string(), "breakfast".to_string()]
            .into_iter()
            .collect();

        let current = compute_current_macros(&catalog, &eaten, &[]);
        assert_eq!(current.calories, 295.0);
    }

    #[test]
    fn test_current_macros_empty() {
        let current = compute_current_macros(&catalog(), &BTreeSet::new(), &[]);
        assert_eq!(current, Macros::default());
    }

    #[test]
    fn test_percent_of_target() {
        assert_eq!(percent_of_target(60.0, 120.0), 50.0);
        assert_eq!(percent_of_target(300.0, 120.0), 100.0);
        assert_eq!(percent_of_target(10.0, 0.0), 0.0);
        assert_eq!(percent_of_target(10.0, -5.0), 0.0);
        assert_eq!(percent_of_target(0.0, 0.0), 0.0);
    }
}
