use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::macros::Macros;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dish {
    pub id: String,
    pub name: String,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub calories: f64,
    pub ingredients: Vec<String>,
}

impl Dish {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            protein: 0.0,
            carbs: 0.0,
            fats: 0.0,
            calories: 0.0,
            ingredients: Vec::new(),
        }
    }

    pub fn with_macros(mut self, protein: f64, carbs: f64, fats: f64, calories: f64) -> Self {
        self.protein = protein;
        self.carbs = carbs;
        self.fats = fats;
        self.calories = calories;
        self
    }

    pub fn with_ingredients(mut self, ingredients: Vec<String>) -> Self {
        self.ingredients = ingredients;
        self
    }

    pub fn macros(&self) -> Macros {
        Macros {
            protein: self.protein,
            carbs: self.carbs,
            fats: self.fats,
            calories: self.calories,
        }
    }
}

impl fmt::Display for Dish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.macros())
    }
}

/// A scheduled slot in the day plan holding one or more dishes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    pub id: String,
    pub time: String,
    pub name: String,
    pub dishes: Vec<Dish>,
}

impl Meal {
    pub fn new(id: impl Into<String>, time: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            time: time.into(),
            name: name.into(),
            dishes: Vec::new(),
        }
    }

    pub fn with_dish(mut self, dish: Dish) -> Self {
        self.dishes.push(dish);
        self
    }

    /// Sum of the macro fields of every dish in the meal.
    pub fn macros(&self) -> Macros {
        self.dishes
            .iter()
            .fold(Macros::default(), |acc, dish| acc + dish.macros())
    }
}

/// Id-indexed catalog of the meals planned for the session.
///
/// Meals keep their catalog order for rendering; lookups by meal or dish id go
/// through the index maps. Ids that are not in the catalog simply resolve to
/// `None`.
#[derive(Debug, Clone, Default)]
pub struct MealCatalog {
    meals: Vec<Meal>,
    meal_index: HashMap<String, usize>,
    dish_index: HashMap<String, (usize, usize)>,
}

impl MealCatalog {
    pub fn new(meals: Vec<Meal>) -> Self {
        let mut meal_index = HashMap::new();
        let mut dish_index = HashMap::new();

        for (mi, meal) in meals.iter().enumerate() {
            meal_index.entry(meal.id.clone()).or_insert(mi);
            for (di, dish) in meal.dishes.iter().enumerate() {
                dish_index.entry(dish.id.clone()).or_insert((mi, di));
            }
        }

        Self {
            meals,
            meal_index,
            dish_index,
        }
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    pub fn meal(&self, id: &str) -> Option<&Meal> {
        self.meal_index.get(id).map(|&i| &self.meals[i])
    }

    pub fn dish(&self, id: &str) -> Option<&Dish> {
        self.dish_index
            .get(id)
            .map(|&(mi, di)| &self.meals[mi].dishes[di])
    }

    pub fn contains_meal(&self, id: &str) -> bool {
        self.meal_index.contains_key(id)
    }

    pub fn contains_dish(&self, id: &str) -> bool {
        self.dish_index.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> MealCatalog {
        MealCatalog::new(vec![
            Meal::new("breakfast", "08:00", "Breakfast").with_dish(
                Dish::new("dish-1", "Oatmeal").with_macros(12.0, 45.0, 8.0, 295.0),
            ),
            Meal::new("lunch", "13:00", "Lunch")
                .with_dish(Dish::new("dish-2", "Chicken").with_macros(35.0, 40.0, 5.0, 340.0))
                .with_dish(Dish::new("dish-3", "Salad").with_macros(2.0, 6.0, 1.0, 40.0)),
        ])
    }

    #[test]
    fn test_catalog_lookup_by_id() {
        let catalog = sample_catalog();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.meal("lunch").unwrap().time, "13:00");
        assert_eq!(catalog.dish("dish-3").unwrap().name, "Salad");
    }

    #[test]
    fn test_catalog_unknown_ids_are_none() {
        let catalog = sample_catalog();
        assert!(catalog.meal("dinner").is_none());
        assert!(catalog.dish("dish-99").is_none());
        assert!(!catalog.contains_meal("dinner"));
        assert!(!catalog.contains_dish("dish-99"));
    }

    #[test]
    fn test_catalog_preserves_order() {
        let catalog = sample_catalog();
        let ids: Vec<&str> = catalog.meals().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["breakfast", "lunch"]);
    }

    #[test]
    fn test_meal_macros_sum_dishes() {
        let catalog = sample_catalog();
        let lunch = catalog.meal("lunch").unwrap().macros();
        assert_eq!(lunch.protein, 37.0);
        assert_eq!(lunch.carbs, 46.0);
        assert_eq!(lunch.fats, 6.0);
        assert_eq!(lunch.calories, 380.0);
    }

    #[test]
    fn test_dish_display() {
        let dish = Dish::new("d", "Apple").with_macros(6.0, 20.0, 8.0, 165.0);
        assert_eq!(format!("{}", dish), "Apple (P: 6g • C: 20g • F: 8g • 165 kcal)");
    }
}
