//! Static data standing in for an external planning and nutrition source.

use crate::models::{Category, Dish, Macros, Meal, MealCatalog};

/// The day plan offered until a planning service exists.
pub fn default_day_plan() -> MealCatalog {
    MealCatalog::new(vec![
        Meal::new("breakfast", "08:00", "Breakfast").with_dish(
            Dish::new("dish-1", "Oatmeal with banana")
                .with_macros(12.0, 45.0, 8.0, 295.0)
                .with_ingredients(strings(&[
                    "Rolled oats 50g",
                    "Banana 1 pc",
                    "Milk 200ml",
                    "Honey 1 tsp",
                ])),
        ),
        Meal::new("lunch", "13:00", "Lunch").with_dish(
            Dish::new("dish-2", "Chicken breast with rice")
                .with_macros(35.0, 40.0, 5.0, 340.0)
                .with_ingredients(strings(&[
                    "Chicken breast 150g",
                    "Rice 80g",
                    "Vegetables 100g",
                    "Olive oil 5ml",
                ])),
        ),
        Meal::new("dinner", "18:00", "Dinner").with_dish(
            Dish::new("dish-3", "Fish with vegetables")
                .with_macros(28.0, 15.0, 12.0, 265.0)
                .with_ingredients(strings(&[
                    "Salmon 120g",
                    "Broccoli 150g",
                    "Carrot 100g",
                    "Lemon 1/2 pc",
                ])),
        ),
        Meal::new("snack1", "10:30", "Snack").with_dish(
            Dish::new("dish-4", "Greek yogurt with nuts")
                .with_macros(15.0, 8.0, 10.0, 175.0)
                .with_ingredients(strings(&[
                    "Greek yogurt 150g",
                    "Walnuts 20g",
                    "Berries 50g",
                ])),
        ),
        Meal::new("snack2", "16:00", "Snack").with_dish(
            Dish::new("dish-5", "Apple with almonds")
                .with_macros(6.0, 20.0, 8.0, 165.0)
                .with_ingredients(strings(&["Apple 1 pc", "Almonds 15g"])),
        ),
    ])
}

/// A product name offered by the fridge autocomplete.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductSuggestion {
    pub name: &'static str,
    pub category: Category,
}

pub const PRODUCT_SUGGESTIONS: &[ProductSuggestion] = &[
    ProductSuggestion { name: "Milk", category: Category::Dairy },
    ProductSuggestion { name: "Bread", category: Category::Grains },
    ProductSuggestion { name: "Eggs", category: Category::Other },
    ProductSuggestion { name: "Chicken", category: Category::Meat },
    ProductSuggestion { name: "Tomatoes", category: Category::Vegetables },
    ProductSuggestion { name: "Apples", category: Category::Fruits },
    ProductSuggestion { name: "Rice", category: Category::Grains },
    ProductSuggestion { name: "Cottage cheese", category: Category::Dairy },
    ProductSuggestion { name: "Onion", category: Category::Vegetables },
    ProductSuggestion { name: "Carrots", category: Category::Vegetables },
    ProductSuggestion { name: "Potatoes", category: Category::Vegetables },
    ProductSuggestion { name: "Beef", category: Category::Meat },
    ProductSuggestion { name: "Fish", category: Category::Meat },
    ProductSuggestion { name: "Cheese", category: Category::Dairy },
    ProductSuggestion { name: "Bananas", category: Category::Fruits },
    ProductSuggestion { name: "Buckwheat", category: Category::Grains },
    ProductSuggestion { name: "Pasta", category: Category::Grains },
    ProductSuggestion { name: "Olive oil", category: Category::Other },
];

/// A dish offered by the unplanned-meal autocomplete, with its nutrition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DishSuggestion {
    pub name: &'static str,
    pub macros: Macros,
}

pub const DISH_SUGGESTIONS: &[DishSuggestion] = &[
    DishSuggestion {
        name: "Caesar salad",
        macros: Macros { protein: 15.0, carbs: 12.0, fats: 18.0, calories: 250.0 },
    },
    DishSuggestion {
        name: "Tomato soup",
        macros: Macros { protein: 4.0, carbs: 15.0, fats: 3.0, calories: 95.0 },
    },
    DishSuggestion {
        name: "Beef steak",
        macros: Macros { protein: 35.0, carbs: 0.0, fats: 15.0, calories: 280.0 },
    },
];

/// Nutrition assumed for a dish picked by name until a lookup service exists.
pub const PLACEHOLDER_DISH_MACROS: Macros = Macros {
    protein: 10.0,
    carbs: 20.0,
    fats: 5.0,
    calories: 160.0,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
