mod macros;
mod meal;
mod product;
mod profile;
mod theme;
mod unplanned;

pub use macros::{
    MacroPair, MacroTotals, Macros, DEFAULT_CALORIES_TARGET, DEFAULT_CARBS_TARGET,
    DEFAULT_FATS_TARGET, DEFAULT_PROTEIN_TARGET,
};
pub use meal::{Dish, Meal, MealCatalog};
pub use product::{
    format_quantity, Category, Nutrition, Product, ProductInput, ProductUpdate, Unit,
};
pub use profile::{ActivityLevel, CookingSkill, Goal, PreferredUnits, Sex, UserProfile};
pub use theme::Theme;
pub use unplanned::{UnplannedMeal, UnplannedMealInput};

/// Opaque client-side id for user-created records.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
