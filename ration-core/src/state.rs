//! Application state store.
//!
//! [`AppState`] is the in-memory snapshot every view is rendered from. It is
//! loaded once from a [`KeyValueStore`] and then mutated only through the methods
//! below, each of which follows the same sequence:
//!
//! 1. validate the input (rejections leave the state untouched)
//! 2. update the snapshot
//! 3. persist the changed slice
//! 4. recompute derived totals
//! 5. report which [`Surface`]s must be re-rendered
//!
//! A failed write in step 3 is logged by the store and otherwise ignored, so the
//! snapshot and the store can diverge until the next load.

use chrono::Utc;
use std::collections::BTreeSet;

use crate::calc::compute_current_macros;
use crate::error::{FieldErrors, ValidationError};
use crate::models::{
    generate_id, MacroTotals, Macros, MealCatalog, Product, ProductInput, ProductUpdate, Theme,
    UnplannedMeal, UnplannedMealInput, Unit, UserProfile, DEFAULT_CALORIES_TARGET,
    DEFAULT_CARBS_TARGET, DEFAULT_FATS_TARGET, DEFAULT_PROTEIN_TARGET,
};
use crate::search::infer_category;
use crate::store::{KeyValueStore, StoreKey};

const REQUIRED: &str = "This field is required";
const TOO_LARGE: &str = "Quantity is too large";

/// An independently rendered part of the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    MacroProgress,
    MealList,
    Regenerate,
    Fridge,
    Theme,
}

/// Result of a state operation plus the surfaces it invalidated.
///
/// No-op operations (unknown id, declined change) report no surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation<T> {
    pub value: T,
    pub surfaces: &'static [Surface],
}

impl<T> Mutation<T> {
    fn new(value: T, surfaces: &'static [Surface]) -> Self {
        Self { value, surfaces }
    }

    fn unchanged(value: T) -> Self {
        Self {
            value,
            surfaces: &[],
        }
    }

    pub fn is_noop(&self) -> bool {
        self.surfaces.is_empty()
    }
}

/// How an added product landed in the fridge.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAdded {
    /// A new entry was appended.
    Created(Product),
    /// An existing entry with the same name and unit absorbed the quantity.
    /// `name` is the name as submitted, which may differ in case.
    Merged { product: Product, name: String },
}

impl ProductAdded {
    pub fn product(&self) -> &Product {
        match self {
            ProductAdded::Created(product) | ProductAdded::Merged { product, .. } => product,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    profile: Option<UserProfile>,
    onboarding_completed: bool,
    catalog: MealCatalog,
    eaten: BTreeSet<String>,
    disliked: BTreeSet<String>,
    unplanned: Vec<UnplannedMeal>,
    products: Vec<Product>,
    macros: MacroTotals,
    theme: Theme,
}

impl AppState {
    /// Build the snapshot from whatever the store holds.
    ///
    /// Absent or unreadable keys fall back to empty values; `default_theme` is
    /// used when no theme has been stored yet.
    pub fn load<S: KeyValueStore>(store: &S, catalog: MealCatalog, default_theme: Theme) -> Self {
        let profile: Option<UserProfile> = store.get_opt(StoreKey::UserProfile);
        let eaten: Vec<String> = store.get(StoreKey::EatenMeals, Vec::new());
        let disliked: Vec<String> = store.get(StoreKey::DislikedMeals, Vec::new());

        let mut state = Self {
            macros: MacroTotals::with_targets(targets_for(profile.as_ref())),
            profile,
            onboarding_completed: store.get(StoreKey::OnboardingCompleted, false),
            catalog,
            eaten: eaten.into_iter().collect(),
            disliked: disliked.into_iter().collect(),
            unplanned: store.get(StoreKey::UnplannedMeals, Vec::new()),
            products: store.get(StoreKey::Products, Vec::new()),
            theme: store.get(StoreKey::Theme, default_theme),
        };
        state.recompute_macros();

        tracing::debug!(
            "Loaded state: {} eaten, {} disliked, {} unplanned, {} products",
            state.eaten.len(),
            state.disliked.len(),
            state.unplanned.len(),
            state.products.len()
        );

        state
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn onboarding_completed(&self) -> bool {
        self.onboarding_completed
    }

    pub fn catalog(&self) -> &MealCatalog {
        &self.catalog
    }

    pub fn eaten(&self) -> &BTreeSet<String> {
        &self.eaten
    }

    pub fn is_eaten(&self, meal_id: &str) -> bool {
        self.eaten.contains(meal_id)
    }

    pub fn disliked(&self) -> &BTreeSet<String> {
        &self.disliked
    }

    pub fn is_disliked(&self, dish_id: &str) -> bool {
        self.disliked.contains(dish_id)
    }

    pub fn unplanned(&self) -> &[UnplannedMeal] {
        &self.unplanned
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn macros(&self) -> &MacroTotals {
        &self.macros
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip whether a meal has been eaten. Returns the new membership.
    pub fn toggle_meal_eaten<S: KeyValueStore>(
        &mut self,
        store: &S,
        meal_id: &str,
    ) -> Mutation<bool> {
        let eaten = toggle(&mut self.eaten, meal_id);
        store.set(StoreKey::EatenMeals, &self.eaten);
        self.recompute_macros();

        tracing::debug!("Meal '{}' eaten: {}", meal_id, eaten);
        Mutation::new(eaten, &[Surface::MacroProgress, Surface::MealList])
    }

    /// Flip whether a dish is disliked. Returns the new membership.
    ///
    /// Disliking only marks the dish; the meal stays in the plan.
    pub fn toggle_dish_disliked<S: KeyValueStore>(
        &mut self,
        store: &S,
        dish_id: &str,
    ) -> Mutation<bool> {
        let disliked = toggle(&mut self.disliked, dish_id);
        store.set(StoreKey::DislikedMeals, &self.disliked);

        tracing::debug!("Dish '{}' disliked: {}", dish_id, disliked);
        Mutation::new(disliked, &[Surface::Regenerate, Surface::MealList])
    }

    /// Empty the disliked set. Returns the ids that were cleared.
    ///
    /// No plan regeneration happens yet; there is no planning source to ask.
    pub fn clear_disliked_and_regenerate<S: KeyValueStore>(
        &mut self,
        store: &S,
    ) -> Mutation<Vec<String>> {
        let cleared: Vec<String> = std::mem::take(&mut self.disliked).into_iter().collect();
        store.set(StoreKey::DislikedMeals, &self.disliked);

        tracing::info!("Regenerate requested for disliked dishes: {:?}", cleared);
        Mutation::new(cleared, &[Surface::Regenerate, Surface::MealList])
    }

    pub fn add_unplanned_meal<S: KeyValueStore>(
        &mut self,
        store: &S,
        input: UnplannedMealInput,
    ) -> Result<Mutation<UnplannedMeal>, ValidationError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ValidationError::field("name", "Please enter a dish name"));
        }

        let macros = input.macros();
        let meal = UnplannedMeal {
            id: generate_id(),
            name: name.to_string(),
            protein: or_zero(macros.protein),
            carbs: or_zero(macros.carbs),
            fats: or_zero(macros.fats),
            calories: or_zero(macros.calories),
            added_at: Utc::now(),
        };

        self.unplanned.push(meal.clone());
        store.set(StoreKey::UnplannedMeals, &self.unplanned);
        self.recompute_macros();

        Ok(Mutation::new(
            meal,
            &[Surface::MacroProgress, Surface::MealList],
        ))
    }

    /// Remove an unplanned meal. An unknown id is a no-op.
    pub fn remove_unplanned_meal<S: KeyValueStore>(
        &mut self,
        store: &S,
        id: &str,
    ) -> Mutation<Option<UnplannedMeal>> {
        let Some(index) = self.unplanned.iter().position(|m| m.id == id) else {
            return Mutation::unchanged(None);
        };

        let removed = self.unplanned.remove(index);
        store.set(StoreKey::UnplannedMeals, &self.unplanned);
        self.recompute_macros();

        Mutation::new(
            Some(removed),
            &[Surface::MacroProgress, Surface::MealList],
        )
    }

    /// Add a product to the fridge, merging into an entry with the same
    /// case-insensitive name and unit.
    pub fn add_product<S: KeyValueStore>(
        &mut self,
        store: &S,
        input: ProductInput,
    ) -> Result<Mutation<ProductAdded>, ValidationError> {
        let (name, quantity, unit) = validate_product_input(&input)?;

        let added = match self.products.iter_mut().find(|p| p.merges_with(&name, unit)) {
            Some(existing) => {
                let total = existing.quantity + quantity;
                if !total.is_finite() {
                    return Err(ValidationError::field("quantity", TOO_LARGE));
                }
                existing.quantity = total;
                ProductAdded::Merged {
                    product: existing.clone(),
                    name,
                }
            }
            None => {
                let product = Product {
                    id: generate_id(),
                    category: infer_category(&name),
                    name,
                    quantity,
                    unit,
                    nutrition: input.nutrition(),
                    added_at: Utc::now(),
                };
                self.products.push(product.clone());
                ProductAdded::Created(product)
            }
        };

        store.set(StoreKey::Products, &self.products);
        Ok(Mutation::new(added, &[Surface::Fridge]))
    }

    /// Replace a product's name, quantity and unit. An unknown id is a no-op.
    pub fn edit_product<S: KeyValueStore>(
        &mut self,
        store: &S,
        id: &str,
        update: ProductUpdate,
    ) -> Result<Mutation<Option<Product>>, ValidationError> {
        let mut errors = FieldErrors::new();
        let name = update.name.trim().to_string();
        if name.is_empty() {
            errors.add("name", REQUIRED);
        }
        if !update.quantity.is_finite() {
            errors.add("quantity", "Must be a number");
        }
        errors.into_result()?;

        let Some(product) = self.products.iter_mut().find(|p| p.id == id) else {
            return Ok(Mutation::unchanged(None));
        };

        product.name = name;
        product.quantity = update.quantity;
        product.unit = update.unit;
        let updated = product.clone();

        store.set(StoreKey::Products, &self.products);
        Ok(Mutation::new(Some(updated), &[Surface::Fridge]))
    }

    /// Remove a product. An unknown id is a no-op.
    pub fn delete_product<S: KeyValueStore>(
        &mut self,
        store: &S,
        id: &str,
    ) -> Mutation<Option<Product>> {
        let Some(index) = self.products.iter().position(|p| p.id == id) else {
            return Mutation::unchanged(None);
        };

        let removed = self.products.remove(index);
        store.set(StoreKey::Products, &self.products);
        Mutation::new(Some(removed), &[Surface::Fridge])
    }

    /// Store a freshly computed profile and mark onboarding as done.
    pub fn complete_onboarding<S: KeyValueStore>(
        &mut self,
        store: &S,
        profile: UserProfile,
    ) -> Mutation<()> {
        store.set(StoreKey::UserProfile, &profile);
        store.set(StoreKey::OnboardingCompleted, &true);

        self.macros = MacroTotals::with_targets(targets_for(Some(&profile)));
        self.profile = Some(profile);
        self.onboarding_completed = true;
        self.recompute_macros();

        Mutation::new((), &[Surface::MacroProgress])
    }

    pub fn set_theme<S: KeyValueStore>(&mut self, store: &S, theme: Theme) -> Mutation<Theme> {
        self.theme = theme;
        store.set(StoreKey::Theme, &theme);
        Mutation::new(theme, &[Surface::Theme])
    }

    pub fn toggle_theme<S: KeyValueStore>(&mut self, store: &S) -> Mutation<Theme> {
        self.set_theme(store, self.theme.toggled())
    }

    fn recompute_macros(&mut self) {
        let current = compute_current_macros(&self.catalog, &self.eaten, &self.unplanned);
        self.macros.set_current(current);
    }
}

/// Targets from the profile, with defaults for a missing profile or zero values.
fn targets_for(profile: Option<&UserProfile>) -> Macros {
    let pick = |value: Option<i64>, default: f64| match value {
        Some(v) if v != 0 => v as f64,
        _ => default,
    };
    Macros {
        protein: pick(profile.map(|p| p.protein_target), DEFAULT_PROTEIN_TARGET),
        carbs: pick(profile.map(|p| p.carbs_target), DEFAULT_CARBS_TARGET),
        fats: pick(profile.map(|p| p.fats_target), DEFAULT_FATS_TARGET),
        calories: pick(profile.map(|p| p.calories_target), DEFAULT_CALORIES_TARGET),
    }
}

fn toggle(set: &mut BTreeSet<String>, id: &str) -> bool {
    if set.remove(id) {
        false
    } else {
        set.insert(id.to_string());
        true
    }
}

/// Non-finite numbers cannot be stored as JSON and count as zero.
fn or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn validate_product_input(input: &ProductInput) -> Result<(String, f64, Unit), ValidationError> {
    let mut errors = FieldErrors::new();

    let name = input.name.trim().to_string();
    if name.is_empty() {
        errors.add("name", REQUIRED);
    }

    let raw_quantity = input.quantity.trim();
    let quantity = if raw_quantity.is_empty() {
        errors.add("quantity", REQUIRED);
        None
    } else {
        match raw_quantity.parse::<f64>() {
            Ok(q) if q.is_finite() => Some(q),
            _ => {
                errors.add("quantity", "Must be a number");
                None
            }
        }
    };

    let raw_unit = input.unit.trim();
    let unit = if raw_unit.is_empty() {
        errors.add("unit", REQUIRED);
        None
    } else {
        match raw_unit.parse::<Unit>() {
            Ok(u) => Some(u),
            Err(e) => {
                errors.add("unit", e);
                None
            }
        }
    };

    errors.into_result()?;
    match (quantity, unit) {
        (Some(quantity), Some(unit)) => Ok((name, quantity, unit)),
        _ => Err(ValidationError::field("quantity", REQUIRED)),
    }
}
