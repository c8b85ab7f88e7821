//! Pure projections from [`AppState`] to plain view data.
//!
//! Every function here is total and carries no state between calls, so rendering
//! the same state twice yields equal values. A presenter turns these into actual
//! output; nothing in this module knows how.

use serde::Serialize;

use crate::calc::percent_of_target;
use crate::models::{format_quantity, Category, Macros, MacroPair, Nutrition, Theme};
use crate::state::{AppState, Surface};

pub const UNPLANNED_BADGE: &str = "Unplanned";

/// The complete picture of one surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "surface", rename_all = "snake_case")]
pub enum ViewModel {
    MacroProgress(MacroProgressView),
    MealList(MealListView),
    Regenerate(RegenerateView),
    Fridge(FridgeView),
    Theme(ThemeView),
}

impl ViewModel {
    pub fn surface(&self) -> Surface {
        match self {
            ViewModel::MacroProgress(_) => Surface::MacroProgress,
            ViewModel::MealList(_) => Surface::MealList,
            ViewModel::Regenerate(_) => Surface::Regenerate,
            ViewModel::Fridge(_) => Surface::Fridge,
            ViewModel::Theme(_) => Surface::Theme,
        }
    }
}

/// Render one surface.
pub fn render(state: &AppState, surface: Surface) -> ViewModel {
    match surface {
        Surface::MacroProgress => ViewModel::MacroProgress(macro_progress(state)),
        Surface::MealList => ViewModel::MealList(meal_list(state)),
        Surface::Regenerate => ViewModel::Regenerate(regenerate(state)),
        Surface::Fridge => ViewModel::Fridge(fridge(state)),
        Surface::Theme => ViewModel::Theme(ThemeView {
            theme: state.theme(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroBar {
    pub label: &'static str,
    pub unit: &'static str,
    pub current: f64,
    pub target: f64,
    pub percent: f64,
}

impl MacroBar {
    fn new(label: &'static str, unit: &'static str, pair: MacroPair) -> Self {
        Self {
            label,
            unit,
            current: pair.current,
            target: pair.target,
            percent: percent_of_target(pair.current, pair.target),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroProgressView {
    pub bars: Vec<MacroBar>,
}

pub fn macro_progress(state: &AppState) -> MacroProgressView {
    let totals = state.macros();
    MacroProgressView {
        bars: vec![
            MacroBar::new("Protein", "g", totals.protein),
            MacroBar::new("Carbs", "g", totals.carbs),
            MacroBar::new("Fats", "g", totals.fats),
            MacroBar::new("Calories", "kcal", totals.calories),
        ],
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DishRow {
    pub id: String,
    pub name: String,
    pub macros: Macros,
    pub ingredients: Vec<String>,
    pub disliked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MealRow {
    Planned {
        id: String,
        time: String,
        name: String,
        completed: bool,
        disliked: bool,
        dishes: Vec<DishRow>,
    },
    Unplanned {
        id: String,
        name: String,
        badge: &'static str,
        macros: Macros,
    },
}

impl MealRow {
    pub fn id(&self) -> &str {
        match self {
            MealRow::Planned { id, .. } | MealRow::Unplanned { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealListView {
    pub rows: Vec<MealRow>,
}

/// Planned meals in catalog order, then unplanned meals in the order added.
pub fn meal_list(state: &AppState) -> MealListView {
    let mut rows = Vec::with_capacity(state.catalog().len() + state.unplanned().len());

    for meal in state.catalog().meals() {
        let dishes: Vec<DishRow> = meal
            .dishes
            .iter()
            .map(|dish| DishRow {
                id: dish.id.clone(),
                name: dish.name.clone(),
                macros: dish.macros(),
                ingredients: dish.ingredients.clone(),
                disliked: state.is_disliked(&dish.id),
            })
            .collect();

        rows.push(MealRow::Planned {
            id: meal.id.clone(),
            time: meal.time.clone(),
            name: meal.name.clone(),
            completed: state.is_eaten(&meal.id),
            disliked: dishes.iter().any(|d| d.disliked),
            dishes,
        });
    }

    for meal in state.unplanned() {
        rows.push(MealRow::Unplanned {
            id: meal.id.clone(),
            name: meal.name.clone(),
            badge: UNPLANNED_BADGE,
            macros: meal.macros(),
        });
    }

    MealListView { rows }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegenerateView {
    pub visible: bool,
    pub count: usize,
    pub label: String,
}

pub fn regenerate(state: &AppState) -> RegenerateView {
    let count = state.disliked().len();
    RegenerateView {
        visible: count > 0,
        count,
        label: format!("Update plan ({} dishes)", count),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub quantity: String,
    pub unit: &'static str,
    pub category: &'static str,
    pub nutrition: Option<Nutrition>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FridgeView {
    pub total: usize,
    pub categories: usize,
    pub products: Vec<ProductRow>,
}

impl FridgeView {
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

pub fn fridge(state: &AppState) -> FridgeView {
    let mut categories: Vec<Category> = state.products().iter().map(|p| p.category).collect();
    categories.sort();
    categories.dedup();

    let products = state
        .products()
        .iter()
        .map(|p| ProductRow {
            id: p.id.clone(),
            name: p.name.clone(),
            quantity: format_quantity(p.quantity),
            unit: p.unit.display_name(),
            category: p.category.display_name(),
            nutrition: p.nutrition,
        })
        .collect();

    FridgeView {
        total: state.products().len(),
        categories: categories.len(),
        products,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeView {
    pub theme: Theme,
}
