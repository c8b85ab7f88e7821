//! Ration Core Library
//!
//! Meal-plan and fridge state for Ration: persisted key/value state, macro
//! calculations, view models and the handlers that tie them together.

pub mod calc;
pub mod catalog;
pub mod error;
pub mod handlers;
pub mod http;
pub mod models;
pub mod notify;
pub mod onboarding;
pub mod presenter;
pub mod schedule;
pub mod search;
pub mod state;
pub mod store;
pub mod view;

pub use calc::{
    compute_bmr, compute_current_macros, compute_daily_calories, compute_macro_targets,
    percent_of_target, MacroTargets,
};
pub use error::{
    FieldErrors, HandlerError, OnboardingError, RequestError, StoreError, ValidationError,
};
pub use handlers::Controller;
pub use models::{
    ActivityLevel, Category, Dish, Macros, Meal, MealCatalog, Product, ProductInput,
    ProductUpdate, Sex, Theme, UnplannedMeal, UnplannedMealInput, Unit, UserProfile,
};
pub use notify::{Notification, NotificationCenter, NotificationKind};
pub use onboarding::{OnboardingWizard, StepInput};
pub use presenter::{Panel, Presenter};
pub use state::{AppState, Mutation, ProductAdded, Surface};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreKey};
pub use view::ViewModel;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
