//! Interaction handlers.
//!
//! [`Controller`] owns the state, the store and the presenter for one session
//! and exposes one method per user action. Each method mutates the state (which
//! persists and recomputes), re-renders every surface the mutation touched, and
//! reports the outcome through the presenter.
//!
//! Failures never escape a handler. Validation problems go to the form that
//! caused them; anything else is logged with the handler name and shown as a
//! single generic notice. Handlers return `None` when nothing was done.

use crate::catalog::PLACEHOLDER_DISH_MACROS;
use crate::error::{HandlerError, ValidationError};
use crate::http::{self, RequestOptions, ResponseBody};
use crate::models::{
    MealCatalog, Product, ProductInput, ProductUpdate, Theme, UnplannedMeal, UnplannedMealInput,
};
use crate::notify::Notification;
use crate::onboarding::{OnboardingWizard, StepInput};
use crate::presenter::{Panel, Presenter};
use crate::state::{AppState, Mutation, ProductAdded, Surface};
use crate::store::KeyValueStore;
use crate::view;

pub const REGENERATE_MESSAGE: &str = "The plan will be updated with your preferences";
pub const COMPOSE_MESSAGE: &str = "Diet composition is coming soon";
pub const PROFILE_CREATED_MESSAGE: &str = "Profile created successfully!";
pub const PRODUCT_UPDATED_MESSAGE: &str = "Product updated";

pub struct Controller<S: KeyValueStore, P: Presenter> {
    state: AppState,
    store: S,
    presenter: P,
}

impl<S: KeyValueStore, P: Presenter> Controller<S, P> {
    pub fn new(state: AppState, store: S, presenter: P) -> Self {
        Self {
            state,
            store,
            presenter,
        }
    }

    /// Load the state from `store` and wrap it.
    pub fn load(store: S, presenter: P, catalog: MealCatalog, default_theme: Theme) -> Self {
        let state = AppState::load(&store, catalog, default_theme);
        Self::new(state, store, presenter)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    /// Render the given surfaces from the current state.
    pub fn render(&mut self, surfaces: &[Surface]) {
        for surface in surfaces {
            let view = view::render(&self.state, *surface);
            self.presenter.render(&view);
        }
    }

    fn commit<T>(&mut self, mutation: Mutation<T>) -> T {
        self.render(mutation.surfaces);
        mutation.value
    }

    fn guard<T>(
        &mut self,
        handler: &'static str,
        panel: Panel,
        f: impl FnOnce(&mut Self) -> Result<T, HandlerError>,
    ) -> Option<T> {
        match f(self) {
            Ok(value) => Some(value),
            Err(e) => {
                self.report(handler, panel, e);
                None
            }
        }
    }

    fn report(&mut self, handler: &'static str, panel: Panel, err: HandlerError) {
        match err {
            HandlerError::Validation(e) => {
                tracing::debug!("{} rejected: {}", handler, e);
                self.presenter.field_errors(panel, &e.fields);
            }
            HandlerError::Request(e) => {
                tracing::error!("Network error in {}: {}", handler, e);
                self.presenter.notify(Notification::network_error());
            }
            HandlerError::Unexpected(message) => {
                tracing::error!("Error in {}: {}", handler, message);
                self.presenter.notify(Notification::generic_error());
            }
        }
    }

    pub fn toggle_meal_eaten(&mut self, meal_id: &str) -> bool {
        let mutation = self.state.toggle_meal_eaten(&self.store, meal_id);
        self.commit(mutation)
    }

    pub fn toggle_dish_disliked(&mut self, dish_id: &str) -> bool {
        let mutation = self.state.toggle_dish_disliked(&self.store, dish_id);
        self.commit(mutation)
    }

    /// Clear the disliked dishes. The plan itself is not rebuilt yet.
    pub fn regenerate_plan(&mut self) -> Vec<String> {
        let mutation = self.state.clear_disliked_and_regenerate(&self.store);
        let cleared = self.commit(mutation);
        self.presenter.notify(Notification::success(REGENERATE_MESSAGE));
        cleared
    }

    pub fn compose_diet(&mut self) {
        self.presenter.notify(Notification::info(COMPOSE_MESSAGE));
    }

    pub fn add_unplanned_meal(&mut self, input: UnplannedMealInput) -> Option<UnplannedMeal> {
        self.guard("add_unplanned_meal", Panel::AddUnplannedMeal, |c| {
            let mutation = c.state.add_unplanned_meal(&c.store, input)?;
            let meal = c.commit(mutation);
            c.presenter.close_panel(Panel::AddUnplannedMeal);
            c.presenter
                .notify(Notification::success(format!("{} added to the plan", meal.name)));
            Ok(meal)
        })
    }

    /// Add an unplanned meal picked by name from the dish search.
    ///
    /// Nutrition comes from a fixed placeholder until a lookup service exists.
    pub fn add_unplanned_from_search(&mut self, dish_name: &str) -> Option<UnplannedMeal> {
        if dish_name.trim().is_empty() {
            let err = ValidationError::field("name", "Please choose a dish");
            self.report("add_unplanned_from_search", Panel::AddUnplannedMeal, err.into());
            return None;
        }
        let input = UnplannedMealInput::named(dish_name).with_macros(PLACEHOLDER_DISH_MACROS);
        self.add_unplanned_meal(input)
    }

    pub fn remove_unplanned_meal(&mut self, id: &str) -> Option<UnplannedMeal> {
        let mutation = self.state.remove_unplanned_meal(&self.store, id);
        let removed = self.commit(mutation)?;
        self.presenter
            .notify(Notification::success(format!("{} removed from the plan", removed.name)));
        Some(removed)
    }

    pub fn add_product(&mut self, input: ProductInput) -> Option<ProductAdded> {
        self.guard("add_product", Panel::AddProduct, |c| {
            let mutation = c.state.add_product(&c.store, input)?;
            let added = c.commit(mutation);
            let message = match &added {
                ProductAdded::Created(p) => format!("{} added to the list", p.name),
                ProductAdded::Merged { name, .. } => format!("{} quantity updated", name),
            };
            c.presenter.notify(Notification::success(message));
            Ok(added)
        })
    }

    /// Open the edit dialog for a product. Unknown ids do nothing.
    pub fn open_edit_product(&mut self, id: &str) -> Option<Product> {
        let product = self.state.product(id)?.clone();
        self.presenter.open_panel(Panel::EditProduct);
        Some(product)
    }

    pub fn edit_product(&mut self, id: &str, update: ProductUpdate) -> Option<Product> {
        self.guard("edit_product", Panel::EditProduct, |c| {
            let mutation = c.state.edit_product(&c.store, id, update)?;
            let Some(product) = c.commit(mutation) else {
                return Ok(None);
            };
            c.presenter.close_panel(Panel::EditProduct);
            c.presenter.notify(Notification::success(PRODUCT_UPDATED_MESSAGE));
            Ok(Some(product))
        })
        .flatten()
    }

    /// Delete a product after the user confirms.
    pub fn delete_product(&mut self, id: &str) -> Option<Product> {
        let name = self.state.product(id)?.name.clone();
        if !self
            .presenter
            .confirm(&format!("Remove {} from the fridge?", name))
        {
            return None;
        }

        let mutation = self.state.delete_product(&self.store, id);
        let removed = self.commit(mutation)?;
        self.presenter.notify(Notification::success(format!(
            "{} removed from the fridge",
            removed.name
        )));
        Some(removed)
    }

    /// Submit the current onboarding step. Returns the step now shown.
    pub fn onboarding_next(
        &mut self,
        wizard: &mut OnboardingWizard,
        input: StepInput,
    ) -> Option<usize> {
        self.guard("onboarding_next", Panel::Onboarding, |_| {
            Ok(wizard.next(input)?)
        })
    }

    /// Finish onboarding: store the profile and leave the wizard.
    pub fn finish_onboarding(&mut self, wizard: &mut OnboardingWizard, input: StepInput) -> bool {
        self.guard("finish_onboarding", Panel::Onboarding, |c| {
            let profile = wizard.finish(input)?;
            let mutation = c.state.complete_onboarding(&c.store, profile);
            c.commit(mutation);
            c.presenter.notify(Notification::success(PROFILE_CREATED_MESSAGE));
            c.presenter.close_panel(Panel::Onboarding);
            Ok(())
        })
        .is_some()
    }

    pub fn set_theme(&mut self, theme: Theme) -> Theme {
        let mutation = self.state.set_theme(&self.store, theme);
        self.commit(mutation)
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let mutation = self.state.toggle_theme(&self.store);
        self.commit(mutation)
    }

    /// Ask the nutrition service about `query`.
    pub async fn lookup(&mut self, base_url: &str, query: &str) -> Option<ResponseBody> {
        let url = match reqwest::Url::parse_with_params(base_url, &[("query", query)]) {
            Ok(url) => url,
            Err(e) => {
                let err = HandlerError::Unexpected(format!("Invalid lookup URL '{}': {}", base_url, e));
                self.report("lookup", Panel::AddProduct, err);
                return None;
            }
        };

        match http::request(url.as_str(), RequestOptions::new()).await {
            Ok(body) => Some(body),
            Err(e) => {
                self.report("lookup", Panel::AddProduct, e.into());
                None
            }
        }
    }
}
