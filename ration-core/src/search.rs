//! Autocomplete over the static product and dish suggestion lists.

use std::time::Duration;

use crate::catalog::{DishSuggestion, ProductSuggestion, DISH_SUGGESTIONS, PRODUCT_SUGGESTIONS};
use crate::models::Category;
use crate::schedule::Scheduler;

/// Delay between losing focus and hiding the dropdown, so a click on an item
/// can still land.
pub const HIDE_DELAY: Duration = Duration::from_millis(200);

/// Shortest dish query that produces suggestions.
pub const MIN_DISH_QUERY: usize = 2;

fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Product suggestions whose name contains the query. `None` means the dropdown
/// should be hidden.
pub fn suggest_products(query: &str) -> Option<Vec<ProductSuggestion>> {
    let query = normalize(query);
    if query.is_empty() {
        return None;
    }

    let matches: Vec<ProductSuggestion> = PRODUCT_SUGGESTIONS
        .iter()
        .filter(|s| s.name.to_lowercase().contains(&query))
        .copied()
        .collect();

    if matches.is_empty() {
        None
    } else {
        Some(matches)
    }
}

/// Dish suggestions for the unplanned-meal search. Queries shorter than
/// [`MIN_DISH_QUERY`] characters hide the list.
pub fn suggest_dishes(query: &str) -> Option<Vec<DishSuggestion>> {
    let query = normalize(query);
    if query.chars().count() < MIN_DISH_QUERY {
        return None;
    }

    Some(
        DISH_SUGGESTIONS
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&query))
            .copied()
            .collect(),
    )
}

/// Category of the suggestion with exactly this name, ignoring case.
pub fn infer_category(name: &str) -> Category {
    let name = normalize(name);
    PRODUCT_SUGGESTIONS
        .iter()
        .find(|s| s.name.to_lowercase() == name)
        .map(|s| s.category)
        .unwrap_or_default()
}

/// Dropdown state for a search input.
///
/// Blur schedules a hide after [`HIDE_DELAY`]; focus or new input before then
/// cancels it.
pub struct Autocomplete<T: Clone> {
    source: fn(&str) -> Option<Vec<T>>,
    query: String,
    items: Vec<T>,
    visible: bool,
    hide: Scheduler<(), ()>,
}

impl Autocomplete<ProductSuggestion> {
    pub fn products() -> Self {
        Self::new(suggest_products)
    }
}

impl Autocomplete<DishSuggestion> {
    pub fn dishes() -> Self {
        Self::new(suggest_dishes)
    }
}

impl<T: Clone> Autocomplete<T> {
    pub fn new(source: fn(&str) -> Option<Vec<T>>) -> Self {
        Self {
            source,
            query: String::new(),
            items: Vec::new(),
            visible: false,
            hide: Scheduler::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn hide_pending(&self) -> bool {
        self.hide.is_pending(&())
    }

    pub fn input(&mut self, query: &str) {
        self.hide.cancel(&());
        self.query = query.to_string();
        match (self.source)(query) {
            Some(items) => {
                self.items = items;
                self.visible = true;
            }
            None => {
                self.items.clear();
                self.visible = false;
            }
        }
    }

    pub fn focus(&mut self) {
        self.hide.cancel(&());
        if !self.items.is_empty() {
            self.visible = true;
        }
    }

    pub fn blur(&mut self) {
        self.hide.schedule((), HIDE_DELAY, ());
    }

    pub fn advance(&mut self, by: Duration) {
        if !self.hide.advance(by).is_empty() {
            self.visible = false;
        }
    }

    /// Pick a visible item. The dropdown closes and the item is returned.
    pub fn select(&mut self, index: usize) -> Option<T> {
        if !self.visible {
            return None;
        }
        let item = self.items.get(index).cloned()?;
        self.hide.cancel(&());
        self.visible = false;
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_products_substring() {
        let names: Vec<&str> = suggest_products("  CHEE ")
            .unwrap()
            .iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Cottage cheese", "Cheese"]);
    }

    #[test]
    fn test_suggest_products_empty_or_no_match_hides() {
        assert!(suggest_products("").is_none());
        assert!(suggest_products("   ").is_none());
        assert!(suggest_products("durian").is_none());
    }

    #[test]
    fn test_suggest_dishes_needs_two_chars() {
        assert!(suggest_dishes("s").is_none());
        let found = suggest_dishes("so").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Tomato soup");
        assert!(suggest_dishes("zz").unwrap().is_empty());
    }

    #[test]
    fn test_infer_category_exact_match_only() {
        assert_eq!(infer_category("milk"), Category::Dairy);
        assert_eq!(infer_category("Olive oil"), Category::Other);
        assert_eq!(infer_category("Beef"), Category::Meat);
        assert_eq!(infer_category("Beef jerky"), Category::Other);
    }

    #[test]
    fn test_blur_hides_after_delay() {
        let mut dropdown = Autocomplete::products();
        dropdown.input("to");
        assert!(dropdown.is_visible());

        dropdown.blur();
        dropdown.advance(Duration::from_millis(199));
        assert!(dropdown.is_visible());
        dropdown.advance(Duration::from_millis(1));
        assert!(!dropdown.is_visible());
    }

    #[test]
    fn test_focus_cancels_pending_hide() {
        let mut dropdown = Autocomplete::products();
        dropdown.input("rice");
        dropdown.blur();
        dropdown.advance(Duration::from_millis(100));
        dropdown.focus();

        assert!(!dropdown.hide_pending());
        dropdown.advance(Duration::from_secs(1));
        assert!(dropdown.is_visible());
    }

    #[test]
    fn test_input_cancels_pending_hide() {
        let mut dropdown = Autocomplete::dishes();
        dropdown.input("be");
        dropdown.blur();
        dropdown.input("bee");

        dropdown.advance(Duration::from_secs(1));
        assert!(dropdown.is_visible());
        assert_eq!(dropdown.items()[0].name, "Beef steak");
    }

    #[test]
    fn test_select_closes_dropdown() {
        let mut dropdown = Autocomplete::products();
        dropdown.input("ban");
        let picked = dropdown.select(0).unwrap();

        assert_eq!(picked.name, "Bananas");
        assert!(!dropdown.is_visible());
        assert!(dropdown.select(0).is_none());
    }
}
