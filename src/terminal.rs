//! Terminal presenter: turns view models into text or JSON on a writer.

use std::io::{self, BufRead, Write};

use ration_core::models::format_quantity;
use ration_core::notify::NotificationKind;
use ration_core::view::{FridgeView, MacroProgressView, MealListView, MealRow, RegenerateView};
use ration_core::{FieldErrors, Notification, Panel, Presenter, ViewModel};

use crate::commands::OutputFormat;

const BAR_WIDTH: usize = 20;

pub struct TerminalPresenter<W: Write> {
    out: W,
    format: OutputFormat,
    assume_yes: bool,
    failed: bool,
}

impl TerminalPresenter<io::Stdout> {
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            assume_yes: false,
            failed: false,
        }
    }

    /// Answer every confirmation with yes.
    pub fn set_assume_yes(&mut self, assume_yes: bool) {
        self.assume_yes = assume_yes;
    }

    /// Whether an error notice or validation message was shown.
    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print an informational line that is not a notification.
    pub fn note(&mut self, text: &str) {
        match self.format {
            OutputFormat::Json => self.json(&serde_json::json!({ "note": text })),
            OutputFormat::Text => self.line(text),
        }
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            tracing::debug!("Failed to write output: {}", e);
        }
    }

    fn json<T: serde::Serialize>(&mut self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => self.line(&json),
            Err(e) => tracing::error!("Failed to encode output: {}", e),
        }
    }

    fn macro_progress(&mut self, view: &MacroProgressView) {
        self.line("Today's macros");
        self.line(&"=".repeat(44));
        for bar in &view.bars {
            let filled = (bar.percent / 100.0 * BAR_WIDTH as f64).round() as usize;
            let filled = filled.min(BAR_WIDTH);
            let text = format!(
                "{:<9} {:>6} / {:<6} {:<4} [{}{}] {:>3.0}%",
                bar.label,
                format_quantity(bar.current),
                format_quantity(bar.target),
                bar.unit,
                "#".repeat(filled),
                ".".repeat(BAR_WIDTH - filled),
                bar.percent
            );
            self.line(&text);
        }
        self.line("");
    }

    fn meal_list(&mut self, view: &MealListView) {
        self.line("Meal plan");
        self.line(&"=".repeat(44));
        for row in &view.rows {
            match row {
                MealRow::Planned {
                    id,
                    time,
                    name,
                    completed,
                    disliked,
                    dishes,
                } => {
                    let check = if *completed { "[x]" } else { "[ ]" };
                    let flag = if *disliked { "  (disliked)" } else { "" };
                    self.line(&format!("{} {}  {} ({}){}", check, time, name, id, flag));
                    for dish in dishes {
                        let marker = if dish.disliked { " [-]" } else { "" };
                        self.line(&format!(
                            "        {} ({}){}",
                            dish.name, dish.id, marker
                        ));
                        self.line(&format!("        {}", dish.macros));
                        if !dish.ingredients.is_empty() {
                            self.line(&format!("        {}", dish.ingredients.join(", ")));
                        }
                    }
                }
                MealRow::Unplanned {
                    id,
                    name,
                    badge,
                    macros,
                } => {
                    self.line(&format!("[x] {:<5}  {} [{}] ({})", "", name, badge, id));
                    self.line(&format!("        {}", macros));
                }
            }
        }
        self.line("");
    }

    fn regenerate(&mut self, view: &RegenerateView) {
        if view.visible {
            self.line(&format!(
                "{}: run 'ration plan regenerate'",
                view.label
            ));
            self.line("");
        }
    }

    fn fridge(&mut self, view: &FridgeView) {
        self.line("My fridge");
        self.line(&"=".repeat(44));
        if view.is_empty() {
            self.line("No products yet.");
            self.line("Add one with 'ration fridge add <name> --qty <n> --unit <unit>'.");
            return;
        }
        for product in &view.products {
            self.line(&format!(
                "{:<20} {:>6} {:<5} {:<11} {}",
                product.name, product.quantity, product.unit, product.category, product.id
            ));
        }
        self.line(&"-".repeat(44));
        self.line(&format!(
            "{} products in {} categories",
            view.total, view.categories
        ));
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn render(&mut self, view: &ViewModel) {
        if let OutputFormat::Json = self.format {
            self.json(view);
            return;
        }
        match view {
            ViewModel::MacroProgress(v) => self.macro_progress(v),
            ViewModel::MealList(v) => self.meal_list(v),
            ViewModel::Regenerate(v) => self.regenerate(v),
            ViewModel::Fridge(v) => self.fridge(v),
            ViewModel::Theme(v) => self.line(&format!("Theme: {}", v.theme)),
        }
    }

    fn notify(&mut self, notification: Notification) {
        if notification.kind == NotificationKind::Error {
            self.failed = true;
        }
        match self.format {
            OutputFormat::Json => self.json(&serde_json::json!({ "notification": notification })),
            OutputFormat::Text => self.line(&notification.to_string()),
        }
    }

    fn field_errors(&mut self, panel: Panel, errors: &FieldErrors) {
        self.failed = true;
        match self.format {
            OutputFormat::Json => {
                let fields: serde_json::Map<String, serde_json::Value> = errors
                    .iter()
                    .map(|(k, v)| (k.to_string(), serde_json::Value::from(v)))
                    .collect();
                self.json(&serde_json::json!({ "form": panel.to_string(), "errors": fields }));
            }
            OutputFormat::Text => {
                for (field, message) in errors.iter() {
                    self.line(&format!("  {}: {}", field, message));
                }
            }
        }
    }

    fn open_panel(&mut self, panel: Panel) {
        tracing::debug!("Opened {}", panel);
    }

    fn close_panel(&mut self, panel: Panel) {
        tracing::debug!("Closed {}", panel);
    }

    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        if let Err(e) = write!(self.out, "{} [y/N] ", message).and_then(|_| self.out.flush()) {
            tracing::debug!("Failed to write prompt: {}", e);
        }

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ration_core::catalog::default_day_plan;
    use ration_core::state::Surface;
    use ration_core::{AppState, MemoryStore, ProductInput, Theme};

    fn render_text(state: &AppState, surface: Surface) -> String {
        let mut presenter = TerminalPresenter::new(Vec::new(), OutputFormat::Text);
        presenter.render(&ration_core::view::render(state, surface));
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn test_meal_list_text() {
        let store = MemoryStore::new();
        let mut state = AppState::load(&store, default_day_plan(), Theme::Light);
        state.toggle_meal_eaten(&store, "breakfast");

        let text = render_text(&state, Surface::MealList);
        assert!(text.contains("[x] 08:00  Breakfast (breakfast)"));
        assert!(text.contains("[ ] 13:00  Lunch (lunch)"));
        assert!(text.contains("P: 12g • C: 45g • F: 8g • 295 kcal"));
    }

    #[test]
    fn test_empty_fridge_text() {
        let store = MemoryStore::new();
        let state = AppState::load(&store, default_day_plan(), Theme::Light);
        assert!(render_text(&state, Surface::Fridge).contains("No products yet."));
    }

    #[test]
    fn test_fridge_text_lists_products() {
        let store = MemoryStore::new();
        let mut state = AppState::load(&store, default_day_plan(), Theme::Light);
        state
            .add_product(&store, ProductInput::new("Milk", "1.5", "liter"))
            .unwrap();

        let text = render_text(&state, Surface::Fridge);
        assert!(text.contains("Milk"));
        assert!(text.contains("1.5"));
        assert!(text.contains("1 products in 1 categories"));
    }

    #[test]
    fn test_regenerate_hidden_when_nothing_disliked() {
        let store = MemoryStore::new();
        let state = AppState::load(&store, default_day_plan(), Theme::Light);
        assert!(render_text(&state, Surface::Regenerate).is_empty());
    }

    #[test]
    fn test_json_render() {
        let store = MemoryStore::new();
        let state = AppState::load(&store, default_day_plan(), Theme::Dark);
        let mut presenter = TerminalPresenter::new(Vec::new(), OutputFormat::Json);
        presenter.render(&ration_core::view::render(&state, Surface::Theme));

        let out = String::from_utf8(presenter.into_inner()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["surface"], "theme");
        assert_eq!(value["theme"], "dark");
    }

    #[test]
    fn test_field_errors_mark_failure() {
        let mut presenter = TerminalPresenter::new(Vec::new(), OutputFormat::Text);
        let mut errors = FieldErrors::new();
        errors.add("quantity", "This field is required");

        presenter.field_errors(Panel::AddProduct, &errors);
        assert!(presenter.failed());
        let out = String::from_utf8(presenter.into_inner()).unwrap();
        assert_eq!(out, "  quantity: This field is required\n");
    }

    #[test]
    fn test_error_notice_marks_failure() {
        let mut presenter = TerminalPresenter::new(Vec::new(), OutputFormat::Text);
        presenter.notify(Notification::success("Milk added to the list"));
        assert!(!presenter.failed());
        presenter.notify(Notification::generic_error());
        assert!(presenter.failed());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_errors_do_not_panic() {
        let store = MemoryStore::new();
        let state = AppState::load(&store, default_day_plan(), Theme::Light);
        let mut presenter = TerminalPresenter::new(BrokenPipe, OutputFormat::Text);
        presenter.render(&ration_core::view::render(&state, Surface::MealList));
        presenter.note("still running");
        assert!(!presenter.failed());
    }

    #[test]
    fn test_note_json() {
        let mut presenter = TerminalPresenter::new(Vec::new(), OutputFormat::Json);
        presenter.note("No product 'p9' in the fridge");
        let out = String::from_utf8(presenter.into_inner()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["note"], "No product 'p9' in the fridge");
    }

    #[test]
    fn test_assume_yes_confirms() {
        let mut presenter = TerminalPresenter::new(Vec::new(), OutputFormat::Text);
        presenter.set_assume_yes(true);
        assert!(presenter.confirm("Remove Milk from the fridge?"));
    }
}
