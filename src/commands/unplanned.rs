use clap::{Args, Subcommand};
use std::io::Write;

use ration_core::models::UnplannedMealInput;
use ration_core::search::{Autocomplete, MIN_DISH_QUERY};
use ration_core::KeyValueStore;

use super::{finish, open, OutputFormat, Session};
use crate::config::Config;

#[derive(Args)]
pub struct UnplannedCommand {
    #[command(subcommand)]
    pub command: UnplannedSubcommand,
}

#[derive(Subcommand)]
pub enum UnplannedSubcommand {
    /// Record a meal eaten outside the plan
    Add {
        /// Dish name
        #[arg(long, conflicts_with = "search")]
        name: Option<String>,

        /// Pick a dish by name and use its stored nutrition
        #[arg(long)]
        search: Option<String>,

        /// Protein in grams
        #[arg(long)]
        protein: Option<f64>,

        /// Carbs in grams
        #[arg(long)]
        carbs: Option<f64>,

        /// Fats in grams
        #[arg(long)]
        fats: Option<f64>,

        /// Calories
        #[arg(long)]
        calories: Option<f64>,
    },

    /// Remove an unplanned meal
    Remove {
        /// Unplanned meal ID
        id: String,
    },

    /// Suggest dishes matching a query
    Suggest {
        /// Search text (at least two characters)
        query: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl UnplannedCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            UnplannedSubcommand::Add {
                name,
                search,
                protein,
                carbs,
                fats,
                calories,
            } => {
                let mut app = open(config, OutputFormat::Text);
                let added = match search {
                    Some(dish) => app.add_unplanned_from_search(dish),
                    None => app.add_unplanned_meal(UnplannedMealInput {
                        name: name.clone().unwrap_or_default(),
                        protein: *protein,
                        carbs: *carbs,
                        fats: *fats,
                        calories: *calories,
                    }),
                };
                finish(&app, added).map(|_| ())
            }
            UnplannedSubcommand::Remove { id } => {
                let mut app = open(config, OutputFormat::Text);
                remove(&mut app, id);
                Ok(())
            }
            UnplannedSubcommand::Suggest { query, format } => {
                let mut dropdown = Autocomplete::dishes();
                dropdown.input(query);
                if !dropdown.is_visible() {
                    println!("Type at least {} characters to search.", MIN_DISH_QUERY);
                    return Ok(());
                }
                let dishes = dropdown.items();
                match format {
                    OutputFormat::Json => {
                        let items: Vec<_> = dishes
                            .iter()
                            .map(|d| serde_json::json!({ "name": d.name, "macros": d.macros }))
                            .collect();
                        println!("{}", serde_json::to_string_pretty(&items)?);
                    }
                    OutputFormat::Text => {
                        if dishes.is_empty() {
                            println!("No dishes found.");
                        }
                        for dish in dishes {
                            println!("{:<20} {}", dish.name, dish.macros);
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

fn remove<S: KeyValueStore, W: Write>(app: &mut Session<S, W>, id: &str) {
    if app.remove_unplanned_meal(id).is_none() {
        app.presenter_mut()
            .note(&format!("No unplanned meal '{}'", id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{output, session};

    #[test]
    fn test_remove_unknown_meal_is_a_note() {
        let mut app = session();
        app.add_unplanned_meal(UnplannedMealInput::named("Soup"))
            .unwrap();

        remove(&mut app, "missing");
        assert_eq!(app.state().unplanned().len(), 1);
        assert!(finish(&app, Some(())).is_ok());
        assert!(output(app).ends_with("No unplanned meal 'missing'\n"));
    }

    #[test]
    fn test_remove_meal() {
        let mut app = session();
        let id = app
            .add_unplanned_meal(UnplannedMealInput::named("Soup"))
            .unwrap()
            .id;

        remove(&mut app, &id);
        assert!(app.state().unplanned().is_empty());
        assert!(output(app).contains("[success] Soup removed from the plan"));
    }
}
