use clap::{Args, Subcommand};
use std::io::Write;

use ration_core::{KeyValueStore, Surface};

use super::{finish, open, OutputFormat, Session};
use crate::config::Config;

#[derive(Args)]
pub struct PlanCommand {
    #[command(subcommand)]
    pub command: PlanSubcommand,
}

#[derive(Subcommand)]
pub enum PlanSubcommand {
    /// Show today's macros and meals
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Mark a planned meal as eaten (or not eaten)
    Eat {
        /// Meal ID (e.g. breakfast)
        meal_id: String,
    },

    /// Mark a dish as disliked (or liked again)
    Dislike {
        /// Dish ID (e.g. dish-1)
        dish_id: String,
    },

    /// Replace disliked dishes in the plan
    Regenerate,

    /// Compose a new diet
    Compose,
}

impl PlanCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            PlanSubcommand::Show { format } => {
                let mut app = open(config, *format);
                app.render(&[Surface::MacroProgress, Surface::MealList, Surface::Regenerate]);
                Ok(())
            }
            PlanSubcommand::Eat { meal_id } => {
                let mut app = open(config, OutputFormat::Text);
                eat(&mut app, meal_id);
                Ok(())
            }
            PlanSubcommand::Dislike { dish_id } => {
                let mut app = open(config, OutputFormat::Text);
                dislike(&mut app, dish_id);
                Ok(())
            }
            PlanSubcommand::Regenerate => {
                let mut app = open(config, OutputFormat::Text);
                let cleared = app.regenerate_plan();
                finish(&app, Some(cleared)).map(|_| ())
            }
            PlanSubcommand::Compose => {
                let mut app = open(config, OutputFormat::Text);
                app.compose_diet();
                Ok(())
            }
        }
    }
}

/// Ids outside today's plan are left alone with a note.
fn eat<S: KeyValueStore, W: Write>(app: &mut Session<S, W>, meal_id: &str) {
    if app.state().catalog().meal(meal_id).is_none() {
        app.presenter_mut()
            .note(&format!("No meal '{}' in today's plan", meal_id));
        return;
    }
    app.toggle_meal_eaten(meal_id);
}

fn dislike<S: KeyValueStore, W: Write>(app: &mut Session<S, W>, dish_id: &str) {
    if app.state().catalog().dish(dish_id).is_none() {
        app.presenter_mut()
            .note(&format!("No dish '{}' in today's plan", dish_id));
        return;
    }
    app.toggle_dish_disliked(dish_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{output, session};

    #[test]
    fn test_eat_unknown_meal_is_a_note() {
        let mut app = session();
        eat(&mut app, "brunch");

        assert!(app.state().eaten().is_empty());
        assert!(finish(&app, Some(())).is_ok());
        assert_eq!(output(app), "No meal 'brunch' in today's plan\n");
    }

    #[test]
    fn test_eat_known_meal() {
        let mut app = session();
        eat(&mut app, "lunch");
        assert!(app.state().is_eaten("lunch"));
        assert!(output(app).contains("[x] 13:00  Lunch (lunch)"));
    }

    #[test]
    fn test_dislike_unknown_dish_is_a_note() {
        let mut app = session();
        dislike(&mut app, "dish-99");

        assert!(app.state().disliked().is_empty());
        assert!(finish(&app, Some(())).is_ok());
        assert_eq!(output(app), "No dish 'dish-99' in today's plan\n");
    }
}
