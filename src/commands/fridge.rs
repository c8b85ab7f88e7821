use clap::{Args, Subcommand};
use std::io::Write;

use ration_core::models::{ProductInput, ProductUpdate, Unit};
use ration_core::search::Autocomplete;
use ration_core::{KeyValueStore, Surface};

use super::{finish, open, OutputFormat, Session};
use crate::config::Config;

#[derive(Args)]
pub struct FridgeCommand {
    #[command(subcommand)]
    pub command: FridgeSubcommand,
}

#[derive(Subcommand)]
pub enum FridgeSubcommand {
    /// List products in the fridge
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a product (merges with an existing one of the same name and unit)
    Add {
        /// Product name
        name: String,

        /// Quantity
        #[arg(long, default_value = "")]
        qty: String,

        /// Unit (gram, kilogram, milliliter, liter, piece, ...)
        #[arg(long, default_value = "")]
        unit: String,

        /// Protein
        #[arg(long)]
        protein: Option<f64>,

        /// Fats
        #[arg(long)]
        fats: Option<f64>,

        /// Carbs
        #[arg(long)]
        carbs: Option<f64>,

        /// Calories
        #[arg(long)]
        calories: Option<f64>,
    },

    /// Edit a product's name, quantity or unit
    Edit {
        /// Product ID
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New quantity
        #[arg(long)]
        qty: Option<f64>,

        /// New unit
        #[arg(long)]
        unit: Option<String>,
    },

    /// Remove a product
    Delete {
        /// Product ID
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Suggest product names matching a query
    Suggest {
        /// Search text
        query: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl FridgeCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            FridgeSubcommand::List { format } => {
                let mut app = open(config, *format);
                app.render(&[Surface::Fridge]);
                Ok(())
            }
            FridgeSubcommand::Add {
                name,
                qty,
                unit,
                protein,
                fats,
                carbs,
                calories,
            } => {
                let mut app = open(config, OutputFormat::Text);
                let input = ProductInput {
                    name: name.clone(),
                    quantity: qty.clone(),
                    unit: unit.clone(),
                    proteins: *protein,
                    fats: *fats,
                    carbs: *carbs,
                    calories: *calories,
                };
                let added = app.add_product(input);
                finish(&app, added).map(|_| ())
            }
            FridgeSubcommand::Edit {
                id,
                name,
                qty,
                unit,
            } => {
                let unit = unit.as_deref().map(str::parse::<Unit>).transpose()?;
                let mut app = open(config, OutputFormat::Text);
                edit(&mut app, id, name.clone(), *qty, unit)
            }
            FridgeSubcommand::Delete { id, yes } => {
                let mut app = open(config, OutputFormat::Text);
                app.presenter_mut().set_assume_yes(*yes);
                delete(&mut app, id);
                Ok(())
            }
            FridgeSubcommand::Suggest { query, format } => {
                let mut dropdown = Autocomplete::products();
                dropdown.input(query);
                let products = dropdown.items();
                match format {
                    OutputFormat::Json => {
                        let items: Vec<_> = products
                            .iter()
                            .map(|p| {
                                serde_json::json!({
                                    "name": p.name,
                                    "category": p.category,
                                })
                            })
                            .collect();
                        println!("{}", serde_json::to_string_pretty(&items)?);
                    }
                    OutputFormat::Text => {
                        if products.is_empty() {
                            println!("No products found.");
                        }
                        for product in products {
                            println!("{:<20} {}", product.name, product.category.display_name());
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

fn edit<S: KeyValueStore, W: Write>(
    app: &mut Session<S, W>,
    id: &str,
    name: Option<String>,
    qty: Option<f64>,
    unit: Option<Unit>,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(current) = app.open_edit_product(id) else {
        app.presenter_mut()
            .note(&format!("No product '{}' in the fridge", id));
        return Ok(());
    };

    let update = ProductUpdate {
        unit: unit.unwrap_or(current.unit),
        quantity: qty.unwrap_or(current.quantity),
        name: name.unwrap_or(current.name),
    };
    let edited = app.edit_product(id, update);
    finish(app, edited).map(|_| ())
}

fn delete<S: KeyValueStore, W: Write>(app: &mut Session<S, W>, id: &str) {
    if app.state().product(id).is_none() {
        app.presenter_mut()
            .note(&format!("No product '{}' in the fridge", id));
        return;
    }
    if app.delete_product(id).is_none() {
        app.presenter_mut().note("Cancelled.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{output, session};

    #[test]
    fn test_edit_unknown_product_is_a_note() {
        let mut app = session();
        edit(&mut app, "p9", Some("Kefir".into()), None, None).unwrap();
        assert!(app.state().products().is_empty());
        assert_eq!(output(app), "No product 'p9' in the fridge\n");
    }

    #[test]
    fn test_edit_keeps_unspecified_fields() {
        let mut app = session();
        let id = app
            .add_product(ProductInput::new("Milk", "1", "liter"))
            .unwrap()
            .product()
            .id
            .clone();

        edit(&mut app, &id, None, Some(2.5), None).unwrap();
        let milk = app.state().product(&id).unwrap();
        assert_eq!(milk.name, "Milk");
        assert_eq!(milk.quantity, 2.5);
        assert_eq!(milk.unit, Unit::Liter);
    }

    #[test]
    fn test_delete_unknown_product_is_a_note() {
        let mut app = session();
        app.presenter_mut().set_assume_yes(true);
        delete(&mut app, "p9");
        assert!(finish(&app, Some(())).is_ok());
        assert_eq!(output(app), "No product 'p9' in the fridge\n");
    }

    #[test]
    fn test_delete_confirmed() {
        let mut app = session();
        app.presenter_mut().set_assume_yes(true);
        let id = app
            .add_product(ProductInput::new("Milk", "1", "liter"))
            .unwrap()
            .product()
            .id
            .clone();

        delete(&mut app, &id);
        assert!(app.state().products().is_empty());
        assert!(output(app).contains("[success] Milk removed from the fridge"));
    }
}
