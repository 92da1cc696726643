//! Meal Order CLI
//!
//! Commands: menu, validate, order
//! Outputs JSON to stdout, logs to stderr
//! Returns 2 on validation failure

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use mealorder_core::{Catalog, CatalogItem, MealType, OrderError, OrderRequest, OrderService};

#[derive(Parser)]
#[command(name = "mealorder-cli")]
#[command(about = "Meal Order CLI - compose Breakfast, Lunch and Dinner orders")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a JSON catalog file (built-in menu when omitted)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalog, optionally for a single meal type
    Menu {
        /// Breakfast, Lunch or Dinner
        #[arg(short, long)]
        meal: Option<MealType>,
    },

    /// Check an order against the composition rules
    Validate {
        /// JSON payload (OrderRequest)
        #[arg(short, long)]
        payload: String,
    },

    /// Compose an order and print its summary
    Order {
        /// JSON payload (OrderRequest)
        #[arg(short, long)]
        payload: String,

        /// Print a fingerprinted ticket instead of the bare summary
        #[arg(long)]
        ticket: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .init();
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Failed to render output: {}", e),
    }
}

fn item_names(items: &[CatalogItem]) -> Vec<&str> {
    items.iter().map(|i| i.name.as_str()).collect()
}

fn parse_request(payload: &str) -> Result<OrderRequest, serde_json::Error> {
    serde_json::from_str(payload)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let catalog = match &cli.catalog {
        Some(path) => match Catalog::load_from_file(path) {
            Ok(c) => c,
            Err(e) => {
                print_json(&json!({"error": format!("Failed to load catalog: {}", e)}));
                return ExitCode::FAILURE;
            }
        },
        None => Catalog::seeded(),
    };
    debug!(items = catalog.len(), "Catalog ready");

    let service = OrderService::new(catalog);

    match cli.command {
        Commands::Menu { meal } => {
            let meals = meal.map_or_else(|| MealType::ALL.to_vec(), |m| vec![m]);
            let menus: Vec<_> = meals
                .into_iter()
                .map(|m| {
                    let menu = service.menu(m);
                    json!({
                        "mealType": m,
                        "mains": item_names(&menu.mains),
                        "sides": item_names(&menu.sides),
                        "drinks": item_names(&menu.drinks),
                        "dessert": menu.dessert.map(|d| d.name),
                    })
                })
                .collect();

            print_json(&Value::Array(menus));
            ExitCode::SUCCESS
        }

        Commands::Validate { payload } => {
            let request = match parse_request(&payload) {
                Ok(r) => r,
                Err(e) => {
                    print_json(&json!({"valid": false, "error": format!("Invalid payload: {}", e)}));
                    return ExitCode::FAILURE;
                }
            };

            let result = service.validate_order(&request);
            print_json(&json!(result));
            if result.valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2) // Validation failure
            }
        }

        Commands::Order { payload, ticket } => {
            let request = match parse_request(&payload) {
                Ok(r) => r,
                Err(e) => {
                    print_json(&json!({"success": false, "error": format!("Invalid payload: {}", e)}));
                    return ExitCode::FAILURE;
                }
            };

            let outcome = if ticket {
                service.place_order(&request).map(|t| json!({"success": true, "ticket": t}))
            } else {
                service.get_order(&request).map(|s| json!({"success": true, "order": s}))
            };

            match outcome {
                Ok(output) => {
                    print_json(&output);
                    ExitCode::SUCCESS
                }
                Err(OrderError::Validation(violations)) => {
                    print_json(&json!({"success": false, "violations": violations}));
                    ExitCode::from(2) // Validation failure
                }
                Err(e) => {
                    // Catalog or internal fault; details stay in the log.
                    error!(error = %e, "Order failed");
                    print_json(&json!({"success": false, "error": "Order could not be prepared"}));
                    ExitCode::FAILURE
                }
            }
        }
    }
}
