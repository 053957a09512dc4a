//! Stockroom CLI - Offline management of users and inventory.
//!
//! # Usage
//!
//! ```bash
//! # Register a user
//! stockroom user create -u alice -p 'correct horse'
//!
//! # Show the inventory with positions
//! stockroom inventory list
//!
//! # Remove the product at position 2
//! stockroom inventory remove 2
//!
//! # Use a different data directory
//! stockroom --data-dir /var/lib/stockroom inventory stats
//! ```
//!
//! # Commands
//!
//! - `user create` / `user list` - Manage registered users
//! - `inventory list|add|remove|stats` - Inspect and edit the inventory

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use secrecy::SecretString;
use stockroom_core::ProductDraft;

mod commands;

#[derive(Parser)]
#[command(name = "stockroom")]
#[command(author, version, about = "Stockroom management tools")]
struct Cli {
    /// Data directory (defaults to `STOCKROOM_DATA_DIR`, then `data`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage registered users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Inspect and edit the inventory
    Inventory {
        #[command(subcommand)]
        action: InventoryAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Register a new user
    Create {
        /// Username (case-sensitive)
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// List registered usernames
    List,
}

#[derive(Subcommand)]
enum InventoryAction {
    /// List products with their positions
    List,
    /// Add a product
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        category: String,
        /// Unit price, greater than zero
        #[arg(long)]
        price: String,
        /// Units in stock, a whole number greater than zero
        #[arg(long)]
        quantity: String,
    },
    /// Remove the product at a position (0-based, as shown by `list`)
    Remove {
        index: usize,
    },
    /// Show product count and total value
    Stats,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

#[allow(clippy::print_stdout)]
fn run(cli: Cli) -> Result<(), commands::CommandError> {
    let store = commands::open_store(cli.data_dir)?;

    match cli.command {
        Commands::User { action } => match action {
            UserAction::Create { username, password } => {
                let password = SecretString::from(password);
                commands::user::create(store, &username, &password)?;
            }
            UserAction::List => {
                for username in commands::user::list(store.as_ref())? {
                    println!("{username}");
                }
            }
        },
        Commands::Inventory { action } => match action {
            InventoryAction::List => {
                for (index, product) in commands::inventory::list(store.as_ref())?.iter().enumerate()
                {
                    println!("{}", commands::inventory::format_row(index, product));
                }
            }
            InventoryAction::Add {
                name,
                description,
                category,
                price,
                quantity,
            } => {
                let draft = ProductDraft {
                    name,
                    description,
                    category,
                    price,
                    quantity,
                };
                let total = commands::inventory::add(store, &draft)?;
                println!("Added. {total} products in inventory.");
            }
            InventoryAction::Remove { index } => {
                let removed = commands::inventory::remove(store, index)?;
                println!("Removed {}.", removed.name);
            }
            InventoryAction::Stats => {
                let stats = commands::inventory::stats(store.as_ref())?;
                println!("Total products: {}", stats.total_products);
                println!("Total value:    {}", stats.total_value_display());
            }
        },
    }
    Ok(())
}
