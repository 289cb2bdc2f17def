use clap::{Parser, Subcommand};

/// CraftCalc — a crafting cost calculator that resolves recipe trees into
/// cheapest acquisition costs.
#[derive(Parser, Debug)]
#[command(name = "craft_calc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the recipe catalog JSON file.
    #[arg(short, long, default_value = "catalog.json")]
    pub catalog: String,

    /// Path to the saved prices file.
    #[arg(short, long, default_value = "prices.json")]
    pub prices: String,

    /// Display language for item names (en, ru, uk).
    #[arg(short, long, default_value = "en")]
    pub lang: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the cheapest acquisition cost of an item.
    Calc {
        /// Item id to resolve; prompts interactively when omitted.
        item: Option<String>,

        /// Number of units to resolve.
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Always use the computed craft cost, ignoring cheaper quoted
        /// prices for the target item.
        #[arg(long)]
        force_craft: bool,

        /// Print the resolution result as JSON instead of the formatted
        /// lists.
        #[arg(long)]
        json: bool,
    },

    /// Interactively edit quoted prices.
    Prices,

    /// Import prices from a JSON or CSV file into the price store.
    Import {
        /// File to import.
        file: String,
    },

    /// Export the current prices to a JSON or CSV file.
    Export {
        /// Destination file.
        file: String,
    },

    /// List the catalog grouped into craftable and base items.
    Items,
}

impl Default for Command {
    fn default() -> Self {
        Command::Calc {
            item: None,
            quantity: 1,
            force_craft: false,
            json: false,
        }
    }
}
