pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod resolver;
pub mod state;

pub use error::{CraftError, Result};
pub use models::{BreakdownNode, Catalog, CostResult, ItemDefinition, PriceMap};
pub use resolver::resolve_cost;
