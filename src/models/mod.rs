pub mod breakdown;
pub mod catalog;
pub mod item;
pub mod prices;

pub use breakdown::{
    BreakdownNode, CostError, CostErrorKind, CostResult, CraftDetails, Outcome,
};
pub use catalog::Catalog;
pub use item::{Ingredient, ItemDefinition, Lang};
pub use prices::PriceMap;
