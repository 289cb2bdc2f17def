pub mod constants;
pub mod cost;
pub mod flatten;

pub use constants::{ENERGY_ITEM_ID, MAX_DEPTH, PRICE_COMPARE_TOLERANCE};
pub use cost::resolve_cost;
pub use flatten::{collect_calculated_costs, flatten_breakdown, AggregateEntry, FlatBreakdown};
