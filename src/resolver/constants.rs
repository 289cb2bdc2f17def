/// Maximum recursion depth before a branch is abandoned as a probable
/// cycle or pathologically deep recipe graph.
pub const MAX_DEPTH: usize = 20;

/// Catalog id of the resource consumed by every craft batch. Its unit
/// price is read from the price map exactly like any other base resource.
pub const ENERGY_ITEM_ID: &str = "energy";

/// Tolerance when comparing a quoted price against a computed craft cost
/// for hint purposes.
pub const PRICE_COMPARE_TOLERANCE: f64 = 0.001;
