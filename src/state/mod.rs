mod manager;
mod persistence;

pub use manager::{PriceHint, PriceManager};
pub use persistence::{load_catalog, load_prices, sanitize_prices, save_prices};
