use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{CraftError, Result};
use crate::models::{Catalog, ItemDefinition, PriceMap};

/// Load the recipe catalog from a JSON object file (`id -> definition`).
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let content = fs::read_to_string(path)?;
    let items: HashMap<String, ItemDefinition> = serde_json::from_str(&content)?;

    if items.is_empty() {
        return Err(CraftError::EmptyCatalog);
    }

    Ok(Catalog::new(items))
}

/// Load a price file, JSON or CSV depending on the extension.
pub fn load_prices<P: AsRef<Path>>(path: P) -> Result<PriceMap> {
    let path = path.as_ref();
    if is_csv(path) {
        read_prices_csv(path)
    } else {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Save a price file, JSON (pretty-printed) or CSV depending on the
/// extension.
pub fn save_prices<P: AsRef<Path>>(path: P, prices: &PriceMap) -> Result<()> {
    let path = path.as_ref();
    if is_csv(path) {
        write_prices_csv(path, prices)
    } else {
        let json = serde_json::to_string_pretty(prices)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Validate imported prices: finite non-negative values pass through,
/// anything else becomes 0 (present but unusable). Returns the cleaned map
/// and how many entries were corrected.
pub fn sanitize_prices(raw: PriceMap) -> (PriceMap, usize) {
    let mut clean = PriceMap::new();
    let mut corrected = 0;

    for (id, price) in raw.iter() {
        if price.is_finite() && price >= 0.0 {
            clean.set(id, price);
        } else {
            clean.set(id, 0.0);
            corrected += 1;
        }
    }

    (clean, corrected)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn read_prices_csv(path: &Path) -> Result<PriceMap> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut prices = PriceMap::new();

    for record in reader.records() {
        let record = record?;
        let item_id = record.get(0).unwrap_or("").trim();
        if item_id.is_empty() {
            continue;
        }
        let price: f64 = record
            .get(1)
            .unwrap_or("")
            .trim()
            .parse()
            .map_err(|_| {
                CraftError::InvalidInput(format!("bad price value for '{}'", item_id))
            })?;
        prices.set(item_id, price);
    }

    Ok(prices)
}

fn write_prices_csv(path: &Path, prices: &PriceMap) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["item_id", "price"])?;

    for (id, price) in prices.iter() {
        let value = price.to_string();
        writer.write_record([id, value.as_str()])?;
    }

    writer.flush()?;
    Ok(())
}
