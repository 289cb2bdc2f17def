use std::collections::HashMap;

use crate::models::{Catalog, Lang, PriceMap};
use crate::resolver::constants::{ENERGY_ITEM_ID, PRICE_COMPARE_TOLERANCE};

/// Comparison of a quoted price against the last calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceHint {
    /// A base resource has no usable quoted price.
    MissingPrice,

    /// Crafting this item costs more than the quoted price.
    CheaperToBuy { quoted: f64, calculated: f64 },

    /// Crafting this item costs less than the quoted price.
    CheaperToCraft { quoted: f64, calculated: f64 },
}

/// Manages the user-editable price state layered over an immutable catalog.
pub struct PriceManager {
    prices: PriceMap,
}

impl PriceManager {
    pub fn new(prices: PriceMap) -> Self {
        Self { prices }
    }

    pub fn prices(&self) -> &PriceMap {
        &self.prices
    }

    pub fn set_price(&mut self, item_id: impl Into<String>, price: f64) {
        self.prices.set(item_id, price);
    }

    pub fn clear_price(&mut self, item_id: &str) {
        self.prices.clear_price(item_id);
    }

    /// Seed suggested prices for non-craftable items that have no saved
    /// entry yet. Craftable items default to no price so crafting stays
    /// the baseline.
    pub fn seed_defaults(&mut self, catalog: &Catalog) {
        for (id, item) in catalog.iter() {
            if !item.craftable && !self.prices.contains(id) && item.avg_price > 0.0 {
                self.prices.set(id, item.avg_price);
            }
        }
    }

    /// Base items (the energy resource included) that currently have no
    /// usable price, sorted by display name.
    pub fn missing_base_prices<'a>(&self, catalog: &'a Catalog, lang: Lang) -> Vec<&'a str> {
        let mut missing: Vec<&str> = catalog
            .base_items()
            .into_iter()
            .filter(|(id, _)| self.prices.usable(id).is_none())
            .map(|(id, _)| id)
            .collect();
        missing.sort_by_key(|id| catalog.display_name(id, lang));
        missing
    }

    /// Classify each catalog item's quoted price against the calculated
    /// craft costs from the last resolution.
    ///
    /// Base items are flagged when unpriced. Craftable items are compared
    /// only when both a usable quote and a finite calculated cost exist;
    /// quotes within tolerance of the craft cost get no hint.
    pub fn hints(
        &self,
        catalog: &Catalog,
        calculated_costs: &HashMap<String, f64>,
    ) -> Vec<(String, PriceHint)> {
        let mut hints = Vec::new();

        for (id, item) in catalog.iter() {
            if !item.craftable {
                if self.prices.usable(id).is_none() {
                    hints.push((id.to_string(), PriceHint::MissingPrice));
                }
                continue;
            }

            let Some(&calculated) = calculated_costs.get(id) else {
                continue;
            };
            let Some(quoted) = self.prices.usable(id) else {
                continue;
            };

            if calculated < quoted - PRICE_COMPARE_TOLERANCE {
                if calculated > PRICE_COMPARE_TOLERANCE {
                    hints.push((id.to_string(), PriceHint::CheaperToCraft { quoted, calculated }));
                }
            } else if calculated > quoted + PRICE_COMPARE_TOLERANCE {
                hints.push((id.to_string(), PriceHint::CheaperToBuy { quoted, calculated }));
            }
        }

        hints.sort_by(|a, b| a.0.cmp(&b.0));
        hints
    }

    /// Whether the energy resource itself is priced.
    pub fn has_energy_price(&self) -> bool {
        self.prices.usable(ENERGY_ITEM_ID).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::ItemDefinition;

    fn item(name_en: &str, craftable: bool, avg_price: f64) -> ItemDefinition {
        ItemDefinition {
            name_ru: None,
            name_uk: None,
            name_en: Some(name_en.to_string()),
            craftable,
            craft_yield: 1,
            energy_cost: 0.0,
            avg_price,
            ingredients: Vec::new(),
        }
    }

    fn sample_catalog() -> Catalog {
        let mut items = HashMap::new();
        items.insert("energy".to_string(), item("Energy", false, 0.0));
        items.insert("ore".to_string(), item("Ore", false, 7.5));
        items.insert("bar".to_string(), item("Bar", true, 0.0));
        Catalog::new(items)
    }

    #[test]
    fn test_seed_defaults_only_missing_base_entries() {
        let catalog = sample_catalog();

        let mut saved = PriceMap::new();
        saved.set("energy", 2.0);

        let mut manager = PriceManager::new(saved);
        manager.seed_defaults(&catalog);

        // ore picked up its suggested price; the saved energy entry and
        // the craftable bar were left alone.
        assert_eq!(manager.prices().get("ore"), Some(7.5));
        assert_eq!(manager.prices().get("energy"), Some(2.0));
        assert_eq!(manager.prices().get("bar"), None);
    }

    #[test]
    fn test_seed_defaults_skips_zero_suggestions() {
        let catalog = sample_catalog();
        let mut manager = PriceManager::new(PriceMap::new());
        manager.seed_defaults(&catalog);

        // energy has avg_price 0: stays unpriced rather than unusable-0.
        assert_eq!(manager.prices().get("energy"), None);
    }

    #[test]
    fn test_missing_base_prices() {
        let catalog = sample_catalog();
        let mut manager = PriceManager::new(PriceMap::new());
        manager.set_price("ore", 5.0);

        let missing = manager.missing_base_prices(&catalog, Lang::En);
        assert_eq!(missing, vec!["energy"]);
        assert!(!manager.has_energy_price());
    }

    #[test]
    fn test_hints_for_craftables() {
        let catalog = sample_catalog();
        let mut manager = PriceManager::new(PriceMap::new());
        manager.set_price("ore", 5.0);
        manager.set_price("energy", 1.0);

        let mut calculated = HashMap::new();
        calculated.insert("bar".to_string(), 10.0);

        // No quoted price for bar: no hint either way.
        assert!(manager.hints(&catalog, &calculated).is_empty());

        // Quote above craft cost: cheaper to craft.
        manager.set_price("bar", 12.0);
        let hints = manager.hints(&catalog, &calculated);
        assert_eq!(hints.len(), 1);
        assert!(matches!(hints[0].1, PriceHint::CheaperToCraft { .. }));

        // Quote below craft cost: cheaper to buy.
        manager.set_price("bar", 8.0);
        let hints = manager.hints(&catalog, &calculated);
        assert!(matches!(hints[0].1, PriceHint::CheaperToBuy { .. }));

        // Quote within tolerance: neutral.
        manager.set_price("bar", 10.0);
        assert!(manager.hints(&catalog, &calculated).is_empty());
    }

    #[test]
    fn test_hints_flag_unpriced_base_items() {
        let catalog = sample_catalog();
        let manager = PriceManager::new(PriceMap::new());

        let hints = manager.hints(&catalog, &HashMap::new());
        let ids: Vec<&str> = hints.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["energy", "ore"]);
        assert!(hints
            .iter()
            .all(|(_, h)| matches!(h, PriceHint::MissingPrice)));
    }
}
