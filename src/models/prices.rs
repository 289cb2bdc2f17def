use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// User-quoted unit prices keyed by item id.
///
/// A price is *usable* only when it is finite and strictly positive; zero,
/// negative, or non-finite entries mean "no price available". Backed by a
/// `BTreeMap` so iteration and export order are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceMap {
    entries: BTreeMap<String, f64>,
}

impl PriceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw quoted price, usable or not.
    pub fn get(&self, item_id: &str) -> Option<f64> {
        self.entries.get(item_id).copied()
    }

    /// The quoted price if it can actually be used for costing.
    pub fn usable(&self, item_id: &str) -> Option<f64> {
        self.entries
            .get(item_id)
            .copied()
            .filter(|p| p.is_finite() && *p > 0.0)
    }

    pub fn set(&mut self, item_id: impl Into<String>, price: f64) {
        self.entries.insert(item_id.into(), price);
    }

    /// Remove an entry entirely (distinct from setting it to 0).
    pub fn clear_price(&mut self, item_id: &str) {
        self.entries.remove(item_id);
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.entries.contains_key(item_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(id, p)| (id.as_str(), *p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, f64)> for PriceMap {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable_filters_bad_prices() {
        let mut prices = PriceMap::new();
        prices.set("iron", 12.5);
        prices.set("zero", 0.0);
        prices.set("negative", -3.0);
        prices.set("infinite", f64::INFINITY);
        prices.set("nan", f64::NAN);

        assert_eq!(prices.usable("iron"), Some(12.5));
        assert_eq!(prices.usable("zero"), None);
        assert_eq!(prices.usable("negative"), None);
        assert_eq!(prices.usable("infinite"), None);
        assert_eq!(prices.usable("nan"), None);
        assert_eq!(prices.usable("missing"), None);
    }

    #[test]
    fn test_get_returns_raw_values() {
        let mut prices = PriceMap::new();
        prices.set("zero", 0.0);
        assert_eq!(prices.get("zero"), Some(0.0));
        assert_eq!(prices.get("missing"), None);
    }

    #[test]
    fn test_clear_price() {
        let mut prices = PriceMap::new();
        prices.set("iron", 5.0);
        assert!(prices.contains("iron"));

        prices.clear_price("iron");
        assert!(!prices.contains("iron"));
    }

    #[test]
    fn test_serde_roundtrip_is_plain_object() {
        let mut prices = PriceMap::new();
        prices.set("b", 2.0);
        prices.set("a", 1.0);

        let json = serde_json::to_string(&prices).unwrap();
        assert_eq!(json, r#"{"a":1.0,"b":2.0}"#);

        let back: PriceMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prices);
    }
}
