use std::collections::HashMap;

use crate::models::item::{ItemDefinition, Lang};
use crate::resolver::constants::ENERGY_ITEM_ID;

/// Immutable mapping from item id to definition.
///
/// The catalog is assembled once (from a recipe data file) and only read by
/// the resolver.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: HashMap<String, ItemDefinition>,
}

impl Catalog {
    pub fn new(items: HashMap<String, ItemDefinition>) -> Self {
        Self { items }
    }

    pub fn get(&self, item_id: &str) -> Option<&ItemDefinition> {
        self.items.get(item_id)
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.items.contains_key(item_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ItemDefinition)> {
        self.items.iter().map(|(id, item)| (id.as_str(), item))
    }

    /// Display name for an id, `"Unknown (<id>)"` when the id or all names
    /// are missing.
    pub fn display_name(&self, item_id: &str, lang: Lang) -> String {
        self.items
            .get(item_id)
            .and_then(|item| item.display_name(lang))
            .map(str::to_string)
            .unwrap_or_else(|| format!("Unknown ({})", item_id))
    }

    /// Default-language label, used in resolver error messages.
    pub fn label(&self, item_id: &str) -> String {
        self.display_name(item_id, Lang::default())
    }

    pub fn craftable_items(&self) -> Vec<(&str, &ItemDefinition)> {
        self.iter().filter(|(_, item)| item.craftable).collect()
    }

    pub fn base_items(&self) -> Vec<(&str, &ItemDefinition)> {
        self.iter().filter(|(_, item)| !item.craftable).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sanity-check the catalog, returning human-readable warnings.
    ///
    /// The resolver tolerates all of these (they surface as per-node
    /// errors), but flagging them at load time points at the data file
    /// instead of a confusing resolution result.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for (id, item) in &self.items {
            if !item.is_valid() {
                warnings.push(format!("invalid definition for '{}'", id));
            }

            if item.craftable {
                for ingredient in &item.ingredients {
                    if !self.items.contains_key(&ingredient.item_id) {
                        warnings.push(format!(
                            "recipe for '{}' references unknown ingredient '{}'",
                            id, ingredient.item_id
                        ));
                    }
                }
            } else if !item.ingredients.is_empty() {
                warnings.push(format!(
                    "non-craftable item '{}' lists ingredients (ignored)",
                    id
                ));
            }
        }

        let needs_energy = self
            .items
            .values()
            .any(|item| item.craftable && item.energy_cost > 0.0);
        if needs_energy && !self.items.contains_key(ENERGY_ITEM_ID) {
            warnings.push(format!(
                "recipes consume energy but the catalog has no '{}' item",
                ENERGY_ITEM_ID
            ));
        }

        warnings.sort();
        warnings
    }
}
