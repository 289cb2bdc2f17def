use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::models::{BreakdownNode, CraftDetails};

/// Aggregate totals for one item id across every occurrence in a
/// breakdown tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateEntry {
    pub quantity: f64,
    pub cost: f64,
    pub is_error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub craft_details: Option<CraftDetails>,
}

/// The breakdown tree folded into the two presentation groupings:
/// intermediates that were actually crafted, and everything bought,
/// gathered, or failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlatBreakdown {
    pub crafted: BTreeMap<String, AggregateEntry>,
    pub base: BTreeMap<String, AggregateEntry>,
}

/// Fold a breakdown tree into per-item aggregates.
///
/// Quantities and costs are summed per item id; the first errored
/// occurrence of an id pins its entry to the error state (cost infinite,
/// first message kept) and later occurrences stop accumulating. Recursion
/// descends only below nodes that were actually crafted — a bought
/// subtree's internals are not part of what the user pays for.
pub fn flatten_breakdown(root: &BreakdownNode) -> FlatBreakdown {
    let mut flat = FlatBreakdown::default();
    collect(root, &mut flat);
    flat
}

fn collect(node: &BreakdownNode, flat: &mut FlatBreakdown) {
    if node.quantity <= 0.0 {
        return;
    }

    let list = if node.is_base() {
        &mut flat.base
    } else {
        &mut flat.crafted
    };
    let entry = list.entry(node.item_id.clone()).or_default();

    if node.is_error() {
        if entry.error.is_none() {
            entry.error = node.error().map(|e| e.message.clone());
        }
        entry.is_error = true;
        entry.cost = f64::INFINITY;
    } else if !entry.is_error {
        entry.quantity += node.quantity;
        entry.cost += node.total_cost;

        if let Some(details) = node.craft_details() {
            match &mut entry.craft_details {
                Some(acc) => {
                    acc.crafts_needed += details.crafts_needed;
                    acc.actual_yield += details.actual_yield;
                    acc.total_craft_cost += details.total_craft_cost;
                    acc.ingredients_cost += details.ingredients_cost;
                    acc.energy_cost += details.energy_cost;
                }
                None => entry.craft_details = Some(details.clone()),
            }
        }
    }

    if !node.is_base() {
        for child in node.ingredients.values() {
            collect(child, flat);
        }
    }
}

/// First-seen finite calculated craft cost per item id, walking the whole
/// tree including bought and failed branches. This is the input for
/// comparing quoted prices against crafting.
pub fn collect_calculated_costs(root: &BreakdownNode) -> HashMap<String, f64> {
    let mut costs = HashMap::new();
    visit_calculated(root, &mut costs);
    costs
}

fn visit_calculated(node: &BreakdownNode, costs: &mut HashMap<String, f64>) {
    if let Some(calculated) = node.calculated_cost_per_unit {
        if calculated.is_finite() && !costs.contains_key(&node.item_id) {
            costs.insert(node.item_id.clone(), calculated);
        }
    }
    for child in node.ingredients.values() {
        visit_calculated(child, costs);
    }
}
