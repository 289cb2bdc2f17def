use std::collections::BTreeMap;

use serde::Serialize;

/// Why a node's cost could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostErrorKind {
    UnknownItem,
    MissingBasePrice,
    CircularDependency,
    DepthExceeded,
    InvalidIngredient,
    InvalidCalculation,
}

/// A node-local resolution failure. These are values in the breakdown tree,
/// not crate errors: a failed node carries infinite cost and never aborts
/// sibling branches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostError {
    pub kind: CostErrorKind,
    pub message: String,
}

impl CostError {
    pub fn new(kind: CostErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Batch accounting for a node whose final cost came from crafting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CraftDetails {
    /// Whole craft batches performed.
    pub crafts_needed: u64,

    /// Units actually produced (`crafts_needed * yield`), which may exceed
    /// the requested quantity. The full batch cost is charged either way.
    pub actual_yield: u64,

    /// Ingredient subtotal plus energy subtotal.
    pub total_craft_cost: f64,

    pub ingredients_cost: f64,

    pub energy_cost: f64,
}

/// How a node's final cost was settled.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    /// Final cost came from a quoted unit price, or the item is not
    /// craftable at all.
    Bought,

    /// Final cost is the computed craft cost.
    Crafted(CraftDetails),

    /// Resolution failed; cost is infinite.
    Failed(CostError),
}

/// One resolved item instance in the breakdown tree.
///
/// Every recursive resolution produces a fresh node; the tree is immutable
/// once returned. `calculated_cost_per_unit` keeps the from-scratch craft
/// cost separately from the final `cost_per_unit`, which may instead
/// reflect a cheaper quoted price.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownNode {
    pub item_id: String,

    /// Units requested at this node.
    pub quantity: f64,

    pub total_cost: f64,

    pub cost_per_unit: f64,

    /// Craft cost per unit if built from scratch; `None` for non-craftable
    /// items.
    pub calculated_cost_per_unit: Option<f64>,

    pub outcome: Outcome,

    /// Recursion results per ingredient id. Populated for craftable nodes
    /// regardless of the parent's own outcome, so failed branches remain
    /// inspectable.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub ingredients: BTreeMap<String, BreakdownNode>,
}

impl BreakdownNode {
    /// True when the final cost came from a quoted price, the item is
    /// non-craftable, or the node failed — false only when crafting was
    /// actually used.
    pub fn is_base(&self) -> bool {
        !matches!(self.outcome, Outcome::Crafted(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Failed(_))
    }

    pub fn error(&self) -> Option<&CostError> {
        match &self.outcome {
            Outcome::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn craft_details(&self) -> Option<&CraftDetails> {
        match &self.outcome {
            Outcome::Crafted(details) => Some(details),
            _ => None,
        }
    }
}

/// Top-level result of one resolution call.
///
/// `breakdown` is `None` exactly for the neutral no-op (`quantity <= 0`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostResult {
    pub total_cost: f64,
    pub cost_per_unit: f64,
    pub calculated_cost_per_unit: Option<f64>,
    pub breakdown: Option<BreakdownNode>,
}

impl CostResult {
    pub fn is_error(&self) -> bool {
        self.breakdown.as_ref().is_some_and(|b| b.is_error())
    }

    pub fn error(&self) -> Option<&CostError> {
        self.breakdown.as_ref().and_then(|b| b.error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_node(item_id: &str, quantity: f64, price: f64) -> BreakdownNode {
        BreakdownNode {
            item_id: item_id.to_string(),
            quantity,
            total_cost: price * quantity,
            cost_per_unit: price,
            calculated_cost_per_unit: None,
            outcome: Outcome::Bought,
            ingredients: BTreeMap::new(),
        }
    }

    #[test]
    fn test_accessors_by_outcome() {
        let bought = base_node("iron", 2.0, 5.0);
        assert!(bought.is_base());
        assert!(!bought.is_error());
        assert!(bought.craft_details().is_none());

        let mut crafted = base_node("plate", 1.0, 10.0);
        crafted.outcome = Outcome::Crafted(CraftDetails {
            crafts_needed: 1,
            actual_yield: 1,
            total_craft_cost: 10.0,
            ingredients_cost: 10.0,
            energy_cost: 0.0,
        });
        assert!(!crafted.is_base());
        assert!(crafted.craft_details().is_some());

        let mut failed = base_node("ghost", 1.0, 0.0);
        failed.outcome = Outcome::Failed(CostError::new(
            CostErrorKind::UnknownItem,
            "Unknown item: ghost",
        ));
        assert!(failed.is_base());
        assert!(failed.is_error());
        assert_eq!(failed.error().unwrap().kind, CostErrorKind::UnknownItem);
    }

    #[test]
    fn test_result_error_passthrough() {
        let result = CostResult {
            total_cost: 0.0,
            cost_per_unit: 0.0,
            calculated_cost_per_unit: None,
            breakdown: None,
        };
        assert!(!result.is_error());
        assert!(result.error().is_none());
    }
}
