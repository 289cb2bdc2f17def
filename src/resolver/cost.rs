use std::collections::{BTreeMap, HashSet};

use crate::models::{
    BreakdownNode, Catalog, CostError, CostErrorKind, CostResult, CraftDetails, Outcome, PriceMap,
};
use crate::resolver::constants::{ENERGY_ITEM_ID, MAX_DEPTH};

/// Resolve the cheapest acquisition cost of `quantity` units of `item_id`.
///
/// Craftable items are expanded recursively; at every craftable node the
/// result is the cheaper of a usable quoted price and the computed craft
/// cost (crafting wins ties). With `force_craft` the top-level item always
/// uses its computed craft cost when it resolves without error; ingredients
/// still pick their own cheapest option.
///
/// Failures (unknown items, missing base prices, cycles, depth overruns)
/// never abort the computation: they become `Outcome::Failed` nodes with
/// infinite cost, and a failed child marks its parent failed in turn.
pub fn resolve_cost(
    catalog: &Catalog,
    item_id: &str,
    quantity: f64,
    prices: &PriceMap,
    force_craft: bool,
) -> CostResult {
    resolve_node(catalog, item_id, quantity, prices, &HashSet::new(), 0, force_craft)
}

fn resolve_node(
    catalog: &Catalog,
    item_id: &str,
    quantity: f64,
    prices: &PriceMap,
    visited: &HashSet<String>,
    depth: usize,
    force_craft: bool,
) -> CostResult {
    let Some(item) = catalog.get(item_id) else {
        return error_result(
            item_id,
            quantity,
            None,
            CostError::new(
                CostErrorKind::UnknownItem,
                format!("Unknown item: {}", item_id),
            ),
        );
    };

    // A non-positive quantity is a valid no-op, not an error.
    if quantity <= 0.0 {
        return CostResult {
            total_cost: 0.0,
            cost_per_unit: 0.0,
            calculated_cost_per_unit: None,
            breakdown: None,
        };
    }

    if depth > MAX_DEPTH {
        return error_result(
            item_id,
            quantity,
            Some(f64::INFINITY),
            CostError::new(
                CostErrorKind::DepthExceeded,
                format!(
                    "Recursion depth exceeded while resolving '{}' (possible craft cycle)",
                    catalog.label(item_id)
                ),
            ),
        );
    }

    if !item.craftable {
        return match prices.usable(item_id) {
            Some(price) => {
                let total_cost = price * quantity;
                CostResult {
                    total_cost,
                    cost_per_unit: price,
                    calculated_cost_per_unit: None,
                    breakdown: Some(BreakdownNode {
                        item_id: item_id.to_string(),
                        quantity,
                        total_cost,
                        cost_per_unit: price,
                        calculated_cost_per_unit: None,
                        outcome: Outcome::Bought,
                        ingredients: BTreeMap::new(),
                    }),
                }
            }
            None => error_result(
                item_id,
                quantity,
                None,
                missing_price_error(catalog, item_id),
            ),
        };
    }

    if visited.contains(item_id) {
        return error_result(
            item_id,
            quantity,
            Some(f64::INFINITY),
            CostError::new(
                CostErrorKind::CircularDependency,
                format!(
                    "Circular dependency detected for '{}'",
                    catalog.label(item_id)
                ),
            ),
        );
    }

    // Extend a private copy of the visited path for this subtree only;
    // sibling branches must never see each other's markers.
    let mut path = visited.clone();
    path.insert(item_id.to_string());

    let craft_yield = item.effective_yield();
    let crafts_needed = (quantity / craft_yield as f64).ceil() as u64;
    let actual_yield = crafts_needed * craft_yield as u64;

    // The energy price is required for every craftable node, checked the
    // same way a non-craftable ingredient's price would be.
    let mut first_error: Option<CostError> = None;
    let energy_price = match prices.usable(ENERGY_ITEM_ID) {
        Some(price) => price,
        None => {
            first_error = Some(missing_price_error(catalog, ENERGY_ITEM_ID));
            f64::INFINITY
        }
    };
    let mut errored = first_error.is_some();

    let mut ingredients_cost = 0.0;
    let mut ingredients: BTreeMap<String, BreakdownNode> = BTreeMap::new();

    for ingredient in &item.ingredients {
        let ing_id = ingredient.item_id.as_str();
        let needed = ingredient.quantity as f64 * crafts_needed as f64;

        if ing_id.is_empty() || !catalog.contains(ing_id) {
            let err = CostError::new(
                CostErrorKind::InvalidIngredient,
                format!(
                    "Recipe for '{}' references unknown ingredient '{}'",
                    catalog.label(item_id),
                    ing_id
                ),
            );
            ingredients.insert(
                ing_id.to_string(),
                BreakdownNode {
                    item_id: ing_id.to_string(),
                    quantity: needed,
                    total_cost: f64::INFINITY,
                    cost_per_unit: f64::INFINITY,
                    calculated_cost_per_unit: None,
                    outcome: Outcome::Failed(err.clone()),
                    ingredients: BTreeMap::new(),
                },
            );
            errored = true;
            first_error.get_or_insert(err);
            ingredients_cost = f64::INFINITY;
            continue;
        }

        // Ingredients always pick their own cheapest option.
        let child = resolve_node(catalog, ing_id, needed, prices, &path, depth + 1, false);

        if child.is_error() || !child.total_cost.is_finite() {
            errored = true;
            ingredients_cost = f64::INFINITY;
            if let Some(mut node) = child.breakdown {
                if !node.is_error() {
                    // Finite-check tripped without an explicit flag.
                    node.total_cost = f64::INFINITY;
                    node.cost_per_unit = f64::INFINITY;
                    node.outcome = Outcome::Failed(CostError::new(
                        CostErrorKind::InvalidCalculation,
                        format!(
                            "Cost of '{}' did not resolve to a finite number",
                            catalog.label(ing_id)
                        ),
                    ));
                }
                if first_error.is_none() {
                    first_error = node.error().cloned();
                }
                ingredients.insert(ing_id.to_string(), node);
            }
        } else {
            if let Some(node) = child.breakdown {
                ingredients.insert(ing_id.to_string(), node);
            }
            // Once the node is known to be failed the subtotal stays
            // infinite; successful siblings are still resolved for the
            // breakdown but no longer accumulated.
            if !errored {
                ingredients_cost += child.total_cost;
            }
        }
    }

    let energy_total = item.energy_cost * crafts_needed as f64 * energy_price;

    let calculated_total;
    let mut calculated_per_unit;
    if !errored && ingredients_cost.is_finite() && energy_total.is_finite() {
        calculated_total = ingredients_cost + energy_total;
        calculated_per_unit = if actual_yield > 0 {
            calculated_total / actual_yield as f64
        } else {
            0.0
        };
        if !calculated_per_unit.is_finite() || calculated_per_unit < 0.0 {
            calculated_per_unit = f64::INFINITY;
            errored = true;
            first_error.get_or_insert_with(|| {
                CostError::new(
                    CostErrorKind::InvalidCalculation,
                    format!(
                        "Computed craft cost for '{}' is not a valid number",
                        catalog.label(item_id)
                    ),
                )
            });
        }
    } else {
        errored = true;
        calculated_total = f64::INFINITY;
        calculated_per_unit = f64::INFINITY;
        first_error.get_or_insert_with(|| {
            CostError::new(
                CostErrorKind::InvalidCalculation,
                format!("Cost calculation failed for '{}'", catalog.label(item_id)),
            )
        });
    }

    if errored {
        let err = first_error.unwrap_or_else(|| {
            CostError::new(
                CostErrorKind::InvalidCalculation,
                format!("Cost calculation failed for '{}'", catalog.label(item_id)),
            )
        });
        return CostResult {
            total_cost: f64::INFINITY,
            cost_per_unit: f64::INFINITY,
            calculated_cost_per_unit: Some(calculated_per_unit),
            breakdown: Some(BreakdownNode {
                item_id: item_id.to_string(),
                quantity,
                total_cost: f64::INFINITY,
                cost_per_unit: f64::INFINITY,
                calculated_cost_per_unit: Some(calculated_per_unit),
                outcome: Outcome::Failed(err),
                ingredients,
            }),
        };
    }

    // Make-vs-buy: a usable quoted price wins only when strictly cheaper
    // than crafting; crafting wins ties. `force_craft` skips the
    // comparison entirely.
    let quoted = prices.usable(item_id);
    let use_quoted = !force_craft && quoted.is_some_and(|p| p < calculated_per_unit);

    let cost_per_unit = if use_quoted {
        quoted.unwrap_or(calculated_per_unit)
    } else {
        calculated_per_unit
    };
    let total_cost = cost_per_unit * quantity;

    if !total_cost.is_finite() {
        return CostResult {
            total_cost: f64::INFINITY,
            cost_per_unit: f64::INFINITY,
            calculated_cost_per_unit: Some(calculated_per_unit),
            breakdown: Some(BreakdownNode {
                item_id: item_id.to_string(),
                quantity,
                total_cost: f64::INFINITY,
                cost_per_unit: f64::INFINITY,
                calculated_cost_per_unit: Some(calculated_per_unit),
                outcome: Outcome::Failed(CostError::new(
                    CostErrorKind::InvalidCalculation,
                    format!(
                        "Total cost for '{}' is not a finite number",
                        catalog.label(item_id)
                    ),
                )),
                ingredients,
            }),
        };
    }

    let outcome = if use_quoted {
        Outcome::Bought
    } else {
        Outcome::Crafted(CraftDetails {
            crafts_needed,
            actual_yield,
            total_craft_cost: calculated_total,
            ingredients_cost,
            energy_cost: energy_total,
        })
    };

    CostResult {
        total_cost,
        cost_per_unit,
        calculated_cost_per_unit: Some(calculated_per_unit),
        breakdown: Some(BreakdownNode {
            item_id: item_id.to_string(),
            quantity,
            total_cost,
            cost_per_unit,
            calculated_cost_per_unit: Some(calculated_per_unit),
            outcome,
            ingredients,
        }),
    }
}

fn missing_price_error(catalog: &Catalog, item_id: &str) -> CostError {
    CostError::new(
        CostErrorKind::MissingBasePrice,
        format!(
            "No price set for base resource '{}'",
            catalog.label(item_id)
        ),
    )
}

fn error_result(
    item_id: &str,
    quantity: f64,
    calculated_cost_per_unit: Option<f64>,
    err: CostError,
) -> CostResult {
    CostResult {
        total_cost: f64::INFINITY,
        cost_per_unit: f64::INFINITY,
        calculated_cost_per_unit,
        breakdown: Some(BreakdownNode {
            item_id: item_id.to_string(),
            quantity,
            total_cost: f64::INFINITY,
            cost_per_unit: f64::INFINITY,
            calculated_cost_per_unit,
            outcome: Outcome::Failed(err),
            ingredients: BTreeMap::new(),
        }),
    }
}
