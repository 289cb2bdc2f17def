use crate::models::{Catalog, CostResult, Lang};
use crate::resolver::{AggregateEntry, FlatBreakdown};
use crate::state::PriceHint;

/// Format a cost for display: two decimals, with non-numbers spelled out.
pub fn format_cost(value: f64) -> String {
    if value.is_nan() {
        return "N/A".to_string();
    }
    if !value.is_finite() {
        return "error".to_string();
    }
    format!("{:.2}", value)
}

/// Display the top-level cost of a resolution.
pub fn display_cost_result(catalog: &Catalog, lang: Lang, item_id: &str, result: &CostResult) {
    let name = catalog.display_name(item_id, lang);

    if let Some(err) = result.error() {
        println!();
        println!("Could not resolve {}: {}", name, err.message);
        return;
    }

    println!();
    println!("=== {} x{} ===", name, result.breakdown.as_ref().map(|b| b.quantity).unwrap_or(0.0));
    println!("Total cost:    {}", format_cost(result.total_cost));
    println!("Cost per unit: {}", format_cost(result.cost_per_unit));

    if let Some(calculated) = result.calculated_cost_per_unit {
        let bought = result
            .breakdown
            .as_ref()
            .is_some_and(|b| b.is_base());
        if bought {
            println!(
                "Bought at the quoted price; crafting would cost {} per unit.",
                format_cost(calculated)
            );
        }
    }
}

fn entry_line(catalog: &Catalog, lang: Lang, item_id: &str, entry: &AggregateEntry) -> String {
    let name = catalog.display_name(item_id, lang);

    if entry.is_error {
        let message = entry.error.as_deref().unwrap_or("error");
        return format!("{}: {}", name, message);
    }

    let per_unit = if entry.quantity > 0.0 && entry.cost.is_finite() {
        entry.cost / entry.quantity
    } else {
        0.0
    };

    let mut line = format!(
        "{}: {} pcs (total {}, {} each)",
        name,
        entry.quantity,
        format_cost(entry.cost),
        format_cost(per_unit)
    );

    if let Some(details) = &entry.craft_details {
        line.push_str(&format!(
            " ({} craft(s) => {} pcs, ingredients {}, energy {})",
            details.crafts_needed,
            details.actual_yield,
            format_cost(details.ingredients_cost),
            format_cost(details.energy_cost)
        ));
    }

    line
}

/// Display the flattened breakdown: crafted intermediates first, then base
/// resources. The target item itself is omitted from the crafted list.
pub fn display_breakdown(catalog: &Catalog, lang: Lang, flat: &FlatBreakdown, target_id: &str) {
    println!();
    println!("--- Intermediate components (crafted) ---");

    let mut crafted: Vec<(&String, &AggregateEntry)> = flat
        .crafted
        .iter()
        .filter(|(id, _)| id.as_str() != target_id)
        .collect();
    crafted.sort_by_key(|(id, _)| catalog.display_name(id, lang));

    if crafted.is_empty() {
        println!("  (no intermediate crafts)");
    } else {
        for (id, entry) in crafted {
            println!("  {}", entry_line(catalog, lang, id, entry));
        }
    }

    println!();
    println!("--- Base resources (buy/gather) ---");

    let mut base: Vec<(&String, &AggregateEntry)> = flat.base.iter().collect();
    base.sort_by_key(|(id, _)| catalog.display_name(id, lang));

    if base.is_empty() {
        println!("  (no base resources)");
    } else {
        for (id, entry) in base {
            println!("  {}", entry_line(catalog, lang, id, entry));
        }
    }

    println!();
}

/// Display price hints from the last calculation.
pub fn display_price_hints(catalog: &Catalog, lang: Lang, hints: &[(String, PriceHint)]) {
    if hints.is_empty() {
        return;
    }

    println!("--- Price hints ---");
    for (id, hint) in hints {
        let name = catalog.display_name(id, lang);
        match hint {
            PriceHint::MissingPrice => {
                println!("  {}: no price set", name);
            }
            PriceHint::CheaperToBuy { quoted, calculated } => {
                println!(
                    "  {}: cheaper to buy ({} quoted vs {} crafted)",
                    name,
                    format_cost(*quoted),
                    format_cost(*calculated)
                );
            }
            PriceHint::CheaperToCraft { quoted, calculated } => {
                println!(
                    "  {}: cheaper to craft ({} crafted vs {} quoted)",
                    name,
                    format_cost(*calculated),
                    format_cost(*quoted)
                );
            }
        }
    }
    println!();
}

/// Display the catalog grouped into craftable and base items.
pub fn display_item_list(catalog: &Catalog, lang: Lang) {
    let mut craftable = catalog.craftable_items();
    craftable.sort_by_key(|(id, _)| catalog.display_name(id, lang));

    let mut base = catalog.base_items();
    base.sort_by_key(|(id, _)| catalog.display_name(id, lang));

    println!();
    println!("=== Craftable items ({}) ===", craftable.len());
    for (id, item) in craftable {
        println!(
            "  {} [{}] - yield {}, energy {}, {} ingredient(s)",
            catalog.display_name(id, lang),
            id,
            item.effective_yield(),
            item.energy_cost,
            item.ingredients.len()
        );
    }

    println!();
    println!("=== Base items ({}) ===", base.len());
    for (id, item) in base {
        if item.avg_price > 0.0 {
            println!(
                "  {} [{}] - suggested price {}",
                catalog.display_name(id, lang),
                id,
                format_cost(item.avg_price)
            );
        } else {
            println!("  {} [{}]", catalog.display_name(id, lang), id);
        }
    }

    println!();
}
