use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::{CraftError, Result};
use crate::models::{Catalog, Lang};

/// Minimum similarity score for a fuzzy item-name match.
const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Prompt for an item, resolving free-form input against the catalog.
///
/// Tries an exact id match, then an exact display-name match (any
/// language, case-insensitive), then fuzzy matching with a confirm or a
/// pick list. Returns `None` when the user submits an empty line.
pub fn prompt_item_id(catalog: &Catalog, lang: Lang, prompt: &str) -> Result<Option<String>> {
    loop {
        let input: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        if catalog.contains(input) {
            return Ok(Some(input.to_string()));
        }

        let needle = input.to_lowercase();

        let exact = catalog.iter().find(|(id, item)| {
            id.to_lowercase() == needle
                || item
                    .display_name(lang)
                    .is_some_and(|name| name.to_lowercase() == needle)
        });
        if let Some((id, _)) = exact {
            return Ok(Some(id.to_string()));
        }

        let mut candidates: Vec<(&str, f64)> = catalog
            .iter()
            .map(|(id, _)| {
                let name = catalog.display_name(id, lang).to_lowercase();
                let score = jaro_winkler(&name, &needle).max(jaro_winkler(id, &needle));
                (id, score)
            })
            .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
            .collect();

        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        if candidates.is_empty() {
            println!("No matching item found for '{}'", input);
            continue;
        }

        if candidates.len() == 1 {
            let id = candidates[0].0;
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", catalog.display_name(id, lang)))
                .default(true)
                .interact()?;

            if confirm {
                return Ok(Some(id.to_string()));
            }
            continue;
        }

        let options: Vec<String> = candidates
            .iter()
            .take(5)
            .map(|(id, _)| format!("{} ({})", catalog.display_name(id, lang), id))
            .collect();

        let mut selection_options = options.clone();
        selection_options.push("None of these".to_string());

        let selection = Select::new()
            .with_prompt("Which did you mean?")
            .items(&selection_options)
            .default(0)
            .interact()?;

        if selection < options.len() {
            return Ok(Some(candidates[selection].0.to_string()));
        }
    }
}

/// Prompt for the quantity to resolve.
pub fn prompt_quantity(default: u32) -> Result<u32> {
    let input: String = Input::new()
        .with_prompt("Quantity")
        .default(default.to_string())
        .interact_text()?;

    let quantity: u32 = input
        .parse()
        .map_err(|_| CraftError::InvalidInput("Invalid quantity".to_string()))?;

    if quantity == 0 {
        return Err(CraftError::InvalidInput(
            "Quantity must be at least 1".to_string(),
        ));
    }

    Ok(quantity)
}

/// Prompt for a unit price. Empty input clears the entry (no price).
pub fn prompt_price(label: &str, current: Option<f64>) -> Result<Option<f64>> {
    let shown = match current {
        Some(p) => format!("{}", p),
        None => String::new(),
    };

    let input: String = Input::new()
        .with_prompt(format!("Price for '{}' (empty for none)", label))
        .with_initial_text(shown)
        .allow_empty(true)
        .interact_text()?;

    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let price: f64 = input
        .parse()
        .map_err(|_| CraftError::InvalidInput("Invalid price".to_string()))?;

    if !price.is_finite() || price < 0.0 {
        return Err(CraftError::InvalidInput(
            "Price must be a non-negative number".to_string(),
        ));
    }

    Ok(Some(price))
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
