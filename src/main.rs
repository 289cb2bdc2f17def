use clap::Parser;
use std::path::Path;

use craft_calc_rs::cli::{Cli, Command};
use craft_calc_rs::error::{CraftError, Result};
use craft_calc_rs::interface::{
    display_breakdown, display_cost_result, display_item_list, display_price_hints,
    prompt_item_id, prompt_price, prompt_quantity, prompt_yes_no,
};
use craft_calc_rs::models::{Catalog, Lang, PriceMap};
use craft_calc_rs::resolver::{collect_calculated_costs, flatten_breakdown, resolve_cost};
use craft_calc_rs::state::{
    load_catalog, load_prices, sanitize_prices, save_prices, PriceManager,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    let lang = Lang::from_tag(&cli.lang).unwrap_or_else(|| {
        eprintln!(
            "Unknown language '{}', falling back to {}",
            cli.lang,
            Lang::En.tag()
        );
        Lang::En
    });

    match command {
        Command::Calc {
            item,
            quantity,
            force_craft,
            json,
        } => cmd_calc(&cli.catalog, &cli.prices, lang, item, quantity, force_craft, json),
        Command::Prices => cmd_prices(&cli.catalog, &cli.prices, lang),
        Command::Import { file } => cmd_import(&cli.prices, &file),
        Command::Export { file } => cmd_export(&cli.prices, &file),
        Command::Items => cmd_items(&cli.catalog, lang),
    }
}

/// Load the catalog and report data problems without aborting.
fn open_catalog(path: &str) -> Result<Catalog> {
    if !Path::new(path).exists() {
        eprintln!("Catalog file not found: {}", path);
        eprintln!("Provide a recipe catalog with --catalog.");
        return Err(CraftError::InvalidInput(format!(
            "missing catalog file {}",
            path
        )));
    }

    let catalog = load_catalog(path)?;

    for warning in catalog.validate() {
        eprintln!("Warning: {}", warning);
    }

    Ok(catalog)
}

/// Load saved prices if present, then seed suggested defaults.
fn open_prices(path: &str, catalog: &Catalog) -> Result<PriceManager> {
    let saved = if Path::new(path).exists() {
        load_prices(path)?
    } else {
        PriceMap::new()
    };

    let mut manager = PriceManager::new(saved);
    manager.seed_defaults(catalog);
    Ok(manager)
}

/// Resolve one item and render the result.
fn cmd_calc(
    catalog_path: &str,
    prices_path: &str,
    lang: Lang,
    item: Option<String>,
    quantity: u32,
    force_craft: bool,
    json: bool,
) -> Result<()> {
    let catalog = open_catalog(catalog_path)?;
    let manager = open_prices(prices_path, &catalog)?;

    let (item_id, quantity) = match item {
        Some(id) => (id, quantity),
        None => match prompt_item_id(&catalog, lang, "Item to resolve")? {
            Some(id) => (id, prompt_quantity(quantity)?),
            None => {
                println!("No item selected.");
                return Ok(());
            }
        },
    };

    if !catalog.contains(&item_id) {
        return Err(CraftError::ItemNotFound(item_id));
    }

    let result = resolve_cost(&catalog, &item_id, quantity as f64, manager.prices(), force_craft);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    display_cost_result(&catalog, lang, &item_id, &result);

    if let Some(breakdown) = result.breakdown.as_ref().filter(|b| !b.is_error()) {
        let flat = flatten_breakdown(breakdown);
        display_breakdown(&catalog, lang, &flat, &item_id);

        let calculated_costs = collect_calculated_costs(breakdown);
        let hints = manager.hints(&catalog, &calculated_costs);
        display_price_hints(&catalog, lang, &hints);
    }

    // Persist any defaults seeded on this run.
    save_prices(prices_path, manager.prices())?;

    Ok(())
}

/// Interactive price editor: fuzzy item lookup, empty input finishes.
fn cmd_prices(catalog_path: &str, prices_path: &str, lang: Lang) -> Result<()> {
    let catalog = open_catalog(catalog_path)?;
    let mut manager = open_prices(prices_path, &catalog)?;

    let missing = manager.missing_base_prices(&catalog, lang);
    if !missing.is_empty() {
        println!("Base resources without a usable price:");
        for id in &missing {
            println!("  {}", catalog.display_name(id, lang));
        }
        println!();
    }

    let mut changed = 0;

    loop {
        let item_id = match prompt_item_id(&catalog, lang, "Item to price (empty to finish)")? {
            Some(id) => id,
            None => break,
        };

        let label = catalog.display_name(&item_id, lang);
        match prompt_price(&label, manager.prices().get(&item_id))? {
            Some(price) => {
                manager.set_price(item_id.as_str(), price);
                println!("Set {} = {}", label, price);
            }
            None => {
                manager.clear_price(&item_id);
                println!("Cleared price for {}", label);
            }
        }
        changed += 1;
    }

    if changed > 0 {
        save_prices(prices_path, manager.prices())?;
        println!("Saved {} price change(s) to {}", changed, prices_path);
    } else {
        println!("No changes.");
    }

    Ok(())
}

/// Import a price file into the store, sanitizing invalid entries.
fn cmd_import(prices_path: &str, file: &str) -> Result<()> {
    if !Path::new(file).exists() {
        return Err(CraftError::InvalidInput(format!(
            "import file not found: {}",
            file
        )));
    }

    let raw = load_prices(file)?;
    let (clean, corrected) = sanitize_prices(raw);

    if corrected > 0 {
        println!(
            "Corrected {} invalid price value(s) to 0 during import.",
            corrected
        );
    }

    if Path::new(prices_path).exists() {
        let overwrite = prompt_yes_no(
            &format!("Overwrite existing prices in {}?", prices_path),
            true,
        )?;
        if !overwrite {
            println!("Import cancelled.");
            return Ok(());
        }
    }

    save_prices(prices_path, &clean)?;
    println!("Imported {} price(s) into {}", clean.len(), prices_path);

    Ok(())
}

/// Export the current price store to a JSON or CSV file.
fn cmd_export(prices_path: &str, file: &str) -> Result<()> {
    if !Path::new(prices_path).exists() {
        println!("No saved prices at {}; nothing to export.", prices_path);
        return Ok(());
    }

    let prices = load_prices(prices_path)?;
    save_prices(file, &prices)?;
    println!("Exported {} price(s) to {}", prices.len(), file);

    Ok(())
}

/// List the catalog.
fn cmd_items(catalog_path: &str, lang: Lang) -> Result<()> {
    let catalog = open_catalog(catalog_path)?;
    display_item_list(&catalog, lang);
    Ok(())
}
