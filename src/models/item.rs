use serde::{Deserialize, Serialize};

/// Display language for item names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lang {
    #[default]
    En,
    Ru,
    Uk,
}

impl Lang {
    /// Parse a language tag ("en", "ru", "uk"), case-insensitive.
    pub fn from_tag(tag: &str) -> Option<Lang> {
        match tag.to_lowercase().as_str() {
            "en" => Some(Lang::En),
            "ru" => Some(Lang::Ru),
            "uk" => Some(Lang::Uk),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Ru => "ru",
            Lang::Uk => "uk",
        }
    }
}

/// One slot in a recipe: which item and how many per craft batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub item_id: String,
    pub quantity: u32,
}

/// A catalog entry: names, craftability, and the recipe if craftable.
///
/// Field names follow the recipe data files; `yield` is the units produced
/// per craft batch and `energyCost` is consumed once per batch regardless
/// of yield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_ru: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_uk: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,

    #[serde(default)]
    pub craftable: bool,

    #[serde(rename = "yield", default = "default_yield")]
    pub craft_yield: u32,

    #[serde(rename = "energyCost", default)]
    pub energy_cost: f64,

    #[serde(rename = "avgPrice", default)]
    pub avg_price: f64,

    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

fn default_yield() -> u32 {
    1
}

impl ItemDefinition {
    /// Name in the requested language, if set.
    pub fn name(&self, lang: Lang) -> Option<&str> {
        match lang {
            Lang::En => self.name_en.as_deref(),
            Lang::Ru => self.name_ru.as_deref(),
            Lang::Uk => self.name_uk.as_deref(),
        }
    }

    /// Display name with fallback: requested language, then ru, uk, en.
    pub fn display_name(&self, lang: Lang) -> Option<&str> {
        self.name(lang)
            .or(self.name_ru.as_deref())
            .or(self.name_uk.as_deref())
            .or(self.name_en.as_deref())
    }

    /// Yield with the legacy zero-means-one coercion applied.
    #[inline]
    pub fn effective_yield(&self) -> u32 {
        if self.craft_yield == 0 {
            1
        } else {
            self.craft_yield
        }
    }

    /// Basic validation: at least one name, sane numeric fields, and
    /// positive ingredient quantities.
    pub fn is_valid(&self) -> bool {
        let has_name = self.name_ru.is_some() || self.name_uk.is_some() || self.name_en.is_some();

        has_name
            && self.craft_yield >= 1
            && self.energy_cost.is_finite()
            && self.energy_cost >= 0.0
            && self.avg_price.is_finite()
            && self.avg_price >= 0.0
            && self
                .ingredients
                .iter()
                .all(|i| !i.item_id.is_empty() && i.quantity > 0)
    }
}
