//! In-memory quote
//!
//! A quote owns its line items. Every edit goes through the quote so each
//! item's cached result is recomputed with its inputs, which is what lets
//! `totals` trust the caches.

use crate::core::{Error, LineItem, LineItemCalc, ProductType, QuoteTotals, Result};
use crate::pricing::PricingEngine;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A quote: a named collection of line items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub name: String,
    /// Creation time (Unix timestamp)
    #[serde(default = "now")]
    pub created_at: i64,
    #[serde(default)]
    items: Vec<LineItem>,
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

fn new_item_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl Quote {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            created_at: now(),
            items: Vec::new(),
        }
    }

    /// Load a quote from a JSON or TOML file and price every item
    pub fn load(path: &Path, engine: &PricingEngine) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);

        let mut quote: Quote = if is_toml {
            toml::from_str(&content).map_err(|e| Error::Serialization(e.to_string()))?
        } else {
            serde_json::from_str(&content)?
        };

        // Cached results in the file are never trusted
        for item in &mut quote.items {
            if item.id.is_empty() {
                item.id = new_item_id();
            }
        }
        quote.recompute_all(engine);

        log::info!("Loaded quote '{}' with {} line items", quote.name, quote.items.len());
        Ok(quote)
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Add a line item, pricing it immediately. Returns its id.
    pub fn add_item(&mut self, engine: &PricingEngine, mut item: LineItem) -> String {
        if item.id.is_empty() {
            item.id = new_item_id();
        }
        engine.refresh(&mut item);
        let id = item.id.clone();
        self.items.push(item);
        id
    }

    /// Add a new product with the engine's defaults
    pub fn add_product(&mut self, engine: &PricingEngine, product_type: ProductType, name: &str) -> String {
        let item = engine.new_line_item(product_type, name);
        self.add_item(engine, item)
    }

    /// Edit an item and reprice it
    ///
    /// Returns the new result, or None when no item has that id.
    pub fn update_item<F>(&mut self, engine: &PricingEngine, id: &str, edit: F) -> Option<LineItemCalc>
    where
        F: FnOnce(&mut LineItem),
    {
        let item = self.items.iter_mut().find(|i| i.id == id)?;
        edit(item);
        Some(engine.refresh(item))
    }

    /// Mark an item optional (shown, not totalled) or required
    pub fn set_optional(&mut self, engine: &PricingEngine, id: &str, optional: bool) -> bool {
        self.update_item(engine, id, |item| item.optional = optional)
            .is_some()
    }

    /// Copy an item under a new id, placed right after the original
    pub fn duplicate_item(&mut self, id: &str) -> Option<String> {
        let index = self.items.iter().position(|i| i.id == id)?;
        let mut copy = self.items[index].clone();
        copy.id = new_item_id();
        copy.name = format!("{} (copy)", copy.name);

        let new_id = copy.id.clone();
        self.items.insert(index + 1, copy);
        Some(new_id)
    }

    pub fn remove_item(&mut self, id: &str) -> Option<LineItem> {
        let index = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(index))
    }

    /// Reprice every item, e.g. after the catalog changed
    pub fn recompute_all(&mut self, engine: &PricingEngine) {
        for item in &mut self.items {
            engine.refresh(item);
        }
    }

    /// Blended totals of the non-optional items
    pub fn totals(&self, engine: &PricingEngine) -> QuoteTotals {
        engine.calc_totals_cached(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoxTruckSpec, PriceSource};

    #[test]
    fn test_add_prices_item() {
        let engine = PricingEngine::default();
        let mut quote = Quote::new("Fleet");

        let id = quote.add_product(&engine, ProductType::Custom, "Wall graphic");
        let item = quote.item(&id).unwrap();

        assert!(!id.is_empty());
        assert_eq!(item.calc.unwrap().source, PriceSource::Solved);
    }

    #[test]
    fn test_update_reprices() {
        let engine = PricingEngine::default();
        let mut quote = Quote::new("Fleet");
        let id = quote.add_product(&engine, ProductType::BoxTruck, "Isuzu NPR");

        let before = quote.item(&id).unwrap().calc.unwrap();
        let after = quote
            .update_item(&engine, &id, |item| {
                item.box_truck = Some(BoxTruckSpec { length_ft: 20.0, ..Default::default() });
            })
            .unwrap();

        assert!(after.sale_price > before.sale_price);
        assert_eq!(quote.item(&id).unwrap().calc, Some(after));
        assert_eq!(quote.totals(&engine).revenue, after.sale_price);
        assert!(quote.update_item(&engine, "missing", |_| {}).is_none());
    }

    #[test]
    fn test_manual_price_set_and_cleared() {
        let engine = PricingEngine::default();
        let mut quote = Quote::new("Fleet");
        let id = quote.add_product(&engine, ProductType::Signage, "Yard sign");

        let manual = quote.update_item(&engine, &id, |item| item.set_manual_price(450.0)).unwrap();
        assert_eq!(manual.sale_price, 450.0);
        assert_eq!(manual.source, PriceSource::Manual);

        let solved = quote.update_item(&engine, &id, |item| item.clear_manual_price()).unwrap();
        assert_eq!(solved.sale_price, 1000.0);
        assert_eq!(solved.source, PriceSource::Solved);
    }

    #[test]
    fn test_optional_items_excluded_from_totals() {
        let engine = PricingEngine::default();
        let mut quote = Quote::new("Boat");
        let a = quote.add_product(&engine, ProductType::Custom, "Decals");
        let b = quote.add_product(&engine, ProductType::Custom, "Extra decals");

        let both = quote.totals(&engine);
        assert!(quote.set_optional(&engine, &b, true));
        let one = quote.totals(&engine);

        assert_eq!(one.revenue * 2.0, both.revenue);
        assert_eq!(one.optional_items, 1);
        assert!(quote.item(&b).is_some());

        quote.remove_item(&a);
        let none = quote.totals(&engine);
        assert_eq!(none.revenue, 0.0);
        assert_eq!(none.blended_gpm, 0.0);
    }

    #[test]
    fn test_duplicate_item() {
        let engine = PricingEngine::default();
        let mut quote = Quote::new("Fleet");
        let first = quote.add_product(&engine, ProductType::Vehicle, "Van");
        quote.add_product(&engine, ProductType::Vehicle, "Car");

        let copy = quote.duplicate_item(&first).unwrap();
        assert_ne!(copy, first);
        assert_eq!(quote.items()[1].id, copy);
        assert_eq!(quote.items()[1].name, "Van (copy)");
        assert!(quote.duplicate_item("missing").is_none());
    }

    #[test]
    fn test_load_ignores_cached_results() {
        let engine = PricingEngine::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quote.json");
        fs::write(
            &path,
            r#"{
                "name": "Loaded",
                "items": [
                    {
                        "type": "box_truck",
                        "box_truck": { "length_ft": 20 },
                        "calc": {
                            "area": 1, "sale_price": 1, "material_cost": 1, "labor": 1,
                            "design": 1, "cogs": 3, "profit": -2, "gpm": -200,
                            "effective_labor_pct": 100, "source": "manual"
                        }
                    },
                    { "type": "ppf", "optional": true, "ppf_selected": ["mirrors"] }
                ]
            }"#,
        )
        .unwrap();

        let quote = Quote::load(&path, &engine).unwrap();
        assert_eq!(quote.items().len(), 2);
        assert!(quote.items().iter().all(|i| !i.id.is_empty()));

        let totals = quote.totals(&engine);
        assert_eq!(totals.revenue, 6020.0);
        assert_eq!(totals.optional_items, 1);
    }

    #[test]
    fn test_load_toml_quote() {
        let engine = PricingEngine::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quote.toml");
        fs::write(
            &path,
            r#"
name = "Trailer job"

[[items]]
type = "trailer"
name = "Enclosed trailer"

[items.trailer]
length_ft = 24.0
height_ft = 7.0
vnose = "half_standard"
"#,
        )
        .unwrap();

        let quote = Quote::load(&path, &engine).unwrap();
        assert_eq!(quote.items()[0].calc.unwrap().area, 360.0);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let engine = PricingEngine::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quote.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Quote::load(&path, &engine), Err(Error::Serialization(_))));
    }
}
