//! Catalog - Read-Only Menu Reference Data
//!
//! Seeded once, queried by meal type. Composition only ever sees
//! immutable snapshots handed out through `CatalogSource`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

use crate::menu::{ItemKind, MealType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub kind: ItemKind,
    pub meal_type: MealType,
    pub name: String,
}

impl CatalogItem {
    pub fn new(kind: ItemKind, meal_type: MealType, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            meal_type,
            name: name.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Catalog accessor - the only view of menu data the order pipeline needs
pub trait CatalogSource {
    fn mains_for(&self, meal: MealType) -> Vec<CatalogItem>;
    fn sides_for(&self, meal: MealType) -> Vec<CatalogItem>;
    fn drinks_for(&self, meal: MealType) -> Vec<CatalogItem>;
    /// First dessert for the meal, if any.
    fn dessert_for(&self, meal: MealType) -> Option<CatalogItem>;
}

impl<T: CatalogSource + ?Sized> CatalogSource for &T {
    fn mains_for(&self, meal: MealType) -> Vec<CatalogItem> {
        (**self).mains_for(meal)
    }

    fn sides_for(&self, meal: MealType) -> Vec<CatalogItem> {
        (**self).sides_for(meal)
    }

    fn drinks_for(&self, meal: MealType) -> Vec<CatalogItem> {
        (**self).drinks_for(meal)
    }

    fn dessert_for(&self, meal: MealType) -> Option<CatalogItem> {
        (**self).dessert_for(meal)
    }
}

/// In-memory catalog, insertion ordered
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The house menu every deployment starts from.
    pub fn seeded() -> Self {
        use ItemKind::*;
        use MealType::*;

        let seed: [(ItemKind, MealType, &str); 13] = [
            (Main, Breakfast, "Eggs"),
            (Main, Lunch, "Salad"),
            (Main, Dinner, "Steak"),
            (Side, Breakfast, "Toast"),
            (Side, Lunch, "Chips"),
            (Side, Dinner, "Potatoes"),
            (Drink, Breakfast, "Coffee"),
            (Drink, Breakfast, "Water"),
            (Drink, Lunch, "Soda"),
            (Drink, Lunch, "Water"),
            (Drink, Dinner, "Wine"),
            (Drink, Dinner, "Water"),
            (Dessert, Dinner, "Cake"),
        ];

        let mut catalog = Self::new();
        for (kind, meal, name) in seed {
            catalog.register(CatalogItem::new(kind, meal, name));
        }
        catalog
    }

    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        let catalog: Catalog = serde_json::from_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            items = catalog.items.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    pub fn register(&mut self, item: CatalogItem) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn select(&self, kind: ItemKind, meal: MealType) -> impl Iterator<Item = &CatalogItem> {
        self.items
            .iter()
            .filter(move |item| item.kind == kind && item.meal_type == meal)
    }
}

impl CatalogSource for Catalog {
    fn mains_for(&self, meal: MealType) -> Vec<CatalogItem> {
        self.select(ItemKind::Main, meal).cloned().collect()
    }

    fn sides_for(&self, meal: MealType) -> Vec<CatalogItem> {
        self.select(ItemKind::Side, meal).cloned().collect()
    }

    fn drinks_for(&self, meal: MealType) -> Vec<CatalogItem> {
        self.select(ItemKind::Drink, meal).cloned().collect()
    }

    fn dessert_for(&self, meal: MealType) -> Option<CatalogItem> {
        self.select(ItemKind::Dessert, meal).next().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn names(items: &[CatalogItem]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_seeded_lookups() {
        let catalog = Catalog::seeded();
        assert_eq!(names(&catalog.mains_for(MealType::Breakfast)), ["Eggs"]);
        assert_eq!(names(&catalog.sides_for(MealType::Lunch)), ["Chips"]);
        assert_eq!(names(&catalog.drinks_for(MealType::Dinner)), ["Wine", "Water"]);
        assert_eq!(catalog.dessert_for(MealType::Dinner).unwrap().name, "Cake");
        assert!(catalog.dessert_for(MealType::Lunch).is_none());
    }

    #[test]
    fn test_dessert_takes_first_match() {
        let mut catalog = Catalog::new();
        catalog.register(CatalogItem::new(ItemKind::Dessert, MealType::Dinner, "Pie"));
        catalog.register(CatalogItem::new(ItemKind::Dessert, MealType::Dinner, "Cake"));
        assert_eq!(catalog.dessert_for(MealType::Dinner).unwrap().name, "Pie");
    }

    #[test]
    fn test_load_from_file_generates_missing_ids() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"items": [
                {{"kind": "main", "mealType": "Lunch", "name": "Soup"}},
                {{"kind": "drink", "mealType": "Lunch", "name": "Water"}}
            ]}}"#
        )
        .unwrap();

        let catalog = Catalog::load_from_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(names(&catalog.mains_for(MealType::Lunch)), ["Soup"]);
        assert!(!catalog.items()[0].id.is_nil());
    }

    #[test]
    fn test_load_rejects_lowercase_meal_type() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"items": [{{"kind": "main", "mealType": "lunch", "name": "Soup"}}]}}"#).unwrap();

        let err = Catalog::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load_from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
