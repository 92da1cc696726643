//! Order Composition
//!
//! Turns already-validated codes plus a catalog snapshot into an `Order`.
//! Codes are not re-checked here. A missing catalog entry is a configuration
//! fault, reported as `CompositionError`.

use thiserror::Error;

use crate::catalog::{CatalogItem, CatalogSource};
use crate::menu::{ItemCode, MealType, DEFAULT_DRINK};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompositionError {
    #[error("Catalog has no main dishes for {0}")]
    MissingMains(MealType),

    #[error("Catalog has no side dishes for {0}")]
    MissingSides(MealType),

    #[error("Catalog has no {drink} drink for {meal}")]
    MissingDrink { meal: MealType, drink: String },

    #[error("Catalog has no dessert for {0}")]
    MissingDessert(MealType),
}

/// Everything the catalog offers for one meal type, read once per request
#[derive(Debug, Clone, Default)]
pub struct MenuSnapshot {
    pub mains: Vec<CatalogItem>,
    pub sides: Vec<CatalogItem>,
    pub drinks: Vec<CatalogItem>,
    pub dessert: Option<CatalogItem>,
}

impl MenuSnapshot {
    pub fn fetch<C: CatalogSource + ?Sized>(catalog: &C, meal: MealType) -> Self {
        Self {
            mains: catalog.mains_for(meal),
            sides: catalog.sides_for(meal),
            drinks: catalog.drinks_for(meal),
            dessert: catalog.dessert_for(meal),
        }
    }

    fn default_drink(&self, meal: MealType) -> Result<&CatalogItem, CompositionError> {
        self.drinks
            .iter()
            .find(|d| d.name == DEFAULT_DRINK)
            .ok_or_else(|| CompositionError::MissingDrink {
                meal,
                drink: DEFAULT_DRINK.to_string(),
            })
    }

    fn alternate_drink(&self, meal: MealType) -> Result<&CatalogItem, CompositionError> {
        self.drinks
            .iter()
            .find(|d| d.name != DEFAULT_DRINK)
            .ok_or_else(|| CompositionError::MissingDrink {
                meal,
                drink: "non-default".to_string(),
            })
    }
}

/// A composed meal. `mains` and `sides` are never empty; `dessert` is set
/// exactly when the meal is Dinner.
#[derive(Debug, Clone)]
pub struct Order {
    pub meal_type: MealType,
    pub mains: Vec<CatalogItem>,
    pub sides: Vec<CatalogItem>,
    pub drinks: Vec<CatalogItem>,
    pub dessert: Option<CatalogItem>,
}

pub fn compose(meal: MealType, codes: &[i64], menu: &MenuSnapshot) -> Result<Order, CompositionError> {
    if menu.mains.is_empty() {
        return Err(CompositionError::MissingMains(meal));
    }
    let first_side = menu.sides.first().ok_or(CompositionError::MissingSides(meal))?;
    let drink_count = ItemCode::Drink.count_in(codes);

    let (sides, drinks, dessert) = match meal {
        MealType::Breakfast => {
            let drinks = if drink_count > 0 {
                vec![menu.alternate_drink(meal)?.clone(); drink_count]
            } else {
                vec![menu.default_drink(meal)?.clone()]
            };
            (menu.sides.clone(), drinks, None)
        }
        MealType::Lunch => {
            let sides = vec![first_side.clone(); ItemCode::Side.count_in(codes)];
            let drink = if drink_count > 0 {
                menu.alternate_drink(meal)?
            } else {
                menu.default_drink(meal)?
            };
            (sides, vec![drink.clone()], None)
        }
        MealType::Dinner => {
            // Wine always comes with a glass of water.
            let mut drinks = Vec::with_capacity(2);
            if drink_count > 0 {
                drinks.push(menu.alternate_drink(meal)?.clone());
            }
            drinks.push(menu.default_drink(meal)?.clone());
            let dessert = menu.dessert.clone().ok_or(CompositionError::MissingDessert(meal))?;
            (menu.sides.clone(), drinks, Some(dessert))
        }
    };

    Ok(Order {
        meal_type: meal,
        mains: menu.mains.clone(),
        sides,
        drinks,
        dessert,
    })
}
