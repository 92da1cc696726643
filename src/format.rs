//! Order Summary Rendering

use crate::catalog::CatalogItem;
use crate::compose::Order;
use crate::menu::{MealType, DEFAULT_DRINK, DINNER_DRINK};

/// `Name` for a single item, `Name(count)` for several, keyed on the first.
fn counted(items: &[CatalogItem]) -> String {
    match items {
        [] => String::new(),
        [only] => only.name.clone(),
        [first, ..] => format!("{}({})", first.name, items.len()),
    }
}

fn drink_segment(drinks: &[CatalogItem]) -> String {
    if drinks.len() <= 1 {
        return counted(drinks);
    }

    // Wine is always served alongside water, so its count is reported
    // separately from the water that came with it.
    match drinks.iter().filter(|d| d.name == DINNER_DRINK).count() {
        0 => counted(drinks),
        1 => format!("{}, {}", DINNER_DRINK, DEFAULT_DRINK),
        wine => format!("{}({}), {}", DINNER_DRINK, wine, DEFAULT_DRINK),
    }
}

/// Render an order as `Main, Side, Drink[, Dessert]`.
pub fn format_order(order: &Order) -> String {
    let mut segments = vec![
        counted(&order.mains),
        counted(&order.sides),
        drink_segment(&order.drinks),
    ];

    if order.meal_type == MealType::Dinner {
        if let Some(dessert) = &order.dessert {
            segments.push(dessert.name.clone());
        }
    }

    segments.join(", ")
}
