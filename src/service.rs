//! Order Service - Single Entry Point
//!
//! get_order MUST validate before touching the catalog. No bypass.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::catalog::{Catalog, CatalogSource};
use crate::compose::{compose, CompositionError, MenuSnapshot, Order};
use crate::format::format_order;
use crate::hashing::{compute_request_hash, compute_ticket_hash};
use crate::menu::MealType;
use crate::validation::{ValidationResult, Validator};
use crate::ENGINE_VERSION;

#[cfg(feature = "test-hooks")]
use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(feature = "test-hooks")]
static VALIDATION_CALL_COUNT: AtomicU32 = AtomicU32::new(0);

#[cfg(feature = "test-hooks")]
pub fn get_validation_call_count() -> u32 {
    VALIDATION_CALL_COUNT.load(Ordering::SeqCst)
}

#[cfg(feature = "test-hooks")]
pub fn reset_validation_call_count() {
    VALIDATION_CALL_COUNT.store(0, Ordering::SeqCst);
}

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Order could not be composed: {0}")]
    Composition(#[from] CompositionError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl OrderError {
    /// Violation messages, empty for non-validation failures.
    pub fn violations(&self) -> &[String] {
        match self {
            OrderError::Validation(messages) => messages,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub meal_type: String,
    #[serde(default, alias = "orders")]
    pub codes: Option<Vec<i64>>,
}

/// A JSON `null` meal type is treated like an absent one.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl OrderRequest {
    pub fn new(meal_type: impl Into<String>, codes: Vec<i64>) -> Self {
        Self {
            meal_type: meal_type.into(),
            codes: Some(codes),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTicket {
    pub id: String,
    pub meal_type: MealType,
    pub summary: String,
    pub engine_version: String,
    pub created_at: DateTime<Utc>,
    pub request_hash: String,
    pub ticket_hash: String,
}

/// The order service - validates, snapshots the catalog, composes, formats
pub struct OrderService<C: CatalogSource = Catalog> {
    catalog: C,
    validator: Validator,
}

impl<C: CatalogSource> OrderService<C> {
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            validator: Validator::new(),
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Everything on offer for one meal type
    pub fn menu(&self, meal: MealType) -> MenuSnapshot {
        MenuSnapshot::fetch(&self.catalog, meal)
    }

    /// Validate a request without composing it
    ///
    /// This is the ONLY validation entry point.
    pub fn validate_order(&self, request: &OrderRequest) -> ValidationResult {
        #[cfg(feature = "test-hooks")]
        VALIDATION_CALL_COUNT.fetch_add(1, Ordering::SeqCst);

        self.validator
            .validate(&request.meal_type, request.codes.as_deref())
    }

    /// Compose and render an order.
    ///
    /// CRITICAL: This ALWAYS calls validate_order first. No partial results.
    pub fn get_order(&self, request: &OrderRequest) -> Result<String, OrderError> {
        let order = self.compose_order(request)?;
        Ok(format_order(&order))
    }

    /// Compose an order and wrap it in a fingerprinted ticket.
    ///
    /// Tickets are handed back to the caller, never stored.
    pub fn place_order(&self, request: &OrderRequest) -> Result<OrderTicket, OrderError> {
        let order = self.compose_order(request)?;
        let request_hash = compute_request_hash(request, ENGINE_VERSION)?;

        let mut ticket = OrderTicket {
            id: Uuid::new_v4().to_string(),
            meal_type: order.meal_type,
            summary: format_order(&order),
            engine_version: ENGINE_VERSION.to_string(),
            created_at: Utc::now(),
            request_hash,
            ticket_hash: String::new(), // Computed after
        };
        ticket.ticket_hash = compute_ticket_hash(&ticket)?;

        info!(ticket = %ticket.id, meal = %ticket.meal_type, summary = %ticket.summary, "Ticket issued");
        Ok(ticket)
    }

    fn compose_order(&self, request: &OrderRequest) -> Result<Order, OrderError> {
        debug!(meal_type = %request.meal_type, codes = ?request.codes, "Order received");

        // MANDATORY: nothing reads the catalog for an unvalidated request.
        let validation = self.validate_order(request);
        let meal = match validation.meal_type {
            Some(meal) if validation.valid => meal,
            _ => {
                warn!(
                    meal_type = %request.meal_type,
                    violations = validation.violations.len(),
                    "Order rejected"
                );
                return Err(OrderError::Validation(validation.messages()));
            }
        };
        let codes = request.codes.as_deref().unwrap_or(&[]);

        let menu = self.menu(meal);
        debug!(
            %meal,
            mains = menu.mains.len(),
            sides = menu.sides.len(),
            drinks = menu.drinks.len(),
            dessert = menu.dessert.is_some(),
            "Catalog snapshot taken"
        );

        compose(meal, codes, &menu).map_err(|e| {
            error!(%meal, error = %e, "Catalog cannot satisfy a valid order");
            OrderError::Composition(e)
        })
    }
}

impl Default for OrderService<Catalog> {
    fn default() -> Self {
        Self::new(Catalog::seeded())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogItem;
    use crate::menu::ItemKind;

    #[test]
    fn test_request_accepts_orders_alias() {
        let request: OrderRequest =
            serde_json::from_str(r#"{"mealType": "Lunch", "orders": [1, 2, 2]}"#).unwrap();
        assert_eq!(request.codes, Some(vec![1, 2, 2]));
    }

    #[test]
    fn test_request_missing_codes_is_none() {
        let request: OrderRequest = serde_json::from_str(r#"{"mealType": "Lunch"}"#).unwrap();
        assert!(request.codes.is_none());

        let request: OrderRequest =
            serde_json::from_str(r#"{"mealType": "Lunch", "codes": null}"#).unwrap();
        assert!(request.codes.is_none());
    }

    #[test]
    fn test_request_null_meal_type_is_empty() {
        let request: OrderRequest =
            serde_json::from_str(r#"{"mealType": null, "codes": [1, 2]}"#).unwrap();
        assert_eq!(request.meal_type, "");

        let request: OrderRequest = serde_json::from_str(r#"{"codes": [1, 2]}"#).unwrap();
        assert_eq!(request.meal_type, "");

        let err = OrderService::new(Catalog::seeded()).get_order(&request).unwrap_err();
        assert_eq!(err.violations(), [crate::validation::MEAL_TYPE_REQUIRED]);
    }

    #[test]
    fn test_validation_error_display_joins_messages() {
        let err = OrderError::Validation(vec!["Main Dish Required".into(), "Side Dish Required".into()]);
        assert_eq!(
            err.to_string(),
            "Validation failed: Main Dish Required; Side Dish Required"
        );
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn test_composition_error_surfaces_distinctly() {
        let mut catalog = Catalog::new();
        catalog.register(CatalogItem::new(ItemKind::Main, MealType::Lunch, "Salad"));
        catalog.register(CatalogItem::new(ItemKind::Side, MealType::Lunch, "Chips"));
        let service = OrderService::new(catalog);

        let err = service.get_order(&OrderRequest::new("Lunch", vec![1, 2])).unwrap_err();
        assert!(matches!(err, OrderError::Composition(CompositionError::MissingDrink { .. })));
        assert!(err.violations().is_empty());
    }

    #[test]
    fn test_service_over_borrowed_catalog() {
        let catalog = Catalog::seeded();
        let service = OrderService::new(&catalog);
        assert_eq!(
            service.get_order(&OrderRequest::new("Lunch", vec![1, 2, 2, 3])).unwrap(),
            "Salad, Chips(2), Soda"
        );
    }
}
