//! Meal Order Core - Rule-Checked Meal Composition
//!
//! # The Four Laws
//! 1. Validation Runs First
//! 2. Every Violation Is Reported
//! 3. The Catalog Is Read-Only
//! 4. Summaries Are Deterministic

pub mod menu;
pub mod catalog;
pub mod validation;
pub mod compose;
pub mod format;
pub mod hashing;
pub mod service;

pub use menu::{ItemCode, ItemKind, MealType, DEFAULT_DRINK, DINNER_DRINK};
pub use catalog::{Catalog, CatalogError, CatalogItem, CatalogSource};
pub use validation::{OrderRule, ValidationResult, ValidationViolation, Validator};
pub use compose::{compose, CompositionError, MenuSnapshot, Order};
pub use format::format_order;
pub use hashing::{canonical_json, compute_request_hash, compute_ticket_hash};
pub use service::{OrderError, OrderRequest, OrderService, OrderTicket};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
