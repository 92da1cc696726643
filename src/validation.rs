//! Validation System - Composition Rules
//!
//! Each rule produces structured violations. The validator collects every
//! violation rather than stopping at the first, except for the missing-codes
//! guard which short-circuits all code rules.

use serde::{Deserialize, Serialize};

use crate::menu::{ItemCode, MealType};

pub const MEAL_TYPE_REQUIRED: &str = "Meal Type must be specified";
pub const MEAL_TYPE_INVALID: &str = "Meal Type needs to be case-sensitive Breakfast, Lunch, or Dinner";
pub const ORDER_LIST_REQUIRED: &str = "Order List Required";
pub const VALID_ORDERS_REQUIRED: &str = "Valid Orders Required";
pub const MAIN_REQUIRED: &str = "Main Dish Required";
pub const SIDE_REQUIRED: &str = "Side Dish Required";
pub const MULTIPLE_MAINS: &str = "Cannot order multiple Main Dishes";
pub const MULTIPLE_DESSERTS: &str = "Cannot order multiple Desserts";
pub const DESSERT_DINNER_ONLY: &str =
    "Dessert can only be ordered with Dinner and is required of a Dinner order";
pub const MULTIPLE_SIDES: &str = "Only Lunch meals can order multiple sides";
pub const MULTIPLE_DRINKS: &str = "Only Breakfast meals can order multiple drinks";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationViolation {
    pub rule: String,
    pub message: String,
}

impl ValidationViolation {
    pub fn new(rule: &str, message: &str) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    pub violations: Vec<ValidationViolation>,
    /// Present whenever the meal type parsed, even if the codes did not pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<MealType>,
}

impl ValidationResult {
    pub fn success(meal: MealType) -> Self {
        Self {
            valid: true,
            violations: vec![],
            meal_type: Some(meal),
        }
    }

    pub fn failure(meal: Option<MealType>, violations: Vec<ValidationViolation>) -> Self {
        Self {
            valid: false,
            violations,
            meal_type: meal,
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.message.clone()).collect()
    }
}

/// A single composition rule over a non-empty code list.
///
/// `meal` is `None` when the meal type failed to parse; rules that depend on
/// the meal type stay silent in that case.
pub trait OrderRule {
    fn name(&self) -> &'static str;
    fn validate(&self, codes: &[i64], meal: Option<MealType>) -> Vec<ValidationViolation>;
}

fn violation_if(failed: bool, rule: &dyn OrderRule, message: &str) -> Vec<ValidationViolation> {
    if failed {
        vec![ValidationViolation::new(rule.name(), message)]
    } else {
        vec![]
    }
}

// --- Concrete Rules ---

pub struct KnownCodesRule;

impl OrderRule for KnownCodesRule {
    fn name(&self) -> &'static str { "known_codes" }

    fn validate(&self, codes: &[i64], _meal: Option<MealType>) -> Vec<ValidationViolation> {
        let unknown = codes.iter().any(|&c| ItemCode::try_from(c).is_err());
        violation_if(unknown, self, VALID_ORDERS_REQUIRED)
    }
}

pub struct MainRequiredRule;

impl OrderRule for MainRequiredRule {
    fn name(&self) -> &'static str { "main_required" }

    fn validate(&self, codes: &[i64], _meal: Option<MealType>) -> Vec<ValidationViolation> {
        violation_if(ItemCode::Main.count_in(codes) == 0, self, MAIN_REQUIRED)
    }
}

pub struct SideRequiredRule;

impl OrderRule for SideRequiredRule {
    fn name(&self) -> &'static str { "side_required" }

    fn validate(&self, codes: &[i64], _meal: Option<MealType>) -> Vec<ValidationViolation> {
        violation_if(ItemCode::Side.count_in(codes) == 0, self, SIDE_REQUIRED)
    }
}

pub struct SingleMainRule;

impl OrderRule for SingleMainRule {
    fn name(&self) -> &'static str { "single_main" }

    fn validate(&self, codes: &[i64], _meal: Option<MealType>) -> Vec<ValidationViolation> {
        violation_if(ItemCode::Main.count_in(codes) > 1, self, MULTIPLE_MAINS)
    }
}

pub struct SingleDessertRule;

impl OrderRule for SingleDessertRule {
    fn name(&self) -> &'static str { "single_dessert" }

    fn validate(&self, codes: &[i64], _meal: Option<MealType>) -> Vec<ValidationViolation> {
        violation_if(ItemCode::Dessert.count_in(codes) > 1, self, MULTIPLE_DESSERTS)
    }
}

/// Dessert is required with Dinner and forbidden with anything else.
pub struct DinnerDessertRule;

impl OrderRule for DinnerDessertRule {
    fn name(&self) -> &'static str { "dinner_dessert" }

    fn validate(&self, codes: &[i64], meal: Option<MealType>) -> Vec<ValidationViolation> {
        let Some(meal) = meal else { return vec![] };
        let has_dessert = ItemCode::Dessert.count_in(codes) > 0;
        violation_if(has_dessert != (meal == MealType::Dinner), self, DESSERT_DINNER_ONLY)
    }
}

/// Lunch may repeat the side code; every other meal takes at most one.
pub struct SideQuantityRule;

impl OrderRule for SideQuantityRule {
    fn name(&self) -> &'static str { "side_quantity" }

    fn validate(&self, codes: &[i64], meal: Option<MealType>) -> Vec<ValidationViolation> {
        match meal {
            None | Some(MealType::Lunch) => vec![],
            Some(_) => violation_if(ItemCode::Side.count_in(codes) > 1, self, MULTIPLE_SIDES),
        }
    }
}

/// Breakfast may repeat the drink code; every other meal takes at most one.
pub struct DrinkQuantityRule;

impl OrderRule for DrinkQuantityRule {
    fn name(&self) -> &'static str { "drink_quantity" }

    fn validate(&self, codes: &[i64], meal: Option<MealType>) -> Vec<ValidationViolation> {
        match meal {
            None | Some(MealType::Breakfast) => vec![],
            Some(_) => violation_if(ItemCode::Drink.count_in(codes) > 1, self, MULTIPLE_DRINKS),
        }
    }
}

/// Validator checks the meal type, guards the code list, then runs every rule
pub struct Validator {
    rules: Vec<Box<dyn OrderRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(KnownCodesRule),
                Box::new(MainRequiredRule),
                Box::new(SideRequiredRule),
                Box::new(SingleMainRule),
                Box::new(SingleDessertRule),
                Box::new(DinnerDessertRule),
                Box::new(SideQuantityRule),
                Box::new(DrinkQuantityRule),
            ],
        }
    }

    pub fn validate(&self, meal_type: &str, codes: Option<&[i64]>) -> ValidationResult {
        let mut all_violations = vec![];

        let meal = MealType::parse(meal_type);
        if meal_type.trim().is_empty() {
            all_violations.push(ValidationViolation::new("meal_type", MEAL_TYPE_REQUIRED));
        } else if meal.is_none() {
            all_violations.push(ValidationViolation::new("meal_type", MEAL_TYPE_INVALID));
        }

        // Nothing below may look at an absent or empty list.
        let codes = match codes {
            Some(codes) if !codes.is_empty() => codes,
            _ => {
                all_violations.push(ValidationViolation::new("codes_present", ORDER_LIST_REQUIRED));
                return ValidationResult::failure(meal, all_violations);
            }
        };

        for rule in &self.rules {
            all_violations.extend(rule.validate(codes, meal));
        }

        match meal {
            Some(meal) if all_violations.is_empty() => ValidationResult::success(meal),
            _ => ValidationResult::failure(meal, all_violations),
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
