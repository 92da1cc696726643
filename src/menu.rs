//! Menu Vocabulary - Meal Types and Item Codes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Drink served when no drink code is ordered.
pub const DEFAULT_DRINK: &str = "Water";

/// The non-default Dinner drink. Drink summaries key off this literal name.
pub const DINNER_DRINK: &str = "Wine";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
        }
    }

    /// Exact, case-sensitive parse. "dinner" and " Dinner" are rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|meal| meal.as_str() == raw)
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown meal type: {0:?}")]
pub struct UnknownMealType(pub String);

impl FromStr for MealType {
    type Err = UnknownMealType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownMealType(s.to_string()))
    }
}

/// Category of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Main,
    Side,
    Drink,
    Dessert,
}

/// Selection code submitted by the customer. Repetition encodes quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemCode {
    Main = 1,
    Side = 2,
    Drink = 3,
    Dessert = 4,
}

impl ItemCode {
    /// Number of times this code appears in `codes`.
    pub fn count_in(&self, codes: &[i64]) -> usize {
        let raw = *self as i64;
        codes.iter().filter(|&&c| c == raw).count()
    }
}

impl TryFrom<i64> for ItemCode {
    type Error = i64;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        match raw {
            1 => Ok(ItemCode::Main),
            2 => Ok(ItemCode::Side),
            3 => Ok(ItemCode::Drink),
            4 => Ok(ItemCode::Dessert),
            other => Err(other),
        }
    }
}
