//! Clothing category definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Body region the garment replaces on the model image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Shirts, jackets, sweaters
    #[default]
    UpperBody,
    /// Pants, skirts, shorts
    LowerBody,
    /// Full-length garments
    Dresses,
}

impl Category {
    /// All available categories.
    pub const ALL: &'static [Category] = &[
        Category::UpperBody,
        Category::LowerBody,
        Category::Dresses,
    ];

    /// Returns the value sent in the `category` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::UpperBody => "upper_body",
            Category::LowerBody => "lower_body",
            Category::Dresses => "dresses",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::UpperBody => "Upper Body",
            Category::LowerBody => "Lower Body",
            Category::Dresses => "Dresses",
        }
    }

    /// Example garments for this category.
    pub fn examples(&self) -> &'static str {
        match self {
            Category::UpperBody => "Shirts, t-shirts, jackets, blouses, sweaters",
            Category::LowerBody => "Pants, jeans, skirts, shorts",
            Category::Dresses => "Full dresses, gowns, robes",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "upper_body" => Ok(Category::UpperBody),
            "lower_body" => Ok(Category::LowerBody),
            "dresses" => Ok(Category::Dresses),
            _ => Err(CategoryParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown category: {0} (expected upper_body, lower_body or dresses)")]
pub struct CategoryParseError(String);
