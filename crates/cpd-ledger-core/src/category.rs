//! Credit categories.
//!
//! A closed set, validated once at the ledger boundary and carried as
//! the enum thereafter.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

/// The category a credit record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Ethics,
    Technical,
    Management,
}

impl Category {
    /// All categories, in wire order.
    pub const ALL: [Category; 3] = [Category::Ethics, Category::Technical, Category::Management];

    /// The lowercase wire string for this category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Ethics => "ethics",
            Category::Technical => "technical",
            Category::Management => "management",
        }
    }
}

impl FromStr for Category {
    type Err = LedgerError;

    /// Parse the exact lowercase wire strings; anything else is
    /// rejected with [`LedgerError::InvalidCategory`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ethics" => Ok(Category::Ethics),
            "technical" => Ok(Category::Technical),
            "management" => Ok(Category::Management),
            other => Err(LedgerError::InvalidCategory(other.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
