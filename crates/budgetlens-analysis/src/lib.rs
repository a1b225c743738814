//! Category analysis for BudgetLens
//!
//! Pure transforms from raw budget records to display-ready summaries.
//! All amounts are signed milliunits (1/1000 of the currency unit), the
//! wire format used by the remote budgeting API. No I/O happens here;
//! every function is a total, stateless mapping recomputed per request.

use serde::{Deserialize, Serialize};

/// A raw category record as returned by the remote budgeting API.
///
/// The remote payload carries more fields than these; unknown fields are
/// ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category id, unique within a budget
    pub id: String,
    /// Display name
    pub name: String,
    /// Amount budgeted for the month, in milliunits
    pub budgeted: i64,
    /// Activity (outflows negative) for the month, in milliunits
    pub activity: i64,
    /// Remaining balance for the month, in milliunits
    pub balance: i64,
}

/// Display-ready summary of one category for one month.
///
/// Derived 1:1 from a [`Category`]; never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// Id of the source category
    pub category_id: String,
    /// Display name
    pub name: String,
    /// Budgeted amount, milliunits
    pub budgeted: i64,
    /// Assigned amount: activity + balance, milliunits
    pub assigned: i64,
    /// Actual spend: equal to activity, milliunits
    pub actual: i64,
}

impl CategorySummary {
    fn from_category(category: &Category) -> Self {
        Self {
            category_id: category.id.clone(),
            name: category.name.clone(),
            budgeted: category.budgeted,
            assigned: category.activity + category.balance,
            actual: category.activity,
        }
    }
}

/// Summarize a month's category list.
///
/// Order-preserving and total: every input category produces exactly one
/// summary, nothing is filtered.
pub fn summarize(categories: &[Category]) -> Vec<CategorySummary> {
    categories.iter().map(CategorySummary::from_category).collect()
}

/// Format a milliunit amount as a plain decimal string with two places.
///
/// `-12500` renders as `-12.50`. Rounds toward zero on sub-cent residue,
/// matching how the remote API's own web UI truncates display amounts.
pub fn format_milliunits(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    let units = abs / 1000;
    let cents = (abs % 1000) / 10;
    format!("{sign}{units}.{cents:02}")
}
