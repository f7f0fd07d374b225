//! Report types produced by the reporting aggregator.

use serde::Serialize;

use crate::config::CATEGORY_NOT_FOUND;

/// Views-per-contact report.
///
/// `report` is the rounded ratio of views to contacts; both zero
/// denominators short-circuit to zeroed values instead of dividing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewContactReport {
    pub total_views: i64,
    pub total_contacts: u64,
    pub report: i64,
}

impl ViewContactReport {
    pub fn zeroed() -> Self {
        Self {
            total_views: 0,
            total_contacts: 0,
            report: 0,
        }
    }
}

/// One row of the per-status breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub total: i64,
}

/// Sold-advertisements summary for one user.
///
/// `percentage` is formatted to two decimals with a comma separator,
/// e.g. `"30,00%"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SoldReport {
    pub sold: u64,
    pub percentage: String,
}

/// The three attributes ranked by the sold-by-category report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoldCategory {
    Brand,
    ModelDescription,
    YearModel,
}

impl SoldCategory {
    /// Report order is fixed: brand, model, model year
    pub fn all() -> [SoldCategory; 3] {
        [
            SoldCategory::Brand,
            SoldCategory::ModelDescription,
            SoldCategory::YearModel,
        ]
    }

    /// Human-readable report label
    pub fn label(self) -> &'static str {
        match self {
            SoldCategory::Brand => "Marca mais vendida",
            SoldCategory::ModelDescription => "Modelo mais vendido",
            SoldCategory::YearModel => "Ano do modelo mais vendido",
        }
    }
}

/// One line of the sold-by-category report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryReport {
    pub category: String,
    pub result: String,
}

impl CategoryReport {
    /// Build a line from the winning value of a category, falling back to
    /// the not-found placeholder when the category has no winner.
    pub fn new(category: SoldCategory, winner: Option<String>) -> Self {
        Self {
            category: category.label().to_string(),
            result: winner.unwrap_or_else(|| CATEGORY_NOT_FOUND.to_string()),
        }
    }
}
