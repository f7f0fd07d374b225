//! Search filter input and the predicate algebra it compiles into.
//!
//! The filter compiler is pure: it turns the loosely-typed filter object
//! sent by the search screen into a [`Predicate`] tree. Translation into
//! an actual store query happens in the repository layer, which keeps
//! this module testable without a live database.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{AdvertisementListing, AdvertisementStatus};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

/// Storage-agnostic query predicate.
///
/// Composite nodes combine children with AND/OR; leaf nodes express the
/// comparisons the advertisement search needs. The set is closed on
/// purpose: repositories match exhaustively when translating.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Conjunction of all children
    All(Vec<Predicate>),
    /// Disjunction of all children
    Any(Vec<Predicate>),
    StatusEq(AdvertisementStatus),
    StatusIn(Vec<AdvertisementStatus>),
    OwnerEq(i64),
    ModelEq(String),
    ManufacturerNameEq(String),
    DescriptionContains(String),
    ModelContains(String),
    ManufacturerNameContains(String),
    YearManufactureAtLeast(i32),
    YearModelAtMost(i32),
    /// Inclusive value range
    ValueBetween(Decimal, Decimal),
}

/// Filter object sent by the search screen.
///
/// `yearManModel` carries a `"<manufactureYear>-<modelYear>"` range and
/// `valueMinMax` an inclusive `[min, max]` pair, both optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    pub term: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year_man_model: Option<String>,
    pub value_min_max: Option<[Decimal; 2]>,
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub items: Option<u64>,
}

impl SearchFilters {
    /// Parse the serialized-string form sent in the request path.
    pub fn from_json(raw: &str) -> AppResult<Self> {
        serde_json::from_str(raw).map_err(|e| AppError::parse(format!("invalid filters: {}", e)))
    }

    /// Compile the filters into a predicate.
    ///
    /// The Active-status guard is applied to the whole conjunction, so it
    /// holds uniformly across every branch of the term disjunction.
    pub fn compile(&self) -> AppResult<Predicate> {
        let mut clauses = vec![Predicate::StatusEq(AdvertisementStatus::Active)];

        if let Some(term) = self.term.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            clauses.push(Predicate::Any(vec![
                Predicate::DescriptionContains(term.to_string()),
                Predicate::ModelContains(term.to_string()),
                Predicate::ManufacturerNameContains(term.to_string()),
            ]));
        }

        if let Some(brand) = self.brand.as_deref().filter(|b| !b.is_empty()) {
            clauses.push(Predicate::ManufacturerNameEq(brand.to_string()));
        }

        if let Some(model) = self.model.as_deref().filter(|m| !m.is_empty()) {
            clauses.push(Predicate::ModelEq(model.to_string()));
        }

        if let Some(range) = &self.year_man_model {
            let (manufacture_from, model_to) = parse_year_range(range)?;
            clauses.push(Predicate::YearManufactureAtLeast(manufacture_from));
            clauses.push(Predicate::YearModelAtMost(model_to));
        }

        if let Some([min, max]) = &self.value_min_max {
            clauses.push(Predicate::ValueBetween(*min, *max));
        }

        Ok(Predicate::All(clauses))
    }

    /// Pagination requested by the filters, if any.
    pub fn pagination(&self) -> Option<PaginationParams> {
        match (self.page, self.items) {
            (None, None) => None,
            (page, items) => Some(PaginationParams::new(
                page.unwrap_or(crate::config::DEFAULT_PAGE_NUMBER),
                items.unwrap_or(crate::config::DEFAULT_PAGE_SIZE),
            )),
        }
    }
}

/// Parse a `"<manufactureYear>-<modelYear>"` range.
fn parse_year_range(raw: &str) -> AppResult<(i32, i32)> {
    let (from, to) = raw
        .split_once('-')
        .ok_or_else(|| AppError::validation(format!("intervalo de anos inválido: {}", raw)))?;

    let manufacture_from: i32 = from
        .trim()
        .parse()
        .map_err(|_| AppError::validation(format!("ano de fabricação inválido: {}", from)))?;
    let model_to: i32 = to
        .trim()
        .parse()
        .map_err(|_| AppError::validation(format!("ano de modelo inválido: {}", to)))?;

    Ok((manufacture_from, model_to))
}

/// Option sets the search screen uses to populate its filter widgets.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct FilterOptions {
    pub brands: Vec<String>,
    pub models: Vec<String>,
    /// `"<manufactureYear>-<modelYear>"` pairs
    pub year_ranges: Vec<String>,
    pub value_min: Option<Decimal>,
    pub value_max: Option<Decimal>,
}

impl FilterOptions {
    /// Derive the option sets from an in-memory result list, deduplicated
    /// in first-seen order. Used to narrow the widgets after a search.
    pub fn from_listings(listings: &[AdvertisementListing]) -> Self {
        let mut options = FilterOptions::default();

        for listing in listings {
            if let Some(manufacturer) = &listing.manufacturer {
                push_unique(&mut options.brands, manufacturer.name.clone());
            }
            push_unique(
                &mut options.models,
                listing.advertisement.model_description.clone(),
            );
            push_unique(
                &mut options.year_ranges,
                format!(
                    "{}-{}",
                    listing.advertisement.year_manufacture, listing.advertisement.year_model
                ),
            );

            let value = listing.advertisement.value;
            options.value_min = Some(match options.value_min {
                Some(min) if min <= value => min,
                _ => value,
            });
            options.value_max = Some(match options.value_max {
                Some(max) if max >= value => max,
                _ => value,
            });
        }

        options
    }
}

fn push_unique(values: &mut Vec<String>, value: String) {
    if !values.contains(&value) {
        values.push(value);
    }
}
