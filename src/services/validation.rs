//! Per-row validation of bulk-import files.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::{MAX_VEHICLE_YEAR, MIN_VEHICLE_YEAR};
use crate::domain::NewAdvertisement;
use crate::errors::{AppError, AppResult};

/// One decoded row of an import file.
///
/// Field names follow the source file's Portuguese headers; all values
/// arrive as raw strings and are coerced during conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ImportRow {
    #[serde(rename = "adv_man_cod", default)]
    pub manufacturer_code: String,
    #[serde(rename = "modelo", default)]
    #[validate(length(min = 1, message = "modelo é obrigatório"))]
    pub model_description: String,
    #[serde(rename = "ano_fabricacao", default)]
    pub year_manufacture: String,
    #[serde(rename = "ano_modelo", default)]
    pub year_model: String,
    #[serde(rename = "marca", default)]
    #[validate(length(min = 1, message = "marca é obrigatória"))]
    pub brand: String,
    #[serde(rename = "valor", default)]
    pub value: String,
}

impl ImportRow {
    /// Manufacturer code, coerced to a positive integer
    pub fn parse_manufacturer_code(&self) -> AppResult<i32> {
        self.manufacturer_code
            .trim()
            .parse::<i32>()
            .ok()
            .filter(|code| *code > 0)
            .ok_or_else(|| {
                AppError::validation(format!("adv_man_cod inválido: {}", self.manufacturer_code))
            })
    }

    /// Manufacture year, coerced and range-checked
    pub fn parse_year_manufacture(&self) -> AppResult<i32> {
        parse_year(&self.year_manufacture)
            .ok_or_else(|| {
                AppError::validation(format!("ano_fabricacao inválido: {}", self.year_manufacture))
            })
    }

    /// Model year, coerced and range-checked
    pub fn parse_year_model(&self) -> AppResult<i32> {
        parse_year(&self.year_model)
            .ok_or_else(|| AppError::validation(format!("ano_modelo inválido: {}", self.year_model)))
    }

    /// Monetary value with the comma decimal separator normalized to dot
    pub fn normalized_value(&self) -> AppResult<Decimal> {
        self.value
            .trim()
            .replace(',', ".")
            .parse::<Decimal>()
            .ok()
            .filter(|value| !value.is_sign_negative())
            .ok_or_else(|| AppError::validation(format!("valor inválido: {}", self.value)))
    }

    /// Remap the row into creation data for the given owner.
    pub fn to_new_advertisement(&self, user_code: i64) -> AppResult<NewAdvertisement> {
        Ok(NewAdvertisement {
            user_code,
            manufacturer_code: self.parse_manufacturer_code()?,
            model_description: self.model_description.trim().to_string(),
            brand: self.brand.trim().to_string(),
            value: self.normalized_value()?,
            year_manufacture: self.parse_year_manufacture()?,
            year_model: self.parse_year_model()?,
            status: None,
            image_path: None,
            description: None,
        })
    }
}

fn parse_year(raw: &str) -> Option<i32> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|year| (MIN_VEHICLE_YEAR..=MAX_VEHICLE_YEAR).contains(year))
}

/// Verdict returned by the row validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowVerdict {
    pub valid: bool,
    pub error: Option<String>,
}

impl RowVerdict {
    pub fn valid() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
        }
    }
}

/// Row validator trait for dependency injection.
#[async_trait]
pub trait AdvertisementValidator: Send + Sync {
    /// Judge a single import row. A rejected row carries the reason that
    /// ends up in the `motivo` column of the rejection report.
    async fn validate(&self, row: &ImportRow) -> AppResult<RowVerdict>;
}

/// Default validator: declarative checks on the text fields plus numeric
/// coercion of codes, years and value.
pub struct RowValidator;

#[async_trait]
impl AdvertisementValidator for RowValidator {
    async fn validate(&self, row: &ImportRow) -> AppResult<RowVerdict> {
        if let Err(errors) = row.validate() {
            return Ok(RowVerdict::rejected(format_validation_errors(&errors)));
        }

        for check in [
            row.parse_manufacturer_code().map(|_| ()),
            row.parse_year_manufacture().map(|_| ()),
            row.parse_year_model().map(|_| ()),
            row.normalized_value().map(|_| ()),
        ] {
            if let Err(err) = check {
                return Ok(RowVerdict::rejected(err.to_string()));
            }
        }

        Ok(RowVerdict::valid())
    }
}

/// Format validation errors into a user-friendly string
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} inválido", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}
