//! Advertisement domain entity and related types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Advertisement lifecycle status.
///
/// The numeric codes are stable: they are stored in the `status` column
/// and referenced by the `status_types` lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvertisementStatus {
    Active,
    Removed,
    Paused,
    Sold,
}

impl AdvertisementStatus {
    /// Numeric status code as stored in the database
    pub fn code(self) -> i16 {
        match self {
            AdvertisementStatus::Active => 1,
            AdvertisementStatus::Removed => 2,
            AdvertisementStatus::Paused => 3,
            AdvertisementStatus::Sold => 4,
        }
    }

    /// Statuses visible on the owner's "my advertisements" screens
    pub fn owner_visible() -> [AdvertisementStatus; 2] {
        [AdvertisementStatus::Active, AdvertisementStatus::Paused]
    }

    /// Whether the advertisement shows up in public listing/search
    pub fn is_public(self) -> bool {
        matches!(self, AdvertisementStatus::Active)
    }
}

impl From<i16> for AdvertisementStatus {
    fn from(code: i16) -> Self {
        match code {
            2 => AdvertisementStatus::Removed,
            3 => AdvertisementStatus::Paused,
            4 => AdvertisementStatus::Sold,
            _ => AdvertisementStatus::Active,
        }
    }
}

impl std::fmt::Display for AdvertisementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let description = match self {
            AdvertisementStatus::Active => "Ativo",
            AdvertisementStatus::Removed => "Removido",
            AdvertisementStatus::Paused => "Pausado",
            AdvertisementStatus::Sold => "Vendido",
        };
        write!(f, "{}", description)
    }
}

/// Vehicle manufacturer referenced by advertisements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub code: i32,
    pub name: String,
}

/// Advertisement domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advertisement {
    pub code: i64,
    pub user_code: i64,
    pub manufacturer_code: i32,
    pub status: AdvertisementStatus,
    pub model_description: String,
    pub brand: String,
    pub value: Decimal,
    pub year_manufacture: i32,
    pub year_model: i32,
    pub views: i64,
    /// Accumulated time the listing spent paused, in seconds
    pub total_stopped_seconds: i64,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Advertisement {
    /// Check if the advertisement is publicly visible
    pub fn is_public(&self) -> bool {
        self.status.is_public()
    }

    /// Check if the advertisement was soft-deleted
    pub fn is_removed(&self) -> bool {
        self.status == AdvertisementStatus::Removed
    }
}

/// Advertisement creation data transfer object
#[derive(Debug, Clone, Deserialize)]
pub struct NewAdvertisement {
    pub user_code: i64,
    pub manufacturer_code: i32,
    pub model_description: String,
    pub brand: String,
    pub value: Decimal,
    pub year_manufacture: i32,
    pub year_model: i32,
    /// Defaults to [`AdvertisementStatus::Active`] when not set by the caller
    #[serde(default)]
    pub status: Option<AdvertisementStatus>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Advertisement update data transfer object (partial overwrite)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdvertisementChanges {
    pub manufacturer_code: Option<i32>,
    pub model_description: Option<String>,
    pub brand: Option<String>,
    pub value: Option<Decimal>,
    pub year_manufacture: Option<i32>,
    pub year_model: Option<i32>,
    pub status: Option<AdvertisementStatus>,
    pub image_path: Option<String>,
    pub description: Option<String>,
}

impl AdvertisementChanges {
    /// True when no field would be overwritten
    pub fn is_noop(&self) -> bool {
        self.manufacturer_code.is_none()
            && self.model_description.is_none()
            && self.brand.is_none()
            && self.value.is_none()
            && self.year_manufacture.is_none()
            && self.year_model.is_none()
            && self.status.is_none()
            && self.image_path.is_none()
            && self.description.is_none()
    }
}

/// Advertisement together with its joined manufacturer, as returned by
/// listing and search queries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvertisementListing {
    #[serde(flatten)]
    pub advertisement: Advertisement,
    pub manufacturer: Option<Manufacturer>,
}

impl AdvertisementListing {
    /// Status description shown alongside the listing
    pub fn status_description(&self) -> String {
        self.advertisement.status.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_round_trip() {
        for status in [
            AdvertisementStatus::Active,
            AdvertisementStatus::Removed,
            AdvertisementStatus::Paused,
            AdvertisementStatus::Sold,
        ] {
            assert_eq!(AdvertisementStatus::from(status.code()), status);
        }
    }

    #[test]
    fn only_active_is_public() {
        assert!(AdvertisementStatus::Active.is_public());
        assert!(!AdvertisementStatus::Paused.is_public());
        assert!(!AdvertisementStatus::Removed.is_public());
        assert!(!AdvertisementStatus::Sold.is_public());
    }
}
