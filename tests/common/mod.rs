//! Shared mocks and builders for the service unit tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;
use rust_decimal::Decimal;

use revenda_api::domain::reports::{SoldCategory, StatusCount};
use revenda_api::domain::{
    Advertisement, AdvertisementChanges, AdvertisementListing, AdvertisementStatus, Manufacturer,
    NewAdvertisement, Predicate,
};
use revenda_api::errors::AppResult;
use revenda_api::infra::{AdvertisementRepository, ChatRepository};
use revenda_api::services::{AdvertisementValidator, ImportRow, RowVerdict};
use revenda_api::types::PaginationParams;

mock! {
    pub AdvertisementRepo {}

    #[async_trait]
    impl AdvertisementRepository for AdvertisementRepo {
        async fn list_public(&self, page: PaginationParams) -> AppResult<Vec<AdvertisementListing>>;
        async fn search(
            &self,
            predicate: &Predicate,
            page: Option<PaginationParams>,
        ) -> AppResult<Vec<AdvertisementListing>>;
        async fn find_public(&self, code: i64) -> AppResult<Option<AdvertisementListing>>;
        async fn find_owned(&self, code: i64, user_code: i64)
            -> AppResult<Option<AdvertisementListing>>;
        async fn list_owned(&self, user_code: i64) -> AppResult<Vec<AdvertisementListing>>;
        async fn create(&self, data: NewAdvertisement) -> AppResult<Advertisement>;
        async fn update(
            &self,
            code: i64,
            changes: AdvertisementChanges,
        ) -> AppResult<Option<Advertisement>>;
        async fn soft_delete(&self, code: i64, user_code: i64) -> AppResult<Option<Advertisement>>;
        async fn increment_views(&self, code: i64) -> AppResult<u64>;
        async fn count_with_status(
            &self,
            user_code: Option<i64>,
            statuses: &[AdvertisementStatus],
        ) -> AppResult<u64>;
        async fn total_views(&self, user_code: Option<i64>) -> AppResult<i64>;
        async fn codes_by_owner(&self, user_code: i64) -> AppResult<Vec<i64>>;
        async fn status_breakdown(&self) -> AppResult<Vec<StatusCount>>;
        async fn top_sold_value(
            &self,
            user_code: Option<i64>,
            category: SoldCategory,
        ) -> AppResult<Option<String>>;
        async fn listing_age_seconds(&self, user_code: i64) -> AppResult<Vec<i64>>;
        async fn total_paused_seconds(&self, user_code: i64) -> AppResult<i64>;
        async fn value_bounds(&self) -> AppResult<(Option<Decimal>, Option<Decimal>)>;
        async fn year_ranges(&self) -> AppResult<Vec<(i32, i32)>>;
        async fn model_options(&self) -> AppResult<Vec<String>>;
        async fn brand_options(&self) -> AppResult<Vec<String>>;
    }
}

mock! {
    pub ChatRepo {}

    #[async_trait]
    impl ChatRepository for ChatRepo {
        async fn count_all(&self) -> AppResult<u64>;
        async fn count_for_advertisements(&self, codes: &[i64]) -> AppResult<u64>;
    }
}

mock! {
    pub RowJudge {}

    #[async_trait]
    impl AdvertisementValidator for RowJudge {
        async fn validate(&self, row: &ImportRow) -> AppResult<RowVerdict>;
    }
}

/// Advertisement with sensible defaults for assertions
pub fn advertisement(code: i64, user_code: i64, status: AdvertisementStatus) -> Advertisement {
    Advertisement {
        code,
        user_code,
        manufacturer_code: 1,
        status,
        model_description: "Uno Mille".to_string(),
        brand: "Fiat".to_string(),
        value: Decimal::new(15_000, 0),
        year_manufacture: 2010,
        year_model: 2011,
        views: 0,
        total_stopped_seconds: 0,
        created_at: Utc::now(),
        image_path: None,
        description: None,
    }
}

pub fn listing(code: i64, user_code: i64, status: AdvertisementStatus) -> AdvertisementListing {
    AdvertisementListing {
        advertisement: advertisement(code, user_code, status),
        manufacturer: Some(Manufacturer {
            code: 1,
            name: "Fiat".to_string(),
        }),
    }
}

/// Walk a predicate tree looking for an exact sub-predicate
pub fn predicate_contains(haystack: &Predicate, needle: &Predicate) -> bool {
    if haystack == needle {
        return true;
    }
    match haystack {
        Predicate::All(parts) | Predicate::Any(parts) => {
            parts.iter().any(|part| predicate_contains(part, needle))
        }
        _ => false,
    }
}
