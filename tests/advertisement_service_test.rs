//! Advertisement service unit tests.

mod common;

use std::sync::Arc;

use rust_decimal::Decimal;

use revenda_api::domain::{
    AdvertisementChanges, AdvertisementStatus, NewAdvertisement, Predicate, SearchFilters,
};
use revenda_api::errors::AppError;
use revenda_api::services::{AdvertisementManager, AdvertisementService};

use common::{advertisement, listing, predicate_contains, MockAdvertisementRepo};

fn service(repo: MockAdvertisementRepo) -> AdvertisementManager {
    AdvertisementManager::new(Arc::new(repo))
}

#[tokio::test]
async fn search_compiles_value_range_with_active_guard() {
    let mut repo = MockAdvertisementRepo::new();
    repo.expect_search()
        .withf(|predicate, page| {
            page.is_none()
                && predicate_contains(
                    predicate,
                    &Predicate::StatusEq(AdvertisementStatus::Active),
                )
                && predicate_contains(
                    predicate,
                    &Predicate::ValueBetween(Decimal::new(5_000, 0), Decimal::new(20_000, 0)),
                )
        })
        .returning(|_, _| Ok(vec![]));

    let filters = SearchFilters {
        value_min_max: Some([Decimal::new(5_000, 0), Decimal::new(20_000, 0)]),
        ..SearchFilters::default()
    };

    let result = service(repo).search(filters).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn search_compiles_year_bounds() {
    let mut repo = MockAdvertisementRepo::new();
    repo.expect_search()
        .withf(|predicate, _| {
            predicate_contains(predicate, &Predicate::YearManufactureAtLeast(2015))
                && predicate_contains(predicate, &Predicate::YearModelAtMost(2018))
        })
        .returning(|_, _| Ok(vec![]));

    let filters = SearchFilters {
        year_man_model: Some("2015-2018".to_string()),
        ..SearchFilters::default()
    };

    assert!(service(repo).search(filters).await.is_ok());
}

#[tokio::test]
async fn search_raw_rejects_malformed_json() {
    let repo = MockAdvertisementRepo::new();

    let result = service(repo).search_raw("{not json").await;
    assert!(matches!(result, Err(AppError::Parse(_))));
}

#[tokio::test]
async fn search_raw_parses_filters_from_path_string() {
    let mut repo = MockAdvertisementRepo::new();
    repo.expect_search()
        .withf(|predicate, _| {
            predicate_contains(
                predicate,
                &Predicate::ManufacturerNameEq("Fiat".to_string()),
            )
        })
        .returning(|_, _| Ok(vec![listing(1, 1, AdvertisementStatus::Active)]));

    let result = service(repo).search_raw(r#"{"brand":"Fiat"}"#).await.unwrap();
    assert_eq!(result.len(), 1);
}

#[tokio::test]
async fn delete_is_noop_when_already_removed() {
    let mut repo = MockAdvertisementRepo::new();
    // Guarded lookup misses: already Removed or not owned
    repo.expect_soft_delete()
        .withf(|code, user_code| *code == 10 && *user_code == 7)
        .returning(|_, _| Ok(None));

    let result = service(repo).delete(10, 7).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn delete_transitions_to_removed() {
    let mut repo = MockAdvertisementRepo::new();
    repo.expect_soft_delete()
        .returning(|code, user_code| {
            Ok(Some(advertisement(
                code,
                user_code,
                AdvertisementStatus::Removed,
            )))
        });

    let removed = service(repo).delete(10, 7).await.unwrap().unwrap();
    assert!(removed.is_removed());
    assert_eq!(removed.code, 10);
}

#[tokio::test]
async fn increment_views_reports_affected_rows() {
    let mut repo = MockAdvertisementRepo::new();
    repo.expect_increment_views()
        .withf(|code| *code == 999)
        .returning(|_| Ok(0));
    repo.expect_increment_views()
        .withf(|code| *code == 1)
        .returning(|_| Ok(1));

    let service = service(repo);
    assert_eq!(service.increment_views(999).await.unwrap(), 0);
    assert_eq!(service.increment_views(1).await.unwrap(), 1);
}

#[tokio::test]
async fn edit_missing_target_is_noop() {
    let mut repo = MockAdvertisementRepo::new();
    repo.expect_update().returning(|_, _| Ok(None));

    let changes = AdvertisementChanges {
        value: Some(Decimal::new(9_999, 0)),
        ..AdvertisementChanges::default()
    };

    let result = service(repo).edit(404, changes).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn create_passes_data_through() {
    let mut repo = MockAdvertisementRepo::new();
    repo.expect_create()
        .withf(|data| data.status.is_none() && data.brand == "Fiat")
        .returning(|data| {
            let mut created = advertisement(1, data.user_code, AdvertisementStatus::Active);
            created.brand = data.brand.clone();
            Ok(created)
        });

    let data = NewAdvertisement {
        user_code: 7,
        manufacturer_code: 1,
        model_description: "Uno Mille".to_string(),
        brand: "Fiat".to_string(),
        value: Decimal::new(15_000, 0),
        year_manufacture: 2010,
        year_model: 2011,
        status: None,
        image_path: None,
        description: None,
    };

    let created = service(repo).create(data).await.unwrap();
    assert_eq!(created.status, AdvertisementStatus::Active);
    assert_eq!(created.user_code, 7);
}

#[tokio::test]
async fn available_filters_assembles_option_sets() {
    let mut repo = MockAdvertisementRepo::new();
    repo.expect_value_bounds()
        .returning(|| Ok((Some(Decimal::new(8_000, 0)), Some(Decimal::new(35_000, 0)))));
    repo.expect_year_ranges()
        .returning(|| Ok(vec![(2010, 2011), (2012, 2013)]));
    repo.expect_model_options()
        .returning(|| Ok(vec!["Ka".to_string(), "Uno Mille".to_string()]));
    repo.expect_brand_options()
        .returning(|| Ok(vec!["Fiat".to_string(), "Ford".to_string()]));

    let options = service(repo).available_filters().await.unwrap();

    assert_eq!(options.brands, vec!["Fiat", "Ford"]);
    assert_eq!(options.models, vec!["Ka", "Uno Mille"]);
    assert_eq!(options.year_ranges, vec!["2010-2011", "2012-2013"]);
    assert_eq!(options.value_min, Some(Decimal::new(8_000, 0)));
    assert_eq!(options.value_max, Some(Decimal::new(35_000, 0)));
}

#[tokio::test]
async fn list_by_user_returns_owner_listings() {
    let mut repo = MockAdvertisementRepo::new();
    repo.expect_list_owned()
        .withf(|user_code| *user_code == 7)
        .returning(|user_code| {
            Ok(vec![
                listing(1, user_code, AdvertisementStatus::Active),
                listing(2, user_code, AdvertisementStatus::Paused),
            ])
        });

    let listings = service(repo).list_by_user(7).await.unwrap();
    assert_eq!(listings.len(), 2);
}
