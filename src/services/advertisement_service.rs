//! Advertisement service - search, listing and lifecycle use cases.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{
    Advertisement, AdvertisementChanges, AdvertisementListing, FilterOptions, NewAdvertisement,
    SearchFilters,
};
use crate::errors::AppResult;
use crate::infra::AdvertisementRepository;
use crate::services::parallel;
use crate::types::PaginationParams;

/// Advertisement service trait for dependency injection.
///
/// Missing targets of `edit` and `delete` surface as `None`, never as
/// errors: callers decide whether that is a 404.
#[async_trait]
pub trait AdvertisementService: Send + Sync {
    /// Page of publicly visible advertisements
    async fn list_public(&self, page: PaginationParams) -> AppResult<Vec<AdvertisementListing>>;

    /// Compile the filters and query the store
    async fn search(&self, filters: SearchFilters) -> AppResult<Vec<AdvertisementListing>>;

    /// Same as [`search`](Self::search), accepting the serialized-string
    /// filter form sent in the request path
    async fn search_raw(&self, raw_filters: &str) -> AppResult<Vec<AdvertisementListing>>;

    /// Public detail view; `None` when missing or not Active
    async fn get(&self, code: i64) -> AppResult<Option<AdvertisementListing>>;

    /// Owner's detail view over Active/Paused advertisements
    async fn get_mine(&self, code: i64, user_code: i64)
        -> AppResult<Option<AdvertisementListing>>;

    /// The owner's Active/Paused advertisements
    async fn list_by_user(&self, user_code: i64) -> AppResult<Vec<AdvertisementListing>>;

    /// Create an advertisement (status defaults to Active)
    async fn create(&self, data: NewAdvertisement) -> AppResult<Advertisement>;

    /// Partial overwrite by code; `None` when the target is missing
    async fn edit(
        &self,
        code: i64,
        changes: AdvertisementChanges,
    ) -> AppResult<Option<Advertisement>>;

    /// Soft delete scoped to the owner; idempotent, `None` when the
    /// target is missing or already Removed
    async fn delete(&self, code: i64, user_code: i64) -> AppResult<Option<Advertisement>>;

    /// Bump the view counter; returns affected rows (0 or 1)
    async fn increment_views(&self, code: i64) -> AppResult<u64>;

    /// Number of publicly visible advertisements
    async fn count_active(&self) -> AppResult<u64>;

    /// Option sets for the search screen's filter widgets
    async fn available_filters(&self) -> AppResult<FilterOptions>;
}

/// Concrete implementation of AdvertisementService
pub struct AdvertisementManager {
    repo: Arc<dyn AdvertisementRepository>,
}

impl AdvertisementManager {
    /// Create new service instance
    pub fn new(repo: Arc<dyn AdvertisementRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl AdvertisementService for AdvertisementManager {
    async fn list_public(&self, page: PaginationParams) -> AppResult<Vec<AdvertisementListing>> {
        self.repo.list_public(page).await
    }

    async fn search(&self, filters: SearchFilters) -> AppResult<Vec<AdvertisementListing>> {
        let predicate = filters.compile()?;
        self.repo.search(&predicate, filters.pagination()).await
    }

    async fn search_raw(&self, raw_filters: &str) -> AppResult<Vec<AdvertisementListing>> {
        let filters = SearchFilters::from_json(raw_filters)?;
        self.search(filters).await
    }

    async fn get(&self, code: i64) -> AppResult<Option<AdvertisementListing>> {
        self.repo.find_public(code).await
    }

    async fn get_mine(
        &self,
        code: i64,
        user_code: i64,
    ) -> AppResult<Option<AdvertisementListing>> {
        self.repo.find_owned(code, user_code).await
    }

    async fn list_by_user(&self, user_code: i64) -> AppResult<Vec<AdvertisementListing>> {
        self.repo.list_owned(user_code).await
    }

    async fn create(&self, data: NewAdvertisement) -> AppResult<Advertisement> {
        let advertisement = self.repo.create(data).await?;
        tracing::debug!(code = advertisement.code, "advertisement created");
        Ok(advertisement)
    }

    async fn edit(
        &self,
        code: i64,
        changes: AdvertisementChanges,
    ) -> AppResult<Option<Advertisement>> {
        self.repo.update(code, changes).await
    }

    async fn delete(&self, code: i64, user_code: i64) -> AppResult<Option<Advertisement>> {
        let removed = self.repo.soft_delete(code, user_code).await?;
        if removed.is_some() {
            tracing::debug!(code, user_code, "advertisement soft-deleted");
        }
        Ok(removed)
    }

    async fn increment_views(&self, code: i64) -> AppResult<u64> {
        self.repo.increment_views(code).await
    }

    async fn count_active(&self) -> AppResult<u64> {
        self.repo
            .count_with_status(None, &[crate::domain::AdvertisementStatus::Active])
            .await
    }

    async fn available_filters(&self) -> AppResult<FilterOptions> {
        let (bounds, year_pairs, models, brands) = parallel::join4(
            self.repo.value_bounds(),
            self.repo.year_ranges(),
            self.repo.model_options(),
            self.repo.brand_options(),
        )
        .await?;

        Ok(FilterOptions {
            brands,
            models,
            year_ranges: year_pairs
                .into_iter()
                .map(|(manufacture, model)| format!("{}-{}", manufacture, model))
                .collect(),
            value_min: bounds.0,
            value_max: bounds.1,
        })
    }
}
