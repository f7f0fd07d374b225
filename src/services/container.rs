//! Service Container - Centralized service access.
//!
//! Wires repositories, validator and services together once at startup;
//! consumers receive `Arc`'d trait objects and stay decoupled from the
//! concrete implementations.

use std::future::Future;
use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{
    AdvertisementManager, AdvertisementService, CsvImporter, ImportService, ReportService,
    Reporter, RowValidator,
};
use crate::infra::{AdvertisementStore, ChatStore};

/// Container holding every application service
pub struct Services {
    advertisements: Arc<dyn AdvertisementService>,
    reports: Arc<dyn ReportService>,
    importer: Arc<dyn ImportService>,
}

impl Services {
    /// Create a new service container from already-built services
    pub fn new(
        advertisements: Arc<dyn AdvertisementService>,
        reports: Arc<dyn ReportService>,
        importer: Arc<dyn ImportService>,
    ) -> Self {
        Self {
            advertisements,
            reports,
            importer,
        }
    }

    /// Create service container from a database connection
    pub fn from_connection(db: DatabaseConnection) -> Self {
        let ads = Arc::new(AdvertisementStore::new(db.clone()));
        let chats = Arc::new(ChatStore::new(db));
        let validator = Arc::new(RowValidator);

        Self {
            advertisements: Arc::new(AdvertisementManager::new(ads.clone())),
            reports: Arc::new(Reporter::new(ads.clone(), chats)),
            importer: Arc::new(CsvImporter::new(ads, validator)),
        }
    }

    /// Get advertisement service
    pub fn advertisements(&self) -> Arc<dyn AdvertisementService> {
        self.advertisements.clone()
    }

    /// Get report service
    pub fn reports(&self) -> Arc<dyn ReportService> {
        self.reports.clone()
    }

    /// Get import service
    pub fn importer(&self) -> Arc<dyn ImportService> {
        self.importer.clone()
    }
}

/// Parallel execution utilities for running independent operations
/// concurrently.
///
/// Reports issue several independent read queries; these helpers run
/// them on the tokio runtime and fail fast on the first error.
pub mod parallel {
    use super::*;
    use crate::errors::AppResult;
    use tokio::try_join;

    /// Execute two independent async operations in parallel.
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }

    /// Execute three independent async operations in parallel.
    pub async fn join3<F1, F2, F3, T1, T2, T3>(f1: F1, f2: F2, f3: F3) -> AppResult<(T1, T2, T3)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
        F3: Future<Output = AppResult<T3>>,
    {
        try_join!(f1, f2, f3)
    }

    /// Execute four independent async operations in parallel.
    pub async fn join4<F1, F2, F3, F4, T1, T2, T3, T4>(
        f1: F1,
        f2: F2,
        f3: F3,
        f4: F4,
    ) -> AppResult<(T1, T2, T3, T4)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
        F3: Future<Output = AppResult<T3>>,
        F4: Future<Output = AppResult<T4>>,
    {
        try_join!(f1, f2, f3, f4)
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::AppResult;

    use super::parallel;

    #[tokio::test]
    async fn test_parallel_join2() {
        async fn op1() -> AppResult<i32> {
            Ok(1)
        }
        async fn op2() -> AppResult<i32> {
            Ok(2)
        }

        let (a, b) = parallel::join2(op1(), op2()).await.unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, 2);
    }

    #[tokio::test]
    async fn test_parallel_join3_fails_fast() {
        async fn ok() -> AppResult<i32> {
            Ok(1)
        }
        async fn fails() -> AppResult<i32> {
            Err(crate::errors::AppError::internal("boom"))
        }

        assert!(parallel::join3(ok(), fails(), ok()).await.is_err());
    }
}
