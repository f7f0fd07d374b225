//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion: repositories and the row validator are
//! constructor-injected.

mod advertisement_service;
pub mod container;
mod import_service;
mod report_service;
mod validation;

// Service Container
pub use container::Services;

// Service traits and implementations
pub use advertisement_service::{AdvertisementManager, AdvertisementService};
pub use import_service::{CsvImporter, ImportService};
pub use report_service::{ReportService, Reporter};
pub use validation::{AdvertisementValidator, ImportRow, RowValidator, RowVerdict};

// Parallel execution utilities
pub use container::parallel;
