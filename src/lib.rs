//! Revenda API - Vehicle classifieds advertisement engine
//!
//! This crate implements the advertisement subsystem of a vehicle
//! classifieds marketplace: filtered search, CSV bulk import with
//! per-row validation, lifecycle mutations and aggregate reporting.
//! It is the service layer invoked by the (out-of-tree) HTTP handlers.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities, filter algebra and report types
//! - **services**: Application use cases (search, import, reports, lifecycle)
//! - **infra**: Infrastructure concerns (database, repositories, migrations)
//! - **types**: Shared types (pagination)
//! - **utils**: Utility functions and helpers
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Bulk-import advertisements from a semicolon-separated file
//! cargo run -- import ads.csv --user 42
//!
//! # Print the sold-percentage report for a user
//! cargo run -- report sold --user 42
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;
pub mod utils;

// Re-export commonly used types at crate root
pub use config::Config;
pub use domain::{Advertisement, AdvertisementStatus, Manufacturer};
pub use errors::{AppError, AppResult};
