//! Infrastructure layer - Database and data access.

pub mod db;
pub mod repositories;

pub use db::Database;
pub use repositories::{
    AdvertisementRepository, AdvertisementStore, ChatRepository, ChatStore,
};
