//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod advertisement;
pub mod chat;
pub mod manufacturer;
pub mod status_type;
