//! Advertisement database entity for SeaORM.

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use crate::domain::{Advertisement, AdvertisementListing, AdvertisementStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "advertisements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub code: i64,
    pub user_code: i64,
    pub manufacturer_code: i32,
    /// Status code, foreign key into `status_types`
    pub status: i16,
    pub model_description: String,
    pub brand: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub value: Decimal,
    pub year_manufacture: i32,
    pub year_model: i32,
    pub views: i64,
    pub total_stopped_seconds: i64,
    pub created_at: DateTimeUtc,
    pub image_path: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::manufacturer::Entity",
        from = "Column::ManufacturerCode",
        to = "super::manufacturer::Column::Code"
    )]
    Manufacturer,
    #[sea_orm(
        belongs_to = "super::status_type::Entity",
        from = "Column::Status",
        to = "super::status_type::Column::Code"
    )]
    StatusType,
    #[sea_orm(has_many = "super::chat::Entity")]
    Chat,
}

impl Related<super::manufacturer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Manufacturer.def()
    }
}

impl Related<super::status_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StatusType.def()
    }
}

impl Related<super::chat::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chat.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Advertisement {
    fn from(model: Model) -> Self {
        Advertisement {
            code: model.code,
            user_code: model.user_code,
            manufacturer_code: model.manufacturer_code,
            status: AdvertisementStatus::from(model.status),
            model_description: model.model_description,
            brand: model.brand,
            value: model.value,
            year_manufacture: model.year_manufacture,
            year_model: model.year_model,
            views: model.views,
            total_stopped_seconds: model.total_stopped_seconds,
            created_at: model.created_at,
            image_path: model.image_path,
            description: model.description,
        }
    }
}

/// Convert a joined (advertisement, manufacturer) pair into a listing
impl From<(Model, Option<super::manufacturer::Model>)> for AdvertisementListing {
    fn from((advertisement, manufacturer): (Model, Option<super::manufacturer::Model>)) -> Self {
        AdvertisementListing {
            advertisement: advertisement.into(),
            manufacturer: manufacturer.map(Into::into),
        }
    }
}
