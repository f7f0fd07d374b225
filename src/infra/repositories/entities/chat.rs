//! Chat contact entity for SeaORM.
//!
//! Chats are only counted by this subsystem, as a proxy for the number
//! of contacts an advertisement received.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "chats")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub code: i64,
    pub advertisement_code: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::advertisement::Entity",
        from = "Column::AdvertisementCode",
        to = "super::advertisement::Column::Code"
    )]
    Advertisement,
}

impl Related<super::advertisement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Advertisement.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
