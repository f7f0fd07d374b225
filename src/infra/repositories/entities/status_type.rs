//! Status lookup entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "status_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: i16,
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::advertisement::Entity")]
    Advertisement,
}

impl Related<super::advertisement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Advertisement.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
