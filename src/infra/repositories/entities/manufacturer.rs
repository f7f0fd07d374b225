//! Manufacturer database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Manufacturer;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "manufacturers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub code: i32,
    #[sea_orm(unique)]
    pub name: String,
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

impl From<Model> for Manufacturer {
    fn from(model: Model) -> Self {
        Manufacturer {
            code: model.code,
            name: model.name,
        }
    }
}
