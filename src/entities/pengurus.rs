//! Staff member (pengurus) with a role title (jabatan).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pengurus")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nama: String,
    pub jabatan: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::foto_pengurus::Entity")]
    FotoPengurus,
}

impl Related<super::foto_pengurus::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FotoPengurus.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
