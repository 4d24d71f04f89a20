//! Staff photo. `file_path` is the object-storage key.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "foto_pengurus")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub pengurus_id: i32,
    pub file_path: String,
    pub file_name: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pengurus::Entity",
        from = "Column::PengurusId",
        to = "super::pengurus::Column::Id",
        on_delete = "Cascade"
    )]
    Pengurus,
}

impl Related<super::pengurus::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pengurus.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
