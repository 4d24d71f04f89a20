//! Recipe photo. Unlike the other photo tables, `file_path` stores the full
//! public URL; the storage key is re-derived from it on delete.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "foto_resep")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub resep_id: i32,
    pub file_path: String,
    pub file_name: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::resep::Entity",
        from = "Column::ResepId",
        to = "super::resep::Column::Id",
        on_delete = "Cascade"
    )]
    Resep,
}

impl Related<super::resep::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Resep.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
