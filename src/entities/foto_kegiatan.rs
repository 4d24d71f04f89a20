//! Activity photo. `file_path` is the object-storage key.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "foto_kegiatan")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub kegiatan_id: i32,
    pub file_path: String,
    pub file_name: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::kegiatan::Entity",
        from = "Column::KegiatanId",
        to = "super::kegiatan::Column::Id",
        on_delete = "Cascade"
    )]
    Kegiatan,
}

impl Related<super::kegiatan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Kegiatan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
