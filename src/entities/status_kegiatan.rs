//! Lookup table for activity status (akan datang, berlangsung, selesai).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "status_kegiatan")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nama: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub deskripsi: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::kegiatan::Entity")]
    Kegiatan,
}

impl Related<super::kegiatan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Kegiatan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
