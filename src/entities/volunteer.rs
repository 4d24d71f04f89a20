//! Volunteer registration for one activity. `is_approved` starts false and
//! is flipped by the approve action.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "volunteer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nama: String,
    pub email: String,
    pub phone: String,
    #[sea_orm(column_type = "Text")]
    pub skill: String,
    #[sea_orm(column_type = "Text")]
    pub motivasi: String,
    pub kegiatan_id: i32,
    pub is_approved: bool,
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
