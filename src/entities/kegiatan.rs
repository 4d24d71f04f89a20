//! Activity (kegiatan) entity.
//!
//! The location point is stored as a longitude/latitude column pair and is
//! exposed on the wire as a GeoJSON `Point` by the serializer layer.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "kegiatan")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nama: String,
    #[sea_orm(column_type = "Text")]
    pub deskripsi: String,
    pub tanggal: Date,
    pub jumlah_peserta: i32,
    pub lokasi_lng: f64,
    pub lokasi_lat: f64,
    pub jenis_kegiatan_id: i32,
    pub status_kegiatan_id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::jenis_kegiatan::Entity",
        from = "Column::JenisKegiatanId",
        to = "super::jenis_kegiatan::Column::Id",
        on_delete = "Cascade"
    )]
    JenisKegiatan,
    #[sea_orm(
        belongs_to = "super::status_kegiatan::Entity",
        from = "Column::StatusKegiatanId",
        to = "super::status_kegiatan::Column::Id",
        on_delete = "Cascade"
    )]
    StatusKegiatan,
    #[sea_orm(has_many = "super::foto_kegiatan::Entity")]
    FotoKegiatan,
    #[sea_orm(has_many = "super::volunteer::Entity")]
    Volunteer,
}

impl Related<super::jenis_kegiatan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JenisKegiatan.def()
    }
}

impl Related<super::status_kegiatan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StatusKegiatan.def()
    }
}

impl Related<super::foto_kegiatan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FotoKegiatan.def()
    }
}

impl Related<super::volunteer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Volunteer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
