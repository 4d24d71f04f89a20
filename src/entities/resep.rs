//! Recipe (resep) entity plus the restricted kategori / tingkat_kesulitan
//! value sets. The enums double as input validation: an unknown value fails
//! deserialization before it ever reaches the database.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
#[serde(rename_all = "lowercase")]
pub enum Kategori {
    #[sea_orm(string_value = "makanan")]
    Makanan,
    #[sea_orm(string_value = "minuman")]
    Minuman,
    #[sea_orm(string_value = "dessert")]
    Dessert,
    #[sea_orm(string_value = "snack")]
    Snack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
#[serde(rename_all = "lowercase")]
pub enum TingkatKesulitan {
    #[sea_orm(string_value = "mudah")]
    Mudah,
    #[sea_orm(string_value = "sedang")]
    Sedang,
    #[sea_orm(string_value = "sulit")]
    Sulit,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "resep")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub judul: String,
    #[sea_orm(column_type = "Text")]
    pub deskripsi: String,
    pub kategori: Kategori,
    pub tingkat_kesulitan: TingkatKesulitan,
    /// Cooking time in minutes
    pub waktu_memasak: i32,
    /// Preparation time in minutes
    pub waktu_persiapan: i32,
    pub porsi: i32,
    pub kalori: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::bahan_resep::Entity")]
    BahanResep,
    #[sea_orm(has_many = "super::steps_resep::Entity")]
    StepsResep,
    #[sea_orm(has_many = "super::tips_resep::Entity")]
    TipsResep,
    #[sea_orm(has_many = "super::nutrisi_resep::Entity")]
    NutrisiResep,
    #[sea_orm(has_many = "super::foto_resep::Entity")]
    FotoResep,
}

impl Related<super::bahan_resep::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BahanResep.def()
    }
}

impl Related<super::steps_resep::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StepsResep.def()
    }
}

impl Related<super::tips_resep::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TipsResep.def()
    }
}

impl Related<super::nutrisi_resep::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NutrisiResep.def()
    }
}

impl Related<super::foto_resep::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FotoResep.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
