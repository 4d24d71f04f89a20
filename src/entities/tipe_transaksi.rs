//! Transaction type lookup ("Pemasukan" / "Pengeluaran").

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tipe_transaksi")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nama: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transaksi::Entity")]
    Transaksi,
}

impl Related<super::transaksi::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transaksi.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
