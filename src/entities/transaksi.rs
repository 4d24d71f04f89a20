//! Financial ledger entry. `jumlah` is an exact decimal so summaries never
//! accumulate float rounding drift.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transaksi")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nama: String,
    pub tipe_transaksi_id: i32,
    #[sea_orm(column_type = "Text")]
    pub deskripsi: String,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub jumlah: Decimal,
    pub tanggal: Date,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tipe_transaksi::Entity",
        from = "Column::TipeTransaksiId",
        to = "super::tipe_transaksi::Column::Id",
        on_delete = "Cascade"
    )]
    TipeTransaksi,
}

impl Related<super::tipe_transaksi::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TipeTransaksi.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
