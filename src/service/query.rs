use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;
use serde::Serialize;

use crate::entities::{resep, tipe_transaksi, transaksi, volunteer};

/// Ledger totals across all transactions. Amounts stay exact decimals;
/// `saldo` is income minus expenses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransaksiSummary {
    pub total_pemasukan: Decimal,
    pub total_pengeluaran: Decimal,
    pub saldo: Decimal,
}

pub struct Query;

impl Query {
    /// All transactions with their type rows, newest first.
    pub async fn transaksi_with_tipe(
        db: &DatabaseConnection,
    ) -> Result<Vec<(transaksi::Model, Option<tipe_transaksi::Model>)>, DbErr> {
        transaksi::Entity::find()
            .find_also_related(tipe_transaksi::Entity)
            .order_by_desc(transaksi::Column::Tanggal)
            .all(db)
            .await
    }

    /// Transactions of one type, newest first.
    pub async fn transaksi_by_tipe(
        db: &DatabaseConnection,
        tipe_id: i32,
    ) -> Result<Vec<(transaksi::Model, Option<tipe_transaksi::Model>)>, DbErr> {
        transaksi::Entity::find()
            .filter(transaksi::Column::TipeTransaksiId.eq(tipe_id))
            .find_also_related(tipe_transaksi::Entity)
            .order_by_desc(transaksi::Column::Tanggal)
            .all(db)
            .await
    }

    /// Totals are bucketed by the type's display name, so only rows whose
    /// type is literally "Pemasukan" or "Pengeluaran" contribute.
    pub async fn transaksi_summary(db: &DatabaseConnection) -> Result<TransaksiSummary, DbErr> {
        let rows = Self::transaksi_with_tipe(db).await?;

        let mut total_pemasukan = Decimal::ZERO;
        let mut total_pengeluaran = Decimal::ZERO;
        for (item, tipe) in rows {
            match tipe.as_ref().map(|t| t.nama.as_str()) {
                Some("Pemasukan") => total_pemasukan += item.jumlah,
                Some("Pengeluaran") => total_pengeluaran += item.jumlah,
                _ => {}
            }
        }

        Ok(TransaksiSummary {
            saldo: total_pemasukan - total_pengeluaran,
            total_pemasukan,
            total_pengeluaran,
        })
    }

    pub async fn pending_volunteers(
        db: &DatabaseConnection,
    ) -> Result<Vec<volunteer::Model>, DbErr> {
        volunteer::Entity::find()
            .filter(volunteer::Column::IsApproved.eq(false))
            .order_by_desc(volunteer::Column::CreatedAt)
            .all(db)
            .await
    }

    pub async fn resep_by_kategori(
        db: &DatabaseConnection,
        kategori: resep::Kategori,
    ) -> Result<Vec<resep::Model>, DbErr> {
        resep::Entity::find()
            .filter(resep::Column::Kategori.eq(kategori))
            .order_by_desc(resep::Column::CreatedAt)
            .all(db)
            .await
    }
}
