use sea_orm_migration::{prelude::*, schema::*};

use crate::iden::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Lookup tables
        let table = table_auto(JenisKegiatan::Table)
            .col(pk_auto(JenisKegiatan::Id))
            .col(string(JenisKegiatan::Nama))
            .col(text_null(JenisKegiatan::Deskripsi))
            .to_owned();
        manager.create_table(table).await?;

        let table = table_auto(StatusKegiatan::Table)
            .col(pk_auto(StatusKegiatan::Id))
            .col(string(StatusKegiatan::Nama))
            .col(text_null(StatusKegiatan::Deskripsi))
            .to_owned();
        manager.create_table(table).await?;

        // Create Kegiatan Table
        let table = table_auto(Kegiatan::Table)
            .col(pk_auto(Kegiatan::Id))
            .col(string(Kegiatan::Nama))
            .col(text(Kegiatan::Deskripsi))
            .col(date(Kegiatan::Tanggal))
            .col(integer(Kegiatan::JumlahPeserta).default(0))
            .col(double(Kegiatan::LokasiLng))
            .col(double(Kegiatan::LokasiLat))
            .col(integer(Kegiatan::JenisKegiatanId))
            .col(integer(Kegiatan::StatusKegiatanId))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_kegiatan_jenis")
                    .from(Kegiatan::Table, Kegiatan::JenisKegiatanId)
                    .to(JenisKegiatan::Table, JenisKegiatan::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_kegiatan_status")
                    .from(Kegiatan::Table, Kegiatan::StatusKegiatanId)
                    .to(StatusKegiatan::Table, StatusKegiatan::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager.create_table(table).await?;

        let table = table_auto(FotoKegiatan::Table)
            .col(pk_auto(FotoKegiatan::Id))
            .col(integer(FotoKegiatan::KegiatanId))
            .col(string(FotoKegiatan::FilePath))
            .col(string(FotoKegiatan::FileName))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_foto_kegiatan_kegiatan")
                    .from(FotoKegiatan::Table, FotoKegiatan::KegiatanId)
                    .to(Kegiatan::Table, Kegiatan::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager.create_table(table).await?;

        let table = table_auto(Volunteer::Table)
            .col(pk_auto(Volunteer::Id))
            .col(string(Volunteer::Nama))
            .col(string(Volunteer::Email))
            .col(string_len(Volunteer::Phone, 20))
            .col(text(Volunteer::Skill))
            .col(text(Volunteer::Motivasi))
            .col(integer(Volunteer::KegiatanId))
            .col(boolean(Volunteer::IsApproved).default(false))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_volunteer_kegiatan")
                    .from(Volunteer::Table, Volunteer::KegiatanId)
                    .to(Kegiatan::Table, Kegiatan::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager.create_table(table).await?;

        // Create Resep Table with its sub-resources
        let table = table_auto(Resep::Table)
            .col(pk_auto(Resep::Id))
            .col(string(Resep::Judul))
            .col(text(Resep::Deskripsi))
            .col(string_len(Resep::Kategori, 50))
            .col(string_len(Resep::TingkatKesulitan, 50))
            .col(integer(Resep::WaktuMemasak))
            .col(integer(Resep::WaktuPersiapan))
            .col(integer(Resep::Porsi))
            .col(integer(Resep::Kalori))
            .to_owned();
        manager.create_table(table).await?;

        let table = table_auto(BahanResep::Table)
            .col(pk_auto(BahanResep::Id))
            .col(integer(BahanResep::ResepId))
            .col(string(BahanResep::Nama))
            .col(string_len(BahanResep::Takaran, 100))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_bahan_resep_resep")
                    .from(BahanResep::Table, BahanResep::ResepId)
                    .to(Resep::Table, Resep::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager.create_table(table).await?;

        let table = table_auto(StepsResep::Table)
            .col(pk_auto(StepsResep::Id))
            .col(integer(StepsResep::Urutan))
            .col(integer(StepsResep::ResepId))
            .col(text(StepsResep::Nama))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_steps_resep_resep")
                    .from(StepsResep::Table, StepsResep::ResepId)
                    .to(Resep::Table, Resep::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager.create_table(table).await?;

        let table = table_auto(TipsResep::Table)
            .col(pk_auto(TipsResep::Id))
            .col(integer(TipsResep::Urutan))
            .col(integer(TipsResep::ResepId))
            .col(text(TipsResep::Nama))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_tips_resep_resep")
                    .from(TipsResep::Table, TipsResep::ResepId)
                    .to(Resep::Table, Resep::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager.create_table(table).await?;

        let table = table_auto(NutrisiResep::Table)
            .col(pk_auto(NutrisiResep::Id))
            .col(string_len(NutrisiResep::Label, 100))
            .col(string_len(NutrisiResep::Nilai, 100))
            .col(integer(NutrisiResep::ResepId))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_nutrisi_resep_resep")
                    .from(NutrisiResep::Table, NutrisiResep::ResepId)
                    .to(Resep::Table, Resep::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager.create_table(table).await?;

        // file_path holds a full public URL here, not a storage key
        let table = table_auto(FotoResep::Table)
            .col(pk_auto(FotoResep::Id))
            .col(integer(FotoResep::ResepId))
            .col(string_len(FotoResep::FilePath, 500))
            .col(string(FotoResep::FileName))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_foto_resep_resep")
                    .from(FotoResep::Table, FotoResep::ResepId)
                    .to(Resep::Table, Resep::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager.create_table(table).await?;

        // Financial tables
        let table = table_auto(TipeTransaksi::Table)
            .col(pk_auto(TipeTransaksi::Id))
            .col(string(TipeTransaksi::Nama))
            .to_owned();
        manager.create_table(table).await?;

        let table = table_auto(Transaksi::Table)
            .col(pk_auto(Transaksi::Id))
            .col(string(Transaksi::Nama))
            .col(integer(Transaksi::TipeTransaksiId))
            .col(text(Transaksi::Deskripsi))
            .col(decimal_len(Transaksi::Jumlah, 15, 2))
            .col(date(Transaksi::Tanggal))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_transaksi_tipe")
                    .from(Transaksi::Table, Transaksi::TipeTransaksiId)
                    .to(TipeTransaksi::Table, TipeTransaksi::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager.create_table(table).await?;

        // Staff tables
        let table = table_auto(Pengurus::Table)
            .col(pk_auto(Pengurus::Id))
            .col(string(Pengurus::Nama))
            .col(string_len(Pengurus::Jabatan, 100))
            .to_owned();
        manager.create_table(table).await?;

        let table = table_auto(FotoPengurus::Table)
            .col(pk_auto(FotoPengurus::Id))
            .col(integer(FotoPengurus::PengurusId))
            .col(string(FotoPengurus::FilePath))
            .col(string(FotoPengurus::FileName))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_foto_pengurus_pengurus")
                    .from(FotoPengurus::Table, FotoPengurus::PengurusId)
                    .to(Pengurus::Table, Pengurus::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager.create_table(table).await?;

        // Create indices for common lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_kegiatan_tanggal")
                    .table(Kegiatan::Table)
                    .col(Kegiatan::Tanggal)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_foto_kegiatan_kegiatan")
                    .table(FotoKegiatan::Table)
                    .col(FotoKegiatan::KegiatanId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_volunteer_kegiatan")
                    .table(Volunteer::Table)
                    .col(Volunteer::KegiatanId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_resep_kategori")
                    .table(Resep::Table)
                    .col(Resep::Kategori)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transaksi_tanggal")
                    .table(Transaksi::Table)
                    .col(Transaksi::Tanggal)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transaksi_tipe")
                    .table(Transaksi::Table)
                    .col(Transaksi::TipeTransaksiId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop all tables in reverse order to avoid foreign key constraints
        manager
            .drop_table(Table::drop().table(FotoPengurus::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Pengurus::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Transaksi::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(TipeTransaksi::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(FotoResep::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(NutrisiResep::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(TipsResep::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(StepsResep::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(BahanResep::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Resep::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Volunteer::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(FotoKegiatan::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Kegiatan::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(StatusKegiatan::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(JenisKegiatan::Table).to_owned())
            .await?;

        Ok(())
    }
}
