use sea_orm_migration::prelude::*;

// Define table names
#[derive(DeriveIden)]
pub enum JenisKegiatan {
    Table,
    Id,
    Nama,
    Deskripsi,
}

#[derive(DeriveIden)]
pub enum StatusKegiatan {
    Table,
    Id,
    Nama,
    Deskripsi,
}

#[derive(DeriveIden)]
pub enum Kegiatan {
    Table,
    Id,
    Nama,
    Deskripsi,
    Tanggal,
    JumlahPeserta,
    LokasiLng,
    LokasiLat,
    JenisKegiatanId,
    StatusKegiatanId,
}

#[derive(DeriveIden)]
pub enum FotoKegiatan {
    Table,
    Id,
    KegiatanId,
    FilePath,
    FileName,
}

#[derive(DeriveIden)]
pub enum Volunteer {
    Table,
    Id,
    Nama,
    Email,
    Phone,
    Skill,
    Motivasi,
    KegiatanId,
    IsApproved,
}

#[derive(DeriveIden)]
pub enum Resep {
    Table,
    Id,
    Judul,
    Deskripsi,
    Kategori,
    TingkatKesulitan,
    WaktuMemasak,
    WaktuPersiapan,
    Porsi,
    Kalori,
}

#[derive(DeriveIden)]
pub enum BahanResep {
    Table,
    Id,
    ResepId,
    Nama,
    Takaran,
}

#[derive(DeriveIden)]
pub enum StepsResep {
    Table,
    Id,
    Urutan,
    ResepId,
    Nama,
}

#[derive(DeriveIden)]
pub enum TipsResep {
    Table,
    Id,
    Urutan,
    ResepId,
    Nama,
}

#[derive(DeriveIden)]
pub enum NutrisiResep {
    Table,
    Id,
    Label,
    Nilai,
    ResepId,
}

#[derive(DeriveIden)]
pub enum FotoResep {
    Table,
    Id,
    ResepId,
    FilePath,
    FileName,
}

#[derive(DeriveIden)]
pub enum TipeTransaksi {
    Table,
    Id,
    Nama,
}

#[derive(DeriveIden)]
pub enum Transaksi {
    Table,
    Id,
    Nama,
    TipeTransaksiId,
    Deskripsi,
    Jumlah,
    Tanggal,
}

#[derive(DeriveIden)]
pub enum Pengurus {
    Table,
    Id,
    Nama,
    Jabatan,
}

#[derive(DeriveIden)]
pub enum FotoPengurus {
    Table,
    Id,
    PengurusId,
    FilePath,
    FileName,
}
