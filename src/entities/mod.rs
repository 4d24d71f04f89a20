//! Database entities, one module per table.

pub mod bahan_resep;
pub mod foto_kegiatan;
pub mod foto_pengurus;
pub mod foto_resep;
pub mod jenis_kegiatan;
pub mod kegiatan;
pub mod nutrisi_resep;
pub mod pengurus;
pub mod resep;
pub mod status_kegiatan;
pub mod steps_resep;
pub mod tipe_transaksi;
pub mod tips_resep;
pub mod transaksi;
pub mod volunteer;
