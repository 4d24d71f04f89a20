//! HTTP route modules. Each module exposes `routes()` returning a
//! `Router<AppState>` that the top-level router merges under `/api`.

pub mod kegiatan;
pub mod pengurus;
pub mod resep;
pub mod transaksi;
pub mod upload;
pub mod volunteer;
