//! Service-layer tests against an in-memory sqlite database with the schema
//! derived straight from the entity definitions.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, Database, DatabaseConnection, Schema};

use dhaharan_api::entities::resep::{Kategori, TingkatKesulitan};
use dhaharan_api::entities::{
    bahan_resep, foto_kegiatan, foto_resep, jenis_kegiatan, kegiatan, nutrisi_resep, resep,
    status_kegiatan, steps_resep, tipe_transaksi, tips_resep, transaksi, volunteer,
};
use dhaharan_api::service::{Mutation, Query};

async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    db.execute(builder.build(&schema.create_table_from_entity(jenis_kegiatan::Entity)))
        .await
        .unwrap();
    db.execute(builder.build(&schema.create_table_from_entity(status_kegiatan::Entity)))
        .await
        .unwrap();
    db.execute(builder.build(&schema.create_table_from_entity(kegiatan::Entity)))
        .await
        .unwrap();
    db.execute(builder.build(&schema.create_table_from_entity(foto_kegiatan::Entity)))
        .await
        .unwrap();
    db.execute(builder.build(&schema.create_table_from_entity(volunteer::Entity)))
        .await
        .unwrap();
    db.execute(builder.build(&schema.create_table_from_entity(resep::Entity)))
        .await
        .unwrap();
    db.execute(builder.build(&schema.create_table_from_entity(bahan_resep::Entity)))
        .await
        .unwrap();
    db.execute(builder.build(&schema.create_table_from_entity(steps_resep::Entity)))
        .await
        .unwrap();
    db.execute(builder.build(&schema.create_table_from_entity(tips_resep::Entity)))
        .await
        .unwrap();
    db.execute(builder.build(&schema.create_table_from_entity(nutrisi_resep::Entity)))
        .await
        .unwrap();
    db.execute(builder.build(&schema.create_table_from_entity(foto_resep::Entity)))
        .await
        .unwrap();
    db.execute(builder.build(&schema.create_table_from_entity(tipe_transaksi::Entity)))
        .await
        .unwrap();
    db.execute(builder.build(&schema.create_table_from_entity(transaksi::Entity)))
        .await
        .unwrap();

    db
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn insert_tipe(db: &DatabaseConnection, nama: &str) -> tipe_transaksi::Model {
    let now = Utc::now().fixed_offset();
    tipe_transaksi::ActiveModel {
        nama: Set(nama.into()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

async fn insert_transaksi(
    db: &DatabaseConnection,
    nama: &str,
    tipe_id: i32,
    jumlah: &str,
    tanggal: NaiveDate,
) -> transaksi::Model {
    let now = Utc::now().fixed_offset();
    transaksi::ActiveModel {
        nama: Set(nama.into()),
        tipe_transaksi_id: Set(tipe_id),
        deskripsi: Set("test".into()),
        jumlah: Set(jumlah.parse().unwrap()),
        tanggal: Set(tanggal),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

async fn insert_kegiatan(db: &DatabaseConnection) -> kegiatan::Model {
    let now = Utc::now().fixed_offset();
    let jenis = jenis_kegiatan::ActiveModel {
        nama: Set("Bakti Sosial".into()),
        deskripsi: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
    let status = status_kegiatan::ActiveModel {
        nama: Set("Akan Datang".into()),
        deskripsi: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    kegiatan::ActiveModel {
        nama: Set("Bakti Sosial Ramadan".into()),
        deskripsi: Set("paket sembako".into()),
        tanggal: Set(date(2024, 3, 15)),
        jumlah_peserta: Set(150),
        lokasi_lng: Set(110.370529),
        lokasi_lat: Set(-7.797068),
        jenis_kegiatan_id: Set(jenis.id),
        status_kegiatan_id: Set(status.id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

async fn insert_volunteer(
    db: &DatabaseConnection,
    kegiatan_id: i32,
    nama: &str,
    approved: bool,
) -> volunteer::Model {
    let now = Utc::now().fixed_offset();
    volunteer::ActiveModel {
        nama: Set(nama.into()),
        email: Set(format!("{}@email.com", nama.to_lowercase().replace(' ', "."))),
        phone: Set("081234567890".into()),
        skill: Set("Memasak".into()),
        motivasi: Set("Ingin berbagi".into()),
        kegiatan_id: Set(kegiatan_id),
        is_approved: Set(approved),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

async fn insert_resep(db: &DatabaseConnection, judul: &str, kategori: Kategori) -> resep::Model {
    let now = Utc::now().fixed_offset();
    resep::ActiveModel {
        judul: Set(judul.into()),
        deskripsi: Set("test".into()),
        kategori: Set(kategori),
        tingkat_kesulitan: Set(TingkatKesulitan::Mudah),
        waktu_memasak: Set(20),
        waktu_persiapan: Set(15),
        porsi: Set(4),
        kalori: Set(450),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

#[tokio::test]
async fn summary_is_zero_without_transactions() {
    let db = setup_db().await;
    let summary = Query::transaksi_summary(&db).await.unwrap();
    assert_eq!(summary.total_pemasukan, Decimal::ZERO);
    assert_eq!(summary.total_pengeluaran, Decimal::ZERO);
    assert_eq!(summary.saldo, Decimal::ZERO);
}

#[tokio::test]
async fn summary_totals_income_and_expenses() {
    let db = setup_db().await;
    let pemasukan = insert_tipe(&db, "Pemasukan").await;
    let pengeluaran = insert_tipe(&db, "Pengeluaran").await;

    insert_transaksi(&db, "Donasi", pemasukan.id, "5000000.00", date(2024, 1, 5)).await;
    insert_transaksi(&db, "Donasi Online", pemasukan.id, "1500000.00", date(2024, 1, 25)).await;
    insert_transaksi(&db, "Sembako", pengeluaran.id, "2500000.00", date(2024, 1, 10)).await;

    let summary = Query::transaksi_summary(&db).await.unwrap();
    assert_eq!(summary.total_pemasukan, "6500000.00".parse::<Decimal>().unwrap());
    assert_eq!(summary.total_pengeluaran, "2500000.00".parse::<Decimal>().unwrap());
    assert_eq!(summary.saldo, summary.total_pemasukan - summary.total_pengeluaran);
}

#[tokio::test]
async fn summary_ignores_other_type_names() {
    let db = setup_db().await;
    let lainnya = insert_tipe(&db, "Lainnya").await;
    insert_transaksi(&db, "Misc", lainnya.id, "100000.00", date(2024, 2, 1)).await;

    let summary = Query::transaksi_summary(&db).await.unwrap();
    assert_eq!(summary.total_pemasukan, Decimal::ZERO);
    assert_eq!(summary.total_pengeluaran, Decimal::ZERO);
    assert_eq!(summary.saldo, Decimal::ZERO);
}

#[tokio::test]
async fn transaksi_by_tipe_filters_and_sorts_newest_first() {
    let db = setup_db().await;
    let pemasukan = insert_tipe(&db, "Pemasukan").await;
    let pengeluaran = insert_tipe(&db, "Pengeluaran").await;

    insert_transaksi(&db, "Older", pemasukan.id, "1000.00", date(2024, 1, 1)).await;
    insert_transaksi(&db, "Newer", pemasukan.id, "2000.00", date(2024, 2, 1)).await;
    insert_transaksi(&db, "Expense", pengeluaran.id, "3000.00", date(2024, 3, 1)).await;

    let rows = Query::transaksi_by_tipe(&db, pemasukan.id).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].0.nama, "Newer");
    assert_eq!(rows[1].0.nama, "Older");
    assert_eq!(rows[0].1.as_ref().unwrap().nama, "Pemasukan");
}

#[tokio::test]
async fn approve_volunteer_is_idempotent() {
    let db = setup_db().await;
    let keg = insert_kegiatan(&db).await;
    let vol = insert_volunteer(&db, keg.id, "Budi Santoso", false).await;
    assert!(!vol.is_approved);

    let approved = Mutation::approve_volunteer(&db, vol.id).await.unwrap().unwrap();
    assert!(approved.is_approved);

    let again = Mutation::approve_volunteer(&db, vol.id).await.unwrap().unwrap();
    assert!(again.is_approved);
}

#[tokio::test]
async fn approve_missing_volunteer_returns_none() {
    let db = setup_db().await;
    assert!(Mutation::approve_volunteer(&db, 999).await.unwrap().is_none());
}

#[tokio::test]
async fn pending_lists_only_unapproved() {
    let db = setup_db().await;
    let keg = insert_kegiatan(&db).await;
    insert_volunteer(&db, keg.id, "Budi Santoso", true).await;
    let pending_one = insert_volunteer(&db, keg.id, "Ahmad Hidayat", false).await;

    let pending = Query::pending_volunteers(&db).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, pending_one.id);
}

#[tokio::test]
async fn delete_kegiatan_removes_child_rows() {
    let db = setup_db().await;
    let keg = insert_kegiatan(&db).await;
    insert_volunteer(&db, keg.id, "Budi Santoso", false).await;

    let now = Utc::now().fixed_offset();
    foto_kegiatan::ActiveModel {
        kegiatan_id: Set(keg.id),
        file_path: Set("kegiatan/a.png".into()),
        file_name: Set("a.png".into()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap();

    assert!(Mutation::delete_kegiatan(&db, keg.id).await.unwrap());

    assert!(kegiatan::Entity::find_by_id(keg.id).one(&db).await.unwrap().is_none());
    assert_eq!(foto_kegiatan::Entity::find().all(&db).await.unwrap().len(), 0);
    assert_eq!(volunteer::Entity::find().all(&db).await.unwrap().len(), 0);
}

#[tokio::test]
async fn delete_missing_kegiatan_returns_false() {
    let db = setup_db().await;
    assert!(!Mutation::delete_kegiatan(&db, 42).await.unwrap());
}

#[tokio::test]
async fn delete_resep_removes_sub_resources() {
    let db = setup_db().await;
    let r = insert_resep(&db, "Nasi Goreng Spesial", Kategori::Makanan).await;

    let now = Utc::now().fixed_offset();
    bahan_resep::ActiveModel {
        resep_id: Set(r.id),
        nama: Set("Nasi putih".into()),
        takaran: Set("500 gram".into()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap();
    steps_resep::ActiveModel {
        resep_id: Set(r.id),
        urutan: Set(1),
        nama: Set("Panaskan minyak".into()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap();
    tips_resep::ActiveModel {
        resep_id: Set(r.id),
        urutan: Set(1),
        nama: Set("Gunakan nasi dingin".into()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap();
    nutrisi_resep::ActiveModel {
        resep_id: Set(r.id),
        label: Set("Protein".into()),
        nilai: Set("15g".into()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap();

    assert!(Mutation::delete_resep(&db, r.id).await.unwrap());

    assert!(resep::Entity::find_by_id(r.id).one(&db).await.unwrap().is_none());
    assert_eq!(bahan_resep::Entity::find().all(&db).await.unwrap().len(), 0);
    assert_eq!(steps_resep::Entity::find().all(&db).await.unwrap().len(), 0);
    assert_eq!(tips_resep::Entity::find().all(&db).await.unwrap().len(), 0);
    assert_eq!(nutrisi_resep::Entity::find().all(&db).await.unwrap().len(), 0);
}

#[tokio::test]
async fn resep_by_kategori_filters() {
    let db = setup_db().await;
    insert_resep(&db, "Nasi Goreng Spesial", Kategori::Makanan).await;
    insert_resep(&db, "Soto Ayam Kuning", Kategori::Makanan).await;
    insert_resep(&db, "Es Teh Manis", Kategori::Minuman).await;

    let makanan = Query::resep_by_kategori(&db, Kategori::Makanan).await.unwrap();
    assert_eq!(makanan.len(), 2);
    let minuman = Query::resep_by_kategori(&db, Kategori::Minuman).await.unwrap();
    assert_eq!(minuman.len(), 1);
    assert_eq!(minuman[0].judul, "Es Teh Manis");
    let dessert = Query::resep_by_kategori(&db, Kategori::Dessert).await.unwrap();
    assert!(dessert.is_empty());
}
