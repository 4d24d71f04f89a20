//! Populates the database with sample data for manual API testing.
//!
//! Existing rows in the seeded tables are removed first, so running it twice
//! leaves a single copy of the data set.

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dhaharan_api::config::Config;
use dhaharan_api::database::setup_database;
use dhaharan_api::entities::resep::{Kategori, TingkatKesulitan};
use dhaharan_api::entities::{
    bahan_resep, foto_kegiatan, foto_pengurus, foto_resep, jenis_kegiatan, kegiatan,
    nutrisi_resep, pengurus, resep, status_kegiatan, steps_resep, tipe_transaksi, tips_resep,
    transaksi, volunteer,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = setup_database(&config.database_url).await?;

    tracing::info!("clearing existing data");
    foto_kegiatan::Entity::delete_many().exec(&db).await?;
    volunteer::Entity::delete_many().exec(&db).await?;
    kegiatan::Entity::delete_many().exec(&db).await?;
    jenis_kegiatan::Entity::delete_many().exec(&db).await?;
    status_kegiatan::Entity::delete_many().exec(&db).await?;
    bahan_resep::Entity::delete_many().exec(&db).await?;
    steps_resep::Entity::delete_many().exec(&db).await?;
    tips_resep::Entity::delete_many().exec(&db).await?;
    nutrisi_resep::Entity::delete_many().exec(&db).await?;
    foto_resep::Entity::delete_many().exec(&db).await?;
    resep::Entity::delete_many().exec(&db).await?;
    transaksi::Entity::delete_many().exec(&db).await?;
    tipe_transaksi::Entity::delete_many().exec(&db).await?;
    foto_pengurus::Entity::delete_many().exec(&db).await?;
    pengurus::Entity::delete_many().exec(&db).await?;

    let now = Utc::now().fixed_offset();
    let today = Utc::now().date_naive();

    tracing::info!("creating jenis kegiatan");
    let jenis = [
        ("Bakti Sosial", "Kegiatan bakti sosial untuk masyarakat"),
        ("Santunan", "Pemberian santunan kepada yang membutuhkan"),
        ("Event", "Event khusus dan acara tahunan"),
    ];
    let mut jenis_ids = Vec::new();
    for (nama, deskripsi) in jenis {
        let row = jenis_kegiatan::ActiveModel {
            nama: Set(nama.into()),
            deskripsi: Set(Some(deskripsi.into())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;
        jenis_ids.push(row.id);
    }

    tracing::info!("creating status kegiatan");
    let status = [
        ("Akan Datang", "Kegiatan yang akan dilaksanakan"),
        ("Berlangsung", "Kegiatan yang sedang berlangsung"),
        ("Selesai", "Kegiatan yang telah selesai"),
    ];
    let mut status_ids = Vec::new();
    for (nama, deskripsi) in status {
        let row = status_kegiatan::ActiveModel {
            nama: Set(nama.into()),
            deskripsi: Set(Some(deskripsi.into())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;
        status_ids.push(row.id);
    }

    tracing::info!("creating kegiatan");
    struct KegiatanSeed {
        nama: &'static str,
        deskripsi: &'static str,
        tanggal: NaiveDate,
        jumlah_peserta: i32,
        lokasi: (f64, f64),
        jenis: usize,
        status: usize,
    }
    let kegiatan_seed = [
        KegiatanSeed {
            nama: "Bakti Sosial Ramadan 2024",
            deskripsi:
                "Kegiatan bakti sosial menyambut bulan Ramadan dengan membagikan paket sembako",
            tanggal: today + Duration::days(30),
            jumlah_peserta: 150,
            lokasi: (110.370529, -7.797068), // Yogyakarta
            jenis: 0,
            status: 0,
        },
        KegiatanSeed {
            nama: "Santunan Anak Yatim",
            deskripsi: "Memberikan santunan kepada anak yatim piatu di panti asuhan",
            tanggal: today + Duration::days(15),
            jumlah_peserta: 75,
            lokasi: (106.816666, -6.914744), // Depok
            jenis: 1,
            status: 0,
        },
        KegiatanSeed {
            nama: "Festival Makanan Sehat",
            deskripsi: "Event tahunan festival makanan sehat dan bergizi",
            tanggal: today,
            jumlah_peserta: 200,
            lokasi: (106.845599, -6.208763), // Jakarta
            jenis: 2,
            status: 1,
        },
        KegiatanSeed {
            nama: "Buka Puasa Bersama",
            deskripsi: "Acara buka puasa bersama masyarakat sekitar",
            tanggal: today - Duration::days(10),
            jumlah_peserta: 300,
            lokasi: (112.731391, -7.257472), // Surabaya
            jenis: 2,
            status: 2,
        },
        KegiatanSeed {
            nama: "Donor Darah Rutin",
            deskripsi: "Kegiatan donor darah rutin bekerjasama dengan PMI",
            tanggal: today - Duration::days(30),
            jumlah_peserta: 100,
            lokasi: (107.608238, -6.914744), // Bandung
            jenis: 0,
            status: 2,
        },
    ];
    let mut kegiatan_ids = Vec::new();
    for seed in kegiatan_seed {
        let row = kegiatan::ActiveModel {
            nama: Set(seed.nama.into()),
            deskripsi: Set(seed.deskripsi.into()),
            tanggal: Set(seed.tanggal),
            jumlah_peserta: Set(seed.jumlah_peserta),
            lokasi_lng: Set(seed.lokasi.0),
            lokasi_lat: Set(seed.lokasi.1),
            jenis_kegiatan_id: Set(jenis_ids[seed.jenis]),
            status_kegiatan_id: Set(status_ids[seed.status]),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;
        kegiatan_ids.push(row.id);
    }

    tracing::info!("creating volunteers");
    let volunteers = [
        (
            "Budi Santoso",
            "budi.santoso@email.com",
            "081234567890",
            "Memasak, Koordinasi acara",
            "Ingin berbagi kebahagiaan dengan sesama",
            0,
            true,
        ),
        (
            "Siti Aminah",
            "siti.aminah@email.com",
            "081234567891",
            "Dokumentasi, Fotografi",
            "Mendokumentasikan momen kebaikan untuk inspirasi",
            0,
            true,
        ),
        (
            "Ahmad Hidayat",
            "ahmad.hidayat@email.com",
            "081234567892",
            "Public speaking, MC",
            "Membantu kelancaran acara sosial",
            1,
            false,
        ),
        (
            "Dewi Lestari",
            "dewi.lestari@email.com",
            "081234567893",
            "Mengajar, Membimbing anak",
            "Berbagi ilmu dengan anak-anak",
            1,
            true,
        ),
        (
            "Rizky Pratama",
            "rizky.pratama@email.com",
            "081234567894",
            "Logistik, Pengadaan barang",
            "Memastikan kebutuhan acara terpenuhi",
            2,
            false,
        ),
    ];
    for (nama, email, phone, skill, motivasi, keg, approved) in volunteers {
        volunteer::ActiveModel {
            nama: Set(nama.into()),
            email: Set(email.into()),
            phone: Set(phone.into()),
            skill: Set(skill.into()),
            motivasi: Set(motivasi.into()),
            kegiatan_id: Set(kegiatan_ids[keg]),
            is_approved: Set(approved),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;
    }

    tracing::info!("creating resep");
    let resep_seed = [
        (
            "Nasi Goreng Spesial",
            "Nasi goreng dengan bumbu rempah pilihan dan topping lengkap",
            Kategori::Makanan,
            TingkatKesulitan::Mudah,
            20,
            15,
            4,
            450,
        ),
        (
            "Soto Ayam Kuning",
            "Soto ayam dengan kuah kuning yang gurih dan hangat",
            Kategori::Makanan,
            TingkatKesulitan::Sedang,
            45,
            20,
            6,
            350,
        ),
        (
            "Es Teh Manis",
            "Minuman teh manis dingin yang menyegarkan",
            Kategori::Minuman,
            TingkatKesulitan::Mudah,
            5,
            5,
            2,
            120,
        ),
        (
            "Pudding Coklat",
            "Pudding coklat lembut dengan topping vla vanila",
            Kategori::Dessert,
            TingkatKesulitan::Mudah,
            30,
            10,
            8,
            200,
        ),
        (
            "Risoles Sayur",
            "Risoles isi sayuran dengan kulit yang renyah",
            Kategori::Snack,
            TingkatKesulitan::Sedang,
            40,
            30,
            10,
            180,
        ),
    ];
    let mut resep_ids = Vec::new();
    for (judul, deskripsi, kategori, tingkat, memasak, persiapan, porsi, kalori) in resep_seed {
        let row = resep::ActiveModel {
            judul: Set(judul.into()),
            deskripsi: Set(deskripsi.into()),
            kategori: Set(kategori),
            tingkat_kesulitan: Set(tingkat),
            waktu_memasak: Set(memasak),
            waktu_persiapan: Set(persiapan),
            porsi: Set(porsi),
            kalori: Set(kalori),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;
        resep_ids.push(row.id);
    }

    // Sub-resources only for the first recipe, as a complete example.
    let nasi_goreng = resep_ids[0];

    tracing::info!("creating bahan resep");
    let bahan = [
        ("Nasi putih", "500 gram"),
        ("Telur", "2 butir"),
        ("Bawang merah", "5 siung"),
        ("Kecap manis", "3 sdm"),
    ];
    for (nama, takaran) in bahan {
        bahan_resep::ActiveModel {
            resep_id: Set(nasi_goreng),
            nama: Set(nama.into()),
            takaran: Set(takaran.into()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;
    }

    tracing::info!("creating steps resep");
    let steps = [
        "Panaskan minyak dalam wajan",
        "Tumis bawang merah hingga harum",
        "Masukkan telur, orak-arik",
        "Masukkan nasi, aduk rata dengan bumbu",
    ];
    for (idx, nama) in steps.iter().enumerate() {
        steps_resep::ActiveModel {
            resep_id: Set(nasi_goreng),
            urutan: Set(idx as i32 + 1),
            nama: Set((*nama).into()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;
    }

    tracing::info!("creating tips resep");
    let tips = [
        "Gunakan nasi dingin agar tidak lengket",
        "Api harus besar agar nasi tidak lembek",
    ];
    for (idx, nama) in tips.iter().enumerate() {
        tips_resep::ActiveModel {
            resep_id: Set(nasi_goreng),
            urutan: Set(idx as i32 + 1),
            nama: Set((*nama).into()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;
    }

    tracing::info!("creating nutrisi resep");
    let nutrisi = [("Protein", "15g"), ("Karbohidrat", "65g"), ("Lemak", "12g")];
    for (label, nilai) in nutrisi {
        nutrisi_resep::ActiveModel {
            resep_id: Set(nasi_goreng),
            label: Set(label.into()),
            nilai: Set(nilai.into()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;
    }

    tracing::info!("creating tipe transaksi");
    let mut tipe_ids = Vec::new();
    for nama in ["Pemasukan", "Pengeluaran"] {
        let row = tipe_transaksi::ActiveModel {
            nama: Set(nama.into()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;
        tipe_ids.push(row.id);
    }

    tracing::info!("creating transaksi");
    let transaksi_seed = [
        (
            "Donasi Bulanan Januari",
            0,
            "Penerimaan donasi rutin bulan Januari",
            "5000000.00",
            20,
        ),
        (
            "Pembelian Sembako",
            1,
            "Pembelian sembako untuk bakti sosial",
            "2500000.00",
            15,
        ),
        (
            "Donasi Event Festival",
            0,
            "Sponsorship untuk festival makanan sehat",
            "10000000.00",
            10,
        ),
        (
            "Sewa Tempat Acara",
            1,
            "Biaya sewa tempat untuk acara buka puasa",
            "3000000.00",
            5,
        ),
        (
            "Donasi Online",
            0,
            "Donasi melalui platform online",
            "1500000.00",
            0,
        ),
    ];
    for (nama, tipe, deskripsi, jumlah, days_ago) in transaksi_seed {
        transaksi::ActiveModel {
            nama: Set(nama.into()),
            tipe_transaksi_id: Set(tipe_ids[tipe]),
            deskripsi: Set(deskripsi.into()),
            jumlah: Set(jumlah.parse::<Decimal>()?),
            tanggal: Set(today - Duration::days(days_ago)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;
    }

    tracing::info!("creating pengurus");
    let pengurus_seed = [
        ("Dr. Hadi Wijaya", "Ketua Umum"),
        ("Ir. Lestari Putri", "Wakil Ketua"),
        ("Drs. Muhammad Iqbal", "Sekretaris"),
        ("SE. Ratna Sari", "Bendahara"),
        ("S.Kom. Eko Prasetyo", "Koordinator IT"),
    ];
    for (nama, jabatan) in pengurus_seed {
        pengurus::ActiveModel {
            nama: Set(nama.into()),
            jabatan: Set(jabatan.into()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;
    }

    tracing::info!("seed data generated");
    Ok(())
}
