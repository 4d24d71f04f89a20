//! Route-level tests driving the router directly against an in-memory
//! sqlite database, focused on validation error shapes.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use chrono::{NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, Database, DatabaseConnection, Schema};
use serde_json::{Value, json};
use tower::ServiceExt;

use dhaharan_api::config::Config;
use dhaharan_api::entities::{
    foto_kegiatan, foto_pengurus, jenis_kegiatan, kegiatan, pengurus, status_kegiatan,
};
use dhaharan_api::router::create_router;
use dhaharan_api::storage::Storage;

async fn setup_app() -> (Router, DatabaseConnection) {
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
    db.execute(builder.build(&schema.create_table_from_entity(pengurus::Entity)))
        .await
        .unwrap();
    db.execute(builder.build(&schema.create_table_from_entity(foto_pengurus::Entity)))
        .await
        .unwrap();

    let config = Config {
        database_url: String::new(),
        rust_log: String::new(),
        aws_region: "ap-southeast-1".into(),
        aws_bucket: "cdn.example.org".into(),
        aws_prefix: "dhaharan.example.org".into(),
    };
    let storage = Storage::from_config(&config).await;

    (create_router(db.clone(), storage), db)
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
        tanggal: Set(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()),
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

fn patch_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn foto_kegiatan_update_rejects_unknown_parent() {
    let (app, db) = setup_app().await;
    let keg = insert_kegiatan(&db).await;

    let now = Utc::now().fixed_offset();
    let foto = foto_kegiatan::ActiveModel {
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

    let response = app
        .oneshot(patch_json(
            &format!("/api/foto-kegiatan/{}", foto.id),
            json!({ "kegiatan_id": 9999 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("tidak ditemukan"));

    // The row must be untouched.
    let unchanged = foto_kegiatan::Entity::find_by_id(foto.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.kegiatan_id, keg.id);
}

#[tokio::test]
async fn foto_kegiatan_update_accepts_existing_parent() {
    let (app, db) = setup_app().await;
    let keg = insert_kegiatan(&db).await;

    let now = Utc::now().fixed_offset();
    let foto = foto_kegiatan::ActiveModel {
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

    let response = app
        .oneshot(patch_json(
            &format!("/api/foto-kegiatan/{}", foto.id),
            json!({ "kegiatan_id": keg.id, "file_name": "b.png" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["file_name"], "b.png");
}

#[tokio::test]
async fn foto_pengurus_update_rejects_unknown_parent() {
    let (app, db) = setup_app().await;

    let now = Utc::now().fixed_offset();
    let staff = pengurus::ActiveModel {
        nama: Set("Dr. Hadi Wijaya".into()),
        jabatan: Set("Ketua Umum".into()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap();
    let foto = foto_pengurus::ActiveModel {
        pengurus_id: Set(staff.id),
        file_path: Set("pengurus/a.png".into()),
        file_name: Set("a.png".into()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap();

    let response = app
        .oneshot(patch_json(
            &format!("/api/foto-pengurus/{}", foto.id),
            json!({ "pengurus_id": 9999 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("tidak ditemukan"));

    let unchanged = foto_pengurus::Entity::find_by_id(foto.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.pengurus_id, staff.id);
}

#[tokio::test]
async fn by_kategori_without_param_returns_json_error() {
    let (app, _db) = setup_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/resep/by_kategori")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Parameter kategori diperlukan");
}

#[tokio::test]
async fn by_kategori_with_unknown_value_returns_json_error() {
    let (app, _db) = setup_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/resep/by_kategori?kategori=sayur")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("tidak valid"));
}
