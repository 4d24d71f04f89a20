//! Activity endpoints: jenis-kegiatan and status-kegiatan lookups, the
//! kegiatan resource itself, its photo collection, and the two bulk photo
//! actions (`delete_photos`, `replace_all_photos`).

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, IntoActiveModel, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::entities::{foto_kegiatan, jenis_kegiatan, kegiatan, status_kegiatan};
use crate::error::{ApiError, ApiResult};
use crate::geo::GeoPoint;
use crate::router::AppState;
use crate::service::Mutation;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/jenis-kegiatan", get(list_jenis).post(create_jenis))
        .route(
            "/jenis-kegiatan/{id}",
            get(get_jenis)
                .put(update_jenis)
                .patch(update_jenis)
                .delete(delete_jenis),
        )
        .route("/status-kegiatan", get(list_status).post(create_status))
        .route(
            "/status-kegiatan/{id}",
            get(get_status)
                .put(update_status)
                .patch(update_status)
                .delete(delete_status),
        )
        .route("/kegiatan", get(list_kegiatan).post(create_kegiatan))
        .route(
            "/kegiatan/{id}",
            get(get_kegiatan)
                .put(update_kegiatan)
                .patch(update_kegiatan)
                .delete(delete_kegiatan),
        )
        .route("/kegiatan/{id}/delete_photos", post(delete_photos))
        .route(
            "/kegiatan/{id}/replace_all_photos",
            post(replace_all_photos),
        )
        .route("/foto-kegiatan", get(list_foto).post(create_foto))
        .route(
            "/foto-kegiatan/{id}",
            get(get_foto)
                .put(update_foto)
                .patch(update_foto)
                .delete(delete_foto),
        )
}

// ---- jenis-kegiatan / status-kegiatan ----

#[derive(Deserialize)]
struct LookupPayload {
    nama: String,
    deskripsi: Option<String>,
}

#[derive(Deserialize)]
struct LookupUpdate {
    nama: Option<String>,
    deskripsi: Option<String>,
}

async fn list_jenis(State(state): State<AppState>) -> ApiResult<Json<Vec<jenis_kegiatan::Model>>> {
    let rows = jenis_kegiatan::Entity::find()
        .order_by_asc(jenis_kegiatan::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(rows))
}

async fn create_jenis(
    State(state): State<AppState>,
    Json(payload): Json<LookupPayload>,
) -> ApiResult<(StatusCode, Json<jenis_kegiatan::Model>)> {
    let now = Utc::now().fixed_offset();
    let row = jenis_kegiatan::ActiveModel {
        nama: Set(payload.nama),
        deskripsi: Set(payload.deskripsi),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

async fn get_jenis(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<jenis_kegiatan::Model>> {
    let row = jenis_kegiatan::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(row))
}

async fn update_jenis(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<LookupUpdate>,
) -> ApiResult<Json<jenis_kegiatan::Model>> {
    let row = jenis_kegiatan::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    let mut active = row.into_active_model();
    if let Some(nama) = payload.nama {
        active.nama = Set(nama);
    }
    if let Some(deskripsi) = payload.deskripsi {
        active.deskripsi = Set(Some(deskripsi));
    }
    active.updated_at = Set(Utc::now().fixed_offset());
    Ok(Json(active.update(&state.db).await?))
}

async fn delete_jenis(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<StatusCode> {
    let result = jenis_kegiatan::Entity::delete_by_id(id)
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn list_status(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<status_kegiatan::Model>>> {
    let rows = status_kegiatan::Entity::find()
        .order_by_asc(status_kegiatan::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(rows))
}

async fn create_status(
    State(state): State<AppState>,
    Json(payload): Json<LookupPayload>,
) -> ApiResult<(StatusCode, Json<status_kegiatan::Model>)> {
    let now = Utc::now().fixed_offset();
    let row = status_kegiatan::ActiveModel {
        nama: Set(payload.nama),
        deskripsi: Set(payload.deskripsi),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

async fn get_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<status_kegiatan::Model>> {
    let row = status_kegiatan::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(row))
}

async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<LookupUpdate>,
) -> ApiResult<Json<status_kegiatan::Model>> {
    let row = status_kegiatan::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    let mut active = row.into_active_model();
    if let Some(nama) = payload.nama {
        active.nama = Set(nama);
    }
    if let Some(deskripsi) = payload.deskripsi {
        active.deskripsi = Set(Some(deskripsi));
    }
    active.updated_at = Set(Utc::now().fixed_offset());
    Ok(Json(active.update(&state.db).await?))
}

async fn delete_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    let result = status_kegiatan::Entity::delete_by_id(id)
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---- kegiatan ----

#[derive(Serialize)]
struct KegiatanResponse {
    id: i32,
    nama: String,
    deskripsi: String,
    tanggal: NaiveDate,
    jumlah_peserta: i32,
    lokasi: GeoPoint,
    jenis_kegiatan_id: i32,
    jenis_kegiatan_detail: Option<jenis_kegiatan::Model>,
    status_kegiatan_id: i32,
    status_kegiatan_detail: Option<status_kegiatan::Model>,
    foto: Vec<foto_kegiatan::Model>,
    created_at: DateTimeWithTimeZone,
    updated_at: DateTimeWithTimeZone,
}

async fn to_response(db: &DatabaseConnection, row: kegiatan::Model) -> Result<KegiatanResponse, DbErr> {
    let jenis = jenis_kegiatan::Entity::find_by_id(row.jenis_kegiatan_id)
        .one(db)
        .await?;
    let status = status_kegiatan::Entity::find_by_id(row.status_kegiatan_id)
        .one(db)
        .await?;
    let foto = foto_kegiatan::Entity::find()
        .filter(foto_kegiatan::Column::KegiatanId.eq(row.id))
        .order_by_asc(foto_kegiatan::Column::Id)
        .all(db)
        .await?;

    Ok(KegiatanResponse {
        id: row.id,
        nama: row.nama,
        deskripsi: row.deskripsi,
        tanggal: row.tanggal,
        jumlah_peserta: row.jumlah_peserta,
        lokasi: GeoPoint::new(row.lokasi_lng, row.lokasi_lat),
        jenis_kegiatan_id: row.jenis_kegiatan_id,
        jenis_kegiatan_detail: jenis,
        status_kegiatan_id: row.status_kegiatan_id,
        status_kegiatan_detail: status,
        foto,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[derive(Deserialize)]
struct KegiatanPayload {
    nama: String,
    deskripsi: String,
    tanggal: NaiveDate,
    jumlah_peserta: i32,
    lokasi: GeoPoint,
    jenis_kegiatan_id: i32,
    status_kegiatan_id: i32,
}

#[derive(Deserialize)]
struct KegiatanUpdate {
    nama: Option<String>,
    deskripsi: Option<String>,
    tanggal: Option<NaiveDate>,
    jumlah_peserta: Option<i32>,
    lokasi: Option<GeoPoint>,
    jenis_kegiatan_id: Option<i32>,
    status_kegiatan_id: Option<i32>,
}

async fn check_kegiatan_refs(
    db: &DatabaseConnection,
    jenis_id: Option<i32>,
    status_id: Option<i32>,
) -> ApiResult<()> {
    if let Some(id) = jenis_id {
        if jenis_kegiatan::Entity::find_by_id(id).one(db).await?.is_none() {
            return Err(ApiError::BadRequest(format!(
                "jenis_kegiatan_id {id} tidak ditemukan"
            )));
        }
    }
    if let Some(id) = status_id {
        if status_kegiatan::Entity::find_by_id(id).one(db).await?.is_none() {
            return Err(ApiError::BadRequest(format!(
                "status_kegiatan_id {id} tidak ditemukan"
            )));
        }
    }
    Ok(())
}

async fn list_kegiatan(State(state): State<AppState>) -> ApiResult<Json<Vec<KegiatanResponse>>> {
    let rows = kegiatan::Entity::find()
        .order_by_desc(kegiatan::Column::Tanggal)
        .all(&state.db)
        .await?;

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        out.push(to_response(&state.db, row).await?);
    }
    Ok(Json(out))
}

async fn create_kegiatan(
    State(state): State<AppState>,
    Json(payload): Json<KegiatanPayload>,
) -> ApiResult<(StatusCode, Json<KegiatanResponse>)> {
    check_kegiatan_refs(
        &state.db,
        Some(payload.jenis_kegiatan_id),
        Some(payload.status_kegiatan_id),
    )
    .await?;

    let now = Utc::now().fixed_offset();
    let row = kegiatan::ActiveModel {
        nama: Set(payload.nama),
        deskripsi: Set(payload.deskripsi),
        tanggal: Set(payload.tanggal),
        jumlah_peserta: Set(payload.jumlah_peserta),
        lokasi_lng: Set(payload.lokasi.longitude),
        lokasi_lat: Set(payload.lokasi.latitude),
        jenis_kegiatan_id: Set(payload.jenis_kegiatan_id),
        status_kegiatan_id: Set(payload.status_kegiatan_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(to_response(&state.db, row).await?),
    ))
}

async fn get_kegiatan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<KegiatanResponse>> {
    let row = kegiatan::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(to_response(&state.db, row).await?))
}

async fn update_kegiatan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<KegiatanUpdate>,
) -> ApiResult<Json<KegiatanResponse>> {
    let row = kegiatan::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    check_kegiatan_refs(&state.db, payload.jenis_kegiatan_id, payload.status_kegiatan_id).await?;

    let mut active = row.into_active_model();
    if let Some(nama) = payload.nama {
        active.nama = Set(nama);
    }
    if let Some(deskripsi) = payload.deskripsi {
        active.deskripsi = Set(deskripsi);
    }
    if let Some(tanggal) = payload.tanggal {
        active.tanggal = Set(tanggal);
    }
    if let Some(jumlah_peserta) = payload.jumlah_peserta {
        active.jumlah_peserta = Set(jumlah_peserta);
    }
    if let Some(lokasi) = payload.lokasi {
        active.lokasi_lng = Set(lokasi.longitude);
        active.lokasi_lat = Set(lokasi.latitude);
    }
    if let Some(jenis_id) = payload.jenis_kegiatan_id {
        active.jenis_kegiatan_id = Set(jenis_id);
    }
    if let Some(status_id) = payload.status_kegiatan_id {
        active.status_kegiatan_id = Set(status_id);
    }
    active.updated_at = Set(Utc::now().fixed_offset());

    let row = active.update(&state.db).await?;
    Ok(Json(to_response(&state.db, row).await?))
}

async fn delete_kegiatan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    let photos = foto_kegiatan::Entity::find()
        .filter(foto_kegiatan::Column::KegiatanId.eq(id))
        .all(&state.db)
        .await?;
    for photo in &photos {
        remove_photo_object(&state, photo).await;
    }

    if !Mutation::delete_kegiatan(&state.db, id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Best-effort storage cleanup: a failed or missing object never blocks the
/// row deletion. Returns the failure message so bulk actions can report it.
async fn remove_photo_object(state: &AppState, photo: &foto_kegiatan::Model) -> Option<String> {
    if photo.file_path.is_empty() {
        return None;
    }
    if state.storage.exists(&photo.file_path).await {
        if let Err(err) = state.storage.delete(&photo.file_path).await {
            tracing::warn!(photo_id = photo.id, %err, "failed to delete photo object");
            return Some(err.to_string());
        }
    }
    None
}

// ---- bulk photo actions ----

#[derive(Deserialize)]
struct DeletePhotosPayload {
    #[serde(default)]
    photo_ids: Vec<i32>,
}

#[derive(Serialize)]
struct DeletePhotosResponse {
    deleted_count: usize,
    total_requested: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

async fn delete_photos(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<DeletePhotosPayload>,
) -> ApiResult<Json<DeletePhotosResponse>> {
    kegiatan::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    if payload.photo_ids.is_empty() {
        return Err(ApiError::BadRequest("photo_ids is required".into()));
    }

    let mut deleted_count = 0;
    let mut errors = Vec::new();
    for photo_id in &payload.photo_ids {
        let photo = foto_kegiatan::Entity::find_by_id(*photo_id)
            .filter(foto_kegiatan::Column::KegiatanId.eq(id))
            .one(&state.db)
            .await?;
        match photo {
            Some(photo) => {
                if let Some(err) = remove_photo_object(&state, &photo).await {
                    errors.push(format!("Error deleting file for photo {photo_id}: {err}"));
                }
                foto_kegiatan::Entity::delete_by_id(photo.id)
                    .exec(&state.db)
                    .await?;
                deleted_count += 1;
            }
            None => errors.push(format!(
                "Photo with id {photo_id} not found or doesn't belong to this kegiatan"
            )),
        }
    }

    Ok(Json(DeletePhotosResponse {
        deleted_count,
        total_requested: payload.photo_ids.len(),
        errors,
    }))
}

#[derive(Serialize)]
struct ReplacePhotosResponse {
    message: String,
    deleted_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

/// Clears the photo collection so the client can upload a fresh set.
async fn replace_all_photos(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ReplacePhotosResponse>> {
    kegiatan::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    let photos = foto_kegiatan::Entity::find()
        .filter(foto_kegiatan::Column::KegiatanId.eq(id))
        .all(&state.db)
        .await?;

    let mut deleted_count = 0;
    let mut errors = Vec::new();
    for photo in &photos {
        if let Some(err) = remove_photo_object(&state, photo).await {
            errors.push(format!("Error deleting file {}: {err}", photo.file_name));
        }
        foto_kegiatan::Entity::delete_by_id(photo.id)
            .exec(&state.db)
            .await?;
        deleted_count += 1;
    }

    Ok(Json(ReplacePhotosResponse {
        message: format!("Deleted {deleted_count} photos"),
        deleted_count,
        errors,
    }))
}

// ---- foto-kegiatan ----

#[derive(Deserialize)]
struct FotoPayload {
    kegiatan_id: i32,
    file_path: String,
    file_name: String,
}

#[derive(Deserialize)]
struct FotoUpdate {
    kegiatan_id: Option<i32>,
    file_path: Option<String>,
    file_name: Option<String>,
}

async fn list_foto(State(state): State<AppState>) -> ApiResult<Json<Vec<foto_kegiatan::Model>>> {
    let rows = foto_kegiatan::Entity::find()
        .order_by_asc(foto_kegiatan::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(rows))
}

async fn create_foto(
    State(state): State<AppState>,
    Json(payload): Json<FotoPayload>,
) -> ApiResult<(StatusCode, Json<foto_kegiatan::Model>)> {
    if kegiatan::Entity::find_by_id(payload.kegiatan_id)
        .one(&state.db)
        .await?
        .is_none()
    {
        return Err(ApiError::BadRequest(format!(
            "kegiatan_id {} tidak ditemukan",
            payload.kegiatan_id
        )));
    }

    let now = Utc::now().fixed_offset();
    let row = foto_kegiatan::ActiveModel {
        kegiatan_id: Set(payload.kegiatan_id),
        file_path: Set(payload.file_path),
        file_name: Set(payload.file_name),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

async fn get_foto(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<foto_kegiatan::Model>> {
    let row = foto_kegiatan::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(row))
}

async fn update_foto(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<FotoUpdate>,
) -> ApiResult<Json<foto_kegiatan::Model>> {
    let row = foto_kegiatan::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    if let Some(kegiatan_id) = payload.kegiatan_id {
        if kegiatan::Entity::find_by_id(kegiatan_id)
            .one(&state.db)
            .await?
            .is_none()
        {
            return Err(ApiError::BadRequest(format!(
                "kegiatan_id {kegiatan_id} tidak ditemukan"
            )));
        }
    }

    let mut active = row.into_active_model();
    if let Some(kegiatan_id) = payload.kegiatan_id {
        active.kegiatan_id = Set(kegiatan_id);
    }
    if let Some(file_path) = payload.file_path {
        active.file_path = Set(file_path);
    }
    if let Some(file_name) = payload.file_name {
        active.file_name = Set(file_name);
    }
    active.updated_at = Set(Utc::now().fixed_offset());
    Ok(Json(active.update(&state.db).await?))
}

/// Deleting a photo row also removes its object from storage first.
async fn delete_foto(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<StatusCode> {
    let row = foto_kegiatan::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    remove_photo_object(&state, &row).await;
    foto_kegiatan::Entity::delete_by_id(id).exec(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}
