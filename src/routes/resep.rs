//! Recipe endpoints. A resep response embeds all five sub-resource
//! collections; each sub-resource also has its own CRUD surface.
//!
//! foto-resep rows store the full public URL of the object, so storage
//! cleanup on delete goes through `Storage::key_from_url`.

use axum::{
    Json, Router,
    extract::{Path, Query as UrlQuery, State},
    http::StatusCode,
    routing::get,
};
use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, IntoActiveModel, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::entities::resep::{Kategori, TingkatKesulitan};
use crate::entities::{bahan_resep, foto_resep, nutrisi_resep, resep, steps_resep, tips_resep};
use crate::error::{ApiError, ApiResult};
use crate::router::AppState;
use crate::service::{Mutation, Query};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/resep", get(list).post(create))
        .route("/resep/by_kategori", get(by_kategori))
        .route(
            "/resep/{id}",
            get(get_one).put(update).patch(update).delete(delete),
        )
        .route("/bahan-resep", get(list_bahan).post(create_bahan))
        .route(
            "/bahan-resep/{id}",
            get(get_bahan)
                .put(update_bahan)
                .patch(update_bahan)
                .delete(delete_bahan),
        )
        .route("/steps-resep", get(list_steps).post(create_steps))
        .route(
            "/steps-resep/{id}",
            get(get_steps)
                .put(update_steps)
                .patch(update_steps)
                .delete(delete_steps),
        )
        .route("/tips-resep", get(list_tips).post(create_tips))
        .route(
            "/tips-resep/{id}",
            get(get_tips)
                .put(update_tips)
                .patch(update_tips)
                .delete(delete_tips),
        )
        .route("/nutrisi-resep", get(list_nutrisi).post(create_nutrisi))
        .route(
            "/nutrisi-resep/{id}",
            get(get_nutrisi)
                .put(update_nutrisi)
                .patch(update_nutrisi)
                .delete(delete_nutrisi),
        )
        .route("/foto-resep", get(list_foto).post(create_foto))
        .route(
            "/foto-resep/{id}",
            get(get_foto)
                .put(update_foto)
                .patch(update_foto)
                .delete(delete_foto),
        )
}

// ---- resep ----

#[derive(Serialize)]
struct ResepResponse {
    id: i32,
    judul: String,
    deskripsi: String,
    kategori: Kategori,
    tingkat_kesulitan: TingkatKesulitan,
    waktu_memasak: i32,
    waktu_persiapan: i32,
    porsi: i32,
    kalori: i32,
    bahan: Vec<bahan_resep::Model>,
    steps: Vec<steps_resep::Model>,
    tips: Vec<tips_resep::Model>,
    nutrisi: Vec<nutrisi_resep::Model>,
    foto: Vec<foto_resep::Model>,
    created_at: DateTimeWithTimeZone,
    updated_at: DateTimeWithTimeZone,
}

async fn to_response(db: &DatabaseConnection, row: resep::Model) -> Result<ResepResponse, DbErr> {
    let bahan = bahan_resep::Entity::find()
        .filter(bahan_resep::Column::ResepId.eq(row.id))
        .order_by_asc(bahan_resep::Column::Id)
        .all(db)
        .await?;
    // Steps and tips carry an explicit ordering column.
    let steps = steps_resep::Entity::find()
        .filter(steps_resep::Column::ResepId.eq(row.id))
        .order_by_asc(steps_resep::Column::Urutan)
        .all(db)
        .await?;
    let tips = tips_resep::Entity::find()
        .filter(tips_resep::Column::ResepId.eq(row.id))
        .order_by_asc(tips_resep::Column::Urutan)
        .all(db)
        .await?;
    let nutrisi = nutrisi_resep::Entity::find()
        .filter(nutrisi_resep::Column::ResepId.eq(row.id))
        .order_by_asc(nutrisi_resep::Column::Id)
        .all(db)
        .await?;
    let foto = foto_resep::Entity::find()
        .filter(foto_resep::Column::ResepId.eq(row.id))
        .order_by_asc(foto_resep::Column::Id)
        .all(db)
        .await?;

    Ok(ResepResponse {
        id: row.id,
        judul: row.judul,
        deskripsi: row.deskripsi,
        kategori: row.kategori,
        tingkat_kesulitan: row.tingkat_kesulitan,
        waktu_memasak: row.waktu_memasak,
        waktu_persiapan: row.waktu_persiapan,
        porsi: row.porsi,
        kalori: row.kalori,
        bahan,
        steps,
        tips,
        nutrisi,
        foto,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

async fn collect_responses(
    db: &DatabaseConnection,
    rows: Vec<resep::Model>,
) -> Result<Vec<ResepResponse>, DbErr> {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        out.push(to_response(db, row).await?);
    }
    Ok(out)
}

#[derive(Deserialize)]
struct ResepPayload {
    judul: String,
    deskripsi: String,
    kategori: Kategori,
    tingkat_kesulitan: TingkatKesulitan,
    waktu_memasak: i32,
    waktu_persiapan: i32,
    porsi: i32,
    kalori: i32,
}

#[derive(Deserialize)]
struct ResepUpdate {
    judul: Option<String>,
    deskripsi: Option<String>,
    kategori: Option<Kategori>,
    tingkat_kesulitan: Option<TingkatKesulitan>,
    waktu_memasak: Option<i32>,
    waktu_persiapan: Option<i32>,
    porsi: Option<i32>,
    kalori: Option<i32>,
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<ResepResponse>>> {
    let rows = resep::Entity::find()
        .order_by_desc(resep::Column::CreatedAt)
        .all(&state.db)
        .await?;
    Ok(Json(collect_responses(&state.db, rows).await?))
}

#[derive(Deserialize)]
struct KategoriParams {
    kategori: Option<String>,
}

async fn by_kategori(
    State(state): State<AppState>,
    UrlQuery(params): UrlQuery<KategoriParams>,
) -> ApiResult<Json<Vec<ResepResponse>>> {
    let raw = params
        .kategori
        .ok_or_else(|| ApiError::BadRequest("Parameter kategori diperlukan".into()))?;
    // Parsed here instead of in the extractor so an unknown value gets the
    // same JSON error envelope as every other validation failure.
    let kategori = Kategori::try_from_value(&raw)
        .map_err(|_| ApiError::BadRequest(format!("Kategori {raw} tidak valid")))?;
    let rows = Query::resep_by_kategori(&state.db, kategori).await?;
    Ok(Json(collect_responses(&state.db, rows).await?))
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ResepPayload>,
) -> ApiResult<(StatusCode, Json<ResepResponse>)> {
    let now = Utc::now().fixed_offset();
    let row = resep::ActiveModel {
        judul: Set(payload.judul),
        deskripsi: Set(payload.deskripsi),
        kategori: Set(payload.kategori),
        tingkat_kesulitan: Set(payload.tingkat_kesulitan),
        waktu_memasak: Set(payload.waktu_memasak),
        waktu_persiapan: Set(payload.waktu_persiapan),
        porsi: Set(payload.porsi),
        kalori: Set(payload.kalori),
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

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ResepResponse>> {
    let row = resep::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(to_response(&state.db, row).await?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ResepUpdate>,
) -> ApiResult<Json<ResepResponse>> {
    let row = resep::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    let mut active = row.into_active_model();
    if let Some(judul) = payload.judul {
        active.judul = Set(judul);
    }
    if let Some(deskripsi) = payload.deskripsi {
        active.deskripsi = Set(deskripsi);
    }
    if let Some(kategori) = payload.kategori {
        active.kategori = Set(kategori);
    }
    if let Some(tingkat_kesulitan) = payload.tingkat_kesulitan {
        active.tingkat_kesulitan = Set(tingkat_kesulitan);
    }
    if let Some(waktu_memasak) = payload.waktu_memasak {
        active.waktu_memasak = Set(waktu_memasak);
    }
    if let Some(waktu_persiapan) = payload.waktu_persiapan {
        active.waktu_persiapan = Set(waktu_persiapan);
    }
    if let Some(porsi) = payload.porsi {
        active.porsi = Set(porsi);
    }
    if let Some(kalori) = payload.kalori {
        active.kalori = Set(kalori);
    }
    active.updated_at = Set(Utc::now().fixed_offset());

    let row = active.update(&state.db).await?;
    Ok(Json(to_response(&state.db, row).await?))
}

async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<StatusCode> {
    let photos = foto_resep::Entity::find()
        .filter(foto_resep::Column::ResepId.eq(id))
        .all(&state.db)
        .await?;
    for photo in &photos {
        remove_photo_object(&state, photo).await;
    }

    if !Mutation::delete_resep(&state.db, id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Best-effort storage cleanup from the stored URL; failures are logged and
/// never block the row deletion.
async fn remove_photo_object(state: &AppState, photo: &foto_resep::Model) {
    let Some(key) = state.storage.key_from_url(&photo.file_path) else {
        return;
    };
    if let Err(err) = state.storage.delete_key(&key).await {
        tracing::warn!(photo_id = photo.id, %err, "failed to delete photo object");
    }
}

async fn check_resep(db: &DatabaseConnection, resep_id: i32) -> ApiResult<()> {
    if resep::Entity::find_by_id(resep_id).one(db).await?.is_none() {
        return Err(ApiError::BadRequest(format!(
            "resep_id {resep_id} tidak ditemukan"
        )));
    }
    Ok(())
}

// ---- bahan-resep ----

#[derive(Deserialize)]
struct BahanPayload {
    resep_id: i32,
    nama: String,
    takaran: String,
}

#[derive(Deserialize)]
struct BahanUpdate {
    resep_id: Option<i32>,
    nama: Option<String>,
    takaran: Option<String>,
}

async fn list_bahan(State(state): State<AppState>) -> ApiResult<Json<Vec<bahan_resep::Model>>> {
    let rows = bahan_resep::Entity::find()
        .order_by_asc(bahan_resep::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(rows))
}

async fn create_bahan(
    State(state): State<AppState>,
    Json(payload): Json<BahanPayload>,
) -> ApiResult<(StatusCode, Json<bahan_resep::Model>)> {
    check_resep(&state.db, payload.resep_id).await?;
    let now = Utc::now().fixed_offset();
    let row = bahan_resep::ActiveModel {
        resep_id: Set(payload.resep_id),
        nama: Set(payload.nama),
        takaran: Set(payload.takaran),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

async fn get_bahan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<bahan_resep::Model>> {
    let row = bahan_resep::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(row))
}

async fn update_bahan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<BahanUpdate>,
) -> ApiResult<Json<bahan_resep::Model>> {
    let row = bahan_resep::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    if let Some(resep_id) = payload.resep_id {
        check_resep(&state.db, resep_id).await?;
    }

    let mut active = row.into_active_model();
    if let Some(resep_id) = payload.resep_id {
        active.resep_id = Set(resep_id);
    }
    if let Some(nama) = payload.nama {
        active.nama = Set(nama);
    }
    if let Some(takaran) = payload.takaran {
        active.takaran = Set(takaran);
    }
    active.updated_at = Set(Utc::now().fixed_offset());
    Ok(Json(active.update(&state.db).await?))
}

async fn delete_bahan(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<StatusCode> {
    let result = bahan_resep::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---- steps-resep / tips-resep ----

#[derive(Deserialize)]
struct UrutanPayload {
    resep_id: i32,
    urutan: i32,
    nama: String,
}

#[derive(Deserialize)]
struct UrutanUpdate {
    resep_id: Option<i32>,
    urutan: Option<i32>,
    nama: Option<String>,
}

async fn list_steps(State(state): State<AppState>) -> ApiResult<Json<Vec<steps_resep::Model>>> {
    let rows = steps_resep::Entity::find()
        .order_by_asc(steps_resep::Column::Urutan)
        .all(&state.db)
        .await?;
    Ok(Json(rows))
}

async fn create_steps(
    State(state): State<AppState>,
    Json(payload): Json<UrutanPayload>,
) -> ApiResult<(StatusCode, Json<steps_resep::Model>)> {
    check_resep(&state.db, payload.resep_id).await?;
    let now = Utc::now().fixed_offset();
    let row = steps_resep::ActiveModel {
        resep_id: Set(payload.resep_id),
        urutan: Set(payload.urutan),
        nama: Set(payload.nama),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

async fn get_steps(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<steps_resep::Model>> {
    let row = steps_resep::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(row))
}

async fn update_steps(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UrutanUpdate>,
) -> ApiResult<Json<steps_resep::Model>> {
    let row = steps_resep::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    if let Some(resep_id) = payload.resep_id {
        check_resep(&state.db, resep_id).await?;
    }

    let mut active = row.into_active_model();
    if let Some(resep_id) = payload.resep_id {
        active.resep_id = Set(resep_id);
    }
    if let Some(urutan) = payload.urutan {
        active.urutan = Set(urutan);
    }
    if let Some(nama) = payload.nama {
        active.nama = Set(nama);
    }
    active.updated_at = Set(Utc::now().fixed_offset());
    Ok(Json(active.update(&state.db).await?))
}

async fn delete_steps(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<StatusCode> {
    let result = steps_resep::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn list_tips(State(state): State<AppState>) -> ApiResult<Json<Vec<tips_resep::Model>>> {
    let rows = tips_resep::Entity::find()
        .order_by_asc(tips_resep::Column::Urutan)
        .all(&state.db)
        .await?;
    Ok(Json(rows))
}

async fn create_tips(
    State(state): State<AppState>,
    Json(payload): Json<UrutanPayload>,
) -> ApiResult<(StatusCode, Json<tips_resep::Model>)> {
    check_resep(&state.db, payload.resep_id).await?;
    let now = Utc::now().fixed_offset();
    let row = tips_resep::ActiveModel {
        resep_id: Set(payload.resep_id),
        urutan: Set(payload.urutan),
        nama: Set(payload.nama),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

async fn get_tips(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<tips_resep::Model>> {
    let row = tips_resep::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(row))
}

async fn update_tips(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UrutanUpdate>,
) -> ApiResult<Json<tips_resep::Model>> {
    let row = tips_resep::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    if let Some(resep_id) = payload.resep_id {
        check_resep(&state.db, resep_id).await?;
    }

    let mut active = row.into_active_model();
    if let Some(resep_id) = payload.resep_id {
        active.resep_id = Set(resep_id);
    }
    if let Some(urutan) = payload.urutan {
        active.urutan = Set(urutan);
    }
    if let Some(nama) = payload.nama {
        active.nama = Set(nama);
    }
    active.updated_at = Set(Utc::now().fixed_offset());
    Ok(Json(active.update(&state.db).await?))
}

async fn delete_tips(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<StatusCode> {
    let result = tips_resep::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---- nutrisi-resep ----

#[derive(Deserialize)]
struct NutrisiPayload {
    resep_id: i32,
    label: String,
    nilai: String,
}

#[derive(Deserialize)]
struct NutrisiUpdate {
    resep_id: Option<i32>,
    label: Option<String>,
    nilai: Option<String>,
}

async fn list_nutrisi(State(state): State<AppState>) -> ApiResult<Json<Vec<nutrisi_resep::Model>>> {
    let rows = nutrisi_resep::Entity::find()
        .order_by_asc(nutrisi_resep::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(rows))
}

async fn create_nutrisi(
    State(state): State<AppState>,
    Json(payload): Json<NutrisiPayload>,
) -> ApiResult<(StatusCode, Json<nutrisi_resep::Model>)> {
    check_resep(&state.db, payload.resep_id).await?;
    let now = Utc::now().fixed_offset();
    let row = nutrisi_resep::ActiveModel {
        resep_id: Set(payload.resep_id),
        label: Set(payload.label),
        nilai: Set(payload.nilai),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

async fn get_nutrisi(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<nutrisi_resep::Model>> {
    let row = nutrisi_resep::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(row))
}

async fn update_nutrisi(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<NutrisiUpdate>,
) -> ApiResult<Json<nutrisi_resep::Model>> {
    let row = nutrisi_resep::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    if let Some(resep_id) = payload.resep_id {
        check_resep(&state.db, resep_id).await?;
    }

    let mut active = row.into_active_model();
    if let Some(resep_id) = payload.resep_id {
        active.resep_id = Set(resep_id);
    }
    if let Some(label) = payload.label {
        active.label = Set(label);
    }
    if let Some(nilai) = payload.nilai {
        active.nilai = Set(nilai);
    }
    active.updated_at = Set(Utc::now().fixed_offset());
    Ok(Json(active.update(&state.db).await?))
}

async fn delete_nutrisi(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    let result = nutrisi_resep::Entity::delete_by_id(id)
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---- foto-resep ----

#[derive(Deserialize)]
struct FotoPayload {
    resep_id: i32,
    file_path: String,
    file_name: String,
}

#[derive(Deserialize)]
struct FotoUpdate {
    resep_id: Option<i32>,
    file_path: Option<String>,
    file_name: Option<String>,
}

async fn list_foto(State(state): State<AppState>) -> ApiResult<Json<Vec<foto_resep::Model>>> {
    let rows = foto_resep::Entity::find()
        .order_by_asc(foto_resep::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(rows))
}

async fn create_foto(
    State(state): State<AppState>,
    Json(payload): Json<FotoPayload>,
) -> ApiResult<(StatusCode, Json<foto_resep::Model>)> {
    check_resep(&state.db, payload.resep_id).await?;
    let now = Utc::now().fixed_offset();
    let row = foto_resep::ActiveModel {
        resep_id: Set(payload.resep_id),
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
) -> ApiResult<Json<foto_resep::Model>> {
    let row = foto_resep::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(row))
}

async fn update_foto(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<FotoUpdate>,
) -> ApiResult<Json<foto_resep::Model>> {
    let row = foto_resep::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    if let Some(resep_id) = payload.resep_id {
        check_resep(&state.db, resep_id).await?;
    }

    let mut active = row.into_active_model();
    if let Some(resep_id) = payload.resep_id {
        active.resep_id = Set(resep_id);
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

async fn delete_foto(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<StatusCode> {
    let row = foto_resep::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    remove_photo_object(&state, &row).await;
    foto_resep::Entity::delete_by_id(id).exec(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}
