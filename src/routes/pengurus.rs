//! Staff (pengurus) endpoints and their photo collection.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, IntoActiveModel, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::entities::{foto_pengurus, pengurus};
use crate::error::{ApiError, ApiResult};
use crate::router::AppState;
use crate::service::Mutation;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pengurus", get(list).post(create))
        .route(
            "/pengurus/{id}",
            get(get_one).put(update).patch(update).delete(delete),
        )
        .route("/foto-pengurus", get(list_foto).post(create_foto))
        .route(
            "/foto-pengurus/{id}",
            get(get_foto)
                .put(update_foto)
                .patch(update_foto)
                .delete(delete_foto),
        )
}

#[derive(Serialize)]
struct PengurusResponse {
    id: i32,
    nama: String,
    jabatan: String,
    foto: Vec<foto_pengurus::Model>,
    created_at: DateTimeWithTimeZone,
    updated_at: DateTimeWithTimeZone,
}

async fn to_response(
    db: &DatabaseConnection,
    row: pengurus::Model,
) -> Result<PengurusResponse, DbErr> {
    let foto = foto_pengurus::Entity::find()
        .filter(foto_pengurus::Column::PengurusId.eq(row.id))
        .order_by_asc(foto_pengurus::Column::Id)
        .all(db)
        .await?;

    Ok(PengurusResponse {
        id: row.id,
        nama: row.nama,
        jabatan: row.jabatan,
        foto,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[derive(Deserialize)]
struct PengurusPayload {
    nama: String,
    jabatan: String,
}

#[derive(Deserialize)]
struct PengurusUpdate {
    nama: Option<String>,
    jabatan: Option<String>,
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<PengurusResponse>>> {
    let rows = pengurus::Entity::find()
        .order_by_asc(pengurus::Column::Id)
        .all(&state.db)
        .await?;

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        out.push(to_response(&state.db, row).await?);
    }
    Ok(Json(out))
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<PengurusPayload>,
) -> ApiResult<(StatusCode, Json<PengurusResponse>)> {
    let now = Utc::now().fixed_offset();
    let row = pengurus::ActiveModel {
        nama: Set(payload.nama),
        jabatan: Set(payload.jabatan),
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
) -> ApiResult<Json<PengurusResponse>> {
    let row = pengurus::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(to_response(&state.db, row).await?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<PengurusUpdate>,
) -> ApiResult<Json<PengurusResponse>> {
    let row = pengurus::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    let mut active = row.into_active_model();
    if let Some(nama) = payload.nama {
        active.nama = Set(nama);
    }
    if let Some(jabatan) = payload.jabatan {
        active.jabatan = Set(jabatan);
    }
    active.updated_at = Set(Utc::now().fixed_offset());

    let row = active.update(&state.db).await?;
    Ok(Json(to_response(&state.db, row).await?))
}

async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<StatusCode> {
    let photos = foto_pengurus::Entity::find()
        .filter(foto_pengurus::Column::PengurusId.eq(id))
        .all(&state.db)
        .await?;
    for photo in &photos {
        remove_photo_object(&state, photo).await;
    }

    if !Mutation::delete_pengurus(&state.db, id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Best-effort storage cleanup; failures never block the row deletion.
async fn remove_photo_object(state: &AppState, photo: &foto_pengurus::Model) {
    if photo.file_path.is_empty() {
        return;
    }
    if state.storage.exists(&photo.file_path).await {
        if let Err(err) = state.storage.delete(&photo.file_path).await {
            tracing::warn!(photo_id = photo.id, %err, "failed to delete photo object");
        }
    }
}

// ---- foto-pengurus ----

#[derive(Deserialize)]
struct FotoPayload {
    pengurus_id: i32,
    file_path: String,
    file_name: String,
}

#[derive(Deserialize)]
struct FotoUpdate {
    pengurus_id: Option<i32>,
    file_path: Option<String>,
    file_name: Option<String>,
}

async fn list_foto(State(state): State<AppState>) -> ApiResult<Json<Vec<foto_pengurus::Model>>> {
    let rows = foto_pengurus::Entity::find()
        .order_by_asc(foto_pengurus::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(rows))
}

async fn create_foto(
    State(state): State<AppState>,
    Json(payload): Json<FotoPayload>,
) -> ApiResult<(StatusCode, Json<foto_pengurus::Model>)> {
    if pengurus::Entity::find_by_id(payload.pengurus_id)
        .one(&state.db)
        .await?
        .is_none()
    {
        return Err(ApiError::BadRequest(format!(
            "pengurus_id {} tidak ditemukan",
            payload.pengurus_id
        )));
    }

    let now = Utc::now().fixed_offset();
    let row = foto_pengurus::ActiveModel {
        pengurus_id: Set(payload.pengurus_id),
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
) -> ApiResult<Json<foto_pengurus::Model>> {
    let row = foto_pengurus::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(row))
}

async fn update_foto(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<FotoUpdate>,
) -> ApiResult<Json<foto_pengurus::Model>> {
    let row = foto_pengurus::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    if let Some(pengurus_id) = payload.pengurus_id {
        if pengurus::Entity::find_by_id(pengurus_id)
            .one(&state.db)
            .await?
            .is_none()
        {
            return Err(ApiError::BadRequest(format!(
                "pengurus_id {pengurus_id} tidak ditemukan"
            )));
        }
    }

    let mut active = row.into_active_model();
    if let Some(pengurus_id) = payload.pengurus_id {
        active.pengurus_id = Set(pengurus_id);
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
    let row = foto_pengurus::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    remove_photo_object(&state, &row).await;
    foto_pengurus::Entity::delete_by_id(id).exec(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}
