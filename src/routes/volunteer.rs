//! Volunteer registration endpoints, plus the `pending` listing and the
//! `approve` action.

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

use crate::entities::{kegiatan, volunteer};
use crate::error::{ApiError, ApiResult};
use crate::router::AppState;
use crate::service::{Mutation, Query};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/volunteer", get(list).post(create))
        .route("/volunteer/pending", get(pending))
        .route(
            "/volunteer/{id}",
            get(get_one).put(update).patch(update).delete(delete),
        )
        .route("/volunteer/{id}/approve", post(approve))
}

#[derive(Serialize)]
struct KegiatanBrief {
    id: i32,
    nama: String,
    tanggal: NaiveDate,
}

#[derive(Serialize)]
struct VolunteerResponse {
    id: i32,
    nama: String,
    email: String,
    phone: String,
    skill: String,
    motivasi: String,
    kegiatan_id: i32,
    kegiatan_detail: Option<KegiatanBrief>,
    is_approved: bool,
    created_at: DateTimeWithTimeZone,
    updated_at: DateTimeWithTimeZone,
}

async fn to_response(
    db: &DatabaseConnection,
    row: volunteer::Model,
) -> Result<VolunteerResponse, DbErr> {
    let kegiatan_detail = kegiatan::Entity::find_by_id(row.kegiatan_id)
        .one(db)
        .await?
        .map(|k| KegiatanBrief {
            id: k.id,
            nama: k.nama,
            tanggal: k.tanggal,
        });

    Ok(VolunteerResponse {
        id: row.id,
        nama: row.nama,
        email: row.email,
        phone: row.phone,
        skill: row.skill,
        motivasi: row.motivasi,
        kegiatan_id: row.kegiatan_id,
        kegiatan_detail,
        is_approved: row.is_approved,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

async fn collect_responses(
    db: &DatabaseConnection,
    rows: Vec<volunteer::Model>,
) -> Result<Vec<VolunteerResponse>, DbErr> {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        out.push(to_response(db, row).await?);
    }
    Ok(out)
}

#[derive(Deserialize)]
struct VolunteerPayload {
    nama: String,
    email: String,
    phone: String,
    skill: String,
    motivasi: String,
    kegiatan_id: i32,
}

#[derive(Deserialize)]
struct VolunteerUpdate {
    nama: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    skill: Option<String>,
    motivasi: Option<String>,
    kegiatan_id: Option<i32>,
    is_approved: Option<bool>,
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<VolunteerResponse>>> {
    let rows = volunteer::Entity::find()
        .order_by_asc(volunteer::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(collect_responses(&state.db, rows).await?))
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<VolunteerPayload>,
) -> ApiResult<(StatusCode, Json<VolunteerResponse>)> {
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
    let row = volunteer::ActiveModel {
        nama: Set(payload.nama),
        email: Set(payload.email),
        phone: Set(payload.phone),
        skill: Set(payload.skill),
        motivasi: Set(payload.motivasi),
        kegiatan_id: Set(payload.kegiatan_id),
        // New registrations always start unapproved.
        is_approved: Set(false),
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
) -> ApiResult<Json<VolunteerResponse>> {
    let row = volunteer::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(to_response(&state.db, row).await?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<VolunteerUpdate>,
) -> ApiResult<Json<VolunteerResponse>> {
    let row = volunteer::Entity::find_by_id(id)
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
    if let Some(nama) = payload.nama {
        active.nama = Set(nama);
    }
    if let Some(email) = payload.email {
        active.email = Set(email);
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(phone);
    }
    if let Some(skill) = payload.skill {
        active.skill = Set(skill);
    }
    if let Some(motivasi) = payload.motivasi {
        active.motivasi = Set(motivasi);
    }
    if let Some(kegiatan_id) = payload.kegiatan_id {
        active.kegiatan_id = Set(kegiatan_id);
    }
    if let Some(is_approved) = payload.is_approved {
        active.is_approved = Set(is_approved);
    }
    active.updated_at = Set(Utc::now().fixed_offset());

    let row = active.update(&state.db).await?;
    Ok(Json(to_response(&state.db, row).await?))
}

async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<StatusCode> {
    let result = volunteer::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn pending(State(state): State<AppState>) -> ApiResult<Json<Vec<VolunteerResponse>>> {
    let rows = Query::pending_volunteers(&state.db).await?;
    Ok(Json(collect_responses(&state.db, rows).await?))
}

async fn approve(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<VolunteerResponse>> {
    let row = Mutation::approve_volunteer(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(to_response(&state.db, row).await?))
}
