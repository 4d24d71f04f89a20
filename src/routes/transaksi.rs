//! Ledger endpoints: transaction types, transactions, the running summary,
//! and the grouped spreadsheet export.

use axum::{
    Json, Router,
    extract::{Path, Query as UrlQuery, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, IntoActiveModel, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::entities::{tipe_transaksi, transaksi};
use crate::error::{ApiError, ApiResult};
use crate::report::{self, GroupBy, XLSX_CONTENT_TYPE};
use crate::router::AppState;
use crate::service::{Query, TransaksiSummary};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tipe-transaksi", get(list_tipe).post(create_tipe))
        .route(
            "/tipe-transaksi/{id}",
            get(get_tipe)
                .put(update_tipe)
                .patch(update_tipe)
                .delete(delete_tipe),
        )
        .route("/transaksi", get(list).post(create))
        .route("/transaksi/by_tipe", get(by_tipe))
        .route("/transaksi/summary", get(summary))
        .route("/transaksi/export_excel", get(export_excel))
        .route(
            "/transaksi/{id}",
            get(get_one).put(update).patch(update).delete(delete),
        )
}

// ---- tipe-transaksi ----

#[derive(Deserialize)]
struct TipePayload {
    nama: String,
}

#[derive(Deserialize)]
struct TipeUpdate {
    nama: Option<String>,
}

async fn list_tipe(State(state): State<AppState>) -> ApiResult<Json<Vec<tipe_transaksi::Model>>> {
    let rows = tipe_transaksi::Entity::find()
        .order_by_asc(tipe_transaksi::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(rows))
}

async fn create_tipe(
    State(state): State<AppState>,
    Json(payload): Json<TipePayload>,
) -> ApiResult<(StatusCode, Json<tipe_transaksi::Model>)> {
    let now = Utc::now().fixed_offset();
    let row = tipe_transaksi::ActiveModel {
        nama: Set(payload.nama),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

async fn get_tipe(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<tipe_transaksi::Model>> {
    let row = tipe_transaksi::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(row))
}

async fn update_tipe(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<TipeUpdate>,
) -> ApiResult<Json<tipe_transaksi::Model>> {
    let row = tipe_transaksi::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    let mut active = row.into_active_model();
    if let Some(nama) = payload.nama {
        active.nama = Set(nama);
    }
    active.updated_at = Set(Utc::now().fixed_offset());
    Ok(Json(active.update(&state.db).await?))
}

async fn delete_tipe(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<StatusCode> {
    let result = tipe_transaksi::Entity::delete_by_id(id)
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---- transaksi ----

#[derive(Serialize)]
struct TransaksiResponse {
    id: i32,
    nama: String,
    tipe_transaksi_id: i32,
    tipe_transaksi_detail: Option<tipe_transaksi::Model>,
    deskripsi: String,
    jumlah: Decimal,
    tanggal: NaiveDate,
    created_at: DateTimeWithTimeZone,
    updated_at: DateTimeWithTimeZone,
}

fn to_response(row: transaksi::Model, tipe: Option<tipe_transaksi::Model>) -> TransaksiResponse {
    TransaksiResponse {
        id: row.id,
        nama: row.nama,
        tipe_transaksi_id: row.tipe_transaksi_id,
        tipe_transaksi_detail: tipe,
        deskripsi: row.deskripsi,
        jumlah: row.jumlah,
        tanggal: row.tanggal,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

#[derive(Deserialize)]
struct TransaksiPayload {
    nama: String,
    tipe_transaksi_id: i32,
    deskripsi: String,
    jumlah: Decimal,
    tanggal: NaiveDate,
}

#[derive(Deserialize)]
struct TransaksiUpdate {
    nama: Option<String>,
    tipe_transaksi_id: Option<i32>,
    deskripsi: Option<String>,
    jumlah: Option<Decimal>,
    tanggal: Option<NaiveDate>,
}

async fn check_tipe(db: &DatabaseConnection, tipe_id: i32) -> ApiResult<()> {
    if tipe_transaksi::Entity::find_by_id(tipe_id)
        .one(db)
        .await?
        .is_none()
    {
        return Err(ApiError::BadRequest(format!(
            "tipe_transaksi_id {tipe_id} tidak ditemukan"
        )));
    }
    Ok(())
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<TransaksiResponse>>> {
    let rows = Query::transaksi_with_tipe(&state.db).await?;
    Ok(Json(
        rows.into_iter()
            .map(|(row, tipe)| to_response(row, tipe))
            .collect(),
    ))
}

#[derive(Deserialize)]
struct TipeParams {
    tipe: Option<i32>,
}

async fn by_tipe(
    State(state): State<AppState>,
    UrlQuery(params): UrlQuery<TipeParams>,
) -> ApiResult<Json<Vec<TransaksiResponse>>> {
    let tipe = params
        .tipe
        .ok_or_else(|| ApiError::BadRequest("Parameter tipe diperlukan".into()))?;
    let rows = Query::transaksi_by_tipe(&state.db, tipe).await?;
    Ok(Json(
        rows.into_iter()
            .map(|(row, tipe)| to_response(row, tipe))
            .collect(),
    ))
}

async fn summary(State(state): State<AppState>) -> ApiResult<Json<TransaksiSummary>> {
    Ok(Json(Query::transaksi_summary(&state.db).await?))
}

#[derive(Deserialize)]
struct ExportParams {
    group_by: Option<String>,
}

async fn export_excel(
    State(state): State<AppState>,
    UrlQuery(params): UrlQuery<ExportParams>,
) -> ApiResult<impl IntoResponse> {
    let group_by = GroupBy::from_param(params.group_by.as_deref());
    let rows = Query::transaksi_with_tipe(&state.db).await?;

    let mut workbook = report::build_cashflow_workbook(&rows, group_by)?;
    let buffer = workbook.save_to_buffer()?;

    let disposition = format!(
        "attachment; filename=cashflow_report_{}.xlsx",
        group_by.as_str()
    );
    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<TransaksiPayload>,
) -> ApiResult<(StatusCode, Json<TransaksiResponse>)> {
    check_tipe(&state.db, payload.tipe_transaksi_id).await?;

    let now = Utc::now().fixed_offset();
    let row = transaksi::ActiveModel {
        nama: Set(payload.nama),
        tipe_transaksi_id: Set(payload.tipe_transaksi_id),
        deskripsi: Set(payload.deskripsi),
        jumlah: Set(payload.jumlah),
        tanggal: Set(payload.tanggal),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    let tipe = tipe_transaksi::Entity::find_by_id(row.tipe_transaksi_id)
        .one(&state.db)
        .await?;
    Ok((StatusCode::CREATED, Json(to_response(row, tipe))))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<TransaksiResponse>> {
    let row = transaksi::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;
    let tipe = tipe_transaksi::Entity::find_by_id(row.tipe_transaksi_id)
        .one(&state.db)
        .await?;
    Ok(Json(to_response(row, tipe)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<TransaksiUpdate>,
) -> ApiResult<Json<TransaksiResponse>> {
    let row = transaksi::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    if let Some(tipe_id) = payload.tipe_transaksi_id {
        check_tipe(&state.db, tipe_id).await?;
    }

    let mut active = row.into_active_model();
    if let Some(nama) = payload.nama {
        active.nama = Set(nama);
    }
    if let Some(tipe_id) = payload.tipe_transaksi_id {
        active.tipe_transaksi_id = Set(tipe_id);
    }
    if let Some(deskripsi) = payload.deskripsi {
        active.deskripsi = Set(deskripsi);
    }
    if let Some(jumlah) = payload.jumlah {
        active.jumlah = Set(jumlah);
    }
    if let Some(tanggal) = payload.tanggal {
        active.tanggal = Set(tanggal);
    }
    active.updated_at = Set(Utc::now().fixed_offset());

    let row = active.update(&state.db).await?;
    let tipe = tipe_transaksi::Entity::find_by_id(row.tipe_transaksi_id)
        .one(&state.db)
        .await?;
    Ok(Json(to_response(row, tipe)))
}

async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<StatusCode> {
    let result = transaksi::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}
