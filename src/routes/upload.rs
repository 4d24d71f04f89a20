//! Direct S3 upload endpoint for photos.
//!
//! Accepts `multipart/form-data` with a single `file` field, validates type
//! and size, stores the object under a timestamped unique name, and returns
//! the public URL for the client to attach to a photo row.

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    routing::post,
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::router::AppState;

const ALLOWED_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/webp"];
const MAX_SIZE: usize = 5 * 1024 * 1024;

pub fn routes() -> Router<AppState> {
    Router::new().route("/upload/s3", post(upload))
}

#[derive(Serialize)]
struct UploadResponse {
    url: String,
    filename: String,
    size: usize,
    content_type: String,
}

fn validate(content_type: &str, size: usize) -> Result<(), ApiError> {
    if !ALLOWED_TYPES.contains(&content_type) {
        return Err(ApiError::BadRequest(
            "Invalid file type. Only JPEG, PNG, and WEBP allowed.".into(),
        ));
    }
    if size > MAX_SIZE {
        return Err(ApiError::BadRequest(
            "File too large. Maximum size is 5MB.".into(),
        ));
    }
    Ok(())
}

/// Object name under the storage prefix: timestamp plus a short random id,
/// keeping the original extension.
fn object_name(original: &str) -> String {
    let ext = original.rsplit('.').next().unwrap_or("bin");
    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let unique = Uuid::new_v4().simple().to_string();
    format!("kegiatan/{timestamp}_{}.{ext}", &unique[..8])
}

async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<UploadResponse>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::BadRequest(err.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload.bin").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|err| ApiError::BadRequest(err.to_string()))?;

        validate(&content_type, bytes.len())?;

        let name = object_name(&filename);
        let size = bytes.len();
        let url = state
            .storage
            .upload(&name, bytes.to_vec(), &content_type)
            .await?;

        tracing::info!(%url, size, "uploaded photo");
        return Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                url,
                filename,
                size,
                content_type,
            }),
        ));
    }

    Err(ApiError::BadRequest("No file provided".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_allowed_image_types() {
        for ty in ALLOWED_TYPES {
            assert!(validate(ty, 1024).is_ok());
        }
    }

    #[test]
    fn rejects_unknown_content_type() {
        let err = validate("application/pdf", 1024).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(msg) if msg.contains("Invalid file type")));
    }

    #[test]
    fn rejects_oversized_file() {
        assert!(validate("image/png", MAX_SIZE).is_ok());
        let err = validate("image/png", MAX_SIZE + 1).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(msg) if msg.contains("File too large")));
    }

    #[test]
    fn object_name_keeps_extension() {
        let name = object_name("holiday photo.PNG");
        assert!(name.starts_with("kegiatan/"));
        assert!(name.ends_with(".PNG"));
    }

    #[test]
    fn object_names_are_unique() {
        assert_ne!(object_name("a.jpg"), object_name("a.jpg"));
    }
}
