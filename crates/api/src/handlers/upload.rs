//! Cover-image upload for the admin dashboard.
//!
//! Files are sniffed (never trusted by extension), written under the
//! configured upload directory with a random name, and served by the
//! front proxy. Only PNG, JPEG, and WebP are accepted.

use std::io::Cursor;
use std::path::Path as FsPath;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use image::{ImageFormat, ImageReader};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum accepted file size in bytes (5 MiB).
const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Public path of the stored image.
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub content_type: &'static str,
    pub size_bytes: usize,
}

/// POST /api/upload (admin)
pub async fn upload_image(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let field = loop {
        match multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
        {
            Some(field) if field.name() == Some("file") => break field,
            Some(_) => continue,
            None => {
                return Err(AppError::BadRequest(
                    "Missing multipart field \"file\"".into(),
                ))
            }
        }
    };

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::BadRequest(format!(
            "File exceeds the {MAX_UPLOAD_BYTES} byte limit"
        )));
    }

    let reader = ImageReader::new(Cursor::new(data.as_ref()))
        .with_guessed_format()
        .map_err(|e| AppError::InternalError(format!("Format sniffing failed: {e}")))?;
    let format = reader
        .format()
        .ok_or_else(|| AppError::BadRequest("Unrecognized image format".into()))?;
    let (ext, content_type) = match format {
        ImageFormat::Png => ("png", "image/png"),
        ImageFormat::Jpeg => ("jpg", "image/jpeg"),
        ImageFormat::WebP => ("webp", "image/webp"),
        other => {
            return Err(AppError::BadRequest(format!(
                "Unsupported image format {other:?}; expected PNG, JPEG, or WebP"
            )))
        }
    };
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| AppError::BadRequest(format!("Corrupt image data: {e}")))?;

    let filename = format!("{}.{ext}", Uuid::new_v4());
    let dir = FsPath::new(&state.config.upload_dir);
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Upload directory unavailable: {e}")))?;
    tokio::fs::write(dir.join(&filename), &data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

    tracing::info!(
        %filename,
        size_bytes = data.len(),
        user_id = admin.user_id,
        "Image uploaded"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UploadResponse {
                url: format!("/uploads/{filename}"),
                width,
                height,
                content_type,
                size_bytes: data.len(),
            },
        }),
    ))
}
