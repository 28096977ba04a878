//! Serving uploaded media from disk.

use actix_files::NamedFile;
use actix_web::{HttpRequest, HttpResponse, web};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /media/{filename} - stream a stored cover or avatar.
///
/// The store rejects any path that would escape the media root before
/// the filesystem is touched.
pub async fn media_file(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let relative = path.into_inner();
    let full = state.media.resolve(&relative)?;

    let file = NamedFile::open_async(&full)
        .await
        .map_err(|_| AppError::NotFound(format!("Media {relative} not found")))?;

    Ok(file.into_response(&req))
}
