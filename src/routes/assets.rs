use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use rust_embed::Embed;

/// Stylesheet, behaviour script and images, compiled into the binary.
#[derive(Embed)]
#[folder = "assets/"]
struct Assets;

/// Fallback image for reports without a picture or whose picture fails to load.
pub const PLACEHOLDER_IMAGE: &str = "/assets/placeholder.png";

pub async fn serve(Path(path): Path<String>) -> Response {
    match Assets::get(&path) {
        Some(file) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, mime.as_ref().to_string()),
                    (header::CACHE_CONTROL, "public, max-age=86400".to_string()),
                ],
                file.data.to_vec(),
            )
                .into_response()
        }
        None => {
            tracing::debug!("No embedded asset at {:?}", path);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
