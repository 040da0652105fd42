use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use segview_io::transport::decode_base64;

use crate::error::ServeError;
use crate::service::SegmentService;
use crate::wire::{ErrorResponse, SegmentRequest, SegmentResponse};

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        log::error!("request failed with {status}: {self}");
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Routes of the render service.
///
/// - `GET /` health text.
/// - `POST /api/segment` renders a [`SegmentRequest`].
/// - `GET /results/:file` serves a stored frame.
pub fn router(service: Arc<SegmentService>) -> Router {
    Router::new()
        .route("/", get(|| async { "segview is running" }))
        .route("/api/segment", post(segment))
        .route("/results/:file", get(result_file))
        .with_state(service)
}

async fn segment(
    State(service): State<Arc<SegmentService>>,
    request: Result<Json<SegmentRequest>, JsonRejection>,
) -> Result<Json<SegmentResponse>, ServeError> {
    let Json(request) = request.map_err(|err| ServeError::BadRequest(err.body_text()))?;
    log::debug!(
        "segment request with {} detections",
        request.detections.len()
    );

    // decoding, rendering and encoding are cpu bound
    let response = tokio::task::spawn_blocking(move || {
        let bytes = decode_base64(&request.image).map_err(ServeError::Decode)?;
        service.render(&bytes, &request.detections)
    })
    .await
    .map_err(|err| ServeError::Task(err.to_string()))??;

    Ok(Json(response))
}

async fn result_file(
    State(service): State<Arc<SegmentService>>,
    Path(file): Path<String>,
) -> Result<impl IntoResponse, ServeError> {
    let path = service.store().path_of(&file)?;
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| ServeError::NotFound(file))?;
    Ok(([(header::CONTENT_TYPE, "image/jpeg")], bytes))
}
