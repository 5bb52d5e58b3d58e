use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use resize_core::{encode_response, MediaError, ResponsePayload, MSGPACK_CONTENT_TYPE};

use crate::AppState;
use crate::error::ResizeError;
use crate::pipeline::{self, Outcome};

const THUMBNAIL_MESSAGE: &str = "Can't resize a thumbnail";

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// リサイズエンドポイント（常に MessagePack の [`ResponsePayload`] を返す）
pub async fn resize(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    MsgPack(process(&state, body).await).into_response()
}

async fn process(state: &AppState, body: Result<Bytes, BytesRejection>) -> ResponsePayload {
    let request = match body
        .map_err(|e| ResizeError::Decode(MediaError::Decode(e.body_text())))
        .and_then(|body| pipeline::decode(&body))
    {
        Ok(request) => request,
        Err(err) => return failure(&err, "", ""),
    };

    match pipeline::run(state, &request).await {
        Ok(Outcome::Resized(dimensions)) => {
            tracing::info!(
                bucket = %request.bucket,
                filename = %request.filename,
                w = dimensions.width,
                h = dimensions.height,
                "resize complete"
            );
            ResponsePayload::ok(dimensions)
        }
        Ok(Outcome::Thumbnail) => {
            ResponsePayload::without_dimensions(THUMBNAIL_MESSAGE, StatusCode::OK.as_u16())
        }
        Err(err) => failure(&err, &request.bucket, &request.filename),
    }
}

fn failure(err: &ResizeError, bucket: &str, filename: &str) -> ResponsePayload {
    err.log(bucket, filename);
    ResponsePayload::without_dimensions(err.to_string(), err.status_code().as_u16())
}

/// HTTP ステータスが `status_code` と一致する MessagePack レスポンス
pub struct MsgPack(pub ResponsePayload);

impl IntoResponse for MsgPack {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match encode_response(&self.0) {
            Ok(body) => (status, [(header::CONTENT_TYPE, MSGPACK_CONTENT_TYPE)], body).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "failed to encode response");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to create response",
                )
                    .into_response()
            }
        }
    }
}
