use axum::http::StatusCode;
use resize_core::{MediaError, StorageError, TransformError};
use thiserror::Error;

/// パイプラインのステージの失敗
///
/// `Display` の文字列が呼び出し元に返すメッセージで、原因はログ用に source に保持する
#[derive(Debug, Error)]
pub enum ResizeError {
    #[error("Failed to parse request data")]
    Decode(#[source] MediaError),

    #[error("Incorrect filename, bucket, width, or height")]
    Validation(#[source] MediaError),

    #[error("File type not allowed")]
    UnsupportedType { mime: String },

    #[error("Failed to create client")]
    ClientInit(#[source] StorageError),

    #[error("Failed to read source file")]
    Read(#[source] StorageError),

    #[error("Failed to determine MIME type")]
    Sniff(#[source] StorageError),

    #[error("Failed to decode source image")]
    DecodeImage(#[source] TransformError),

    #[error("Failed to resize image")]
    ResizeImage(#[source] TransformError),

    #[error("Failed to encode image")]
    EncodeImage(#[source] TransformError),

    #[error("Failed to write .meta content")]
    WriteMeta(#[source] StorageError),

    #[error("Failed to write resized image")]
    WriteImage(#[source] StorageError),

    #[error("Failed to process image")]
    Worker(#[source] tokio::task::JoinError),
}

impl ResizeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ResizeError::Decode(_) | ResizeError::Validation(_) | ResizeError::UnsupportedType { .. } => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 原因付きでログを出す（クライアントエラーは warn、それ以外は error）
    pub fn log(&self, bucket: &str, filename: &str) {
        let cause = std::error::Error::source(self)
            .map(ToString::to_string)
            .unwrap_or_default();

        match self {
            ResizeError::UnsupportedType { mime } => {
                tracing::warn!(bucket = %bucket, filename = %filename, mime = %mime, "file type not allowed");
            }
            _ if self.status_code().is_client_error() => {
                tracing::warn!(bucket = %bucket, filename = %filename, error = %cause, "{}", self);
            }
            _ => {
                tracing::error!(bucket = %bucket, filename = %filename, error = %cause, "{}", self);
            }
        }
    }
}
