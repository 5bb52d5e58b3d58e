use thiserror::Error;

/// リクエストのデコード・検証・レスポンスのエンコードのエラー
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("decode error: {0}")]
    Decode(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("validation error: {0}")]
    Validation(String),
}

/// オブジェクトストアアクセスのエラー
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to create storage client for bucket {bucket}: {message}")]
    Client { bucket: String, message: String },

    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("short read on {key}: wanted {expected} bytes, got {actual}")]
    ShortRead {
        key: String,
        expected: usize,
        actual: usize,
    },

    #[error("failed to read {key}: {message}")]
    Read { key: String, message: String },

    #[error("failed to write {key}: {message}")]
    Write { key: String, message: String },
}

/// 画像変換のエラー
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("decode failed: {0}")]
    Decode(String),

    #[error("invalid target dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("image resolution exceeds maximum ({width}x{height})")]
    ResolutionTooLarge { width: u32, height: u32 },

    #[error("resize failed: {0}")]
    Resize(String),

    #[error("encode failed: {0}")]
    Encode(String),
}
