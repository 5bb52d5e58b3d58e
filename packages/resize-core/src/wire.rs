//! MessagePack のリクエスト・レスポンス
//!
//! どちらもフィールド名をキーとするマップでエンコードする

use serde::{Deserialize, Serialize};

use crate::errors::MediaError;
use crate::transform::OutputDimensions;

/// すべてのレスポンスボディの Content-Type
pub const MSGPACK_CONTENT_TYPE: &str = "application/msgpack";

/// リサイズリクエスト
///
/// 欠けたキーはゼロ値になり、[`validate_request`](crate::validate_request) で拒否される。
/// width / height の `0` は「指定なし」を意味する
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeRequest {
    pub filename: String,
    pub bucket: String,
    pub width: u32,
    pub height: u32,
}

/// リクエストごとに1つだけ返すレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsePayload {
    pub message: String,
    pub status_code: u16,
    pub width: u32,
    pub height: u32,
}

impl ResponsePayload {
    pub fn ok(dimensions: OutputDimensions) -> Self {
        Self {
            message: "Ok".to_string(),
            status_code: 200,
            width: dimensions.width,
            height: dimensions.height,
        }
    }

    /// 出力寸法を持たない成功・失敗
    pub fn without_dimensions(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            message: message.into(),
            status_code,
            width: 0,
            height: 0,
        }
    }
}

/// MessagePack のリクエストボディをデコードする
pub fn decode_request(body: &[u8]) -> Result<ResizeRequest, MediaError> {
    rmp_serde::from_slice(body).map_err(|e| MediaError::Decode(e.to_string()))
}

/// レスポンスを MessagePack のマップとしてエンコードする
pub fn encode_response(payload: &ResponsePayload) -> Result<Vec<u8>, MediaError> {
    rmp_serde::to_vec_named(payload).map_err(|e| MediaError::Encode(e.to_string()))
}
