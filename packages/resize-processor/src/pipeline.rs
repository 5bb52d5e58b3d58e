//! リクエストごとのリサイズパイプライン
//!
//! ステージは順番に実行し、各ステージの失敗は1度だけ [`ResizeError`] に変換する。
//! リトライはせず、後のステージで失敗しても書き込み済みの成果物は残る

use resize_core::{
    decode_request, is_thumbnail, meta_key, resized_key, sniff, validate_request, Bucket,
    MediaTypeDecision, MetaRecord, OutputFormat, ResizeRequest, SNIFF_LEN,
};

use crate::AppState;
use crate::error::ResizeError;
use crate::transform::{transform, Transformed};

/// パイプラインの正常終了状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// ソース自体がサムネイル（読み書きなし）
    Thumbnail,
    Resized(resize_core::OutputDimensions),
}

pub fn decode(body: &[u8]) -> Result<ResizeRequest, ResizeError> {
    decode_request(body).map_err(ResizeError::Decode)
}

pub async fn run(state: &AppState, request: &ResizeRequest) -> Result<Outcome, ResizeError> {
    validate_request(request).map_err(ResizeError::Validation)?;

    if is_thumbnail(&request.filename) {
        tracing::info!(filename = %request.filename, "skipping thumbnail source");
        return Ok(Outcome::Thumbnail);
    }

    let bucket = state
        .storage_client
        .bucket(&request.bucket)
        .map_err(ResizeError::ClientInit)?;

    let decision = sniff_source(&bucket, &request.filename).await?;
    let Some(format) = decision.output_format else {
        return Err(ResizeError::UnsupportedType {
            mime: decision.sniffed_type,
        });
    };
    tracing::info!(
        bucket = %request.bucket,
        filename = %request.filename,
        mime = %decision.sniffed_type,
        "source type allowed"
    );

    // 全体を改めて読み込む
    let content = bucket
        .open_reader(&request.filename)
        .await
        .map_err(ResizeError::Read)?
        .read_to_end()
        .await
        .map_err(ResizeError::Read)?;

    tracing::info!(
        bucket = %request.bucket,
        filename = %request.filename,
        size = content.len(),
        w = request.width,
        h = request.height,
        "transforming image"
    );
    let (width, height) = (request.width, request.height);
    let transformed = tokio::task::spawn_blocking(move || transform(&content, format, width, height))
        .await
        .map_err(ResizeError::Worker)??;

    let _guard = match &state.key_locks {
        Some(locks) => Some(
            locks
                .lock(&format!("{}/{}", request.bucket, request.filename))
                .await,
        ),
        None => None,
    };

    write_artifacts(&bucket, &request.filename, &decision, format, &transformed).await?;

    Ok(Outcome::Resized(transformed.dimensions))
}

/// 先頭バイトを読む（リーダーは戻る時に解放される）
async fn sniff_source(bucket: &Bucket, filename: &str) -> Result<MediaTypeDecision, ResizeError> {
    let mut reader = bucket
        .open_reader(filename)
        .await
        .map_err(ResizeError::Read)?;
    let prefix = reader
        .read_prefix(SNIFF_LEN)
        .await
        .map_err(ResizeError::Sniff)?;

    Ok(sniff(&prefix))
}

/// `.meta` を書き、続けてリサイズ画像を書く
///
/// 2つの書き込みはアトミックではなく、画像の書き込みに失敗しても `.meta` は残る
async fn write_artifacts(
    bucket: &Bucket,
    filename: &str,
    decision: &MediaTypeDecision,
    format: OutputFormat,
    transformed: &Transformed,
) -> Result<(), ResizeError> {
    let meta = MetaRecord {
        mime: &decision.sniffed_type,
    }
    .to_json();
    let mut writer = bucket
        .new_writer(&meta_key(filename))
        .map_err(ResizeError::WriteMeta)?;
    writer
        .write_all(meta.as_bytes())
        .await
        .map_err(ResizeError::WriteMeta)?;
    writer.close().await.map_err(ResizeError::WriteMeta)?;

    let key = resized_key(filename, transformed.dimensions, format);
    let mut writer = bucket.new_writer(&key).map_err(ResizeError::WriteImage)?;
    writer
        .write_all(&transformed.encoded)
        .await
        .map_err(ResizeError::WriteImage)?;
    writer.close().await.map_err(ResizeError::WriteImage)?;

    tracing::info!(
        bucket = %bucket.name(),
        key = %key,
        size = transformed.encoded.len(),
        "wrote resized image"
    );
    Ok(())
}
