use resize_core::{
    decode_image, encode_image, resize_image, resolve_dimensions, OutputDimensions, OutputFormat,
};

use crate::error::ResizeError;

/// 変換ステージのエンコード済み出力
#[derive(Debug)]
pub struct Transformed {
    pub dimensions: OutputDimensions,
    pub encoded: Vec<u8>,
}

/// ソースをデコードし、リサイズして同じフォーマットで再エンコードする
///
/// CPU バウンドなのでパイプラインはブロッキングプールで実行する
pub fn transform(
    input: &[u8],
    format: OutputFormat,
    desired_w: u32,
    desired_h: u32,
) -> Result<Transformed, ResizeError> {
    let img = decode_image(input, format).map_err(ResizeError::DecodeImage)?;

    let dimensions = resolve_dimensions(img.width(), img.height(), desired_w, desired_h);
    tracing::debug!(
        src_w = img.width(),
        src_h = img.height(),
        dst_w = dimensions.width,
        dst_h = dimensions.height,
        "resolved output dimensions"
    );

    let resized = resize_image(&img, dimensions.width, dimensions.height)
        .map_err(ResizeError::ResizeImage)?;
    drop(img);

    let encoded = encode_image(&resized, format).map_err(ResizeError::EncodeImage)?;

    Ok(Transformed {
        dimensions,
        encoded,
    })
}
