use crate::constants::{JPEG_QUALITY, MAX_ICO_DIMENSION};
use crate::errors::TransformError;
use crate::transform::params::OutputFormat;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// 画像を指定フォーマットでエンコードする
pub fn encode_image(img: &DynamicImage, format: OutputFormat) -> Result<Vec<u8>, TransformError> {
    let mut buf = Cursor::new(Vec::new());

    match format {
        OutputFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
            img.to_rgb8()
                .write_with_encoder(encoder)
                .map_err(|e| TransformError::Encode(format!("JPEG encode failed: {e}")))?;
        }
        OutputFormat::Png => {
            img.write_to(&mut buf, ImageFormat::Png)
                .map_err(|e| TransformError::Encode(format!("PNG encode failed: {e}")))?;
        }
        OutputFormat::WebP => {
            // image の WebP エンコーダはロスレス・8bit RGB(A) のみ
            let encoder = WebPEncoder::new_lossless(&mut buf);
            let result = if img.color().has_alpha() {
                img.to_rgba8().write_with_encoder(encoder)
            } else {
                img.to_rgb8().write_with_encoder(encoder)
            };
            result.map_err(|e| TransformError::Encode(format!("WebP encode failed: {e}")))?;
        }
        OutputFormat::Gif => {
            DynamicImage::ImageRgba8(img.to_rgba8())
                .write_to(&mut buf, ImageFormat::Gif)
                .map_err(|e| TransformError::Encode(format!("GIF encode failed: {e}")))?;
        }
        OutputFormat::Ico => {
            if img.width() > MAX_ICO_DIMENSION || img.height() > MAX_ICO_DIMENSION {
                return Err(TransformError::Encode(format!(
                    "ICO encode failed: {}x{} exceeds {MAX_ICO_DIMENSION}x{MAX_ICO_DIMENSION}",
                    img.width(),
                    img.height()
                )));
            }
            DynamicImage::ImageRgba8(img.to_rgba8())
                .write_to(&mut buf, ImageFormat::Ico)
                .map_err(|e| TransformError::Encode(format!("ICO encode failed: {e}")))?;
        }
    }

    Ok(buf.into_inner())
}
