use std::io::Cursor;

use image::{DynamicImage, ImageReader};

use crate::errors::TransformError;
use crate::transform::params::OutputFormat;

/// 判定済みのフォーマットでソース全体をデコードする
pub fn decode_image(input: &[u8], format: OutputFormat) -> Result<DynamicImage, TransformError> {
    ImageReader::with_format(Cursor::new(input), format.image_format())
        .decode()
        .map_err(|e| TransformError::Decode(format!("{format} decode failed: {e}")))
}
