use crate::constants::{MAX_DIMENSION, MAX_PIXELS};
use crate::errors::TransformError;
use fast_image_resize::{images::Image, FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::{DynamicImage, RgbImage, RgbaImage};

/// 画像を `target_w` x `target_h` ちょうどにリサイズする
///
/// fast_image_resize の Lanczos3 フィルタを使用。
/// アルファチャンネルを持つ画像は RGBA8、それ以外は RGB8 で処理する
pub fn resize_image(
    img: &DynamicImage,
    target_w: u32,
    target_h: u32,
) -> Result<DynamicImage, TransformError> {
    if target_w == 0 || target_h == 0 {
        return Err(TransformError::InvalidDimensions {
            width: target_w,
            height: target_h,
        });
    }

    // 出力バッファを確保する前に寸法とピクセル数をチェック
    let total_pixels = target_w as u64 * target_h as u64;
    if target_w > MAX_DIMENSION || target_h > MAX_DIMENSION || total_pixels > MAX_PIXELS {
        return Err(TransformError::ResolutionTooLarge {
            width: target_w,
            height: target_h,
        });
    }

    let has_alpha = img.color().has_alpha();
    let (pixel_type, raw) = if has_alpha {
        (PixelType::U8x4, img.to_rgba8().into_raw())
    } else {
        (PixelType::U8x3, img.to_rgb8().into_raw())
    };

    // fast_image_resize の Image を作成
    let src_image = Image::from_vec_u8(img.width(), img.height(), raw, pixel_type)
        .map_err(|e| TransformError::Resize(format!("failed to create source image: {e}")))?;

    let mut dst_image = Image::new(target_w, target_h, pixel_type);

    // Resizer を作成してリサイズ実行（Lanczos3 フィルタ）
    let mut resizer = Resizer::new();
    resizer
        .resize(
            &src_image,
            &mut dst_image,
            &ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3)),
        )
        .map_err(|e| TransformError::Resize(e.to_string()))?;

    // DynamicImage に変換
    let buffer = dst_image.into_vec();
    let resized = if has_alpha {
        RgbaImage::from_raw(target_w, target_h, buffer).map(DynamicImage::ImageRgba8)
    } else {
        RgbImage::from_raw(target_w, target_h, buffer).map(DynamicImage::ImageRgb8)
    };

    resized.ok_or_else(|| TransformError::Resize("failed to convert resized image".to_string()))
}
