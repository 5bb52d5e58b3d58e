/// リサイズ後の幅と高さ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputDimensions {
    pub width: u32,
    pub height: u32,
}

/// `target` を `other_current / current` の比率でスケールする
///
/// 小数部は切り捨て（`f64 as u32`）のため、極端に細長い画像では `0` になりうる。
/// `0` はリサイズ前に拒否される
fn scale_truncated(target: u32, current: u32, other_current: u32) -> u32 {
    (target as f64 / current as f64 * other_current as f64) as u32
}

/// ソースの寸法と要求された寸法から出力寸法を計算する
///
/// 要求値の `0` は「指定なし」:
/// - 高さのみ指定: 高さを使い、幅はアスペクト比に従う
/// - 幅のみ指定: 幅を使い、高さはアスペクト比に従う
/// - 両方指定: そのまま使う（アスペクト比は保持しない）
///
/// 両方 `0` はリクエスト検証で拒否される。その場合はソースの寸法を返す
pub fn resolve_dimensions(
    current_w: u32,
    current_h: u32,
    desired_w: u32,
    desired_h: u32,
) -> OutputDimensions {
    let (width, height) = match (desired_w, desired_h) {
        (0, 0) => (current_w, current_h),
        (0, h) => (scale_truncated(h, current_h, current_w), h),
        (w, 0) => (w, scale_truncated(w, current_w, current_h)),
        (w, h) => (w, h),
    };

    OutputDimensions { width, height }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(width: u32, height: u32) -> OutputDimensions {
        OutputDimensions { width, height }
    }

    #[test]
    fn test_width_only() {
        assert_eq!(resolve_dimensions(400, 200, 100, 0), dims(100, 50));
        assert_eq!(resolve_dimensions(1920, 1080, 800, 0), dims(800, 450));
        // 拡大も可能
        assert_eq!(resolve_dimensions(100, 50, 200, 0), dims(200, 100));
    }

    #[test]
    fn test_height_only() {
        assert_eq!(resolve_dimensions(1000, 500, 0, 200), dims(400, 200));
        assert_eq!(resolve_dimensions(400, 200, 0, 100), dims(200, 100));
    }

    #[test]
    fn test_truncates_toward_zero() {
        // 600 / 1080 * 1920 = 1066.67
        assert_eq!(resolve_dimensions(1920, 1080, 0, 600), dims(1066, 600));
        // 100 / 3 * 2 = 66.67
        assert_eq!(resolve_dimensions(3, 2, 100, 0), dims(100, 66));
    }

    #[test]
    fn test_thin_source_can_truncate_to_zero() {
        assert_eq!(resolve_dimensions(1000, 1, 10, 0), dims(10, 0));
    }

    #[test]
    fn test_both_set_ignores_aspect_ratio() {
        assert_eq!(resolve_dimensions(1920, 1080, 800, 600), dims(800, 600));
        assert_eq!(resolve_dimensions(10, 1000, 500, 5), dims(500, 5));
    }
}
