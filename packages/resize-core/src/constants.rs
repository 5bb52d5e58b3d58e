/// コンテンツ判定で先頭から読むバイト数
pub const SNIFF_LEN: usize = 512;

/// このサフィックスを持つキーは生成済みの派生物なのでリサイズしない
pub const THUMBNAIL_SUFFIX: &str = "-thumbnail";

/// メタデータオブジェクトのサフィックス
pub const META_SUFFIX: &str = ".meta";

/// 出力画像の最大寸法（幅・高さ）
pub const MAX_DIMENSION: u32 = 8192;

/// 出力画像の最大ピクセル数（RGBA8 で約 200MB）
pub const MAX_PIXELS: u64 = 50_000_000;

/// JPEG 品質（1-100）
pub const JPEG_QUALITY: u8 = 95;

/// ICO コンテナに収まる最大辺
pub const MAX_ICO_DIMENSION: u32 = 256;
