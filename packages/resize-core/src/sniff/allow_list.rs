use std::collections::HashMap;
use std::sync::LazyLock;

use crate::transform::OutputFormat;

/// リサイズを許可するメディアタイプ（判定結果の文字列をキーとする）
static ALLOWED_MEDIA_TYPES: LazyLock<HashMap<&'static str, OutputFormat>> = LazyLock::new(|| {
    HashMap::from([
        ("image/gif", OutputFormat::Gif),
        ("image/x-icon", OutputFormat::Ico),
        ("image/jpeg", OutputFormat::Jpeg),
        ("image/webp", OutputFormat::WebP),
        ("image/png", OutputFormat::Png),
    ])
});

/// ソースの判定結果と許可リストの照合結果
///
/// `output_format` が `None` なら許可されていない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaTypeDecision {
    pub sniffed_type: String,
    pub output_format: Option<OutputFormat>,
}

impl MediaTypeDecision {
    pub fn for_media_type(sniffed_type: &str) -> Self {
        Self {
            sniffed_type: sniffed_type.to_string(),
            output_format: ALLOWED_MEDIA_TYPES.get(sniffed_type).copied(),
        }
    }
}
