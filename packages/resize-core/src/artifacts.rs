//! 出力キーとメタデータレコード
//!
//! キーはリクエストと出力だけから決まるため、同じリクエストは同じ2つのオブジェクトを上書きする

use crate::constants::META_SUFFIX;
use crate::transform::{OutputDimensions, OutputFormat};

/// ソースの隣に `<filename>.meta` として保存するレコード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaRecord<'a> {
    pub mime: &'a str,
}

impl MetaRecord<'_> {
    /// 整形なしの JSON（例: `{"mime":"image/jpeg"}`）
    pub fn to_json(&self) -> String {
        serde_json::json!({ "mime": self.mime }).to_string()
    }
}

pub fn meta_key(filename: &str) -> String {
    format!("{filename}{META_SUFFIX}")
}

/// `<filename>-<width>x<height>.<format>`
pub fn resized_key(filename: &str, dimensions: OutputDimensions, format: OutputFormat) -> String {
    format!(
        "{filename}-{}x{}.{format}",
        dimensions.width, dimensions.height
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_key() {
        assert_eq!(meta_key("cat.jpg"), "cat.jpg.meta");
        assert_eq!(meta_key("a/b/cat.jpg"), "a/b/cat.jpg.meta");
    }

    #[test]
    fn test_resized_key() {
        let dims = OutputDimensions {
            width: 100,
            height: 50,
        };
        assert_eq!(resized_key("cat.jpg", dims, OutputFormat::Jpeg), "cat.jpg-100x50.jpeg");
        assert_eq!(resized_key("logo", dims, OutputFormat::Ico), "logo-100x50.ico");
    }

    #[test]
    fn test_meta_record_json() {
        let record = MetaRecord { mime: "image/jpeg" };
        assert_eq!(record.to_json(), r#"{"mime":"image/jpeg"}"#);
    }
}
