use image::ImageFormat;

/// 出力フォーマット（常に判定されたソースのフォーマットと同じ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Gif,
    Ico,
    Jpeg,
    WebP,
    Png,
}

impl OutputFormat {
    /// フォーマット識別子（出力キーの拡張子にも使う）
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gif => "gif",
            Self::Ico => "ico",
            Self::Jpeg => "jpeg",
            Self::WebP => "webp",
            Self::Png => "png",
        }
    }

    pub fn image_format(&self) -> ImageFormat {
        match self {
            Self::Gif => ImageFormat::Gif,
            Self::Ico => ImageFormat::Ico,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::WebP => ImageFormat::WebP,
            Self::Png => ImageFormat::Png,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
