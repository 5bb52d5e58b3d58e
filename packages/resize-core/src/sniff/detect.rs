//! 先頭バイトからのメディアタイプ判定
//!
//! WHATWG の MIME sniffing のシグネチャ表を先頭 [`SNIFF_LEN`] バイトまでに適用する。
//! 結果は常に有効なメディアタイプで、不明なバイナリは `application/octet-stream` になる

use crate::constants::SNIFF_LEN;

const OCTET_STREAM: &str = "application/octet-stream";
const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const TEXT_HTML: &str = "text/html; charset=utf-8";

enum Signature {
    /// 先頭から完全一致
    Exact(&'static [u8], &'static str),
    /// マスク後に一致（先頭の空白を読み飛ばす場合あり）
    Masked {
        pattern: &'static [u8],
        mask: &'static [u8],
        skip_ws: bool,
        content_type: &'static str,
    },
    /// 大文字小文字を区別しない HTML タグ + 空白または `>`
    Html(&'static [u8]),
    Mp4,
}

const SIGNATURES: &[Signature] = &[
    Signature::Html(b"<!DOCTYPE HTML"),
    Signature::Html(b"<HTML"),
    Signature::Html(b"<HEAD"),
    Signature::Html(b"<SCRIPT"),
    Signature::Html(b"<IFRAME"),
    Signature::Html(b"<H1"),
    Signature::Html(b"<DIV"),
    Signature::Html(b"<FONT"),
    Signature::Html(b"<TABLE"),
    Signature::Html(b"<A"),
    Signature::Html(b"<STYLE"),
    Signature::Html(b"<TITLE"),
    Signature::Html(b"<B"),
    Signature::Html(b"<BODY"),
    Signature::Html(b"<BR"),
    Signature::Html(b"<P"),
    Signature::Html(b"<!--"),
    Signature::Masked {
        pattern: b"<?xml",
        mask: b"\xFF\xFF\xFF\xFF\xFF",
        skip_ws: true,
        content_type: "text/xml; charset=utf-8",
    },
    Signature::Exact(b"%PDF-", "application/pdf"),
    Signature::Exact(b"%!PS-Adobe-", "application/postscript"),
    // UTF の BOM
    Signature::Masked {
        pattern: b"\xFE\xFF\x00\x00",
        mask: b"\xFF\xFF\x00\x00",
        skip_ws: false,
        content_type: "text/plain; charset=utf-16be",
    },
    Signature::Masked {
        pattern: b"\xFF\xFE\x00\x00",
        mask: b"\xFF\xFF\x00\x00",
        skip_ws: false,
        content_type: "text/plain; charset=utf-16le",
    },
    Signature::Masked {
        pattern: b"\xEF\xBB\xBF\x00",
        mask: b"\xFF\xFF\xFF\x00",
        skip_ws: false,
        content_type: TEXT_PLAIN,
    },
    // 画像
    Signature::Exact(b"\x00\x00\x01\x00", "image/x-icon"),
    Signature::Exact(b"\x00\x00\x02\x00", "image/x-icon"),
    Signature::Exact(b"BM", "image/bmp"),
    Signature::Exact(b"GIF87a", "image/gif"),
    Signature::Exact(b"GIF89a", "image/gif"),
    Signature::Masked {
        pattern: b"RIFF\x00\x00\x00\x00WEBPVP",
        mask: b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF\xFF\xFF",
        skip_ws: false,
        content_type: "image/webp",
    },
    Signature::Exact(b"\x89PNG\x0D\x0A\x1A\x0A", "image/png"),
    Signature::Exact(b"\xFF\xD8\xFF", "image/jpeg"),
    // 音声・動画
    Signature::Masked {
        pattern: b"FORM\x00\x00\x00\x00AIFF",
        mask: b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF",
        skip_ws: false,
        content_type: "audio/aiff",
    },
    Signature::Masked {
        pattern: b"ID3",
        mask: b"\xFF\xFF\xFF",
        skip_ws: false,
        content_type: "audio/mpeg",
    },
    Signature::Masked {
        pattern: b"OggS\x00",
        mask: b"\xFF\xFF\xFF\xFF\xFF",
        skip_ws: false,
        content_type: "application/ogg",
    },
    Signature::Masked {
        pattern: b"MThd\x00\x00\x00\x06",
        mask: b"\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF",
        skip_ws: false,
        content_type: "audio/midi",
    },
    Signature::Masked {
        pattern: b"RIFF\x00\x00\x00\x00AVI ",
        mask: b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF",
        skip_ws: false,
        content_type: "video/avi",
    },
    Signature::Masked {
        pattern: b"RIFF\x00\x00\x00\x00WAVE",
        mask: b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF",
        skip_ws: false,
        content_type: "audio/wave",
    },
    Signature::Mp4,
    Signature::Exact(b"\x1A\x45\xDF\xA3", "video/webm"),
    // フォント
    Signature::Exact(b"wOFF", "font/woff"),
    Signature::Exact(b"wOF2", "font/woff2"),
    Signature::Exact(b"\x00\x01\x00\x00", "font/ttf"),
    Signature::Exact(b"OTTO", "font/otf"),
    Signature::Exact(b"ttcf", "font/collection"),
    // アーカイブ
    Signature::Exact(b"\x1F\x8B\x08", "application/x-gzip"),
    Signature::Exact(b"PK\x03\x04", "application/zip"),
    Signature::Exact(b"Rar!\x1A\x07\x00", "application/x-rar-compressed"),
    Signature::Exact(b"Rar!\x1A\x07\x01\x00", "application/x-rar-compressed"),
    Signature::Exact(b"\x00\x61\x73\x6D", "application/wasm"),
];

/// `data` のメディアタイプを推定する
pub fn detect_content_type(data: &[u8]) -> &'static str {
    let data = &data[..data.len().min(SNIFF_LEN)];
    let first_non_ws = data
        .iter()
        .position(|b| !is_whitespace(*b))
        .unwrap_or(data.len());

    SIGNATURES
        .iter()
        .find_map(|sig| sig.matches(data, first_non_ws))
        .unwrap_or_else(|| {
            if data[first_non_ws..].iter().any(|b| is_binary(*b)) {
                OCTET_STREAM
            } else {
                TEXT_PLAIN
            }
        })
}

impl Signature {
    fn matches(&self, data: &[u8], first_non_ws: usize) -> Option<&'static str> {
        match self {
            Signature::Exact(prefix, content_type) => {
                data.starts_with(prefix).then_some(*content_type)
            }
            Signature::Masked {
                pattern,
                mask,
                skip_ws,
                content_type,
            } => {
                let data = if *skip_ws { &data[first_non_ws..] } else { data };
                if data.len() < pattern.len() {
                    return None;
                }
                pattern
                    .iter()
                    .zip(mask.iter())
                    .zip(data)
                    .all(|((p, m), d)| d & m == *p)
                    .then_some(*content_type)
            }
            Signature::Html(tag) => {
                let data = &data[first_non_ws..];
                // タグ + 終端の1バイト
                if data.len() < tag.len() + 1 {
                    return None;
                }
                let tag_matches = tag.iter().zip(data).all(|(t, d)| {
                    if t.is_ascii_uppercase() {
                        d.to_ascii_uppercase() == *t
                    } else {
                        d == t
                    }
                });
                let terminator = data[tag.len()];
                (tag_matches && (terminator == b' ' || terminator == b'>')).then_some(TEXT_HTML)
            }
            Signature::Mp4 => is_mp4(data).then_some("video/mp4"),
        }
    }
}

fn is_mp4(data: &[u8]) -> bool {
    if data.len() < 12 {
        return false;
    }
    let box_size = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
    if data.len() < box_size || box_size % 4 != 0 {
        return false;
    }
    if &data[4..8] != b"ftyp" {
        return false;
    }
    // 8 バイト目に major brand、12 に minor version、以降に互換 brand
    (8..box_size)
        .step_by(4)
        .filter(|offset| *offset != 12)
        .any(|offset| data[offset..].starts_with(b"mp4"))
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b'\t' | b'\n' | b'\x0c' | b'\r' | b' ')
}

fn is_binary(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded(prefix: &[u8]) -> Vec<u8> {
        let mut data = prefix.to_vec();
        data.resize(SNIFF_LEN, 0);
        data
    }

    #[test]
    fn test_allowed_image_signatures() {
        assert_eq!(detect_content_type(&padded(b"\xFF\xD8\xFF\xE0")), "image/jpeg");
        assert_eq!(
            detect_content_type(&padded(b"\x89PNG\x0D\x0A\x1A\x0A")),
            "image/png"
        );
        assert_eq!(detect_content_type(&padded(b"GIF89a")), "image/gif");
        assert_eq!(detect_content_type(&padded(b"GIF87a")), "image/gif");
        assert_eq!(detect_content_type(&padded(b"\x00\x00\x01\x00")), "image/x-icon");
        assert_eq!(
            detect_content_type(&padded(b"RIFF\x10\x20\x00\x00WEBPVP8L")),
            "image/webp"
        );
    }

    #[test]
    fn test_other_binary_types() {
        assert_eq!(detect_content_type(&padded(b"BM")), "image/bmp");
        assert_eq!(detect_content_type(&padded(b"%PDF-1.7")), "application/pdf");
        assert_eq!(detect_content_type(&padded(b"PK\x03\x04")), "application/zip");
        assert_eq!(
            detect_content_type(&padded(b"RIFF\x10\x20\x00\x00WAVEfmt ")),
            "audio/wave"
        );
        assert_eq!(detect_content_type(&padded(b"\x01\x02\x03")), OCTET_STREAM);
    }

    #[test]
    fn test_html_after_whitespace() {
        assert_eq!(detect_content_type(b"  \n<html><body>"), TEXT_HTML);
        assert_eq!(detect_content_type(b"<!DOCTYPE html>"), TEXT_HTML);
        assert_eq!(detect_content_type(b"<p>hello</p>"), TEXT_HTML);
        // タグは終端されている必要がある
        assert_eq!(detect_content_type(b"<pre>"), TEXT_PLAIN);
    }

    #[test]
    fn test_xml_and_text() {
        assert_eq!(
            detect_content_type(b"\n<?xml version=\"1.0\"?>"),
            "text/xml; charset=utf-8"
        );
        assert_eq!(detect_content_type(b"just some words"), TEXT_PLAIN);
        assert_eq!(detect_content_type(b""), TEXT_PLAIN);
    }

    #[test]
    fn test_mp4() {
        let mut data = Vec::new();
        data.extend_from_slice(&24u32.to_be_bytes());
        data.extend_from_slice(b"ftypisom\x00\x00\x02\x00mp41isom");
        assert_eq!(detect_content_type(&data), "video/mp4");
    }

    #[test]
    fn test_only_prefix_is_inspected() {
        let mut data = vec![b'a'; SNIFF_LEN];
        data.push(0x00);
        assert_eq!(detect_content_type(&data), TEXT_PLAIN);
    }
}
