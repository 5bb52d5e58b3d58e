pub mod allow_list;
pub mod detect;

pub use allow_list::MediaTypeDecision;
pub use detect::detect_content_type;

/// `prefix` からメディアタイプを判定し、許可リストと照合する
pub fn sniff(prefix: &[u8]) -> MediaTypeDecision {
    MediaTypeDecision::for_media_type(detect_content_type(prefix))
}
