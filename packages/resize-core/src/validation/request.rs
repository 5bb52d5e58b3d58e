use crate::constants::THUMBNAIL_SUFFIX;
use crate::errors::MediaError;
use crate::wire::ResizeRequest;

/// リクエストの必須フィールドを検証する
///
/// `filename` と `bucket` は空でないこと、`width` と `height` の少なくとも一方が指定されていること
pub fn validate_request(request: &ResizeRequest) -> Result<(), MediaError> {
    if request.filename.is_empty() {
        return Err(MediaError::Validation("filename is empty".to_string()));
    }

    if request.bucket.is_empty() {
        return Err(MediaError::Validation("bucket is empty".to_string()));
    }

    if request.width == 0 && request.height == 0 {
        return Err(MediaError::Validation(
            "one of width or height must be set".to_string(),
        ));
    }

    Ok(())
}

/// キーが生成済みのサムネイルかどうか
pub fn is_thumbnail(filename: &str) -> bool {
    filename.ends_with(THUMBNAIL_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(filename: &str, bucket: &str, width: u32, height: u32) -> ResizeRequest {
        ResizeRequest {
            filename: filename.to_string(),
            bucket: bucket.to_string(),
            width,
            height,
        }
    }

    #[test]
    fn test_valid_requests() {
        assert!(validate_request(&request("cat.jpg", "b", 100, 0)).is_ok());
        assert!(validate_request(&request("cat.jpg", "b", 0, 100)).is_ok());
        assert!(validate_request(&request("a/b/cat.jpg", "b", 10, 10)).is_ok());
    }

    #[test]
    fn test_missing_names() {
        assert!(validate_request(&request("", "b", 10, 10)).is_err());
        assert!(validate_request(&request("cat.jpg", "", 10, 10)).is_err());
    }

    #[test]
    fn test_both_dimensions_unspecified() {
        let err = validate_request(&request("cat.jpg", "b", 0, 0)).unwrap_err();
        assert!(matches!(err, MediaError::Validation(_)));
    }

    #[test]
    fn test_is_thumbnail() {
        assert!(is_thumbnail("x-thumbnail"));
        assert!(is_thumbnail("photos/cat.jpg-thumbnail"));
        assert!(!is_thumbnail("x-thumbnail.jpg"));
        assert!(!is_thumbnail("thumbnail"));
    }
}
