pub mod artifacts;
pub mod constants;
pub mod errors;
pub mod sniff;
pub mod storage;
pub mod transform;
pub mod validation;
pub mod wire;

// 公開 API
pub use artifacts::{meta_key, resized_key, MetaRecord};
pub use constants::{JPEG_QUALITY, MAX_DIMENSION, MAX_PIXELS, SNIFF_LEN, THUMBNAIL_SUFFIX};
pub use errors::{MediaError, StorageError, TransformError};
pub use sniff::{detect_content_type, sniff, MediaTypeDecision};
pub use storage::{
    Bucket, BucketResolver, MemoryBuckets, ObjectReader, ObjectWriter, ResolvedBucket,
    StorageClient, UrlBuckets,
};
pub use transform::{
    decode_image, encode_image, resize_image, resolve_dimensions, OutputDimensions, OutputFormat,
};
pub use validation::{is_thumbnail, validate_request};
pub use wire::{decode_request, encode_response, ResizeRequest, ResponsePayload, MSGPACK_CONTENT_TYPE};
