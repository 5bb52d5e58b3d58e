pub mod client;
pub mod resolver;

pub use client::{Bucket, ObjectReader, ObjectWriter, StorageClient};
pub use resolver::{BucketResolver, MemoryBuckets, ResolvedBucket, UrlBuckets};
// StorageError は errors モジュールで定義
pub use crate::errors::StorageError;
