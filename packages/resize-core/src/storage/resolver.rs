use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::ObjectStore;
use url::Url;

use crate::errors::StorageError;

/// [`UrlBuckets`] のテンプレート内でバケット名に置換されるプレースホルダ
pub const BUCKET_PLACEHOLDER: &str = "{bucket}";

/// ストアと、バケットのキーが置かれるパスプレフィックス
#[derive(Debug, Clone)]
pub struct ResolvedBucket {
    pub store: Arc<dyn ObjectStore>,
    pub prefix: Path,
}

/// バケット名をオブジェクトストアに対応付ける
pub trait BucketResolver: Send + Sync {
    fn resolve(&self, bucket: &str) -> Result<ResolvedBucket, StorageError>;
}

/// `object_store` の URL テンプレートでバケットを解決する
///
/// 例: `gs://{bucket}`、`s3://{bucket}`、`file:///srv/{bucket}`。
/// プレースホルダのないテンプレートではバケット名が先頭のパスセグメントになる。
/// 解決のたびに新しいストアを作る
#[derive(Debug, Clone)]
pub struct UrlBuckets {
    template: String,
    options: Vec<(String, String)>,
}

impl UrlBuckets {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            options: Vec::new(),
        }
    }

    /// `object_store` のオプション（認証情報、エンドポイントなど）を追加する
    pub fn with_options<K, V>(mut self, options: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.options
            .extend(options.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// `GOOGLE_*` / `AWS_*` 環境変数を小文字化して `object_store` の設定キーとして使う
    pub fn from_env(template: impl Into<String>) -> Self {
        let options = std::env::vars().filter_map(|(key, value)| {
            (key.starts_with("GOOGLE_") || key.starts_with("AWS_"))
                .then(|| (key.to_ascii_lowercase(), value))
        });
        Self::new(template).with_options(options)
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

impl BucketResolver for UrlBuckets {
    fn resolve(&self, bucket: &str) -> Result<ResolvedBucket, StorageError> {
        let client_error = |message: String| StorageError::Client {
            bucket: bucket.to_string(),
            message,
        };

        let templated = self.template.contains(BUCKET_PLACEHOLDER);
        let url_str = self.template.replace(BUCKET_PLACEHOLDER, bucket);
        let url = Url::parse(&url_str).map_err(|e| client_error(format!("{url_str}: {e}")))?;

        let (store, prefix) = object_store::parse_url_opts(&url, self.options.iter().cloned())
            .map_err(|e| client_error(e.to_string()))?;

        let prefix = if templated { prefix } else { prefix.child(bucket) };

        Ok(ResolvedBucket {
            store: Arc::from(store),
            prefix,
        })
    }
}

/// プロセス内のインメモリバケット（初回アクセス時に作成）
#[derive(Debug, Clone, Default)]
pub struct MemoryBuckets {
    buckets: Arc<Mutex<HashMap<String, Arc<InMemory>>>>,
}

impl MemoryBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// `bucket` のストア
    pub fn store(&self, bucket: &str) -> Arc<InMemory> {
        let mut buckets = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);
        buckets
            .entry(bucket.to_string())
            .or_insert_with(|| Arc::new(InMemory::new()))
            .clone()
    }
}

impl BucketResolver for MemoryBuckets {
    fn resolve(&self, bucket: &str) -> Result<ResolvedBucket, StorageError> {
        Ok(ResolvedBucket {
            store: self.store(bucket),
            prefix: Path::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_buckets_are_shared() {
        let buckets = MemoryBuckets::new();
        let a = buckets.store("a");

        assert!(Arc::ptr_eq(&a, &buckets.store("a")));
        assert!(!Arc::ptr_eq(&a, &buckets.store("b")));
        assert!(Arc::ptr_eq(&a, &buckets.clone().store("a")));
    }

    #[test]
    fn test_url_template_with_placeholder() {
        let resolved = UrlBuckets::new("file:///srv/buckets/{bucket}")
            .resolve("photos")
            .unwrap();

        assert_eq!(resolved.prefix.as_ref(), "srv/buckets/photos");
    }

    #[test]
    fn test_url_template_without_placeholder() {
        let resolved = UrlBuckets::new("file:///srv/buckets").resolve("photos").unwrap();

        assert_eq!(resolved.prefix.as_ref(), "srv/buckets/photos");
    }

    #[test]
    fn test_url_template_invalid() {
        let err = UrlBuckets::new("not a url/{bucket}").resolve("b").unwrap_err();
        assert!(matches!(err, StorageError::Client { .. }));

        let err = UrlBuckets::new("ftp://{bucket}").resolve("b").unwrap_err();
        assert!(matches!(err, StorageError::Client { .. }));
    }
}
