use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use futures::stream::BoxStream;
use futures::StreamExt;
use object_store::buffered::BufWriter;
use object_store::path::Path;
use object_store::ObjectStore;
use tokio::io::AsyncWriteExt;

use crate::errors::StorageError;
use crate::storage::resolver::{BucketResolver, ResolvedBucket};

/// オブジェクトストアクライアント
///
/// バケットごとのハンドルを返す。自身は接続を持たず、[`Bucket`] は毎回解決されドロップ時に解放される
#[derive(Clone)]
pub struct StorageClient {
    resolver: Arc<dyn BucketResolver>,
}

impl StorageClient {
    pub fn new(resolver: impl BucketResolver + 'static) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }

    /// `bucket` のハンドルを解決する
    pub fn bucket(&self, bucket: &str) -> Result<Bucket, StorageError> {
        let ResolvedBucket { store, prefix } = self.resolver.resolve(bucket)?;
        Ok(Bucket {
            name: bucket.to_string(),
            store,
            prefix,
        })
    }
}

/// 1つのバケットのハンドル
#[derive(Debug)]
pub struct Bucket {
    name: String,
    store: Arc<dyn ObjectStore>,
    prefix: Path,
}

impl Bucket {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// キーをそのままの文字列でストアのパスに変換する
    ///
    /// `Path::from` はセグメント内の `~` `%` `[` などをパーセントエンコードするため使わない。
    /// 空セグメント、`.` / `..`、先頭・末尾の `/` を含むキーは表現できないのでエラー。
    fn path(&self, key: &str) -> Result<Path, String> {
        let raw = if self.prefix.as_ref().is_empty() {
            key.to_string()
        } else {
            format!("{}{}{key}", self.prefix, object_store::path::DELIMITER)
        };
        let path = Path::parse(&raw).map_err(|e| e.to_string())?;
        // parse は先頭・末尾の区切り文字を黙って取り除く
        if path.as_ref() != raw {
            return Err(format!("key {key:?} cannot be stored verbatim"));
        }
        Ok(path)
    }

    /// `key` の読み取りストリームを開く
    pub async fn open_reader(&self, key: &str) -> Result<ObjectReader, StorageError> {
        let path = self.path(key).map_err(|message| StorageError::Read {
            key: key.to_string(),
            message,
        })?;
        let result = self
            .store
            .get(&path)
            .await
            .map_err(|e| match e {
                object_store::Error::NotFound { .. } => StorageError::NotFound {
                    key: key.to_string(),
                },
                e => StorageError::Read {
                    key: key.to_string(),
                    message: e.to_string(),
                },
            })?;

        Ok(ObjectReader {
            key: key.to_string(),
            stream: result.into_stream(),
            pending: Bytes::new(),
        })
    }

    /// [`ObjectWriter::close`] 時に `key` を作成または上書きするライターを作る
    pub fn new_writer(&self, key: &str) -> Result<ObjectWriter, StorageError> {
        let path = self.path(key).map_err(|message| StorageError::Write {
            key: key.to_string(),
            message,
        })?;
        Ok(ObjectWriter {
            key: key.to_string(),
            inner: BufWriter::new(self.store.clone(), path),
        })
    }
}

/// 1つのオブジェクトの読み取りストリーム（ドロップで解放）
pub struct ObjectReader {
    key: String,
    stream: BoxStream<'static, object_store::Result<Bytes>>,
    pending: Bytes,
}

impl ObjectReader {
    async fn next_chunk(&mut self) -> Result<Option<Bytes>, StorageError> {
        if !self.pending.is_empty() {
            return Ok(Some(std::mem::take(&mut self.pending)));
        }
        match self.stream.next().await {
            Some(chunk) => chunk.map(Some).map_err(|e| StorageError::Read {
                key: self.key.clone(),
                message: e.to_string(),
            }),
            None => Ok(None),
        }
    }

    /// ちょうど `len` バイト読む。それより短いオブジェクトはエラー
    pub async fn read_prefix(&mut self, len: usize) -> Result<Bytes, StorageError> {
        let mut buf = BytesMut::with_capacity(len);
        while buf.len() < len {
            let Some(mut chunk) = self.next_chunk().await? else {
                return Err(StorageError::ShortRead {
                    key: self.key.clone(),
                    expected: len,
                    actual: buf.len(),
                });
            };
            let wanted = len - buf.len();
            if chunk.len() > wanted {
                self.pending = chunk.split_off(wanted);
            }
            buf.extend_from_slice(&chunk);
        }
        Ok(buf.freeze())
    }

    /// オブジェクトの残りを読む
    pub async fn read_to_end(mut self) -> Result<Bytes, StorageError> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.next_chunk().await? {
            buf.extend_from_slice(&chunk);
        }
        Ok(buf.freeze())
    }
}

/// 1つのオブジェクトの書き込みストリーム
///
/// データはバッファされ（大きくなるとマルチパートでアップロード）、[`close`](Self::close) が
/// 成功したときにだけ見えるようになる。close せずにドロップするとアップロードは破棄される
pub struct ObjectWriter {
    key: String,
    inner: BufWriter,
}

impl ObjectWriter {
    pub async fn write_all(&mut self, data: &[u8]) -> Result<(), StorageError> {
        self.inner
            .write_all(data)
            .await
            .map_err(|e| self.write_error(e))
    }

    /// フラッシュしてアップロードを完了する
    pub async fn close(mut self) -> Result<(), StorageError> {
        self.inner.shutdown().await.map_err(|e| self.write_error(e))
    }

    fn write_error(&self, e: std::io::Error) -> StorageError {
        StorageError::Write {
            key: self.key.clone(),
            message: e.to_string(),
        }
    }
}
