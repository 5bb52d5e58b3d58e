use std::net::SocketAddr;

use resize_core::{MemoryBuckets, StorageClient, UrlBuckets};

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_STORAGE_URL: &str = "gs://{bucket}";
const MEMORY_STORAGE_URL: &str = "memory://";
const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

/// プロセスの設定
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub storage_url: String,
    pub serialize_writes: bool,
    pub log_format: LogFormat,
    pub max_body_bytes: usize,
}

impl Config {
    /// 環境変数から設定を作成
    ///
    /// すべて任意:
    /// - LISTEN_ADDR（なければ 0.0.0.0:$PORT、さらになければ 0.0.0.0:8080）
    /// - STORAGE_URL（`gs://{bucket}`。`memory://` でプロセス内バケット）
    /// - SERIALIZE_WRITES（`true`/`false`）
    /// - LOG_FORMAT（`compact`/`json`）
    /// - MAX_BODY_BYTES
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let listen_addr = match (lookup("LISTEN_ADDR"), lookup("PORT")) {
            (Some(addr), _) => addr,
            (None, Some(port)) => format!("0.0.0.0:{port}"),
            (None, None) => DEFAULT_LISTEN_ADDR.to_string(),
        };
        let listen_addr = listen_addr
            .parse::<SocketAddr>()
            .map_err(|_| format!("invalid listen address: {listen_addr}"))?;

        let storage_url = lookup("STORAGE_URL").unwrap_or_else(|| DEFAULT_STORAGE_URL.to_string());
        if storage_url.is_empty() {
            return Err("STORAGE_URL is empty".to_string());
        }

        let serialize_writes = match lookup("SERIALIZE_WRITES").as_deref() {
            None => false,
            Some(value) => parse_bool(value)
                .ok_or_else(|| format!("SERIALIZE_WRITES must be true or false, got {value}"))?,
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("compact") => LogFormat::Compact,
            Some("json") => LogFormat::Json,
            Some(other) => return Err(format!("LOG_FORMAT must be compact or json, got {other}")),
        };

        let max_body_bytes = match lookup("MAX_BODY_BYTES") {
            None => DEFAULT_MAX_BODY_BYTES,
            Some(value) => value
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| format!("MAX_BODY_BYTES must be a positive integer, got {value}"))?,
        };

        Ok(Self {
            listen_addr,
            storage_url,
            serialize_writes,
            log_format,
            max_body_bytes,
        })
    }

    pub fn storage_client(&self) -> StorageClient {
        if self.storage_url == MEMORY_STORAGE_URL {
            StorageClient::new(MemoryBuckets::new())
        } else {
            StorageClient::new(UrlBuckets::from_env(self.storage_url.clone()))
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
