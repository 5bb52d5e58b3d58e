use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::config::LogFormat;

pub fn get_env_filter() -> EnvFilter {
    // RUST_LOG でレベルを指定（デフォルトは info）
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(LevelFilter::INFO.into()))
}

pub fn get_log_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync>
where
    S: for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    S: tracing::Subscriber,
{
    match format {
        LogFormat::Json => Box::new(tracing_subscriber::fmt::layer().json().flatten_event(true)),
        LogFormat::Compact => Box::new(tracing_subscriber::fmt::layer().compact()),
    }
}

pub fn setup_tracing(format: LogFormat) {
    let subscriber =
        Registry::default().with(get_log_layer(format).with_filter(get_env_filter()));

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        tracing::error!("logger was already initiated, continuing: {:?}", e);
    }
}
