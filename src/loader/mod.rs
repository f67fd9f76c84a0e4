use std::path::PathBuf;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::signal::{Collection, Signal};

pub const DEFAULT_DATA_PATH: &str = "./data/specterData.json";
pub const DEBUG_TRACE_RECORDS: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    /// `http://` and `https://` locations are fetched, anything else is a path.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(crate::config::expand_tilde(trimmed))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Url(url) => url.clone(),
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        Self::File(PathBuf::from(DEFAULT_DATA_PATH))
    }
}

#[derive(Clone, Debug)]
pub struct LoaderOptions {
    pub timeout_seconds: u64,
    pub proxy: Option<String>,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            proxy: None,
        }
    }
}

/// Every way a load can fail. The presentation layer shows the same panel
/// for all of them; the variants only feed the log.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read data file: {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to setup proxy: {proxy}: {source}")]
    ProxySetup {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("fetching {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to parse data from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("data from {origin} is not an array of objects (entry {index} is {kind})")]
    Shape {
        origin: String,
        index: usize,
        kind: &'static str,
    },

    #[error("data from {origin} is not a JSON array")]
    NotAnArray { origin: String },
}

/// Observable status of the single load.
#[derive(Debug, Default)]
pub enum LoadState {
    #[default]
    Pending,
    Success(Collection),
    Error(LoadError),
}

impl LoadState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn collection(&self) -> Option<&Collection> {
        match self {
            Self::Success(collection) => Some(collection),
            _ => None,
        }
    }
}

impl From<Result<Collection, LoadError>> for LoadState {
    fn from(result: Result<Collection, LoadError>) -> Self {
        match result {
            Ok(collection) => Self::Success(collection),
            Err(e) => Self::Error(e),
        }
    }
}

/// Reads the collection once. No retry and no caching beyond the returned value.
pub async fn load(source: &DataSource, options: &LoaderOptions) -> Result<Collection, LoadError> {
    let origin = source.describe();
    info!(source = %origin, "loading signals");

    let raw = match source {
        DataSource::File(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|e| LoadError::FileRead {
                    path: origin.clone(),
                    source: e,
                })?
        }
        DataSource::Url(url) => fetch(url, options).await?,
    };

    let collection = parse_collection(&raw, &origin)?;
    trace_head(&collection);
    info!(source = %origin, records = collection.len(), "signals loaded");
    Ok(collection)
}

async fn fetch(url: &str, options: &LoaderOptions) -> Result<Vec<u8>, LoadError> {
    let client = build_client(options)?;
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| LoadError::Fetch {
            url: url.to_string(),
            source: e,
        })?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let body = response.bytes().await.map_err(|e| LoadError::Fetch {
        url: url.to_string(),
        source: e,
    })?;
    Ok(body.to_vec())
}

fn build_client(options: &LoaderOptions) -> Result<reqwest::Client, LoadError> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::ACCEPT,
        reqwest::header::HeaderValue::from_static("application/json"),
    );
    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_static(concat!(
            "signalboard/",
            env!("CARGO_PKG_VERSION")
        )),
    );

    let mut builder = reqwest::Client::builder()
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(10))
        .timeout(Duration::from_secs(options.timeout_seconds));

    if let Some(proxy) = options.proxy.as_deref().filter(|p| !p.trim().is_empty()) {
        let proxy = reqwest::Proxy::all(proxy).map_err(|e| LoadError::ProxySetup {
            proxy: proxy.to_string(),
            source: e,
        })?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| LoadError::HttpClientBuild { source: e })
}

pub fn parse_collection(raw: &[u8], origin: &str) -> Result<Collection, LoadError> {
    let value: Value = serde_json::from_slice(raw).map_err(|e| LoadError::Parse {
        origin: origin.to_string(),
        source: e,
    })?;
    let items = match value {
        Value::Array(items) => items,
        _ => {
            return Err(LoadError::NotAnArray {
                origin: origin.to_string(),
            })
        }
    };

    let mut signals = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(fields) => signals.push(Signal::new(fields)),
            other => {
                return Err(LoadError::Shape {
                    origin: origin.to_string(),
                    index,
                    kind: json_kind(&other),
                })
            }
        }
    }
    Ok(Collection::new(signals))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn trace_head(collection: &Collection) {
    for (idx, signal) in collection.iter().take(DEBUG_TRACE_RECORDS).enumerate() {
        debug!(
            index = idx,
            record = %serde_json::to_string(signal).unwrap_or_default(),
            "signal"
        );
    }
}
