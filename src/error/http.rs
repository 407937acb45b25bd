use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Request to {url} failed: {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with status {status}{}", format_detail(.detail.as_deref()))]
    UnexpectedStatus {
        url: String,
        status: u16,
        detail: Option<String>,
    },
    #[error("Failed to decode response from {url}: {source}")]
    DecodeFailed {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to read response body from {url}: {source}")]
    ReadBodyFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

fn format_detail(detail: Option<&str>) -> String {
    detail.map_or_else(String::new, |value| format!(" ({value})"))
}
