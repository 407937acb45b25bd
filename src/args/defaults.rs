pub(crate) const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub(crate) const DEFAULT_TICK_INTERVAL: &str = "3s";
pub(crate) const DEFAULT_COMPLETION_DELAY: &str = "2s";
pub(crate) const DEFAULT_REQUEST_TIMEOUT: &str = "30s";
