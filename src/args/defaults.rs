pub(super) const DEFAULT_API_URL: &str = "http://localhost:8000";
pub(super) const DEFAULT_TIMEOUT: &str = "10s";
/// Device list polling interval.
pub(super) const DEFAULT_REFRESH: &str = "30s";
/// Location points requested per device selection.
pub(super) const DEFAULT_HISTORY_LIMIT: &str = "100";
pub(super) const DEFAULT_WINDOW: &str = "24h";
pub(super) const DEFAULT_CUSTOM_HOURS: &str = "12";
