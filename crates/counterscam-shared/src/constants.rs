/// Application name
pub const APP_NAME: &str = "CounterScam";

/// Default base URL of the detection / admin service
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// History capacity used by the admin dashboard (in-memory only)
pub const DASHBOARD_MAX_HISTORY: usize = 30;

/// History capacity used by the mobile app (durable)
pub const MOBILE_MAX_HISTORY: usize = 50;

/// Minimum trimmed length of a URL scan payload (scan enabled when > 6)
pub const MIN_URL_LEN: usize = 7;

/// Minimum trimmed length of a message scan payload
pub const MIN_MESSAGE_LEN: usize = 10;

/// Minimum trimmed length of a reported value
pub const MIN_REPORT_LEN: usize = 7;

/// Separator used when rendering reasons on a single line
pub const REASONS_SEPARATOR: &str = " • ";

/// Service endpoints
pub const PATH_LOGIN: &str = "/admin/login";
pub const PATH_STATS: &str = "/admin/stats";
pub const PATH_RECENT_CHECKS: &str = "/admin/recent-checks";
pub const PATH_ANALYTICS: &str = "/admin/analytics";
pub const PATH_CHECK_URL: &str = "/check_url/";
pub const PATH_CHECK_MESSAGE: &str = "/check_message/";
pub const PATH_REPORT: &str = "/report/";
