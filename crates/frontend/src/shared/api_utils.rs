//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using `port` for the ingestion service.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base(port: u16) -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, port)
}

/// Join a base URL and an API path without doubling or dropping the slash
///
/// # Example
/// ```rust
/// use frontend::shared::api_utils::join_url;
/// assert_eq!(join_url("http://localhost:3000/", "/healthz"), "http://localhost:3000/healthz");
/// ```
pub fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://localhost:3000", "/api/preview_csv"),
            "http://localhost:3000/api/preview_csv"
        );
        assert_eq!(
            join_url("http://localhost:3000/", "api/import_csv"),
            "http://localhost:3000/api/import_csv"
        );
        assert_eq!(join_url("", "/healthz"), "/healthz");
    }

    #[test]
    fn test_absolute_path_wins() {
        assert_eq!(
            join_url("http://localhost:3000", "https://ingest.example.com/healthz"),
            "https://ingest.example.com/healthz"
        );
    }
}
