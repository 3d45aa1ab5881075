use serde::Deserialize;

/// Liveness probe of the ingestion service
pub const HEALTH_PATH: &str = "/healthz";

/// Body of `GET /healthz`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_ok() {
        let body: HealthResponse = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(body.is_ok());
    }

    #[test]
    fn test_health_degraded() {
        let body: HealthResponse = serde_json::from_str(r#"{"status":"degraded"}"#).unwrap();
        assert!(!body.is_ok());
    }
}
