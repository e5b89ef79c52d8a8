//! Backend endpoint configuration injected into the submission transport.
//!
//! # Invariants
//! - The base URL never ends with `/`.
//! - Endpoint URLs are always `<base>/api/<endpoint>`.

/// Base URL used when no override is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Remote endpoint for single-employee slip generation.
pub const ENDPOINT_SINGLE_SLIP: &str = "generate-salary-slip-single";
/// Remote endpoint for whole-plant slip generation.
pub const ENDPOINT_BATCH_SLIPS: &str = "generate-salary-slips-batch";
/// Remote endpoint for bulk report mailing.
pub const ENDPOINT_UPLOAD_REPORT: &str = "upload-report";

/// Backend location for the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

impl BackendConfig {
    /// Uses `override_url` when it is non-blank, otherwise the default.
    pub fn new(override_url: Option<&str>) -> Self {
        match override_url.map(normalize_base_url) {
            Some(url) if !url.is_empty() => Self { base_url: url },
            _ => Self::default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for one API endpoint.
    pub fn api_url(&self, endpoint: &str) -> String {
        format!("{}/api/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.strip_suffix('/').unwrap_or(trimmed).to_string()
}

#[cfg(test)]
mod tests {
    use super::{BackendConfig, ENDPOINT_BATCH_SLIPS};

    #[test]
    fn override_is_trimmed_and_loses_trailing_slash() {
        let config = BackendConfig::new(Some("  http://10.0.0.5:9000/ "));
        assert_eq!(config.base_url(), "http://10.0.0.5:9000");
        assert_eq!(
            config.api_url(ENDPOINT_BATCH_SLIPS),
            "http://10.0.0.5:9000/api/generate-salary-slips-batch"
        );
    }

    #[test]
    fn blank_override_falls_back_to_default() {
        assert_eq!(BackendConfig::new(Some("   ")), BackendConfig::default());
        assert_eq!(
            BackendConfig::new(None).api_url("health"),
            "http://localhost:8000/api/health"
        );
    }
}
