pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_TOKEN_KEY: &str = "accessToken";
pub const DEFAULT_MAX_IMAGES: usize = 4;
pub const DEFAULT_NOTICE_TTL_MS: u32 = 2500;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Runtime settings for the client. The browser fills these from `<meta>`
/// tags; tests build them directly.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base: String,
    /// Storage key holding the bearer token.
    pub token_key: String,
    pub max_images: usize,
    pub notice_ttl_ms: u32,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            max_images: DEFAULT_MAX_IMAGES,
            notice_ttl_ms: DEFAULT_NOTICE_TTL_MS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Override the API base. Blank values keep the current one.
    pub fn with_api_base(mut self, base: &str) -> Self {
        let base = base.trim();
        if !base.is_empty() {
            self.api_base = base.trim_end_matches('/').to_string();
        }
        self
    }

    pub fn with_log_level(mut self, level: &str) -> Self {
        let level = level.trim();
        if !level.is_empty() {
            self.log_level = level.to_string();
        }
        self
    }

    /// Full URL for an API path such as `/post/1`.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), endpoint)
    }

    /// Turn a relative image URL from the backend into something an `<img>`
    /// can load. Absolute, blob and data URLs pass through.
    pub fn resolve_url(&self, relative: &str) -> String {
        const PASSTHROUGH: [&str; 4] = ["http://", "https://", "blob:", "data:"];
        if PASSTHROUGH.iter().any(|p| relative.starts_with(p)) {
            return relative.to_string();
        }
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            relative.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_urls_with_a_single_slash() {
        let cfg = ClientConfig::default().with_api_base("http://api.test/");
        assert_eq!(cfg.resolve_url("static/a.png"), "http://api.test/static/a.png");
        assert_eq!(cfg.resolve_url("/static/a.png"), "http://api.test/static/a.png");
    }

    #[test]
    fn absolute_and_preview_urls_pass_through() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.resolve_url("blob:http://x/1"), "blob:http://x/1");
        assert_eq!(cfg.resolve_url("https://cdn/x.png"), "https://cdn/x.png");
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let cfg = ClientConfig::default().with_api_base("  ").with_log_level("");
        assert_eq!(cfg.api_base, DEFAULT_API_BASE);
        assert_eq!(cfg.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(cfg.endpoint_url("/post/1"), "http://localhost:8000/post/1");
    }
}
