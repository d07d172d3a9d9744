use crate::markup::MarkupVersion;

#[derive(Clone)]
pub struct AppConfig {
    /// Yelp Fusion bearer credential. `None` disables API reconciliation.
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub browser_timeout_secs: u64,
    pub browser_headless: bool,
    pub chrome_path: Option<String>,
    pub markup_version: MarkupVersion,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("api_base_url", &self.api_base_url)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("browser_timeout_secs", &self.browser_timeout_secs)
            .field("browser_headless", &self.browser_headless)
            .field("chrome_path", &self.chrome_path)
            .field("markup_version", &self.markup_version)
            .finish()
    }
}
