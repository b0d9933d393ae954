use anyhow::anyhow;
use std::time::Duration;

pub struct ApplicationEnv {
    pub log_directory: String,
    pub log_filename: String,

    pub api_base_url: String,
    pub request_timeout: Duration,

    /// Empty token keeps notifications sync idle
    pub auth_token: String,

    pub poll_interval: Duration,
    pub page_limit: u32,
}

impl ApplicationEnv {
    pub fn parse() -> anyhow::Result<Self> {
        let log_directory = Self::env_var("NOTIFIER_SYNC_LOG_DIRECTORY")?;
        let log_filename = Self::env_var("NOTIFIER_SYNC_LOG_FILENAME")?;
        let api_base_url = Self::env_var("NOTIFIER_SYNC_API_BASE_URL")?;
        let request_timeout = Self::env_var_or("NOTIFIER_SYNC_REQUEST_TIMEOUT", "10").parse()?;
        let request_timeout = Duration::from_secs(request_timeout);
        let auth_token = Self::env_var_or("NOTIFIER_SYNC_AUTH_TOKEN", "");
        let poll_interval = Self::env_var_or("NOTIFIER_SYNC_POLL_INTERVAL", "30").parse()?;
        let poll_interval = Duration::from_secs(poll_interval);
        let page_limit = Self::env_var_or("NOTIFIER_SYNC_PAGE_LIMIT", "20").parse()?;

        if poll_interval.is_zero() {
            return Err(anyhow!("NOTIFIER_SYNC_POLL_INTERVAL must be greater than 0"));
        }

        Ok(Self {
            log_directory,
            log_filename,
            api_base_url,
            request_timeout,
            auth_token,
            poll_interval,
            page_limit,
        })
    }

    fn env_var(name: &'static str) -> anyhow::Result<String> {
        std::env::var(name).map_err(|_| anyhow!("environment variable {name} not set"))
    }

    fn env_var_or(name: &'static str, default: &str) -> String {
        std::env::var(name).unwrap_or_else(|_| default.to_string())
    }
}
