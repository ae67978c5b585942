use std::path::PathBuf;
use std::time::Duration;

use rand::RngCore;

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 8082;
pub const MAX_CONTENT_LENGTH: usize = 16 * 1024; // 16KB
pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com/emails";
pub const DEFAULT_SENDER_EMAIL: &str = "onboarding@resend.dev";
pub const DEFAULT_SENDER_NAME: &str = "Estada Contact Form";
pub const DEFAULT_TEST_EMAIL: &str = "andrejt@estada.dev";
pub const DEFAULT_RECIPIENTS: [&str; 3] = [
    "andrejt@estada.dev",
    "krstem@estada.dev",
    "filipm@estada.dev",
];

#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub requests: u32,
    pub window: Duration,
}

#[derive(Clone, Debug)]
pub struct EmailConfig {
    pub resend_api_key: Option<String>,
    pub resend_api_url: String,
    pub sender_email: String,
    pub sender_name: String,
    /// While in dev mode every message goes to `test_email` only, the
    /// provider refuses other recipients until the domain is verified.
    pub dev_mode: bool,
    pub test_email: String,
    pub recipient_emails: Vec<String>,
}

impl EmailConfig {
    pub fn recipients(&self) -> Vec<String> {
        if self.dev_mode {
            vec![self.test_email.clone()]
        } else {
            self.recipient_emails.clone()
        }
    }

    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.sender_name, self.sender_email)
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub debug: bool,
    pub secret_key: Vec<u8>,
    pub csrf_time_limit: Duration,
    pub max_content_length: usize,
    pub static_dir: PathBuf,
    pub frontend_url: Option<String>,
    pub sentry_dsn: Option<String>,
    pub rate_limit: RateLimitConfig,
    pub email: EmailConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let secret_key = match get("SECRET_KEY") {
            Some(key) => key.into_bytes(),
            None => {
                tracing::warn!("SECRET_KEY not set, generating a random key; csrf tokens will not survive restarts");
                let mut key = vec![0u8; 24];
                rand::thread_rng().fill_bytes(&mut key);
                key
            }
        };

        let recipient_emails = match get("RECIPIENT_EMAILS") {
            Some(list) => list
                .split(',')
                .map(|addr| addr.trim().to_string())
                .filter(|addr| !addr.is_empty())
                .collect(),
            None => DEFAULT_RECIPIENTS.iter().map(|addr| addr.to_string()).collect(),
        };

        let rate_limit = RateLimitConfig {
            enabled: parse_flag(&get, "RATE_LIMIT_ENABLED", true)?,
            requests: parse_number(&get, "RATE_LIMIT_REQUESTS", 5u32)?,
            window: Duration::from_secs(parse_number(&get, "RATE_LIMIT_WINDOW", 60u64)?),
        };
        if rate_limit.enabled && (rate_limit.requests == 0 || rate_limit.window.is_zero()) {
            return Err(ConfigError::Invalid {
                key: "RATE_LIMIT_REQUESTS".to_string(),
                message: "rate limit requests and window must be greater than zero".to_string(),
            });
        }

        Ok(Config {
            port: parse_number(&get, "PORT", DEFAULT_PORT)?,
            debug: parse_flag(&get, "APP_DEBUG", false)?,
            secret_key,
            csrf_time_limit: Duration::from_secs(parse_number(&get, "CSRF_TIME_LIMIT", 3600u64)?),
            max_content_length: MAX_CONTENT_LENGTH,
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("frontend/dist")),
            frontend_url: get("FRONTEND_URL"),
            sentry_dsn: get("SENTRY_DSN"),
            rate_limit,
            email: EmailConfig {
                resend_api_key: get("RESEND_API_KEY"),
                resend_api_url: get("RESEND_API_URL")
                    .unwrap_or_else(|| DEFAULT_RESEND_API_URL.to_string()),
                sender_email: get("SENDER_EMAIL")
                    .unwrap_or_else(|| DEFAULT_SENDER_EMAIL.to_string()),
                sender_name: get("SENDER_NAME")
                    .unwrap_or_else(|| DEFAULT_SENDER_NAME.to_string()),
                dev_mode: parse_flag(&get, "DEV_MODE", true)?,
                test_email: get("TEST_EMAIL").unwrap_or_else(|| DEFAULT_TEST_EMAIL.to_string()),
                recipient_emails,
            },
        })
    }
}

fn parse_flag<G>(get: &G, key: &str, default: bool) -> Result<bool, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => match raw.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid {
                key: key.to_string(),
                message: format!("expected a boolean, got '{}'", raw),
            }),
        },
    }
}

fn parse_number<G, T>(get: &G, key: &str, default: T) -> Result<T, ConfigError>
where
    G: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw.parse::<T>().map_err(|e| ConfigError::Invalid {
            key: key.to_string(),
            message: format!("'{}': {}", raw, e),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8082);
        assert!(!config.debug);
        assert_eq!(config.secret_key.len(), 24);
        assert_eq!(config.csrf_time_limit, Duration::from_secs(3600));
        assert_eq!(config.max_content_length, 16 * 1024);
        assert!(config.rate_limit.enabled);
        assert_eq!(config.rate_limit.requests, 5);
        assert_eq!(config.rate_limit.window, Duration::from_secs(60));
        assert!(config.email.dev_mode);
        assert!(config.email.resend_api_key.is_none());
        assert_eq!(config.email.sender_email, "onboarding@resend.dev");
        assert_eq!(config.email.recipient_emails.len(), 3);
        assert_eq!(config.email.test_email, DEFAULT_TEST_EMAIL);
        assert!(config.email.test_email.ends_with("@estada.dev"));
    }

    #[test]
    fn dev_mode_sends_only_to_test_email() {
        let config = config_from(&[("TEST_EMAIL", "me@example.com")]).unwrap();
        assert_eq!(config.email.recipients(), vec!["me@example.com".to_string()]);

        let config = config_from(&[
            ("DEV_MODE", "False"),
            ("RECIPIENT_EMAILS", "a@estada.dev, b@estada.dev,"),
        ])
        .unwrap();
        assert_eq!(
            config.email.recipients(),
            vec!["a@estada.dev".to_string(), "b@estada.dev".to_string()]
        );
    }

    #[test]
    fn from_header_combines_name_and_address() {
        let config = config_from(&[("SENDER_NAME", "Estada"), ("SENDER_EMAIL", "contact@estada.dev")]).unwrap();
        assert_eq!(config.email.from_header(), "Estada <contact@estada.dev>");
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = config_from(&[("RESEND_API_KEY", "  "), ("PORT", "")]).unwrap();
        assert!(config.email.resend_api_key.is_none());
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));

        let err = config_from(&[("RATE_LIMIT_ENABLED", "maybe")]).unwrap_err();
        assert!(err.to_string().contains("RATE_LIMIT_ENABLED"));
    }

    #[test]
    fn zero_rate_limit_is_rejected_only_when_enabled() {
        assert!(config_from(&[("RATE_LIMIT_REQUESTS", "0")]).is_err());
        assert!(config_from(&[("RATE_LIMIT_REQUESTS", "0"), ("RATE_LIMIT_ENABLED", "false")]).is_ok());
    }
}
