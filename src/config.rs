use std::{env, time::Duration};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_UNSPLASH_BASE_URL: &str = "https://api.unsplash.com";
pub const DEFAULT_PLACEHOLDER_IMAGE_BASE_URL: &str = "https://loremflickr.com";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct UnsplashConfig {
    pub access_key: Option<String>,
    pub base_url: String,
}

/// Everything the server needs from its environment, read once at startup
/// and handed to the services that need it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub gemini: GeminiConfig,
    pub unsplash: UnsplashConfig,
    pub placeholder_image_base_url: String,
    /// Applied to every outbound call when set. Unset means calls may hang.
    pub http_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
            gemini: GeminiConfig {
                api_key: None,
                model: DEFAULT_GEMINI_MODEL.to_string(),
                base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            },
            unsplash: UnsplashConfig {
                access_key: None,
                base_url: DEFAULT_UNSPLASH_BASE_URL.to_string(),
            },
            placeholder_image_base_url: DEFAULT_PLACEHOLDER_IMAGE_BASE_URL.to_string(),
            http_timeout: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset,
    /// so `GEMINI_API_KEY=` behaves like a missing key.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("Invalid PORT value '{}', using {}", raw, PORT);
                PORT
            }),
            None => PORT,
        };

        let http_timeout = get("HTTP_TIMEOUT_SECS").and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
            _ => {
                log::warn!("Invalid HTTP_TIMEOUT_SECS value '{}', outbound calls have no timeout", raw);
                None
            }
        });

        Self {
            host: get("HOST").unwrap_or(defaults.host),
            port,
            gemini: GeminiConfig {
                api_key: get("GEMINI_API_KEY"),
                model: get("GEMINI_MODEL").unwrap_or(defaults.gemini.model),
                base_url: get("GEMINI_BASE_URL").unwrap_or(defaults.gemini.base_url),
            },
            unsplash: UnsplashConfig {
                access_key: get("UNSPLASH_ACCESS_KEY"),
                base_url: get("UNSPLASH_BASE_URL").unwrap_or(defaults.unsplash.base_url),
            },
            placeholder_image_base_url: get("PLACEHOLDER_IMAGE_BASE_URL")
                .unwrap_or(defaults.placeholder_image_base_url),
            http_timeout,
        }
    }

    pub fn with_gemini_key(mut self, key: impl Into<String>) -> Self {
        self.gemini.api_key = Some(key.into());
        self
    }

    pub fn with_unsplash_key(mut self, key: impl Into<String>) -> Self {
        self.unsplash.access_key = Some(key.into());
        self
    }

    /// Shared builder for the outbound clients.
    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.http_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

/// Shows the first and last four characters of a secret.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}***{}", head, tail)
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert!(config.gemini.api_key.is_none());
        assert!(config.unsplash.access_key.is_none());
        assert_eq!(config.gemini.model, DEFAULT_GEMINI_MODEL);
        assert!(config.http_timeout.is_none());
    }

    #[test]
    fn test_empty_keys_count_as_missing() {
        let config = AppConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", ""),
            ("UNSPLASH_ACCESS_KEY", "   "),
        ]));
        assert!(config.gemini.api_key.is_none());
        assert!(config.unsplash.access_key.is_none());
    }

    #[test]
    fn test_values_are_read() {
        let config = AppConfig::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("GEMINI_API_KEY", "gem-key"),
            ("GEMINI_MODEL", "gemini-pro"),
            ("UNSPLASH_ACCESS_KEY", "unsplash-key"),
            ("HTTP_TIMEOUT_SECS", "30"),
        ]));
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.gemini.api_key.as_deref(), Some("gem-key"));
        assert_eq!(config.gemini.model, "gemini-pro");
        assert_eq!(config.unsplash.access_key.as_deref(), Some("unsplash-key"));
        assert_eq!(config.http_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_bad_numbers_fall_back() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PORT", "eighty"),
            ("HTTP_TIMEOUT_SECS", "0"),
        ]));
        assert_eq!(config.port, 8080);
        assert!(config.http_timeout.is_none());
    }

    #[test]
    #[serial]
    fn test_from_env_reads_process_environment() {
        env::set_var("GEMINI_MODEL", "gemini-from-env");
        let config = AppConfig::from_env();
        env::remove_var("GEMINI_MODEL");
        assert_eq!(config.gemini.model, "gemini-from-env");
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("abcd1234efgh"), "abcd***efgh");
        assert_eq!(mask_key("short"), "***");
    }

    #[test]
    fn test_mask_key_non_ascii() {
        assert_eq!(mask_key("ключ-для-тест"), "ключ***тест");
        assert_eq!(mask_key("éééééééé"), "***");
    }
}
