//! Runtime configuration from CLI flags and environment variables.
//!
//! Only non-secret settings live here. Credentials arrive with each tool call.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use url::Url;

use crate::error::ConfigError;
use crate::github::ApiSettings;
use crate::github::client::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use crate::logging::{DEFAULT_LOG_FILE, DEFAULT_LOG_FILTER};

/// Flags shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Base URL of the GitHub REST API
    #[arg(long, env = "REPO_TOOLKIT_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Timeout applied to each GitHub request, in seconds
    #[arg(long, env = "REPO_TOOLKIT_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_secs: u64,

    /// Append-only diagnostic log file
    #[arg(long, env = "REPO_TOOLKIT_LOG_FILE", default_value = DEFAULT_LOG_FILE, global = true)]
    pub log_file: PathBuf,
}

/// Where diagnostics are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub path: PathBuf,
    /// Filter used when `RUST_LOG` is unset.
    pub default_filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_LOG_FILE),
            default_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api: ApiSettings,
    pub log: LogSettings,
}

impl ConfigArgs {
    pub fn into_settings(self) -> Result<Settings, ConfigError> {
        let base_url = validate_api_url(&self.api_url)?;

        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Settings {
            api: ApiSettings {
                base_url,
                request_timeout: Duration::from_secs(self.timeout_secs),
            },
            log: LogSettings {
                path: self.log_file,
                ..LogSettings::default()
            },
        })
    }
}

fn validate_api_url(raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidApiUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serial_test::serial;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        config: ConfigArgs,
    }

    fn parse(args: &[&str]) -> ConfigArgs {
        let mut argv = vec!["repo-toolkit"];
        argv.extend_from_slice(args);
        TestCli::parse_from(argv).config
    }

    const ENV_VARS: [&str; 3] = [
        "REPO_TOOLKIT_API_URL",
        "REPO_TOOLKIT_TIMEOUT_SECS",
        "REPO_TOOLKIT_LOG_FILE",
    ];

    #[test]
    #[serial]
    fn test_defaults() {
        temp_env::with_vars_unset(ENV_VARS, || {
            let settings = parse(&[]).into_settings().unwrap();
            assert_eq!(settings.api, ApiSettings::default());
            assert_eq!(settings.log, LogSettings::default());
        });
    }

    #[test]
    #[serial]
    fn test_environment_overrides_defaults() {
        temp_env::with_vars(
            [
                ("REPO_TOOLKIT_API_URL", Some("https://ghe.example.com/api/v3/")),
                ("REPO_TOOLKIT_TIMEOUT_SECS", Some("5")),
                ("REPO_TOOLKIT_LOG_FILE", Some("/tmp/tools.log")),
            ],
            || {
                let settings = parse(&[]).into_settings().unwrap();
                assert_eq!(settings.api.base_url, "https://ghe.example.com/api/v3");
                assert_eq!(settings.api.request_timeout, Duration::from_secs(5));
                assert_eq!(settings.log.path, PathBuf::from("/tmp/tools.log"));
            },
        );
    }

    #[test]
    #[serial]
    fn test_flags_override_environment() {
        temp_env::with_var("REPO_TOOLKIT_TIMEOUT_SECS", Some("5"), || {
            let settings = parse(&["--timeout-secs", "9"]).into_settings().unwrap();
            assert_eq!(settings.api.request_timeout, Duration::from_secs(9));
        });
    }

    #[test]
    #[serial]
    fn test_zero_timeout_rejected() {
        temp_env::with_vars_unset(ENV_VARS, || {
            let err = parse(&["--timeout-secs", "0"]).into_settings().unwrap_err();
            assert!(matches!(err, ConfigError::ZeroTimeout));
        });
    }

    #[test]
    #[serial]
    fn test_malformed_api_url_fails_at_startup() {
        temp_env::with_vars_unset(ENV_VARS, || {
            let err = parse(&["--api-url", "https://:::"]).into_settings().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidApiUrl { ref url, .. } if url == "https://:::"));
        });
    }

    #[test]
    fn test_api_url_validation() {
        assert!(validate_api_url("ftp://example.com").is_err());
        assert!(validate_api_url("https://").is_err());
        assert!(validate_api_url("https://exa mple.com").is_err());
        assert!(validate_api_url("http://a b").is_err());
        assert!(validate_api_url("https://:::").is_err());
        assert!(validate_api_url("mailto:octocat@example.com").is_err());
        assert_eq!(
            validate_api_url(" https://GHE.example.com/api/v3/ ").unwrap(),
            "https://ghe.example.com/api/v3"
        );
        assert_eq!(
            validate_api_url("http://127.0.0.1:8080/").unwrap(),
            "http://127.0.0.1:8080"
        );
    }
}
