use crate::error::GradeError;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GradeConfig {
    pub server: Option<ServerConfig>,
    pub github: Option<GithubConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubConfig {
    pub api_base: Option<String>,
    pub timeout_secs: Option<u64>,
    pub token: Option<String>,
}

/// Fully resolved settings for the GitHub client.
#[derive(Debug, Clone, PartialEq)]
pub struct GithubSettings {
    pub api_base: String,
    pub timeout: Duration,
    pub token: Option<String>,
}

impl GradeConfig {
    pub fn host(&self) -> String {
        self.server
            .as_ref()
            .map(|server| server.host.clone())
            .unwrap_or_else(default_host)
    }

    pub fn port(&self) -> u16 {
        self.server
            .as_ref()
            .map(|server| server.port)
            .unwrap_or(DEFAULT_PORT)
    }

    /// Resolves client settings; `env_token` wins over a token in the file.
    pub fn github_settings(&self, env_token: Option<String>) -> GithubSettings {
        let github = self.github.as_ref();
        let api_base = github
            .and_then(|github| github.api_base.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let timeout_secs = github
            .and_then(|github| github.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let token = env_token
            .filter(|token| !token.trim().is_empty())
            .or_else(|| github.and_then(|github| github.token.clone()));

        GithubSettings {
            api_base: api_base.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
            token,
        }
    }

    pub fn validate(&self) -> Result<(), GradeError> {
        if self.port() == 0 {
            return Err(GradeError::ConfigParse(
                "server.port must be between 1 and 65535".to_string(),
            ));
        }
        if let Some(github) = &self.github {
            if github.timeout_secs == Some(0) {
                return Err(GradeError::ConfigParse(
                    "github.timeout_secs must be greater than zero".to_string(),
                ));
            }
            if let Some(api_base) = &github.api_base {
                if !(api_base.starts_with("https://") || api_base.starts_with("http://")) {
                    return Err(GradeError::ConfigParse(format!(
                        "github.api_base must be an http(s) URL: {api_base}"
                    )));
                }
            }
        }
        Ok(())
    }
}
