use thiserror::Error;

#[derive(Error, Debug)]
pub enum GradeError {
    #[error("invalid GitHub URL: {0}")]
    InvalidUrl(String),

    #[error("repository not found: {0}")]
    NotFound(String),

    #[error("GitHub API rate limit exceeded{}", reset_hint(.reset_at))]
    RateLimited {
        reset_at: Option<chrono::DateTime<chrono::Utc>>,
    },

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response from GitHub: {0}")]
    MalformedResponse(String),

    #[error("GitHub returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("server error: {0}")]
    Server(String),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

fn reset_hint(reset_at: &Option<chrono::DateTime<chrono::Utc>>) -> String {
    match reset_at {
        Some(at) => format!("; resets at {}", at.format("%H:%M UTC")),
        None => String::new(),
    }
}

impl From<reqwest::Error> for GradeError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            GradeError::MalformedResponse(error.to_string())
        } else {
            GradeError::Network(error.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, GradeError>;
