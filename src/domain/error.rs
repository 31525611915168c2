use thiserror::Error;

#[derive(Error, Debug)]
pub enum PokedexError {
    #[error("HTTP {code} while requesting {url}")]
    RemoteStatus { code: u16, url: String },

    #[error("Network error: {reason}")]
    RemoteUnavailable { reason: String },

    #[error("Invalid JSON returned from {url}")]
    Decode { url: String },

    #[error("No image URL was provided")]
    MissingUrl,

    #[error("Cry playback error: {0}")]
    Playback(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl From<reqwest::Error> for PokedexError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return PokedexError::RemoteStatus {
                code: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            };
        }

        let reason = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            format!("connection failed: {}", err)
        } else {
            err.to_string()
        };
        PokedexError::RemoteUnavailable { reason }
    }
}
