use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrubError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input table error: {0}")]
    Input(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Enrichment error: {message}")]
    Enrichment { message: String },

    #[error("Enrichment request failed: {0}")]
    EnrichmentHttp(#[from] reqwest::Error),

    #[error("Enrichment payload invalid: {0}")]
    EnrichmentDecode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScrubError>;
