use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Missing feature `{field}` for `{subject}`")]
    MissingFeature { subject: String, field: &'static str },

    #[error("Weights for model `{model}` sum to {sum}, expected 1.0")]
    InvalidWeights { model: &'static str, sum: f64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
