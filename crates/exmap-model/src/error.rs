use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid thresholds: valid={valid}, needs_review={needs_review}")]
    InvalidThresholds { valid: f64, needs_review: f64 },
}

pub type Result<T> = std::result::Result<T, ModelError>;
