use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Invalid input: no items")]
    Empty,
    #[error("Invalid input: non-positive dimension for item {index} ({width}x{height})")]
    NonPositiveDimension { index: usize, width: f64, height: f64 },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Internal invariant violated: {0}")]
    InternalInvariant(String),
}

impl LayoutError {
    /// True for caller mistakes (bad items or configuration). These are never transient.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, Self::InternalInvariant(_))
    }
}

pub type Result<T> = std::result::Result<T, LayoutError>;
