/// Result type alias
pub type Result<T> = std::result::Result<T, SacError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SacError {
    /// No sample of the input could produce a valid model
    #[error("no valid model can be built from {points} points")]
    DegenerateInput { points: usize },

    /// A run parameter is out of its domain
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
