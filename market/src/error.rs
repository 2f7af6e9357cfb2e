use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Not enough samples to run the computation. Callers usually skip the
    /// instrument rather than treat it as non-trending.
    #[error("insufficient data: need at least {required} samples, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
