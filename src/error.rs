use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Latitude solver did not converge after {iterations} iterations")]
    DidNotConverge { iterations: usize },

    #[error("Unknown CRS: {0}")]
    UnknownCrs(String),

    #[error("Transform failed: {0}")]
    TransformFailed(String),
}

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid search area: {0}")]
    InvalidArea(String),

    #[error("Malformed records: {0}")]
    Json(#[from] serde_json::Error),
}
