use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LoadboardError {
    #[error("Cannot parse config: {0}")]
    ConfigParsingError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Geocoding error: {0}")]
    GeocodingError(String),
    #[error("Load source error: {0}")]
    SourceError(String),
    #[error("Load '{0}' not found")]
    LoadNotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<std::io::Error> for LoadboardError {
    fn from(err: std::io::Error) -> Self {
        LoadboardError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for LoadboardError {
    fn from(err: serde_json::Error) -> Self {
        LoadboardError::SourceError(format!("invalid JSON: {err}"))
    }
}
