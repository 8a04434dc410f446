use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum AnalysisError {
    InvalidUpload(String),
    InvalidCsv(String),
    ApiError(String),
    ParseError(String),
    ConfigError(String),
    NetworkError(String),
}

impl AnalysisError {
    /// Bad input is the caller's fault; everything else is ours.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AnalysisError::InvalidUpload(_) | AnalysisError::InvalidCsv(_) => {
                StatusCode::BAD_REQUEST
            }
            AnalysisError::ApiError(_)
            | AnalysisError::ParseError(_)
            | AnalysisError::ConfigError(_)
            | AnalysisError::NetworkError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InvalidUpload(msg) => write!(f, "Invalid upload: {}", msg),
            AnalysisError::InvalidCsv(msg) => write!(f, "Invalid CSV: {}", msg),
            AnalysisError::ApiError(msg) => write!(f, "API error: {}", msg),
            AnalysisError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AnalysisError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            AnalysisError::NetworkError(msg) => write!(f, "Network error: {}", msg),
        }
    }
}

impl std::error::Error for AnalysisError {}

impl From<csv::Error> for AnalysisError {
    fn from(err: csv::Error) -> Self {
        AnalysisError::InvalidCsv(err.to_string())
    }
}

impl From<actix_multipart::MultipartError> for AnalysisError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        AnalysisError::InvalidUpload(err.to_string())
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            AnalysisError::NetworkError(err.to_string())
        } else {
            AnalysisError::ApiError(err.to_string())
        }
    }
}

impl From<reqwest::header::ToStrError> for AnalysisError {
    fn from(err: reqwest::header::ToStrError) -> Self {
        AnalysisError::ParseError(err.to_string())
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        AnalysisError::ConfigError(err.to_string())
    }
}

impl From<actix_web::mime::FromStrError> for AnalysisError {
    fn from(err: actix_web::mime::FromStrError) -> Self {
        AnalysisError::ParseError(err.to_string())
    }
}
