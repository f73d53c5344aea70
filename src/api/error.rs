use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;

use crate::models::FieldError;
use crate::services::SearchError;

pub const MISSING_API_KEY_MESSAGE: &str = "Google Places API not configured. Please add GOOGLE_PLACES_API_KEY to the environment or places.api_key to config.toml";

pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search restaurants. Please try again.";

#[derive(Debug)]
pub enum ApiError {
    ValidationError {
        message: String,
        details: Vec<FieldError>,
    },

    NotFound(String),

    Configuration(String),

    ExternalApiError { service: String, message: String },
}

/// Error body; `details` is only present for validation failures.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldError>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::ValidationError { message, .. } => {
                write!(f, "Validation error: {}", message)
            }
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            ApiError::ExternalApiError { service, message } => {
                write!(f, "{} error: {}", service, message)
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            ApiError::ValidationError { message, details } => {
                (StatusCode::BAD_REQUEST, message, details)
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, Vec::new()),
            ApiError::Configuration(msg) => {
                tracing::error!("Configuration error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    MISSING_API_KEY_MESSAGE.to_string(),
                    Vec::new(),
                )
            }
            ApiError::ExternalApiError { service, message } => {
                tracing::warn!("{} API error: {}", service, message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SEARCH_FAILED_MESSAGE.to_string(),
                    Vec::new(),
                )
            }
        };

        (status, Json(ErrorBody { error, details })).into_response()
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Validation(e) => ApiError::ValidationError {
                message: "Invalid query parameters".to_string(),
                details: e.details,
            },
            SearchError::InvalidPlaceId(e) => ApiError::ValidationError {
                message: "Invalid place id".to_string(),
                details: vec![FieldError {
                    field: "place_id",
                    message: e.to_string(),
                }],
            },
            SearchError::Configuration(msg) => ApiError::Configuration(msg),
            SearchError::Provider { status, message } => ApiError::ExternalApiError {
                service: "Google Places".to_string(),
                message: match status {
                    Some(code) => format!("{message} (status {code})"),
                    None => message,
                },
            },
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::ValidationError {
            message: "Invalid query parameters".to_string(),
            details: vec![FieldError {
                field: "query",
                message: rejection.body_text(),
            }],
        }
    }
}

impl ApiError {
    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        ApiError::NotFound(format!("{} {} not found", resource, id))
    }
}
