//! Common helper functions used across API endpoints

use api_types::ErrorResponse;
use economics::EconomicsError;

/// Map a parse failure of a user supplied identifier to a 400 response.
pub fn invalid_param(error: EconomicsError) -> ErrorResponse {
    tracing::debug!(error = %error, "Rejected query parameter");
    ErrorResponse::invalid_params(error.to_string())
}

/// Create an internal error response with logging
pub fn internal_error(operation: &str, error: impl std::fmt::Display) -> ErrorResponse {
    tracing::error!(operation = operation, error = %error, "Operation failed");
    ErrorResponse::internal_error()
}
