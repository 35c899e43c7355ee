//! Standardized error handling patterns for HTTP and network failures

use crate::error::PublishError;
use reqwest::StatusCode;

/// Standard error handler for release server HTTP responses
pub struct HttpErrorHandler;

impl HttpErrorHandler {
    /// Handle asset upload HTTP errors with standardized messages
    pub fn handle_upload_error(status: StatusCode, error_text: &str, context: &str) -> PublishError {
        let error_msg = match status.as_u16() {
            400 => format!("Bad request during {}: {}", context, error_text),
            401 => format!("Authentication failed during {}: {}", context, error_text),
            403 => format!("Permission denied for {}: {}", context, error_text),
            404 => format!("Release not found for {}: {}", context, error_text),
            413 => format!("Chunk too large for {}: {}", context, error_text),
            500 => format!("Release server error during {}: {}", context, error_text),
            502 | 503 => format!("Release server unavailable during {}: {}", context, error_text),
            507 => format!("Release server out of storage during {}: {}", context, error_text),
            _ => format!("{} failed (status {}): {}", context, status, error_text),
        };

        PublishError::Upload(error_msg)
    }

    /// Handle login HTTP errors
    pub fn handle_auth_error(status: StatusCode, error_text: &str) -> PublishError {
        let error_msg = match status.as_u16() {
            400 => "Invalid login request parameters".to_string(),
            401 => "Invalid credentials provided".to_string(),
            403 => "Access denied - insufficient permissions".to_string(),
            404 => "Login endpoint not found".to_string(),
            _ => format!("Login failed (status {}): {}", status, error_text),
        };

        PublishError::Auth(error_msg)
    }

    /// Handle release listing/creation HTTP errors
    pub fn handle_release_error(status: StatusCode, error_text: &str, operation: &str) -> PublishError {
        let error_msg = match status.as_u16() {
            401 => format!("Unauthorized to perform {}: {}", operation, error_text),
            403 => format!("Forbidden: insufficient permissions for {}: {}", operation, error_text),
            404 => format!("Resource not found for {}: {}", operation, error_text),
            409 => format!("Release already exists: {}", error_text),
            429 => format!("Rate limited during {}: {}", operation, error_text),
            500 => format!("Release server error during {}: {}", operation, error_text),
            502 | 503 => format!("Release server unavailable for {}: {}", operation, error_text),
            _ => format!("{} failed (status {}): {}", operation, status, error_text),
        };

        PublishError::Release(error_msg)
    }
}

/// Network error categorization and handling
pub struct NetworkErrorHandler;

impl NetworkErrorHandler {
    /// Categorize and format network errors with helpful context
    pub fn handle_network_error(error: &reqwest::Error, context: &str) -> PublishError {
        if error.is_timeout() {
            PublishError::Network(format!("{} timeout: {}", context, error))
        } else if error.is_connect() {
            PublishError::Network(format!("Connection error during {}: {}", context, error))
        } else if error.to_string().contains("dns") {
            PublishError::Network(format!("DNS resolution error for {}: {}", context, error))
        } else if error.to_string().contains("certificate") {
            PublishError::Network(format!("TLS certificate error during {}: {}", context, error))
        } else {
            PublishError::Network(format!("{} network error: {}", context, error))
        }
    }
}
