//! Session authentication against the release server

use crate::error::handlers::{HttpErrorHandler, NetworkErrorHandler};
use crate::error::{PublishError, Result};
use crate::server::ServerClient;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    jwt: Option<String>,
}

impl ServerClient {
    /// Exchange credentials for a session token. One login happens per
    /// publish run; any failure here aborts the entire operation.
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let url = self.api_url("login");
        self.output()
            .verbose(&format!("Authenticating against {} as {}", url, username));

        let response = self
            .http_client()
            .post(&url)
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(|e| NetworkErrorHandler::handle_network_error(&e, "login"))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(HttpErrorHandler::handle_auth_error(status, &error_text));
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| PublishError::Auth(format!("Failed to parse login response: {}", e)))?;

        match body.jwt {
            Some(token) if !token.is_empty() => {
                self.output().success("Authentication token obtained");
                Ok(token)
            }
            _ => Err(PublishError::Auth(
                "Login response did not contain a usable token".to_string(),
            )),
        }
    }
}
