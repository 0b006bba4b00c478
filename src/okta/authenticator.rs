use crate::error::ExchangeError;
use crate::http::api_client::ApiClient;
use crate::okta::origin::OktaOrigin;
use log::debug;
use serde::Deserialize;

/// Trades a username and password for an okta session token.
///
/// Only the primary authentication step of okta's authn API is supported.
/// A transaction that asks for more (MFA enrollment, an MFA challenge, a
/// password reset) never yields a session token and is reported as an
/// authentication failure.
///
/// See <https://developer.okta.com/docs/reference/api/authn/#primary-authentication>
pub struct Authenticator {
    client: ApiClient,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct AuthnResponse {
    session_token: Option<String>,
    status: Option<String>,
}

impl AuthnResponse {
    /// Tries to return the session token.
    ///
    /// This will only be filled if okta considered the credentials alone
    /// sufficient.
    fn session_token(&self) -> Option<String> {
        self.session_token.clone()
    }

    fn transaction_state(&self) -> String {
        self.status.clone().unwrap_or_else(|| String::from("UNKNOWN"))
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OktaApiError {
    error_code: String,
    error_summary: String,
}

impl OktaApiError {
    /// Returns an error summary
    pub fn summary(&self) -> String {
        format!(
            "okta error code {} - {}",
            self.error_code, self.error_summary
        )
    }
}

impl Authenticator {
    pub fn new() -> Result<Authenticator, ExchangeError> {
        Ok(Authenticator {
            client: ApiClient::new()?,
        })
    }

    /// Runs primary authentication against `{origin}/api/v1/authn`.
    pub async fn authenticate(
        &self,
        origin: &OktaOrigin,
        username: &str,
        password: &str,
    ) -> Result<String, ExchangeError> {
        let url = origin.url_for("/api/v1/authn")?;
        let json = serde_json::json!({
            "username": username,
            "password": password,
        });

        debug!("requesting a session token from {}", origin);
        let response = self.client.post_json(url.as_str(), &json).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let reason = serde_json::from_str::<OktaApiError>(body.as_str())
                .map(|err| err.summary())
                .unwrap_or_else(|_| format!("okta returned status {}", status));

            return Err(ExchangeError::AuthenticationFailed(reason));
        }

        let response: AuthnResponse = serde_json::from_str(body.as_str()).map_err(|_| {
            ExchangeError::UnexpectedResponseFormat(String::from(
                "okta authn response body is not valid json",
            ))
        })?;

        response.session_token().ok_or_else(|| {
            ExchangeError::AuthenticationFailed(format!(
                "okta did not issue a session token (transaction state {})",
                response.transaction_state()
            ))
        })
    }
}
