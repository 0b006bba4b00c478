use crate::aws::sts::{StsApi, StsClient, DEFAULT_STS_ENDPOINT};
use crate::aws::Credential;
use crate::error::ExchangeError;
use crate::okta::authenticator::Authenticator;
use crate::okta::origin::OktaOrigin;
use crate::okta::saml::SamlRetriever;
use log::debug;

/// Runs the whole exchange: resolve the okta origin, authenticate for a
/// session token, redeem it for a SAML assertion, assume the AWS role.
///
/// The stages run strictly in sequence, each consuming the previous stage's
/// output, and the first failure aborts the run with its own error kind
/// untouched.
///
/// # Examples
///
/// ```rust
/// use okta2aws::okta::okta_client::OktaClient;
/// let client = OktaClient::new().unwrap();
/// ```
pub struct OktaClient {
    authenticator: Authenticator,
    saml_retriever: SamlRetriever,
    sts: Box<dyn StsApi>,
}

impl OktaClient {
    pub fn new() -> Result<OktaClient, ExchangeError> {
        OktaClient::with_sts_endpoint(String::from(DEFAULT_STS_ENDPOINT))
    }

    /// Points role assumption at a non-default STS endpoint.
    pub fn with_sts_endpoint(endpoint: String) -> Result<OktaClient, ExchangeError> {
        Ok(OktaClient {
            authenticator: Authenticator::new()?,
            saml_retriever: SamlRetriever::new()?,
            sts: Box::new(StsClient::new(endpoint)?),
        })
    }

    /// Call this function to get temporary credentials for the AWS app
    /// behind `app_url`.
    pub async fn aws_credentials(
        &self,
        username: String,
        password: String,
        app_url: String,
    ) -> Result<Credential, ExchangeError> {
        let origin = OktaOrigin::resolve(app_url.as_str())?;

        let session_token = self
            .authenticator
            .authenticate(&origin, username.as_str(), password.as_str())
            .await?;
        debug!("okta issued a session token");

        let assertion = self
            .saml_retriever
            .retrieve(&origin, session_token.as_str(), app_url.as_str())
            .await?;
        debug!("retrieved a saml assertion from {}", origin);

        self.sts.assume_role_with_saml(&assertion).await
    }
}
