use thiserror::Error;

/// Failure kinds of the credential exchange, one per stage boundary.
///
/// Every variant is terminal for a single exchange attempt. Callers get the
/// first failure verbatim, so a rejected password is distinguishable from a
/// misconfigured role trust or an unreachable network. Messages never carry
/// the password, the session token, or assertion contents.
#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("invalid okta url: expected an absolute url with a scheme and host")]
    InvalidUrl,

    #[error("network failure during credential exchange: {0}")]
    Network(#[source] reqwest::Error),

    #[error("okta authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("unexpected response format: {0}")]
    UnexpectedResponseFormat(String),

    #[error("no SAMLResponse form field found in the okta response document")]
    SamlElementNotFound,

    #[error("saml assertion is not valid base64")]
    InvalidSamlEncoding,

    #[error("saml assertion is not well-formed xml")]
    InvalidSamlXml,

    #[error("saml assertion carries no aws role attribute")]
    MissingRoleAttribute,

    #[error("aws role attribute is not a principal/role arn pair")]
    MalformedArnPair,

    #[error("aws rejected the role assumption: {0}")]
    RoleAssumptionRejected(String),
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> ExchangeError {
        // the sessionCookieRedirect url carries the session token in its
        // query string, so transport errors are stripped of their url
        ExchangeError::Network(err.without_url())
    }
}
