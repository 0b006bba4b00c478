use crate::error::ExchangeError;
use serde::{Deserialize, Serialize};

pub mod sts;

/// The principal/role pair okta advertises for an AWS app, in the order it
/// appears in the assertion's role attribute: SAML provider first, IAM role
/// second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamlRole {
    principal_arn: String,
    role_arn: String,
}

impl SamlRole {
    /// Parses the comma-separated attribute text, e.g.
    /// `arn:aws:iam::1111:saml-provider/Okta,arn:aws:iam::1111:role/Admin`.
    pub fn from_attribute_value(value: &str) -> Result<Self, ExchangeError> {
        let split: Vec<&str> = value.trim().split(',').collect();
        if split.len() < 2 {
            return Err(ExchangeError::MalformedArnPair);
        }

        let principal_arn = split[0].trim();
        let role_arn = split[1].trim();
        if principal_arn.is_empty() || role_arn.is_empty() {
            return Err(ExchangeError::MalformedArnPair);
        }

        Ok(SamlRole {
            principal_arn: String::from(principal_arn),
            role_arn: String::from(role_arn),
        })
    }

    pub fn principal_arn(&self) -> String {
        self.principal_arn.clone()
    }

    pub fn role_arn(&self) -> String {
        self.role_arn.clone()
    }
}

/// Temporary credentials as returned by STS, passed through unvalidated.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    secret_access_key: String,
    access_key_id: String,
    session_token: String,
    role_arn: Option<String>,
    expiration: String,
}

impl Credential {
    pub fn secret_access_key(&self) -> String {
        self.secret_access_key.clone()
    }

    pub fn access_key_id(&self) -> String {
        self.access_key_id.clone()
    }

    pub fn session_token(&self) -> String {
        self.session_token.clone()
    }

    pub fn role_arn(&self) -> Option<String> {
        self.role_arn.clone()
    }

    pub fn expiration(&self) -> String {
        self.expiration.clone()
    }
}
