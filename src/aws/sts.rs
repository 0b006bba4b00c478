use crate::aws::{Credential, SamlRole};
use crate::error::ExchangeError;
use crate::http::api_client::{AcceptType, ApiClient};
use crate::okta::saml::SamlAssertion;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use log::debug;
use serde::Deserialize;
use sxd_document::parser;
use sxd_xpath::{Context, Factory};
use url::Url;

pub const DEFAULT_STS_ENDPOINT: &str = "https://sts.amazonaws.com";

const STS_API_VERSION: &str = "2011-06-15";
const SAML_ASSERTION_NAMESPACE: &str = "urn:oasis:names:tc:SAML:2.0:assertion";
const AWS_ROLE_ATTRIBUTE: &str = "https://aws.amazon.com/SAML/Attributes/Role";

#[async_trait]
pub trait StsApi {
    async fn assume_role_with_saml(
        &self,
        assertion: &SamlAssertion,
    ) -> Result<Credential, ExchangeError>;
}

/// Exchanges a SAML assertion for temporary credentials.
///
/// `AssumeRoleWithSAML` is the one STS action callable without prior AWS
/// credentials, so a plain unsigned GET with query parameters is all it
/// takes. The role and principal ARNs come out of the assertion itself.
pub struct StsClient {
    endpoint: String,
    client: ApiClient,
}

impl StsClient {
    pub fn new(endpoint: String) -> Result<StsClient, ExchangeError> {
        Ok(StsClient {
            endpoint,
            client: ApiClient::new()?,
        })
    }
}

#[async_trait]
impl StsApi for StsClient {
    async fn assume_role_with_saml(
        &self,
        assertion: &SamlAssertion,
    ) -> Result<Credential, ExchangeError> {
        let role = extract_role(assertion)?;
        let role_arn = role.role_arn();
        let principal_arn = role.principal_arn();

        debug!("assuming {} via {}", role_arn, principal_arn);

        let url = Url::parse(self.endpoint.as_str()).map_err(|_| ExchangeError::InvalidUrl)?;
        // the query serializer percent-encodes the still-base64 assertion
        let params = [
            ("Version", STS_API_VERSION),
            ("Action", "AssumeRoleWithSAML"),
            ("RoleArn", role_arn.as_str()),
            ("PrincipalArn", principal_arn.as_str()),
            ("SAMLAssertion", assertion.as_str()),
        ];

        let response = self.client.get(url, &params, AcceptType::Xml).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ExchangeError::RoleAssumptionRejected(rejection_reason(
                body.as_str(),
                status,
            )));
        }

        let envelope: AssumeRoleWithSamlResponse =
            quick_xml::de::from_str(body.as_str()).map_err(|_| {
                ExchangeError::RoleAssumptionRejected(String::from(
                    "sts response carried no credentials element",
                ))
            })?;

        Ok(envelope.into_credential(role_arn))
    }
}

/// Digs the role attribute out of the assertion.
///
/// The lookup assumes okta's AWS-integration schema: a single `Attribute`
/// named for the AWS role, holding `provider-arn,role-arn` text. The first
/// attribute value in document order wins.
fn extract_role(assertion: &SamlAssertion) -> Result<SamlRole, ExchangeError> {
    let decoded = BASE64
        .decode(assertion.as_str())
        .map_err(|_| ExchangeError::InvalidSamlEncoding)?;
    let xml = String::from_utf8(decoded).map_err(|_| ExchangeError::InvalidSamlEncoding)?;

    let package = parser::parse(xml.as_str()).map_err(|_| ExchangeError::InvalidSamlXml)?;
    let document = package.as_document();

    let xpath = Factory::new()
        .build(
            format!(
                "//saml2:Attribute[@Name='{}']/saml2:AttributeValue",
                AWS_ROLE_ATTRIBUTE
            )
            .as_str(),
        )
        .map_err(|_| ExchangeError::MissingRoleAttribute)?
        .ok_or(ExchangeError::MissingRoleAttribute)?;

    let mut context = Context::new();
    context.set_namespace("saml2", SAML_ASSERTION_NAMESPACE);

    let value = xpath
        .evaluate(&context, document.root())
        .map_err(|_| ExchangeError::MissingRoleAttribute)?;

    let attribute_value = match value {
        sxd_xpath::Value::Nodeset(ns) => ns
            .document_order()
            .into_iter()
            .map(|node| node.string_value())
            .next(),
        _ => None,
    }
    .ok_or(ExchangeError::MissingRoleAttribute)?;

    SamlRole::from_attribute_value(attribute_value.as_str())
}

fn rejection_reason(body: &str, status: reqwest::StatusCode) -> String {
    match quick_xml::de::from_str::<ErrorResponse>(body) {
        Ok(envelope) => format!(
            "aws error code {} - {}",
            envelope.error.code, envelope.error.message
        ),
        Err(_) => format!("aws returned status {}", status),
    }
}

#[derive(Deserialize, Debug)]
struct AssumeRoleWithSamlResponse {
    #[serde(rename = "AssumeRoleWithSAMLResult")]
    result: AssumeRoleWithSamlResult,
}

#[derive(Deserialize, Debug)]
struct AssumeRoleWithSamlResult {
    #[serde(rename = "Credentials")]
    credentials: StsCredentials,
}

#[derive(Deserialize, Debug)]
struct StsCredentials {
    #[serde(rename = "AccessKeyId")]
    access_key_id: String,
    #[serde(rename = "SecretAccessKey")]
    secret_access_key: String,
    #[serde(rename = "SessionToken")]
    session_token: String,
    #[serde(rename = "Expiration")]
    expiration: String,
}

#[derive(Deserialize, Debug)]
struct ErrorResponse {
    #[serde(rename = "Error")]
    error: StsError,
}

#[derive(Deserialize, Debug)]
struct StsError {
    #[serde(rename = "Code")]
    code: String,
    #[serde(rename = "Message")]
    message: String,
}

impl AssumeRoleWithSamlResponse {
    fn into_credential(self, role_arn: String) -> Credential {
        let credentials = self.result.credentials;

        Credential {
            access_key_id: credentials.access_key_id,
            secret_access_key: credentials.secret_access_key,
            session_token: credentials.session_token,
            role_arn: Some(role_arn),
            expiration: credentials.expiration,
        }
    }
}
