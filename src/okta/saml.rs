use crate::error::ExchangeError;
use crate::http::api_client::{AcceptType, ApiClient};
use crate::okta::origin::OktaOrigin;
use log::debug;
use percent_encoding::percent_decode_str;
use select::document::Document;
use select::predicate::{Attr, Name, Predicate};

/// A SAML assertion exactly as okta hands it over: base64-encoded XML,
/// ready to be forwarded to AWS untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamlAssertion(String);

impl SamlAssertion {
    pub fn new(encoded: String) -> SamlAssertion {
        SamlAssertion(encoded)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Redeems a session token for the SAML assertion of an AWS app.
///
/// The token is spent on okta's session cookie redirect, which lands on the
/// app's sign-on page containing the assertion in a hidden form field.
pub struct SamlRetriever {
    client: ApiClient,
}

impl SamlRetriever {
    pub fn new() -> Result<SamlRetriever, ExchangeError> {
        Ok(SamlRetriever {
            client: ApiClient::new()?,
        })
    }

    /// GETs `{origin}/login/sessionCookieRedirect` with the session token
    /// and the app's forward url, then scrapes the assertion out of the
    /// resulting page.
    pub async fn retrieve(
        &self,
        origin: &OktaOrigin,
        session_token: &str,
        forward_url: &str,
    ) -> Result<SamlAssertion, ExchangeError> {
        let url = origin.url_for("/login/sessionCookieRedirect")?;
        let params = [
            ("checkAccountSetupComplete", "true"),
            ("token", session_token),
            ("redirectUrl", forward_url),
        ];

        debug!("redeeming session token for a saml assertion at {}", origin);
        let response = self.client.get(url, &params, AcceptType::Html).await?;
        let body = response.text().await?;

        extract_saml_response(body.as_str())
    }
}

/// Pulls the hidden `SAMLResponse` input out of okta's interstitial page.
///
/// The document is untrusted, so every surprise in its shape (missing
/// element, missing value, undecodable percent-encoding) maps to
/// [`ExchangeError::SamlElementNotFound`] instead of a parser panic.
fn extract_saml_response(body: &str) -> Result<SamlAssertion, ExchangeError> {
    let document = Document::from(body);
    let node = document
        .find(Name("input").and(Attr("name", "SAMLResponse")))
        .next();

    let element = node.ok_or(ExchangeError::SamlElementNotFound)?;
    let value = element
        .attr("value")
        .ok_or(ExchangeError::SamlElementNotFound)?;

    // the form field is percent-encoded on top of the base64
    let decoded = percent_decode_str(value)
        .decode_utf8()
        .map_err(|_| ExchangeError::SamlElementNotFound)?;

    Ok(SamlAssertion(decoded.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::MockServer;

    #[test]
    fn test_extract_percent_decodes_the_assertion() {
        let html = r#"<html><body><form method="post" action="https://signin.aws.amazon.com/saml">
            <input type="hidden" name="SAMLResponse" value="PHNhbWxwOlJlc3BvbnNlPg%3D%3D"/>
            <input type="hidden" name="RelayState" value=""/>
        </form></body></html>"#;

        let assertion = extract_saml_response(html).unwrap();

        assert_eq!(assertion.as_str(), "PHNhbWxwOlJlc3BvbnNlPg==");
    }

    #[test]
    fn test_extract_without_saml_input() {
        let html = "<html><body><p>Sign in failed</p></body></html>";

        let result = extract_saml_response(html);

        assert!(matches!(result, Err(ExchangeError::SamlElementNotFound)));
    }

    #[test]
    fn test_extract_ignores_other_named_elements() {
        let html = r#"<html><body><div name="SAMLResponse">not an input</div></body></html>"#;

        let result = extract_saml_response(html);

        assert!(matches!(result, Err(ExchangeError::SamlElementNotFound)));
    }

    #[test]
    fn test_extract_survives_malformed_html() {
        let result = extract_saml_response("<<<><input value=</!doctype");

        assert!(matches!(result, Err(ExchangeError::SamlElementNotFound)));
    }

    #[tokio::test]
    async fn test_retrieve_passes_token_and_forward_url() {
        let server = MockServer::start();
        let forward_url = server.url("/home/amazon_aws/0oa123/272");
        let redirect_mock = server.mock(|when, then| {
            when.method("GET")
                .path("/login/sessionCookieRedirect")
                .query_param("checkAccountSetupComplete", "true")
                .query_param("token", "20111abc")
                .query_param("redirectUrl", forward_url.as_str());
            then.status(200)
                .header("content-type", "text/html")
                .body(r#"<html><body><input name="SAMLResponse" value="PHNhbWxwOlJlc3BvbnNlPg%3D%3D"/></body></html>"#);
        });

        let origin = OktaOrigin::resolve(forward_url.as_str()).unwrap();
        let retriever = SamlRetriever::new().unwrap();
        let assertion = retriever
            .retrieve(&origin, "20111abc", forward_url.as_str())
            .await
            .unwrap();

        redirect_mock.assert();
        assert_eq!(assertion.as_str(), "PHNhbWxwOlJlc3BvbnNlPg==");
    }

    #[tokio::test]
    async fn test_retrieve_with_stale_token_page() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/login/sessionCookieRedirect");
            then.status(200)
                .header("content-type", "text/html")
                .body("<html><body><p>Your session has expired.</p></body></html>");
        });

        let origin = OktaOrigin::resolve(server.url("/").as_str()).unwrap();
        let retriever = SamlRetriever::new().unwrap();
        let result = retriever
            .retrieve(&origin, "stale", server.url("/app").as_str())
            .await;

        assert!(matches!(result, Err(ExchangeError::SamlElementNotFound)));
    }
}
