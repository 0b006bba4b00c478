use crate::error::ExchangeError;
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use url::Url;

pub enum AcceptType {
    Json,
    Html,
    Xml,
}

/// Thin wrapper around a cookie-aware [`Client`].
///
/// The cookie store matters for the SAML redirect: okta sets the session
/// cookie on the first hop and expects it back on the redirected request.
pub struct ApiClient {
    http_client: Client,
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

impl ApiClient {
    pub fn new() -> Result<ApiClient, ExchangeError> {
        Ok(ApiClient {
            http_client: Client::builder()
                .cookie_store(true)
                .timeout(REQUEST_TIMEOUT)
                .build()?,
        })
    }

    pub async fn post_json(&self, uri: &str, json: &Value) -> Result<Response, ExchangeError> {
        let res = self
            .http_client
            .post(uri)
            .json(json)
            .header(
                CONTENT_TYPE,
                HeaderValue::from_static("application/json; charset=utf-8"),
            )
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        Ok(res)
    }

    pub async fn get(
        &self,
        url: Url,
        params: &[(&str, &str)],
        accept_type: AcceptType,
    ) -> Result<Response, ExchangeError> {
        let mut url = url;
        for (key, value) in params {
            url.query_pairs_mut().append_pair(key, value);
        }

        let res = self
            .http_client
            .get(url)
            .header(ACCEPT, ApiClient::accept_header(accept_type))
            .send()
            .await?;

        Ok(res)
    }

    fn accept_header(accept_type: AcceptType) -> HeaderValue {
        match accept_type {
            AcceptType::Html => {
                HeaderValue::from_static("text/html,application/xhtml+xml,application/xml")
            }
            AcceptType::Json => HeaderValue::from_static("application/json"),
            AcceptType::Xml => HeaderValue::from_static("text/xml"),
        }
    }
}
