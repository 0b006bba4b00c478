use crate::error::ExchangeError;
use std::fmt;
use url::Url;

/// Scheme and authority of the okta tenant, derived once from the app's
/// forward url. Path, query, and fragment are discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OktaOrigin(String);

impl OktaOrigin {
    /// Reduces a full app url like
    /// `https://okta.example.com/home/amazon_aws/0oa123/272` to
    /// `https://okta.example.com`.
    pub fn resolve(app_url: &str) -> Result<OktaOrigin, ExchangeError> {
        let url = Url::parse(app_url).map_err(|_| ExchangeError::InvalidUrl)?;
        let host = url.host_str().ok_or(ExchangeError::InvalidUrl)?;

        let origin = match url.port() {
            Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
            None => format!("{}://{}", url.scheme(), host),
        };

        Ok(OktaOrigin(origin))
    }

    /// Builds a url for an endpoint path on this tenant.
    pub fn url_for(&self, path: &str) -> Result<Url, ExchangeError> {
        let mut url = Url::parse(self.0.as_str()).map_err(|_| ExchangeError::InvalidUrl)?;
        url.set_path(path);

        Ok(url)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for OktaOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}
