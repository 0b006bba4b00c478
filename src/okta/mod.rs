pub mod authenticator;
pub mod okta_client;
pub mod origin;
pub mod saml;
