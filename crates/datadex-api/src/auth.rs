use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Credentials attached to every request sent to the catalog services.
///
/// The frontend service usually sits behind an auth proxy, so the client
/// either forwards a bearer token or replays an arbitrary header (typically
/// a session `Cookie`) captured from a browser session.
#[derive(Debug, Clone, Default)]
pub enum Credentials {
    /// No credentials (local development deployments).
    #[default]
    Anonymous,

    /// `Authorization: Bearer <token>`.
    Bearer { token: SecretString },

    /// A single custom header, e.g. `Cookie: session=...`.
    Header { name: String, value: SecretString },
}

impl Credentials {
    /// Render the credentials as default request headers.
    pub(crate) fn headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        match self {
            Self::Anonymous => {}
            Self::Bearer { token } => {
                let mut value =
                    HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                        .map_err(|e| Error::InvalidHeader(e.to_string()))?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            Self::Header { name, value } => {
                let name = HeaderName::from_bytes(name.as_bytes())
                    .map_err(|e| Error::InvalidHeader(e.to_string()))?;
                let mut value = HeaderValue::from_str(value.expose_secret())
                    .map_err(|e| Error::InvalidHeader(e.to_string()))?;
                value.set_sensitive(true);
                headers.insert(name, value);
            }
        }
        Ok(headers)
    }

    /// Short human label, never containing secret material.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::Bearer { .. } => "bearer",
            Self::Header { .. } => "header",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bearer_sets_sensitive_authorization() {
        let creds = Credentials::Bearer {
            token: "abc".to_string().into(),
        };
        let headers = creds.headers().unwrap();
        let value = headers.get(AUTHORIZATION).unwrap();
        assert_eq!(value.to_str().unwrap(), "Bearer abc");
        assert!(value.is_sensitive());
    }

    #[test]
    fn custom_header_rejects_bad_names() {
        let creds = Credentials::Header {
            name: "bad header".into(),
            value: "x".to_string().into(),
        };
        assert!(matches!(creds.headers(), Err(Error::InvalidHeader(_))));
    }

    #[test]
    fn anonymous_has_no_headers() {
        assert!(Credentials::Anonymous.headers().unwrap().is_empty());
    }
}
