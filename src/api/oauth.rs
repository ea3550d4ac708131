//! OAuth 1.0a user-context request signing (HMAC-SHA1).

use crate::api::error::ApiError;
use crate::config::Credentials;
use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rand::{Rng, distr::Alphanumeric};
use sha1::Sha1;
use url::Url;

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 unreserved characters stay as-is, everything else is escaped
const OAUTH_ENCODE_SET: &AsciiSet =
    &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";
const NONCE_LEN: usize = 32;

fn encode(value: &str) -> String {
    utf8_percent_encode(value, OAUTH_ENCODE_SET).to_string()
}

/// Signs requests on behalf of a single user
#[derive(Debug)]
pub struct OAuth1Signer {
    credentials: Credentials,
}

impl OAuth1Signer {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Build the `Authorization` header value for a request with a fresh nonce and timestamp
    pub fn authorization_header(&self, method: &str, url: &Url) -> Result<String, ApiError> {
        let nonce: String =
            rand::rng().sample_iter(&Alphanumeric).take(NONCE_LEN).map(char::from).collect();
        let timestamp = chrono::Utc::now().timestamp().to_string();
        self.authorization_header_with(method, url, &nonce, &timestamp)
    }

    /// Build the `Authorization` header value with a caller-supplied nonce and timestamp
    pub fn authorization_header_with(
        &self,
        method: &str,
        url: &Url,
        nonce: &str,
        timestamp: &str,
    ) -> Result<String, ApiError> {
        let mut oauth_params = self.oauth_params(nonce, timestamp);
        let signature = self.signature(method, url, &oauth_params)?;
        oauth_params.push(("oauth_signature", signature));

        let fields: Vec<String> = oauth_params
            .iter()
            .map(|(key, value)| format!("{}=\"{}\"", encode(key), encode(value)))
            .collect();
        Ok(format!("OAuth {}", fields.join(", ")))
    }

    fn oauth_params(&self, nonce: &str, timestamp: &str) -> Vec<(&'static str, String)> {
        vec![
            ("oauth_consumer_key", self.credentials.consumer_key().to_string()),
            ("oauth_nonce", nonce.to_string()),
            ("oauth_signature_method", SIGNATURE_METHOD.to_string()),
            ("oauth_timestamp", timestamp.to_string()),
            ("oauth_token", self.credentials.oauth_token().to_string()),
            ("oauth_version", OAUTH_VERSION.to_string()),
        ]
    }

    fn signature(
        &self,
        method: &str,
        url: &Url,
        oauth_params: &[(&str, String)],
    ) -> Result<String, ApiError> {
        let base = signature_base_string(method, url, oauth_params);
        let key = format!(
            "{}&{}",
            encode(self.credentials.consumer_secret()),
            encode(self.credentials.oauth_token_secret())
        );

        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|e| ApiError::Signing(e.to_string()))?;
        mac.update(base.as_bytes());
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

/// Base string: `METHOD&encoded base url&encoded sorted parameter string`
fn signature_base_string(method: &str, url: &Url, oauth_params: &[(&str, String)]) -> String {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| (encode(&key), encode(&value)))
        .chain(oauth_params.iter().map(|(key, value)| (encode(key), encode(value))))
        .collect();
    params.sort();

    let param_string =
        params.iter().map(|(key, value)| format!("{key}={value}")).collect::<Vec<_>>().join("&");

    let mut base_url = url.clone();
    base_url.set_query(None);
    base_url.set_fragment(None);

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        encode(base_url.as_str()),
        encode(&param_string)
    )
}
