use crate::errors::{RelayerClientException, Result};
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderValue};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

// Static header names may not contain uppercase.
pub const POLY_BUILDER_API_KEY: &str = "poly_builder_api_key";
pub const POLY_BUILDER_PASSPHRASE: &str = "poly_builder_passphrase";
pub const POLY_BUILDER_SIGNATURE: &str = "poly_builder_signature";
pub const POLY_BUILDER_TIMESTAMP: &str = "poly_builder_timestamp";

/// Builder API credentials used to authenticate relayer submissions.
#[derive(Clone)]
pub struct BuilderConfig {
    key: Uuid,
    secret: String,
    passphrase: String,
}

impl BuilderConfig {
    pub fn new(key: Uuid, secret: impl Into<String>, passphrase: impl Into<String>) -> Self {
        BuilderConfig {
            key,
            secret: secret.into(),
            passphrase: passphrase.into(),
        }
    }

    pub fn key(&self) -> &Uuid {
        &self.key
    }

    /// url-safe base64 of `HMAC-SHA256(secret, timestamp ++ method ++ path ++ body)`.
    pub fn build_hmac_signature(
        &self,
        timestamp: u64,
        method: &str,
        request_path: &str,
        body: Option<&str>,
    ) -> Result<String> {
        let secret = URL_SAFE.decode(&self.secret).map_err(|e| {
            RelayerClientException::invalid_input(format!("builder secret is not base64: {}", e))
        })?;

        let mut message = format!("{}{}{}", timestamp, method, request_path);
        if let Some(body) = body {
            message.push_str(body);
        }

        let mut mac = HmacSha256::new_from_slice(&secret).map_err(|e| {
            RelayerClientException::invalid_input(format!("invalid builder secret: {}", e))
        })?;
        mac.update(message.as_bytes());
        Ok(URL_SAFE.encode(mac.finalize().into_bytes()))
    }

    pub fn headers_at(
        &self,
        timestamp: u64,
        method: &str,
        request_path: &str,
        body: Option<&str>,
    ) -> Result<HeaderMap> {
        let signature = self.build_hmac_signature(timestamp, method, request_path, body)?;

        let mut headers = HeaderMap::new();
        for (name, value) in [
            (POLY_BUILDER_API_KEY, self.key.to_string()),
            (POLY_BUILDER_PASSPHRASE, self.passphrase.clone()),
            (POLY_BUILDER_SIGNATURE, signature),
            (POLY_BUILDER_TIMESTAMP, timestamp.to_string()),
        ] {
            let value = HeaderValue::from_str(&value).map_err(|e| {
                RelayerClientException::invalid_input(format!("invalid {} header: {}", name, e))
            })?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    pub fn headers(
        &self,
        method: &str,
        request_path: &str,
        body: Option<&str>,
    ) -> Result<HeaderMap> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| {
                RelayerClientException::invalid_input(format!(
                    "Failed to get duration since UNIX_EPOCH: {}",
                    e
                ))
            })?
            .as_secs();
        self.headers_at(timestamp, method, request_path, body)
    }
}

impl std::fmt::Debug for BuilderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuilderConfig")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
