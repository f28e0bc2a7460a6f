//! Request signing: `HMAC-SHA256(method + path + canonical_params + timestamp + nonce)`.
//!
//! The server recomputes the same value, so every byte of the signed content
//! must be reproducible: no delimiters between the parts, compact JSON, and
//! top-level keys in ascending code-point order.

use hmac::{Hmac, Mac};
use serde_json::{Map, Value};
use sha2::Sha256;

use crate::transport::json::to_canonical_string;

type HmacSha256 = Hmac<Sha256>;

/// Request parameters in generic key/value form, as decoded from the body.
pub type ParameterSet = Map<String, Value>;

/// Length of a hex-encoded SHA-256 MAC.
pub const SIGNATURE_LEN: usize = 64;

/// Inputs bound together by one request signature.
#[derive(Debug, Clone, Copy)]
pub struct SignatureInput<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub params: Option<&'a ParameterSet>,
    pub timestamp: &'a str,
    pub nonce: &'a str,
}

impl SignatureInput<'_> {
    /// The exact string fed into the MAC.
    pub fn sign_content(&self) -> String {
        let params = canonical_params(self.params);
        let mut content = String::with_capacity(
            self.method.len()
                + self.path.len()
                + params.len()
                + self.timestamp.len()
                + self.nonce.len(),
        );
        content.push_str(self.method);
        content.push_str(self.path);
        content.push_str(&params);
        content.push_str(self.timestamp);
        content.push_str(self.nonce);
        content
    }

    /// Lowercase hex HMAC-SHA256 of [`Self::sign_content`] keyed by `secret`.
    pub fn sign(&self, secret: &str) -> String {
        hex::encode(self.mac(secret).finalize().into_bytes())
    }

    /// Recompute and compare against a hex signature in constant time.
    pub fn verify(&self, secret: &str, signature: &str) -> bool {
        let Ok(expected) = hex::decode(signature) else {
            return false;
        };
        self.mac(secret).verify_slice(&expected).is_ok()
    }

    fn mac(&self, secret: &str) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(self.sign_content().as_bytes());
        mac
    }
}

/// Serialize `params` with top-level keys sorted, as compact JSON.
///
/// Absent or empty parameters yield `""` (never `{}` or `null`). Only the top
/// level is reordered; nested values are written as the encoder emits them.
/// The text follows Go's `encoding/json`: `<`, `>` and `&` are `\u`-escaped
/// and numbers print as `float64`, so `10.0` signs as `10`.
pub fn canonical_params(params: Option<&ParameterSet>) -> String {
    let Some(params) = params.filter(|params| !params.is_empty()) else {
        return String::new();
    };

    let mut entries = params.iter().collect::<Vec<_>>();
    entries.sort_by(|(left, _), (right, _)| left.cmp(right));

    let sorted = entries
        .into_iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect::<Map<String, Value>>();
    to_canonical_string(&Value::Object(sorted))
}

/// Compute the `X-Signature` header value for one request.
pub fn compute_signature(
    method: &str,
    path: &str,
    params: Option<&ParameterSet>,
    timestamp: &str,
    nonce: &str,
    secret: &str,
) -> String {
    SignatureInput {
        method,
        path,
        params,
        timestamp,
        nonce,
    }
    .sign(secret)
}

/// Check a received signature the way the server does.
#[allow(clippy::too_many_arguments)]
pub fn verify_signature(
    method: &str,
    path: &str,
    params: Option<&ParameterSet>,
    timestamp: &str,
    nonce: &str,
    secret: &str,
    signature: &str,
) -> bool {
    SignatureInput {
        method,
        path,
        params,
        timestamp,
        nonce,
    }
    .verify(secret, signature)
}
