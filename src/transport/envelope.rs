use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;

use crate::domain::ErrorCode;

#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response envelope has no data")]
    MissingData,
}

/// The `{code, message, data}` wrapper every response uses.
///
/// `data` is kept as raw JSON until the caller knows which shape to expect.
#[derive(Debug, Deserialize)]
pub struct ResponseEnvelope {
    pub code: ErrorCode,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
    #[serde(default)]
    pub data: Option<Box<RawValue>>,
}

impl ResponseEnvelope {
    /// Decode `data` into the operation-specific result.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, EnvelopeError> {
        let raw = self.data.ok_or(EnvelopeError::MissingData)?;
        Ok(serde_json::from_str(raw.get())?)
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn decode_envelope(body: &str) -> Result<ResponseEnvelope, EnvelopeError> {
    Ok(serde_json::from_str(body)?)
}
