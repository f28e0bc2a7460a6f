use serde::Serialize;
use serde_json::Value;

use crate::transport::json::to_wire_vec;
use crate::transport::signature::ParameterSet;

#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    #[error("failed to serialize payload: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to read payload back as parameters: {0}")]
    Reparse(#[source] serde_json::Error),

    #[error("payload must serialize to a JSON object")]
    NotObject,
}

/// Wire body plus the parameter view signed alongside it.
///
/// Both come from one serialization pass so the signed content and the
/// transmitted bytes cannot drift apart.
#[derive(Debug, Clone)]
pub struct EncodedBody {
    pub bytes: Vec<u8>,
    pub params: ParameterSet,
}

pub fn encode_json_body<T: Serialize + ?Sized>(payload: &T) -> Result<EncodedBody, BodyError> {
    let bytes = to_wire_vec(payload).map_err(BodyError::Serialize)?;
    let params = match serde_json::from_slice::<Value>(&bytes).map_err(BodyError::Reparse)? {
        Value::Object(map) => map,
        _ => return Err(BodyError::NotObject),
    };
    Ok(EncodedBody { bytes, params })
}
