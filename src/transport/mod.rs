//! Transport layer: wire-format details (signing, body encoding, envelope decoding).

mod body;
mod envelope;
pub mod json;
pub mod signature;

pub use body::{BodyError, EncodedBody, encode_json_body};
pub use envelope::{EnvelopeError, ResponseEnvelope, decode_envelope};

pub const HEADER_APP_ID: &str = "X-App-Id";
pub const HEADER_TIMESTAMP: &str = "X-Timestamp";
pub const HEADER_NONCE: &str = "X-Nonce";
pub const HEADER_SIGNATURE: &str = "X-Signature";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

pub const PATH_MESSAGES: &str = "/api/v1/messages";
pub const PATH_MESSAGES_BATCH: &str = "/api/v1/messages/batch";

/// `GET` path for one task; the id is interpolated verbatim.
pub fn task_path(task_id: &str) -> String {
    format!("{PATH_MESSAGES}/{task_id}")
}
