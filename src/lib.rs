//! Typed Rust client for the mliev-push message dispatch HTTP API.
//!
//! The crate is split into a domain layer of payloads and validated values, a
//! transport layer for wire-format details (request signing, body encoding,
//! envelope decoding), and a small client layer orchestrating requests.
//!
//! Every request carries `X-App-Id`, `X-Timestamp`, `X-Nonce` and
//! `X-Signature`, where the signature is
//! `hex(HMAC-SHA256(method + path + sorted_json_params + timestamp + nonce, app_secret))`.
//!
//! ```rust,no_run
//! use mliev_push::{Credential, PushClient, SendMessageRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mliev_push::PushError> {
//!     let client = PushClient::new(
//!         "https://push.example.com",
//!         Credential::new("app_id", "app_secret")?,
//!     )?;
//!     let request = SendMessageRequest::new(1, "Acme", "13800138000")
//!         .template_param("code", "123456");
//!     let sent = client.send_message(&request).await?;
//!     println!("queued task {}", sent.task_id);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod domain;
pub mod transport;

pub use client::{
    CallContext, CancelHandle, CancelSignal, Credential, HttpTransport, PushClient,
    PushClientBuilder, PushError,
};
pub use config::{ConfigError, PushConfig};
pub use domain::{
    AppId, AppSecret, CallbackStatus, ErrorCategory, ErrorCode, KnownErrorCode, MessageType,
    QueryTaskData, SendBatchData, SendBatchRequest, SendMessageData, SendMessageRequest, TaskId,
    TaskStatus, TemplateParams, ValidationError, error_message,
};
pub use transport::signature::{canonical_params, compute_signature, verify_signature};
