//! Domain layer: payloads, result shapes, and validated values (no I/O).

mod error_code;
mod request;
mod response;
mod validation;
mod value;

pub use error_code::{
    ErrorCategory, ErrorCode, KnownErrorCode, UNKNOWN_ERROR_MESSAGE, error_message,
};
pub use request::{SendBatchRequest, SendMessageRequest, TemplateParams};
pub use response::{
    CallbackStatus, MessageType, QueryTaskData, SendBatchData, SendMessageData, TaskStatus,
};
pub use validation::ValidationError;
pub use value::{AppId, AppSecret, BaseUrl, TaskId};
