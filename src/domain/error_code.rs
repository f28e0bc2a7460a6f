use std::fmt;

use serde::{Deserialize, Serialize};

/// Fallback text for codes missing from the catalog.
pub const UNKNOWN_ERROR_MESSAGE: &str = "unknown error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Business status code carried in the response envelope (`code`).
///
/// `0` means success. The value is preserved as-is even when the code is
/// unknown to this crate.
pub struct ErrorCode(i32);

impl ErrorCode {
    /// The success code.
    pub const SUCCESS: Self = Self(0);

    /// Construct a code from its integer representation.
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    /// Get the integer code as sent by the server.
    pub fn as_i32(self) -> i32 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self.0 == 0
    }

    /// Map this code to a known variant, if one exists.
    pub fn known(self) -> Option<KnownErrorCode> {
        KnownErrorCode::from_code(self.0)
    }

    /// Category derived from the leading digit of a five-digit code.
    pub fn category(self) -> Option<ErrorCategory> {
        ErrorCategory::from_code(self.0)
    }

    /// Human-readable description from the static catalog.
    ///
    /// Unmapped codes return [`UNKNOWN_ERROR_MESSAGE`].
    pub fn description(self) -> &'static str {
        error_message(self.0)
    }

    /// Returns `true` for the authentication group (`2xxxx`).
    pub fn is_auth_error(self) -> bool {
        self.category() == Some(ErrorCategory::Auth)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<KnownErrorCode> for ErrorCode {
    fn from(value: KnownErrorCode) -> Self {
        Self(value.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Error groups, keyed by the leading digit of the code.
pub enum ErrorCategory {
    /// `1xxxx`: malformed or incomplete request.
    Request,
    /// `2xxxx`: authentication and authorization.
    Auth,
    /// `3xxxx`: business state (limits, missing channels, unknown tasks).
    BusinessState,
    /// `4xxxx`: server-side failures.
    System,
}

impl ErrorCategory {
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            10000..=19999 => Self::Request,
            20000..=29999 => Self::Auth,
            30000..=39999 => Self::BusinessState,
            40000..=49999 => Self::System,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Codes documented by the push service.
///
/// Unknown codes are preserved as [`ErrorCode`] and return `None` from [`KnownErrorCode::from_code`].
pub enum KnownErrorCode {
    InvalidParams,
    InvalidJson,
    MissingParams,
    InvalidValue,
    InvalidReceiver,
    InvalidTemplate,
    Unauthorized,
    InvalidAppId,
    InvalidSignature,
    InvalidTimestamp,
    IpNotAllowed,
    AppDisabled,
    RateLimitExceeded,
    QuotaExceeded,
    ChannelNotFound,
    ChannelDisabled,
    TemplateNotFound,
    NoAvailableChannel,
    TaskNotFound,
    BatchNotFound,
    InternalError,
    DatabaseError,
    RedisError,
    QueueError,
    ProviderError,
    NetworkTimeout,
    CircuitOpen,
}

impl KnownErrorCode {
    /// Convert a raw integer code into a known variant.
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            10001 => Self::InvalidParams,
            10002 => Self::InvalidJson,
            10003 => Self::MissingParams,
            10004 => Self::InvalidValue,
            10005 => Self::InvalidReceiver,
            10006 => Self::InvalidTemplate,
            20001 => Self::Unauthorized,
            20002 => Self::InvalidAppId,
            20003 => Self::InvalidSignature,
            20004 => Self::InvalidTimestamp,
            20005 => Self::IpNotAllowed,
            20006 => Self::AppDisabled,
            30001 => Self::RateLimitExceeded,
            30002 => Self::QuotaExceeded,
            30003 => Self::ChannelNotFound,
            30004 => Self::ChannelDisabled,
            30005 => Self::TemplateNotFound,
            30006 => Self::NoAvailableChannel,
            30007 => Self::TaskNotFound,
            30008 => Self::BatchNotFound,
            40001 => Self::InternalError,
            40002 => Self::DatabaseError,
            40003 => Self::RedisError,
            40004 => Self::QueueError,
            40005 => Self::ProviderError,
            40006 => Self::NetworkTimeout,
            40007 => Self::CircuitOpen,
            _ => return None,
        })
    }

    pub fn code(self) -> i32 {
        match self {
            Self::InvalidParams => 10001,
            Self::InvalidJson => 10002,
            Self::MissingParams => 10003,
            Self::InvalidValue => 10004,
            Self::InvalidReceiver => 10005,
            Self::InvalidTemplate => 10006,
            Self::Unauthorized => 20001,
            Self::InvalidAppId => 20002,
            Self::InvalidSignature => 20003,
            Self::InvalidTimestamp => 20004,
            Self::IpNotAllowed => 20005,
            Self::AppDisabled => 20006,
            Self::RateLimitExceeded => 30001,
            Self::QuotaExceeded => 30002,
            Self::ChannelNotFound => 30003,
            Self::ChannelDisabled => 30004,
            Self::TemplateNotFound => 30005,
            Self::NoAvailableChannel => 30006,
            Self::TaskNotFound => 30007,
            Self::BatchNotFound => 30008,
            Self::InternalError => 40001,
            Self::DatabaseError => 40002,
            Self::RedisError => 40003,
            Self::QueueError => 40004,
            Self::ProviderError => 40005,
            Self::NetworkTimeout => 40006,
            Self::CircuitOpen => 40007,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidParams => "invalid request parameters",
            Self::InvalidJson => "malformed JSON",
            Self::MissingParams => "missing required parameters",
            Self::InvalidValue => "invalid parameter value",
            Self::InvalidReceiver => "invalid receiver format",
            Self::InvalidTemplate => "invalid template parameters",
            Self::Unauthorized => "unauthorized",
            Self::InvalidAppId => "invalid app id",
            Self::InvalidSignature => "signature verification failed",
            Self::InvalidTimestamp => "invalid timestamp",
            Self::IpNotAllowed => "ip address not in allow list",
            Self::AppDisabled => "application disabled",
            Self::RateLimitExceeded => "rate limit exceeded",
            Self::QuotaExceeded => "quota exceeded",
            Self::ChannelNotFound => "channel not found",
            Self::ChannelDisabled => "channel disabled",
            Self::TemplateNotFound => "template not found",
            Self::NoAvailableChannel => "no available channel",
            Self::TaskNotFound => "task not found",
            Self::BatchNotFound => "batch not found",
            Self::InternalError => "internal error",
            Self::DatabaseError => "database error",
            Self::RedisError => "redis error",
            Self::QueueError => "queue error",
            Self::ProviderError => "upstream provider error",
            Self::NetworkTimeout => "network timeout",
            Self::CircuitOpen => "circuit breaker open",
        }
    }
}

/// Look up the catalog text for a raw code.
pub fn error_message(code: i32) -> &'static str {
    KnownErrorCode::from_code(code)
        .map(KnownErrorCode::message)
        .unwrap_or(UNKNOWN_ERROR_MESSAGE)
}
