use std::fmt;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Application identifier issued by the push service.
///
/// Invariant: non-empty after trimming.
pub struct AppId(String);

impl AppId {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "app_id";

    /// Create a validated [`AppId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq)]
/// Shared secret used as the HMAC key.
///
/// Invariant: must not be empty (whitespace is preserved, it is part of the key).
/// `Debug` never prints the value.
pub struct AppSecret(String);

impl AppSecret {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "app_secret";

    /// Create a validated [`AppSecret`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the secret as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AppSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AppSecret([REDACTED])")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Task identifier returned by the send operations.
///
/// Invariant: non-empty after trimming. The value is interpolated into the
/// query path verbatim.
pub struct TaskId(String);

impl TaskId {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "task_id";

    /// Create a [`TaskId`], kept exactly as given since it is placed into
    /// the request path verbatim. Empty or whitespace-only ids are rejected.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the validated task id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Base URL of the push service, without a trailing `/`.
///
/// Request URLs are built as `base + path`, so `https://push.example.com/gw`
/// yields `https://push.example.com/gw/api/v1/messages`.
pub struct BaseUrl(String);

impl BaseUrl {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "base_url";

    /// Parse and validate an absolute `http`/`https` base URL.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = url::Url::parse(trimmed).map_err(|err| ValidationError::InvalidBaseUrl {
            input: trimmed.to_owned(),
            reason: err.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
            return Err(ValidationError::RelativeBaseUrl {
                input: trimmed.to_owned(),
            });
        }

        Ok(Self(trimmed.trim_end_matches('/').to_owned()))
    }

    /// Borrow the normalized base URL.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Join an absolute API path onto this base.
    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self.0, path)
    }
}
