use serde::Serialize;
use serde_json::{Map, Value};

/// Template variables substituted by the server into the channel template.
pub type TemplateParams = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Payload for `POST /api/v1/messages`.
///
/// Field contents (receiver format, template names) are validated by the server.
pub struct SendMessageRequest {
    pub channel_id: i64,
    pub signature_name: String,
    pub receiver: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_params: Option<TemplateParams>,
    /// ISO 8601 send time; omitted for immediate delivery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
}

impl SendMessageRequest {
    pub fn new(
        channel_id: i64,
        signature_name: impl Into<String>,
        receiver: impl Into<String>,
    ) -> Self {
        Self {
            channel_id,
            signature_name: signature_name.into(),
            receiver: receiver.into(),
            template_params: None,
            scheduled_at: None,
        }
    }

    /// Add one template variable, creating the map on first use.
    pub fn template_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.template_params
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn scheduled_at(mut self, at: impl Into<String>) -> Self {
        self.scheduled_at = Some(at.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Payload for `POST /api/v1/messages/batch`.
///
/// All receivers share the same template parameters.
pub struct SendBatchRequest {
    pub channel_id: i64,
    pub signature_name: String,
    pub receivers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_params: Option<TemplateParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
}

impl SendBatchRequest {
    pub fn new<I, S>(channel_id: i64, signature_name: impl Into<String>, receivers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            channel_id,
            signature_name: signature_name.into(),
            receivers: receivers.into_iter().map(Into::into).collect(),
            template_params: None,
            scheduled_at: None,
        }
    }

    pub fn template_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.template_params
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn scheduled_at(mut self, at: impl Into<String>) -> Self {
        self.scheduled_at = Some(at.into());
        self
    }
}
