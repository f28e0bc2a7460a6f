use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Processing,
    Success,
    Failed,
    /// Status added server-side after this client was built, or not sent.
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallbackStatus {
    Delivered,
    Failed,
    Rejected,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Sms,
    Email,
    WechatWork,
    Dingtalk,
    Webhook,
    Push,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// `data` of a successful single send.
pub struct SendMessageData {
    pub task_id: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// `data` of a successful batch send.
pub struct SendBatchData {
    pub batch_id: String,
    pub total_count: u64,
    pub success_count: u64,
    pub failed_count: u64,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// `data` of a task query.
pub struct QueryTaskData {
    #[serde(default)]
    pub id: i64,
    pub task_id: String,
    #[serde(default)]
    pub app_id: String,
    #[serde(default)]
    pub channel_id: i64,
    #[serde(default)]
    pub message_type: MessageType,
    #[serde(default)]
    pub receiver: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub status: TaskStatus,
    /// Absent until the provider reports back.
    #[serde(default)]
    pub callback_status: Option<CallbackStatus>,
    #[serde(default)]
    pub retry_count: u32,
    #[serde(default)]
    pub max_retry: u32,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}
