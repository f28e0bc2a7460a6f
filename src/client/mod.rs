//! Client layer: signs requests, drives the exchange, and maps envelopes to results.

mod context;
mod http;

use std::error::Error as StdError;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::domain::{
    AppId, AppSecret, BaseUrl, ErrorCode, QueryTaskData, SendBatchData, SendBatchRequest,
    SendMessageData, SendMessageRequest, TaskId, ValidationError,
};
use crate::transport::signature::SignatureInput;
use crate::transport::{
    BodyError, CONTENT_TYPE_JSON, EncodedBody, EnvelopeError, HEADER_APP_ID, HEADER_CONTENT_TYPE,
    HEADER_NONCE, HEADER_SIGNATURE, HEADER_TIMESTAMP, PATH_MESSAGES, PATH_MESSAGES_BATCH,
    decode_envelope, encode_json_body, task_path,
};

pub use context::{CallContext, CancelHandle, CancelSignal};
pub use http::{
    BoxError, BoxFuture, HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport,
};

use context::Interrupt;

/// Applied to every call unless the builder overrides it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
/// Application credentials: the id sent in `X-App-Id` and the HMAC key.
pub struct Credential {
    app_id: AppId,
    app_secret: AppSecret,
}

impl Credential {
    /// Validate that the id is non-empty after trimming and the secret is non-empty.
    pub fn new(
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            app_id: AppId::new(app_id)?,
            app_secret: AppSecret::new(app_secret)?,
        })
    }

    pub fn app_id(&self) -> &AppId {
        &self.app_id
    }

    fn sign(&self, input: &SignatureInput<'_>) -> String {
        input.sign(self.app_secret.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`PushClient`].
///
/// Business failures ([`PushError::Api`]) are kept apart from transport,
/// deadline and decode failures so callers can match on them.
pub enum PushError {
    /// The request payload could not be converted to JSON.
    #[error("serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The request payload serialized to something other than a JSON object.
    #[error("request payload must serialize to a JSON object")]
    PayloadNotObject,

    /// HTTP client / transport failure (DNS, TLS, connection reset, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The call deadline or the client timeout elapsed before the exchange finished.
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// The call was cancelled through its [`CancelSignal`].
    #[error("request cancelled")]
    Cancelled,

    /// Non-2xx response whose body is not a response envelope.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Response body or `data` did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// A success envelope arrived without `data`.
    #[error("response envelope has no data")]
    MissingData,

    /// The server reported a business error (`code != 0`).
    #[error("API error [{code}]: {message}")]
    Api { code: ErrorCode, message: String },

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl PushError {
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Business error code, if this is a [`PushError::Api`].
    pub fn api_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::DeadlineExceeded)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<BodyError> for PushError {
    fn from(value: BodyError) -> Self {
        match value {
            BodyError::Serialize(err) | BodyError::Reparse(err) => Self::Serialization(err),
            BodyError::NotObject => Self::PayloadNotObject,
        }
    }
}

impl From<EnvelopeError> for PushError {
    fn from(value: EnvelopeError) -> Self {
        match value {
            EnvelopeError::Json(err) => Self::Decode(err),
            EnvelopeError::MissingData => Self::MissingData,
        }
    }
}

impl From<Interrupt> for PushError {
    fn from(value: Interrupt) -> Self {
        match value {
            Interrupt::Cancelled => Self::Cancelled,
            Interrupt::DeadlineExceeded => Self::DeadlineExceeded,
        }
    }
}

fn transport_error(err: BoxError) -> PushError {
    if http::is_transport_timeout(&err) {
        PushError::DeadlineExceeded
    } else {
        PushError::Transport(err)
    }
}

#[derive(Clone)]
/// Builder for [`PushClient`].
///
/// Use this when you need to customize the timeout, user-agent, or network layer.
pub struct PushClientBuilder {
    base_url: String,
    credential: Credential,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl PushClientBuilder {
    /// Create a builder with the default 10 second timeout and the `reqwest` transport.
    pub fn new(base_url: impl Into<String>, credential: Credential) -> Self {
        Self {
            base_url: base_url.into(),
            credential,
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: None,
            transport: None,
        }
    }

    /// Deadline for every exchange. A tighter [`CallContext`] deadline still wins.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Remove the client-wide deadline; calls are bounded only by their [`CallContext`].
    pub fn no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Override the HTTP `User-Agent` header of the default transport.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Replace the network layer. `user_agent` is ignored when set.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build a [`PushClient`].
    pub fn build(self) -> Result<PushClient, PushError> {
        let base_url = BaseUrl::new(self.base_url)?;

        let http: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                let client = builder
                    .build()
                    .map_err(|err| PushError::Transport(Box::new(err)))?;
                Arc::new(ReqwestTransport::new(client))
            }
        };

        Ok(PushClient {
            base_url,
            credential: self.credential,
            timeout: self.timeout,
            http,
        })
    }
}

#[derive(Clone)]
/// High-level message-dispatch client.
///
/// Every call gets a fresh timestamp and nonce, is signed with the
/// application secret, and returns either the decoded `data` or a
/// [`PushError`]. The client holds no per-call state and can be shared
/// between tasks; cloning is cheap.
pub struct PushClient {
    base_url: BaseUrl,
    credential: Credential,
    timeout: Option<Duration>,
    http: Arc<dyn HttpTransport>,
}

impl PushClient {
    /// Create a client with default settings.
    ///
    /// For more customization, use [`PushClient::builder`].
    pub fn new(base_url: impl Into<String>, credential: Credential) -> Result<Self, PushError> {
        PushClientBuilder::new(base_url, credential).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(base_url: impl Into<String>, credential: Credential) -> PushClientBuilder {
        PushClientBuilder::new(base_url, credential)
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    pub fn app_id(&self) -> &AppId {
        self.credential.app_id()
    }

    /// Send one message (`POST /api/v1/messages`).
    ///
    /// Errors:
    /// - [`PushError::Api`] when the server returns a nonzero `code`,
    /// - [`PushError::DeadlineExceeded`] when the client timeout elapses,
    /// - [`PushError::Transport`] / [`PushError::Decode`] for lower-level failures.
    pub async fn send_message(
        &self,
        request: &SendMessageRequest,
    ) -> Result<SendMessageData, PushError> {
        self.send_message_with_context(&CallContext::default(), request)
            .await
    }

    /// [`PushClient::send_message`] bounded by `ctx`.
    pub async fn send_message_with_context(
        &self,
        ctx: &CallContext,
        request: &SendMessageRequest,
    ) -> Result<SendMessageData, PushError> {
        let body = encode_json_body(request)?;
        self.dispatch(ctx, HttpMethod::Post, PATH_MESSAGES, Some(body))
            .await
    }

    /// Send the same template to many receivers (`POST /api/v1/messages/batch`).
    pub async fn send_batch(&self, request: &SendBatchRequest) -> Result<SendBatchData, PushError> {
        self.send_batch_with_context(&CallContext::default(), request)
            .await
    }

    /// [`PushClient::send_batch`] bounded by `ctx`.
    pub async fn send_batch_with_context(
        &self,
        ctx: &CallContext,
        request: &SendBatchRequest,
    ) -> Result<SendBatchData, PushError> {
        let body = encode_json_body(request)?;
        self.dispatch(ctx, HttpMethod::Post, PATH_MESSAGES_BATCH, Some(body))
            .await
    }

    /// Fetch the state of one task (`GET /api/v1/messages/{task_id}`).
    ///
    /// The id is placed into the path exactly as given, without trimming.
    pub async fn query_task(&self, task_id: &TaskId) -> Result<QueryTaskData, PushError> {
        self.query_task_with_context(&CallContext::default(), task_id)
            .await
    }

    /// [`PushClient::query_task`] bounded by `ctx`.
    pub async fn query_task_with_context(
        &self,
        ctx: &CallContext,
        task_id: &TaskId,
    ) -> Result<QueryTaskData, PushError> {
        let path = task_path(task_id.as_str());
        self.dispatch(ctx, HttpMethod::Get, &path, None).await
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        ctx: &CallContext,
        method: HttpMethod,
        path: &str,
        body: Option<EncodedBody>,
    ) -> Result<T, PushError> {
        let timestamp = unix_timestamp().to_string();
        let nonce = Uuid::new_v4().to_string();

        let signature = self.credential.sign(&SignatureInput {
            method: method.as_str(),
            path,
            params: body.as_ref().map(|body| &body.params),
            timestamp: &timestamp,
            nonce: &nonce,
        });

        let mut headers = vec![
            (HEADER_APP_ID, self.credential.app_id().as_str().to_owned()),
            (HEADER_TIMESTAMP, timestamp),
            (HEADER_NONCE, nonce.clone()),
            (HEADER_SIGNATURE, signature),
        ];
        let body = body.map(|body| {
            headers.push((HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON.to_owned()));
            body.bytes
        });

        let request = HttpRequest {
            method,
            url: self.base_url.join(path),
            headers,
            body,
        };

        tracing::debug!(method = method.as_str(), path, nonce = %nonce, "dispatching request");

        let response = ctx
            .run(self.timeout, self.http.execute(request))
            .await
            .map_err(|interrupt| {
                tracing::debug!(path, nonce = %nonce, ?interrupt, "request interrupted");
                PushError::from(interrupt)
            })?
            .map_err(transport_error)?;

        tracing::debug!(path, status = response.status, "received response");

        let envelope = match decode_envelope(&response.body) {
            Ok(envelope) => envelope,
            Err(_) if !(200..=299).contains(&response.status) => {
                let body = if response.body.trim().is_empty() {
                    None
                } else {
                    Some(response.body)
                };
                return Err(PushError::HttpStatus {
                    status: response.status,
                    body,
                });
            }
            Err(err) => return Err(err.into()),
        };

        if !envelope.code.is_success() {
            tracing::warn!(
                path,
                code = envelope.code.as_i32(),
                server_message = %envelope.message,
                "push service returned business error"
            );
            return Err(PushError::Api {
                code: envelope.code,
                message: envelope.message,
            });
        }

        Ok(envelope.into_data()?)
    }
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use serde_json::Value;

    use crate::domain::{KnownErrorCode, TaskStatus};
    use crate::transport::signature::{ParameterSet, verify_signature};

    use super::*;

    const SECRET: &str = "test_secret";

    #[derive(Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    struct FakeTransportState {
        requests: Vec<HttpRequest>,
        response_status: u16,
        response_body: String,
        delay: Option<Duration>,
    }

    impl FakeTransport {
        fn new(response_status: u16, response_body: impl Into<String>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    requests: Vec::new(),
                    response_status,
                    response_body: response_body.into(),
                    delay: None,
                })),
            }
        }

        fn slow(delay: Duration) -> Self {
            let transport = Self::new(200, SUCCESS_SEND);
            transport.state.lock().unwrap().delay = Some(delay);
            transport
        }

        fn last_request(&self) -> Option<HttpRequest> {
            self.state.lock().unwrap().requests.last().cloned()
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.state.lock().unwrap().requests.clone()
        }
    }

    impl HttpTransport for FakeTransport {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
            Box::pin(async move {
                let (status, body, delay) = {
                    let mut state = self.state.lock().unwrap();
                    state.requests.push(request);
                    (
                        state.response_status,
                        state.response_body.clone(),
                        state.delay,
                    )
                };
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                Ok(HttpResponse { status, body })
            })
        }
    }

    struct FailingTransport;

    impl HttpTransport for FailingTransport {
        fn execute<'a>(
            &'a self,
            _request: HttpRequest,
        ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
            Box::pin(async { Err::<HttpResponse, BoxError>("connection refused".into()) })
        }
    }

    const SUCCESS_SEND: &str = r#"
    {
      "code": 0,
      "message": "success",
      "data": {
        "task_id": "T1",
        "status": "pending",
        "created_at": "2025-11-25T10:00:00Z"
      }
    }
    "#;

    fn make_client(transport: impl HttpTransport + 'static) -> PushClient {
        PushClient::builder(
            "https://example.invalid",
            Credential::new("test_app_id", SECRET).unwrap(),
        )
        .transport(Arc::new(transport))
        .build()
        .unwrap()
    }

    fn message() -> SendMessageRequest {
        SendMessageRequest::new(1, "Acme", "13800138000").template_param("code", "123456")
    }

    fn body_params(request: &HttpRequest) -> ParameterSet {
        let body = request.body.as_deref().expect("request has a body");
        match serde_json::from_slice::<Value>(body).unwrap() {
            Value::Object(map) => map,
            other => panic!("body is not an object: {other}"),
        }
    }

    fn assert_signed(request: &HttpRequest, path: &str, params: Option<&ParameterSet>) {
        let timestamp = request.header(HEADER_TIMESTAMP).unwrap();
        let nonce = request.header(HEADER_NONCE).unwrap();
        let signature = request.header(HEADER_SIGNATURE).unwrap();

        assert!(timestamp.parse::<u64>().is_ok(), "timestamp: {timestamp}");
        assert!(Uuid::parse_str(nonce).is_ok(), "nonce: {nonce}");
        assert_eq!(signature.len(), 64);
        assert!(verify_signature(
            request.method.as_str(),
            path,
            params,
            timestamp,
            nonce,
            SECRET,
            signature
        ));
    }

    #[tokio::test]
    async fn send_message_signs_body_and_parses_ok_response() {
        let transport = FakeTransport::new(200, SUCCESS_SEND);
        let client = make_client(transport.clone());

        let data = client.send_message(&message()).await.unwrap();
        assert_eq!(data.task_id, "T1");
        assert_eq!(data.status, TaskStatus::Pending);
        assert_eq!(data.created_at, "2025-11-25T10:00:00Z");

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "https://example.invalid/api/v1/messages");
        assert_eq!(request.header("X-App-Id"), Some("test_app_id"));
        assert_eq!(request.header("Content-Type"), Some("application/json"));

        let params = body_params(&request);
        assert_eq!(params["receiver"], "13800138000");
        assert_eq!(params["template_params"]["code"], "123456");
        assert_signed(&request, "/api/v1/messages", Some(&params));
    }

    #[tokio::test]
    async fn send_batch_uses_batch_path() {
        let json = r#"
        {
          "code": 0,
          "message": "success",
          "data": {
            "batch_id": "B1",
            "total_count": 3,
            "success_count": 3,
            "failed_count": 0,
            "created_at": "2025-11-25T10:00:00Z"
          }
        }
        "#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(transport.clone());

        let request = SendBatchRequest::new(1, "Acme", ["1", "2", "3"]);
        let data = client.send_batch(&request).await.unwrap();
        assert_eq!(data.batch_id, "B1");
        assert_eq!(data.total_count, 3);
        assert_eq!(data.success_count, 3);
        assert_eq!(data.failed_count, 0);

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.url, "https://example.invalid/api/v1/messages/batch");
        let params = body_params(&sent);
        assert_signed(&sent, "/api/v1/messages/batch", Some(&params));
    }

    #[tokio::test]
    async fn query_task_sends_signed_get_without_body() {
        let json = r#"
        {
          "code": 0,
          "message": "success",
          "data": {
            "id": 1,
            "task_id": "T1",
            "app_id": "test_app_id",
            "channel_id": 1,
            "message_type": "sms",
            "receiver": "13800138000",
            "content": "code 123456",
            "status": "success",
            "callback_status": "delivered",
            "retry_count": 0,
            "max_retry": 3,
            "created_at": "2025-11-25T10:00:00Z",
            "updated_at": "2025-11-25T10:00:02Z"
          }
        }
        "#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(transport.clone());

        let data = client
            .query_task(&TaskId::new("T1").unwrap())
            .await
            .unwrap();
        assert_eq!(data.task_id, "T1");
        assert_eq!(data.status, TaskStatus::Success);
        assert_eq!(data.max_retry, 3);

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, "https://example.invalid/api/v1/messages/T1");
        assert!(request.body.is_none());
        assert_eq!(request.header("Content-Type"), None);
        assert_signed(&request, "/api/v1/messages/T1", None);
    }

    #[tokio::test]
    async fn nonzero_code_maps_to_api_error() {
        let transport = FakeTransport::new(200, r#"{"code":20003,"message":"signature invalid"}"#);
        let client = make_client(transport);

        let err = client.send_message(&message()).await.unwrap_err();
        assert!(err.is_api_error());
        match err {
            PushError::Api { code, message } => {
                assert_eq!(code.as_i32(), 20003);
                assert_eq!(message, "signature invalid");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn null_message_with_nonzero_code_is_api_error() {
        let transport = FakeTransport::new(200, r#"{"code":40001,"message":null}"#);
        let client = make_client(transport);

        match client.send_message(&message()).await.unwrap_err() {
            PushError::Api { code, message } => {
                assert_eq!(code.known(), Some(KnownErrorCode::InternalError));
                assert_eq!(message, "");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn error_envelope_on_non_success_status_is_still_api_error() {
        let transport = FakeTransport::new(401, r#"{"code":20002,"message":"invalid app id"}"#);
        let client = make_client(transport);

        let err = client.send_message(&message()).await.unwrap_err();
        assert_eq!(err.api_code(), Some(ErrorCode::new(20002)));
    }

    #[tokio::test]
    async fn non_envelope_error_body_maps_to_http_status() {
        let transport = FakeTransport::new(502, "bad gateway");
        let client = make_client(transport);

        let err = client.send_message(&message()).await.unwrap_err();
        assert!(matches!(
            err,
            PushError::HttpStatus {
                status: 502,
                body: Some(_)
            }
        ));
    }

    #[tokio::test]
    async fn empty_error_body_maps_to_none() {
        let transport = FakeTransport::new(503, "   ");
        let client = make_client(transport);

        let err = client.send_message(&message()).await.unwrap_err();
        assert!(matches!(
            err,
            PushError::HttpStatus {
                status: 503,
                body: None
            }
        ));
    }

    #[tokio::test]
    async fn invalid_json_maps_to_decode_error() {
        let transport = FakeTransport::new(200, "{ not json }");
        let client = make_client(transport);

        let err = client.send_message(&message()).await.unwrap_err();
        assert!(matches!(err, PushError::Decode(_)));
    }

    #[tokio::test]
    async fn success_without_data_is_reported() {
        let transport = FakeTransport::new(200, r#"{"code":0,"message":"success"}"#);
        let client = make_client(transport);

        let err = client.send_message(&message()).await.unwrap_err();
        assert!(matches!(err, PushError::MissingData));
    }

    #[tokio::test]
    async fn transport_failure_is_not_an_api_error() {
        let client = make_client(FailingTransport);

        let err = client.send_message(&message()).await.unwrap_err();
        assert!(matches!(err, PushError::Transport(_)));
        assert!(!err.is_api_error());
        assert!(!err.is_timeout());
    }

    #[tokio::test]
    async fn context_deadline_aborts_slow_exchange() {
        let transport = FakeTransport::slow(Duration::from_secs(5));
        let client = make_client(transport);
        let ctx = CallContext::new().with_timeout(Duration::from_millis(50));

        let started = std::time::Instant::now();
        let err = client
            .send_message_with_context(&ctx, &message())
            .await
            .unwrap_err();
        assert!(err.is_timeout(), "unexpected error: {err:?}");
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn client_timeout_applies_without_context() {
        let transport = FakeTransport::slow(Duration::from_secs(5));
        let client = PushClient::builder(
            "https://example.invalid",
            Credential::new("test_app_id", SECRET).unwrap(),
        )
        .timeout(Duration::from_millis(50))
        .transport(Arc::new(transport))
        .build()
        .unwrap();

        let err = client.send_message(&message()).await.unwrap_err();
        assert!(matches!(err, PushError::DeadlineExceeded));
    }

    #[tokio::test]
    async fn cancellation_aborts_in_flight_exchange() {
        let transport = FakeTransport::slow(Duration::from_secs(5));
        let client = make_client(transport);
        let handle = CancelHandle::new();
        let ctx = CallContext::new().with_cancel(handle.signal());

        let canceller = handle.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let err = client
            .send_message_with_context(&ctx, &message())
            .await
            .unwrap_err();
        assert!(err.is_cancelled(), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn already_cancelled_context_never_reaches_transport() {
        let transport = FakeTransport::new(200, SUCCESS_SEND);
        let client = make_client(transport.clone());
        let handle = CancelHandle::new();
        handle.cancel();
        let ctx = CallContext::new().with_cancel(handle.signal());

        let err = client
            .query_task_with_context(&ctx, &TaskId::new("T1").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, PushError::Cancelled));
        assert!(transport.last_request().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_calls_use_distinct_nonces() {
        let transport = FakeTransport::new(200, SUCCESS_SEND);
        let client = make_client(transport.clone());

        let handles = (0..16)
            .map(|idx| {
                let client = client.clone();
                tokio::spawn(async move {
                    let request = SendMessageRequest::new(1, "Acme", format!("1380013{idx:04}"));
                    client.send_message(&request).await
                })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let requests = transport.requests();
        assert_eq!(requests.len(), 16);

        let nonces = requests
            .iter()
            .map(|request| request.header(HEADER_NONCE).unwrap().to_owned())
            .collect::<HashSet<_>>();
        assert_eq!(nonces.len(), 16);

        for request in &requests {
            let params = body_params(request);
            assert_signed(request, "/api/v1/messages", Some(&params));
        }
    }

    #[test]
    fn builder_validates_base_url() {
        let credential = Credential::new("id", "secret").unwrap();
        let err = PushClient::builder("not a url", credential.clone())
            .build()
            .err()
            .unwrap();
        assert!(matches!(
            err,
            PushError::Validation(ValidationError::InvalidBaseUrl { .. })
        ));

        let client = PushClient::builder("https://push.example.com/", credential)
            .transport(Arc::new(FakeTransport::new(200, "{}")))
            .build()
            .unwrap();
        assert_eq!(client.base_url().as_str(), "https://push.example.com");
        assert_eq!(client.app_id().as_str(), "id");
    }

    #[test]
    fn credential_constructor_validates_inputs() {
        assert!(Credential::new("   ", "secret").is_err());
        assert!(Credential::new("id", "").is_err());

        let credential = Credential::new("id", "super-secret").unwrap();
        assert!(!format!("{credential:?}").contains("super-secret"));
    }
}
