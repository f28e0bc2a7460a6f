use std::io;

use mliev_push::{PushConfig, PushError, SendMessageRequest};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let receiver = std::env::var("MLIEV_PUSH_RECEIVER").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "MLIEV_PUSH_RECEIVER environment variable is required",
        )
    })?;
    let signature_name =
        std::env::var("MLIEV_PUSH_SIGNATURE").unwrap_or_else(|_| "Demo".to_owned());
    let code = std::env::var("MLIEV_PUSH_CODE").unwrap_or_else(|_| "123456".to_owned());

    let client = PushConfig::from_env()?.build_client()?;
    let request = SendMessageRequest::new(1, signature_name, receiver)
        .template_param("code", code)
        .template_param("expire_time", "5");

    match client.send_message(&request).await {
        Ok(data) => {
            println!(
                "task_id: {}, status: {:?}, created_at: {}",
                data.task_id, data.status, data.created_at
            );
        }
        Err(PushError::Api { code, message }) => {
            println!(
                "rejected by server: [{code}] {message} ({})",
                code.description()
            );
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
