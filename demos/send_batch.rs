use std::io;

use mliev_push::{PushConfig, SendBatchRequest};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let receivers_raw = std::env::var("MLIEV_PUSH_RECEIVERS").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "MLIEV_PUSH_RECEIVERS environment variable is required (comma-separated)",
        )
    })?;
    let signature_name =
        std::env::var("MLIEV_PUSH_SIGNATURE").unwrap_or_else(|_| "Demo".to_owned());

    let receivers = receivers_raw
        .split(',')
        .map(str::trim)
        .filter(|receiver| !receiver.is_empty())
        .collect::<Vec<_>>();

    let client = PushConfig::from_env()?.build_client()?;
    let request = SendBatchRequest::new(1, signature_name, receivers)
        .template_param("content", "Scheduled maintenance tonight at 22:00")
        .template_param("duration", "2 hours");

    let data = client.send_batch(&request).await?;
    println!(
        "batch_id: {}, total: {}, queued: {}, failed: {}, created_at: {}",
        data.batch_id, data.total_count, data.success_count, data.failed_count, data.created_at
    );

    Ok(())
}
