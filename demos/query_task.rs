use std::io;
use std::time::Duration;

use mliev_push::{CallContext, PushConfig, PushError, TaskId};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let task_id = std::env::var("MLIEV_PUSH_TASK_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "MLIEV_PUSH_TASK_ID environment variable is required",
        )
    })?;

    let client = PushConfig::from_env()?.build_client()?;
    let ctx = CallContext::new().with_timeout(Duration::from_secs(5));

    match client
        .query_task_with_context(&ctx, &TaskId::new(task_id)?)
        .await
    {
        Ok(data) => println!(
            "task_id: {}, type: {:?}, status: {:?}, callback: {:?}, retries: {}/{}, updated_at: {}",
            data.task_id,
            data.message_type,
            data.status,
            data.callback_status,
            data.retry_count,
            data.max_retry,
            data.updated_at
        ),
        Err(PushError::DeadlineExceeded) => println!("no answer within 5s"),
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
