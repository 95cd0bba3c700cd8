//! Timeout utilities for page operations

use std::future::Future;
use std::time::Duration;

use crate::error::{HarvestError, HarvestResult};

/// Run a page operation, optionally bounded by a deadline
///
/// With `timeout_secs == None` the operation runs unbounded.
///
/// # Arguments
/// * `operation` - The async Future to execute
/// * `timeout_secs` - Optional timeout in seconds
/// * `operation_name` - Human-readable name for error messages
pub async fn with_page_timeout<F, T>(
    operation: F,
    timeout_secs: Option<u64>,
    operation_name: &str,
) -> HarvestResult<T>
where
    F: Future<Output = HarvestResult<T>>,
{
    let Some(secs) = timeout_secs else {
        return operation.await;
    };

    match tokio::time::timeout(Duration::from_secs(secs), operation).await {
        Ok(result) => result,
        Err(_) => Err(HarvestError::Session(format!(
            "{operation_name} timeout after {secs} seconds"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn unbounded_when_no_timeout() {
        let result = with_page_timeout(
            async {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(7)
            },
            None,
            "navigation",
        )
        .await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_as_session_error() {
        let result: HarvestResult<()> = with_page_timeout(
            async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(())
            },
            Some(5),
            "navigation",
        )
        .await;

        match result {
            Err(HarvestError::Session(msg)) => assert!(msg.contains("navigation timeout after 5")),
            other => panic!("expected session timeout, got {other:?}"),
        }
    }
}
