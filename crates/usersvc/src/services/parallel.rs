//! Concurrent sub-tasks sharing one cancellation token.
//!
//! Every sub-task is spawned at once. The first failure cancels the token;
//! a sub-task that has not started yet sees the token and is skipped, one
//! already running finishes. The caller gets the first failure in completion
//! order, as `ServiceError::Storage`.

use std::future::Future;
use std::time::Duration;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use usersvc_core::service::{Result, ServiceError};

/// A named unit of work for [`run_parallel`].
pub struct SubTask {
    pub name: &'static str,
    pub future: BoxFuture<'static, Result<()>>,
}

impl SubTask {
    pub fn new<F>(name: &'static str, future: F) -> Self
    where
        F: Future<Output = Result<()>> + Send + 'static,
    {
        Self {
            name,
            future: future.boxed(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Completed,
    Skipped,
}

async fn guarded(
    task: SubTask,
    token: CancellationToken,
    timeout: Option<Duration>,
) -> Result<Outcome> {
    if token.is_cancelled() {
        return Ok(Outcome::Skipped);
    }

    let result = match timeout {
        Some(limit) => tokio::time::timeout(limit, task.future)
            .await
            .unwrap_or_else(|_| Err(ServiceError::Storage(format!("timed out after {limit:?}")))),
        None => task.future.await,
    };

    match result {
        Ok(()) => Ok(Outcome::Completed),
        Err(err) => {
            token.cancel();
            Err(err)
        }
    }
}

/// Runs every task concurrently and waits for all of them.
///
/// Returns the first failure, wrapped as `Storage` with the task name. Each
/// sub-task is bounded by `timeout` when one is given.
pub async fn run_parallel(tasks: Vec<SubTask>, timeout: Option<Duration>) -> Result<()> {
    let token = CancellationToken::new();
    let mut set = JoinSet::new();

    for task in tasks {
        let name = task.name;
        let token = token.clone();
        set.spawn(async move { (name, guarded(task, token, timeout).await) });
    }

    let mut first_failure: Option<ServiceError> = None;
    while let Some(joined) = set.join_next().await {
        let failure = match joined {
            Ok((name, Ok(Outcome::Completed))) => {
                tracing::debug!(task = name, "sub-task completed");
                continue;
            }
            Ok((name, Ok(Outcome::Skipped))) => {
                tracing::warn!(task = name, "sub-task skipped after cancellation");
                continue;
            }
            Ok((name, Err(err))) => {
                tracing::error!(task = name, error = %err, "sub-task failed");
                ServiceError::Storage(format!("{name} failed: {err}"))
            }
            Err(join_err) => {
                tracing::error!(error = %join_err, "sub-task aborted");
                token.cancel();
                ServiceError::Storage(format!("sub-task aborted: {join_err}"))
            }
        };
        first_failure.get_or_insert(failure);
    }

    match first_failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
