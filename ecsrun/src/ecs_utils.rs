// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::ecsrun::{EcsRunError, EcsRunResult};
use tracing::{info, warn};

mod client;
mod request;
mod types;

pub use client::{EcsClient, TaskLaunch, TaskRunner};
pub use request::RunTaskRequest;
pub use types::{LaunchType, RunConfig, RunConfigParts, TaskDefinition};

#[cfg(test)]
pub(crate) use client::LaunchedTask;
#[cfg(test)]
pub(crate) use types::{testing_parts, AssignPublicIp};

// Invoke RunTask exactly once.
//
// There are no retries: ECS is already durable and a second attempt could
// launch the task twice.
pub async fn dispatch<R: TaskRunner>(
    runner: &R,
    request: &RunTaskRequest,
) -> EcsRunResult<TaskLaunch> {
    info!(
        "Running task definition {} on cluster {}",
        request.task_definition, request.cluster
    );
    let launch = runner.run_task(request).await?;

    for failure in launch.failures.iter() {
        warn!("RunTask failure: {}", failure);
    }
    if launch.launched_nothing() {
        let reasons: Vec<String> = launch.failures.iter().map(|f| f.to_string()).collect();
        return Err(EcsRunError::Ecs {
            dbg: format!("RunTask did not start any task. {}", reasons.join("; ")),
        });
    }

    for task in launch.tasks.iter() {
        info!(
            "Started {} ({})",
            task.task_arn,
            task.last_status.as_deref().unwrap_or("UNKNOWN")
        );
    }
    Ok(launch)
}
