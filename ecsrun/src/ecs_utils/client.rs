// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    ecs_utils::request::RunTaskRequest,
    ecsrun::{EcsRunError, EcsRunResult},
};
use aws_sdk_ecs::{error::DisplayErrorContext, operation::run_task::RunTaskOutput};
use serde::Serialize;
use std::future::Future;
use tracing::{debug, info};

/// The single ECS operation this tool needs.
///
/// Implemented by [`EcsClient`] for real runs and by fakes in tests.
pub trait TaskRunner {
    fn run_task(
        &self,
        request: &RunTaskRequest,
    ) -> impl Future<Output = EcsRunResult<TaskLaunch>>;
}

pub struct EcsClient {
    client: aws_sdk_ecs::Client,
}

impl EcsClient {
    pub fn new(sdk_config: &aws_types::SdkConfig) -> Self {
        EcsClient {
            client: aws_sdk_ecs::Client::new(sdk_config),
        }
    }
}

impl TaskRunner for EcsClient {
    async fn run_task(&self, request: &RunTaskRequest) -> EcsRunResult<TaskLaunch> {
        debug!("{:?}", request);
        let output = self
            .client
            .run_task()
            .cluster(&request.cluster)
            .task_definition(&request.task_definition)
            .count(request.count)
            .launch_type(request.aws_launch_type())
            .network_configuration(request.aws_network_configuration()?)
            .overrides(request.aws_overrides())
            .send()
            .await
            .map_err(|err| EcsRunError::Ecs {
                dbg: format!(
                    "Received error when invoking RunTask: {}",
                    DisplayErrorContext(&err)
                ),
            })?;

        info!("RunTask accepted by cluster {}", request.cluster);
        Ok(TaskLaunch::from(output))
    }
}

// Summary of a RunTask response
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TaskLaunch {
    pub tasks: Vec<LaunchedTask>,
    pub failures: Vec<LaunchFailure>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LaunchedTask {
    pub task_arn: String,
    pub last_status: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LaunchFailure {
    pub arn: Option<String>,
    pub reason: Option<String>,
    pub detail: Option<String>,
}

impl std::fmt::Display for LaunchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.arn.as_deref().unwrap_or("<no arn>"),
            self.reason.as_deref().unwrap_or("unknown reason")
        )?;
        if let Some(detail) = &self.detail {
            write!(f, " ({})", detail)?;
        }
        Ok(())
    }
}

impl From<RunTaskOutput> for TaskLaunch {
    fn from(output: RunTaskOutput) -> Self {
        let tasks = output
            .tasks()
            .iter()
            .filter_map(|task| {
                task.task_arn().map(|arn| LaunchedTask {
                    task_arn: arn.to_string(),
                    last_status: task.last_status().map(str::to_string),
                })
            })
            .collect();
        let failures = output
            .failures()
            .iter()
            .map(|failure| LaunchFailure {
                arn: failure.arn().map(str::to_string),
                reason: failure.reason().map(str::to_string),
                detail: failure.detail().map(str::to_string),
            })
            .collect();

        TaskLaunch { tasks, failures }
    }
}

impl TaskLaunch {
    pub fn launched_nothing(&self) -> bool {
        self.tasks.is_empty()
    }
}
