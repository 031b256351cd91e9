// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::ecs_utils::{self, RunConfig, RunTaskRequest, TaskLaunch, TaskRunner};
use std::future::Future;
use tracing::info;

mod cli;
mod error;
mod init;
mod state;
mod version;

pub use cli::{Cli, Command};
pub use error::{EcsRunError, EcsRunResult};
pub use init::write_template;
pub use state::STATE;
pub use version::VERSION;

pub enum RunMode {
    // Build and print the request without contacting AWS.
    DryRun,

    Full,
}

impl RunMode {
    pub fn new(dry_run: bool) -> Self {
        if dry_run {
            RunMode::DryRun
        } else {
            RunMode::Full
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    Preview(RunTaskRequest),
    Launched(TaskLaunch),
}

impl Outcome {
    pub fn render(&self) -> EcsRunResult<String> {
        let rendered = match self {
            Outcome::Preview(request) => serde_json::to_string_pretty(request),
            Outcome::Launched(launch) => serde_json::to_string_pretty(launch),
        };
        rendered.map_err(|err| EcsRunError::Config {
            dbg: format!("Failed to render output. {err}"),
        })
    }
}

// Build the RunTask request for `config` and, unless this is a dry run,
// send it.
//
// `connect` is only awaited for a full run so a dry run never needs AWS
// credentials.
pub async fn run<R, F, Fut>(config: &RunConfig, mode: RunMode, connect: F) -> EcsRunResult<Outcome>
where
    R: TaskRunner,
    F: FnOnce() -> Fut,
    Fut: Future<Output = EcsRunResult<R>>,
{
    let request = RunTaskRequest::from(config);

    match mode {
        RunMode::DryRun => {
            info!("Dry run. RunTask will not be invoked");
            Ok(Outcome::Preview(request))
        }
        RunMode::Full => {
            let runner = connect().await?;
            let launch = ecs_utils::dispatch(&runner, &request).await?;
            Ok(Outcome::Launched(launch))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs_utils::{testing_parts, LaunchedTask};
    use std::cell::Cell;

    struct CountingRunner<'a> {
        calls: &'a Cell<usize>,
    }

    impl TaskRunner for CountingRunner<'_> {
        async fn run_task(&self, request: &RunTaskRequest) -> EcsRunResult<TaskLaunch> {
            self.calls.set(self.calls.get() + 1);
            Ok(TaskLaunch {
                tasks: vec![LaunchedTask {
                    task_arn: format!("arn:aws:ecs:task/{}", request.cluster),
                    last_status: None,
                }],
                failures: vec![],
            })
        }
    }

    #[tokio::test]
    async fn dry_run_never_connects() {
        let config = RunConfig::new(testing_parts());
        let connects = &Cell::new(0);
        let calls = &Cell::new(0);

        let outcome = run(&config, RunMode::new(true), || async move {
            connects.set(connects.get() + 1);
            Ok(CountingRunner { calls })
        })
        .await
        .unwrap();

        assert_eq!(connects.get(), 0);
        assert_eq!(calls.get(), 0);
        match outcome {
            Outcome::Preview(request) => assert_eq!(request, RunTaskRequest::from(&config)),
            other => panic!("expected preview, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn full_run_invokes_run_task_once() {
        let config = RunConfig::new(testing_parts());
        let calls = &Cell::new(0);

        let outcome = run(&config, RunMode::new(false), || async move {
            Ok(CountingRunner { calls })
        })
        .await
        .unwrap();

        assert_eq!(calls.get(), 1);
        let rendered = outcome.render().unwrap();
        assert!(rendered.contains("arn:aws:ecs:task/shred"));
    }

    #[tokio::test]
    async fn connect_failure_is_fatal() {
        let config = RunConfig::new(testing_parts());

        let result = run(&config, RunMode::Full, || async {
            Err::<CountingRunner<'static>, _>(EcsRunError::Session {
                dbg: "no credentials".to_string(),
            })
        })
        .await;

        assert!(matches!(result, Err(EcsRunError::Session { .. })));
    }
}
