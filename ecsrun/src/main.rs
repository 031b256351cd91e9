// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    ecs_utils::EcsClient,
    ecsrun::{Cli, Command, EcsRunError, EcsRunResult, RunMode, VERSION},
};
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

mod ecs_utils;
mod ecsrun;
mod session;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over --verbose
    let level = if cli.global.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,ecsrun={level}")));
    let (non_blocking, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .init();

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> EcsRunResult<()> {
    match cli.command {
        Some(Command::Init) => {
            let dir = std::env::current_dir().map_err(|err| EcsRunError::Io {
                dbg: format!("Unable to read the current directory. {err}"),
            })?;
            let path = ecsrun::write_template(&dir)?;
            println!("Created {}", path.display());
            return Ok(());
        }
        Some(Command::Version) => {
            println!("{}", VERSION);
            return Ok(());
        }
        None => {}
    }

    let config = cli
        .process_config_files()?
        .resolve(std::env::var("AWS_PROFILE").ok())?;
    debug!("{:?}", config.session);

    let session_config = config.session;
    let outcome = ecsrun::run(&config.run, RunMode::new(config.dry_run), || async move {
        let sdk_config = session::load(&session_config).await?;
        Ok(EcsClient::new(&sdk_config))
    })
    .await?;

    println!("{}", outcome.render()?);
    Ok(())
}
