// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    ecs_utils::LaunchType,
    ecsrun::{cli::types::IntermediateCli, EcsRunResult},
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod types;

pub use types::{CommandValue, ConfigEntry, ConfigFile};

/// Easily run one-off tasks against an ECS cluster.
///
/// ecsrun launches a one-off task from an existing task definition,
/// overriding the container command. Values are taken from flags, then
/// `ECSRUN_*` environment variables, then the selected config file entry.
#[derive(Parser, Debug)]
#[command(name = "ecsrun", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a starter `ecsrun.yaml` in the current directory
    Init,

    /// Print version and build information
    Version,
}

#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Verbose output
    #[arg(short, long, global = true, env = "ECSRUN_VERBOSE")]
    pub verbose: bool,

    /// Config file entry to use
    #[arg(long = "config", global = true, env = "ECSRUN_CONFIG")]
    pub config_name: Option<String>,

    /// Path to the config file (default: ecsrun.yaml in the current or home directory)
    #[arg(long, global = true, env = "ECSRUN_CONFIG_FILE")]
    pub config_file: Option<PathBuf>,

    /// AWS credentials file (default: $HOME/.aws/credentials)
    #[arg(short = 'c', long, global = true, env = "ECSRUN_CRED")]
    pub cred: Option<PathBuf>,

    /// AWS profile to target (default: AWS_PROFILE or 'default')
    #[arg(short, long, global = true, env = "ECSRUN_PROFILE")]
    pub profile: Option<String>,

    /// AWS region to target (default: AWS_REGION or the profile's region)
    #[arg(short, long, global = true, env = "ECSRUN_REGION")]
    pub region: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// ECS cluster to run the task in
    #[arg(long, env = "ECSRUN_CLUSTER")]
    pub cluster: Option<String>,

    /// Task definition family
    #[arg(short, long, env = "ECSRUN_TASK")]
    pub task: Option<String>,

    /// Task definition revision (default: latest active)
    #[arg(long, env = "ECSRUN_REVISION")]
    pub revision: Option<String>,

    /// Container to override (default: the task definition family)
    #[arg(short, long, env = "ECSRUN_NAME")]
    pub name: Option<String>,

    /// Launch type: FARGATE, EC2 or EXTERNAL (default: FARGATE)
    #[arg(short, long, env = "ECSRUN_LAUNCH_TYPE", value_parser = parse_launch_type)]
    pub launch_type: Option<LaunchType>,

    /// Command to run, comma delimited (e.g. `bash,-c,echo hello`)
    #[arg(long, env = "ECSRUN_CMD", value_delimiter = ',')]
    pub cmd: Vec<String>,

    /// Number of tasks to launch (default: 1)
    #[arg(long, env = "ECSRUN_COUNT", value_parser = clap::value_parser!(i32).range(1..=10))]
    pub count: Option<i32>,

    /// Subnet to launch the task in
    #[arg(short, long, env = "ECSRUN_SUBNET")]
    pub subnet: Option<String>,

    /// Security group to attach to the task
    #[arg(long, env = "ECSRUN_SECURITY_GROUP")]
    pub security_group: Option<String>,

    /// Assign a public IP to the task
    #[arg(
        long,
        env = "ECSRUN_PUBLIC",
        value_parser = clap::builder::BoolishValueParser::new(),
        num_args = 0..=1,
        default_missing_value = "true",
        require_equals = true
    )]
    pub public: Option<bool>,

    /// Print the RunTask request instead of sending it
    #[arg(short, long, env = "ECSRUN_DRY_RUN")]
    pub dry_run: bool,
}

fn parse_launch_type(value: &str) -> Result<LaunchType, String> {
    value.parse().map_err(|err| format!("{err}"))
}

impl Cli {
    // Locate and read the config file, then pair it with the parsed flags
    pub fn process_config_files(self) -> EcsRunResult<IntermediateCli> {
        let search_dirs: Vec<PathBuf> = std::env::current_dir()
            .ok()
            .into_iter()
            .chain(dirs::home_dir())
            .collect();

        let config_file = match &self.global.config_file {
            Some(path) => Some(ConfigFile::from_file(path)?),
            None => match ConfigFile::discover(&search_dirs) {
                Some(path) => Some(ConfigFile::from_file(&path)?),
                None => None,
            },
        };

        IntermediateCli::new(self.global, self.run, config_file)
    }
}
