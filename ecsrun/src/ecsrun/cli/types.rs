// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    ecs_utils::{LaunchType, RunConfig, RunConfigParts, TaskDefinition},
    ecsrun::{
        cli::{GlobalArgs, RunArgs},
        EcsRunError, EcsRunResult, STATE,
    },
    session::SessionConfig,
};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs::File,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

// A YAML file of named config entries
//
// ```yaml
// default:
//   cluster: my-cluster
//   task: my-task
// staging:
//   cluster: staging
// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ConfigFile {
    entries: BTreeMap<String, ConfigEntry>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmd: Option<CommandValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cred: Option<PathBuf>,
}

// `revision: 5` and `revision: "5"` are both accepted
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(u64),
    Text(String),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s,
        }
    }
}

// `cmd` may be a YAML list or a string. A string is split on commas when it
// has any, otherwise on whitespace.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CommandValue {
    List(Vec<String>),
    Delimited(String),
}

impl CommandValue {
    fn into_vec(self) -> Vec<String> {
        match self {
            CommandValue::List(list) => list,
            CommandValue::Delimited(s) if s.contains(',') => {
                s.split(',').map(str::to_string).collect()
            }
            CommandValue::Delimited(s) => s.split_whitespace().map(str::to_string).collect(),
        }
    }
}

impl ConfigFile {
    pub fn new(entries: BTreeMap<String, ConfigEntry>) -> Self {
        ConfigFile { entries }
    }

    pub fn from_file(path: &Path) -> EcsRunResult<Self> {
        let file = File::open(path).map_err(|err| EcsRunError::Config {
            dbg: format!("Config file not found: {:?}. {err}", path),
        })?;
        let config: ConfigFile = serde_yaml::from_reader(file).map_err(|err| EcsRunError::Config {
            dbg: format!("Failed to parse config file {:?}. {err}", path),
        })?;
        info!("Using config file: {}", path.display());
        Ok(config)
    }

    // Return the first well known config file found in `search_dirs`
    pub fn discover(search_dirs: &[PathBuf]) -> Option<PathBuf> {
        search_dirs
            .iter()
            .flat_map(|dir| STATE.config_file_names.iter().map(move |name| dir.join(name)))
            .find(|path| path.is_file())
    }

    pub fn entry(&self, name: &str) -> Option<&ConfigEntry> {
        self.entries.get(name)
    }
}

// Parsed flags plus the selected config file entry
#[derive(Debug)]
pub struct IntermediateCli {
    global: GlobalArgs,
    run: RunArgs,
    entry: ConfigEntry,
}

#[derive(Debug)]
pub struct ResolvedConfig {
    pub run: RunConfig,
    pub session: SessionConfig,
    pub dry_run: bool,
}

impl IntermediateCli {
    pub fn new(
        global: GlobalArgs,
        run: RunArgs,
        config_file: Option<ConfigFile>,
    ) -> EcsRunResult<Self> {
        let explicit_name = global.config_name.is_some();
        let name = global
            .config_name
            .as_deref()
            .unwrap_or(STATE.default_config_name);

        let entry = match config_file.as_ref().and_then(|file| file.entry(name)) {
            Some(entry) => entry.clone(),
            None if explicit_name => {
                return Err(EcsRunError::Config {
                    dbg: format!("Config entry `{name}` not found in the config file"),
                })
            }
            None => {
                debug!("no `{name}` config entry. using flags and environment only");
                ConfigEntry::default()
            }
        };

        Ok(IntermediateCli { global, run, entry })
    }

    // Merge flags (and their environment fallbacks) over the config file
    // entry over defaults.
    //
    // Every missing required field is reported at once.
    pub fn resolve(self, aws_profile_env: Option<String>) -> EcsRunResult<ResolvedConfig> {
        let IntermediateCli { global, run, entry } = self;

        let cluster = non_empty(run.cluster).or(non_empty(entry.cluster));
        let task = non_empty(run.task).or(non_empty(entry.task));
        let command = {
            let cmd = normalize_cmd(run.cmd);
            if cmd.is_empty() {
                normalize_cmd(entry.cmd.map(CommandValue::into_vec).unwrap_or_default())
            } else {
                cmd
            }
        };
        let subnet = non_empty(run.subnet).or(non_empty(entry.subnet));
        let security_group = non_empty(run.security_group).or(non_empty(entry.security_group));

        let mut missing = Vec::new();
        if cluster.is_none() {
            missing.push("cluster");
        }
        if task.is_none() {
            missing.push("task");
        }
        if command.is_empty() {
            missing.push("cmd");
        }
        if subnet.is_none() {
            missing.push("subnet");
        }
        if security_group.is_none() {
            missing.push("security-group");
        }

        let (Some(cluster), Some(task), Some(subnet), Some(security_group)) =
            (cluster, task, subnet, security_group)
        else {
            return Err(EcsRunError::MissingRequired { fields: missing });
        };
        if !missing.is_empty() {
            return Err(EcsRunError::MissingRequired { fields: missing });
        }

        let revision = run.revision.or(entry.revision.map(Scalar::into_string));
        let launch_type = match (run.launch_type, entry.launch_type) {
            (Some(launch_type), _) => launch_type,
            (None, Some(launch_type)) => launch_type.parse::<LaunchType>()?,
            (None, None) => STATE.default_launch_type,
        };
        let count = run.count.or(entry.count).unwrap_or(STATE.default_count);
        if !STATE.count_in_range(count) {
            return Err(EcsRunError::Config {
                dbg: format!("count must be between 1 and {}, got {count}", STATE.max_count),
            });
        }

        let run_config = RunConfig::new(RunConfigParts {
            cluster: cluster.into(),
            task_definition: TaskDefinition::new(task, revision),
            container_name: non_empty(run.name).or(non_empty(entry.name)).map(Into::into),
            command,
            launch_type,
            count,
            subnet: subnet.into(),
            security_group: security_group.into(),
            public: run.public.or(entry.public).unwrap_or(false),
        });

        let profile = non_empty(global.profile)
            .or(non_empty(entry.profile))
            .or(non_empty(aws_profile_env))
            .unwrap_or_else(|| STATE.default_aws_profile.to_string());
        let session = SessionConfig {
            profile,
            region: non_empty(global.region).or(non_empty(entry.region)),
            cred: global.cred.or(entry.cred),
        };

        let config = ResolvedConfig {
            run: run_config,
            session,
            dry_run: run.dry_run,
        };
        debug!("{:?}", config);
        Ok(config)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn normalize_cmd(cmd: Vec<String>) -> Vec<String> {
    cmd.into_iter()
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}
