// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::ecsrun::{
    cli::{CommandValue, ConfigEntry, ConfigFile},
    EcsRunError, EcsRunResult, STATE,
};
use std::{
    collections::BTreeMap,
    fs::OpenOptions,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};
use tracing::info;

const PLACEHOLDER: &str = "REPLACE_ME";

fn template() -> ConfigFile {
    let entry = ConfigEntry {
        cluster: Some(PLACEHOLDER.to_string()),
        task: Some(PLACEHOLDER.to_string()),
        security_group: Some(PLACEHOLDER.to_string()),
        subnet: Some(PLACEHOLDER.to_string()),
        cmd: Some(CommandValue::List(
            ["bash", "-c", "echo", "hello", "world"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )),
        ..Default::default()
    };

    ConfigFile::new(BTreeMap::from([(
        STATE.default_config_name.to_string(),
        entry,
    )]))
}

// Write a starter config file into `dir`. An existing file is never
// overwritten.
pub fn write_template(dir: &Path) -> EcsRunResult<PathBuf> {
    let path = dir.join(STATE.init_file_name);
    let yaml = serde_yaml::to_string(&template()).map_err(|err| EcsRunError::Config {
        dbg: format!("Failed to render config template. {err}"),
    })?;

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|err| match err.kind() {
            ErrorKind::AlreadyExists => EcsRunError::Io {
                dbg: format!("{} already exists.", path.display()),
            },
            _ => EcsRunError::Io {
                dbg: format!("Failed to create {}. {err}", path.display()),
            },
        })?;
    file.write_all(yaml.as_bytes())
        .map_err(|err| EcsRunError::Io {
            dbg: format!("Failed to write {}. {err}", path.display()),
        })?;

    info!("Wrote {}", path.display());
    Ok(path)
}
