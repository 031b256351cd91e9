// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

pub type EcsRunResult<T, E = EcsRunError> = Result<T, E>;

#[derive(Debug)]
pub enum EcsRunError {
    Config { dbg: String },
    MissingRequired { fields: Vec<&'static str> },
    Session { dbg: String },
    Ecs { dbg: String },
    Io { dbg: String },
}

impl std::fmt::Display for EcsRunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EcsRunError::Config { dbg } => write!(f, "{}", dbg),
            EcsRunError::MissingRequired { fields } => write!(
                f,
                "Missing required configuration: {}. Set them via flags, ECSRUN_* environment variables or the config file.",
                fields.join(", ")
            ),
            EcsRunError::Session { dbg } => write!(f, "{}", dbg),
            EcsRunError::Ecs { dbg } => write!(f, "{}", dbg),
            EcsRunError::Io { dbg } => write!(f, "{}", dbg),
        }
    }
}

impl std::error::Error for EcsRunError {}
