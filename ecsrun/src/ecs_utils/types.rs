// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::ecsrun::EcsRunError;
use serde::Serialize;
use std::str::FromStr;

macro_rules! ecs_new_types {
    ($name:ident) => {
        #[derive(Clone, Debug, Eq, PartialEq, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                $name(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                $name(value.to_string())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

ecs_new_types!(ClusterName);
ecs_new_types!(SubnetId);
ecs_new_types!(SecurityGroupId);
ecs_new_types!(ContainerName);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LaunchType {
    Fargate,
    Ec2,
    External,
}

impl LaunchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LaunchType::Fargate => "FARGATE",
            LaunchType::Ec2 => "EC2",
            LaunchType::External => "EXTERNAL",
        }
    }
}

impl FromStr for LaunchType {
    type Err = EcsRunError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FARGATE" => Ok(LaunchType::Fargate),
            "EC2" => Ok(LaunchType::Ec2),
            "EXTERNAL" => Ok(LaunchType::External),
            other => Err(EcsRunError::Config {
                dbg: format!("Unknown launch type `{other}`. Expected one of FARGATE, EC2, EXTERNAL"),
            }),
        }
    }
}

impl std::fmt::Display for LaunchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssignPublicIp {
    Enabled,
    Disabled,
}

impl AssignPublicIp {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignPublicIp::Enabled => "ENABLED",
            AssignPublicIp::Disabled => "DISABLED",
        }
    }
}

impl From<bool> for AssignPublicIp {
    fn from(public: bool) -> Self {
        if public {
            AssignPublicIp::Enabled
        } else {
            AssignPublicIp::Disabled
        }
    }
}

// A task definition family and optional revision.
//
// ECS accepts either `family` (latest active revision) or `family:revision`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskDefinition {
    name: String,
    revision: Option<String>,
}

impl TaskDefinition {
    pub fn new(name: String, revision: Option<String>) -> Self {
        let revision = revision
            .map(|rev| rev.trim().to_string())
            .filter(|rev| !rev.is_empty());
        TaskDefinition { name, revision }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }

    pub fn identifier(&self) -> String {
        match self.revision() {
            Some(revision) => format!("{}:{}", self.name, revision),
            None => self.name.clone(),
        }
    }
}

// The fully resolved configuration for a single RunTask invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    cluster: ClusterName,
    task_definition: TaskDefinition,
    container_name: ContainerName,
    command: Vec<String>,
    launch_type: LaunchType,
    count: i32,
    subnet: SubnetId,
    security_group: SecurityGroupId,
    public: bool,
}

pub struct RunConfigParts {
    pub cluster: ClusterName,
    pub task_definition: TaskDefinition,
    pub container_name: Option<ContainerName>,
    pub command: Vec<String>,
    pub launch_type: LaunchType,
    pub count: i32,
    pub subnet: SubnetId,
    pub security_group: SecurityGroupId,
    pub public: bool,
}

impl RunConfig {
    pub fn new(parts: RunConfigParts) -> Self {
        // the container is usually named after its task definition
        let container_name = parts
            .container_name
            .unwrap_or_else(|| ContainerName::from(parts.task_definition.name()));

        RunConfig {
            cluster: parts.cluster,
            task_definition: parts.task_definition,
            container_name,
            command: parts.command,
            launch_type: parts.launch_type,
            count: parts.count,
            subnet: parts.subnet,
            security_group: parts.security_group,
            public: parts.public,
        }
    }

    pub fn cluster(&self) -> &ClusterName {
        &self.cluster
    }

    pub fn task_definition(&self) -> &TaskDefinition {
        &self.task_definition
    }

    pub fn container_name(&self) -> &ContainerName {
        &self.container_name
    }

    pub fn command(&self) -> &[String] {
        &self.command
    }

    pub fn launch_type(&self) -> LaunchType {
        self.launch_type
    }

    pub fn count(&self) -> i32 {
        self.count
    }

    pub fn subnet(&self) -> &SubnetId {
        &self.subnet
    }

    pub fn security_group(&self) -> &SecurityGroupId {
        &self.security_group
    }

    pub fn assign_public_ip(&self) -> AssignPublicIp {
        AssignPublicIp::from(self.public)
    }
}

#[cfg(test)]
pub(crate) fn testing_parts() -> RunConfigParts {
    RunConfigParts {
        cluster: "shred".into(),
        task_definition: TaskDefinition::new("task-def-name".to_string(), None),
        container_name: None,
        command: vec!["echo".to_string(), "hello world".to_string()],
        launch_type: LaunchType::Fargate,
        count: 1,
        subnet: "public-subnet-1".into(),
        security_group: "sg-1".into(),
        public: false,
    }
}
