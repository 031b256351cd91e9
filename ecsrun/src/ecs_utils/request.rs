// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    ecs_utils::types::{AssignPublicIp, LaunchType, RunConfig},
    ecsrun::{EcsRunError, EcsRunResult},
};
use aws_sdk_ecs::types::{
    AssignPublicIp as AwsAssignPublicIp, AwsVpcConfiguration, ContainerOverride,
    LaunchType as AwsLaunchType, NetworkConfiguration, TaskOverride,
};
use serde::Serialize;

/// The body of an ECS `RunTask` call.
///
/// Serializes to the same shape the ECS API documents so that a dry run
/// preview can be fed to `aws ecs run-task --cli-input-json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunTaskRequest {
    pub cluster: String,
    pub task_definition: String,
    pub count: i32,
    pub launch_type: LaunchType,
    pub network_configuration: NetworkRequest,
    pub overrides: OverrideRequest,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRequest {
    pub awsvpc_configuration: AwsVpcRequest,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsVpcRequest {
    pub subnets: Vec<String>,
    pub security_groups: Vec<String>,
    pub assign_public_ip: AssignPublicIp,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideRequest {
    pub container_overrides: Vec<ContainerOverrideRequest>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContainerOverrideRequest {
    pub name: String,
    pub command: Vec<String>,
}

impl From<&RunConfig> for RunTaskRequest {
    fn from(config: &RunConfig) -> Self {
        RunTaskRequest {
            cluster: config.cluster().as_str().to_owned(),
            task_definition: config.task_definition().identifier(),
            count: config.count(),
            launch_type: config.launch_type(),
            network_configuration: NetworkRequest {
                awsvpc_configuration: AwsVpcRequest {
                    subnets: vec![config.subnet().as_str().to_owned()],
                    security_groups: vec![config.security_group().as_str().to_owned()],
                    assign_public_ip: config.assign_public_ip(),
                },
            },
            overrides: OverrideRequest {
                container_overrides: vec![ContainerOverrideRequest {
                    name: config.container_name().as_str().to_owned(),
                    command: config.command().to_vec(),
                }],
            },
        }
    }
}

impl RunTaskRequest {
    pub fn aws_launch_type(&self) -> AwsLaunchType {
        match self.launch_type {
            LaunchType::Fargate => AwsLaunchType::Fargate,
            LaunchType::Ec2 => AwsLaunchType::Ec2,
            LaunchType::External => AwsLaunchType::External,
        }
    }

    pub fn aws_network_configuration(&self) -> EcsRunResult<NetworkConfiguration> {
        let vpc = &self.network_configuration.awsvpc_configuration;
        let assign_public_ip = match vpc.assign_public_ip {
            AssignPublicIp::Enabled => AwsAssignPublicIp::Enabled,
            AssignPublicIp::Disabled => AwsAssignPublicIp::Disabled,
        };

        let awsvpc = AwsVpcConfiguration::builder()
            .set_subnets(Some(vpc.subnets.clone()))
            .set_security_groups(Some(vpc.security_groups.clone()))
            .assign_public_ip(assign_public_ip)
            .build()
            .map_err(|err| EcsRunError::Ecs {
                dbg: format!("Failed to build network configuration: {err}"),
            })?;

        Ok(NetworkConfiguration::builder()
            .awsvpc_configuration(awsvpc)
            .build())
    }

    pub fn aws_overrides(&self) -> TaskOverride {
        let container_overrides = self
            .overrides
            .container_overrides
            .iter()
            .map(|container| {
                ContainerOverride::builder()
                    .name(&container.name)
                    .set_command(Some(container.command.clone()))
                    .build()
            })
            .collect();

        TaskOverride::builder()
            .set_container_overrides(Some(container_overrides))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs_utils::types::{testing_parts, RunConfig, TaskDefinition};

    #[test]
    fn build_request_from_config() {
        let mut parts = testing_parts();
        parts.task_definition = TaskDefinition::new("task".to_string(), Some("7".to_string()));
        parts.public = true;
        parts.count = 3;
        let config = RunConfig::new(parts);

        let request = RunTaskRequest::from(&config);
        assert_eq!(request.cluster, "shred");
        assert_eq!(request.task_definition, "task:7");
        assert_eq!(request.count, 3);
        assert_eq!(request.launch_type, LaunchType::Fargate);

        let vpc = &request.network_configuration.awsvpc_configuration;
        assert_eq!(vpc.subnets, vec!["public-subnet-1".to_string()]);
        assert_eq!(vpc.security_groups, vec!["sg-1".to_string()]);
        assert_eq!(vpc.assign_public_ip, AssignPublicIp::Enabled);

        let containers = &request.overrides.container_overrides;
        assert_eq!(containers.len(), 1);
        assert_eq!(containers[0].name, "task");
        assert_eq!(containers[0].command, vec!["echo", "hello world"]);
    }

    #[test]
    fn build_is_deterministic() {
        let config = RunConfig::new(testing_parts());
        assert_eq!(RunTaskRequest::from(&config), RunTaskRequest::from(&config));
    }

    #[test]
    fn preview_json_matches_ecs_shape() {
        let config = RunConfig::new(testing_parts());
        let request = RunTaskRequest::from(&config);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["taskDefinition"], "task-def-name");
        assert_eq!(json["launchType"], "FARGATE");
        assert_eq!(
            json["networkConfiguration"]["awsvpcConfiguration"]["assignPublicIp"],
            "DISABLED"
        );
        assert_eq!(
            json["overrides"]["containerOverrides"][0]["command"][1],
            "hello world"
        );
    }

    #[test]
    fn convert_to_sdk_types() {
        let mut parts = testing_parts();
        parts.launch_type = LaunchType::Ec2;
        let request = RunTaskRequest::from(&RunConfig::new(parts));

        assert_eq!(request.aws_launch_type(), AwsLaunchType::Ec2);

        let network = request.aws_network_configuration().unwrap();
        let awsvpc = network.awsvpc_configuration().unwrap();
        assert_eq!(awsvpc.subnets(), ["public-subnet-1".to_string()]);
        assert_eq!(awsvpc.security_groups(), ["sg-1".to_string()]);
        assert_eq!(awsvpc.assign_public_ip(), Some(&AwsAssignPublicIp::Disabled));

        let overrides = request.aws_overrides();
        let container = &overrides.container_overrides()[0];
        assert_eq!(container.name(), Some("task-def-name"));
        assert_eq!(container.command(), ["echo".to_string(), "hello world".to_string()]);
    }
}
