// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::ecs_utils::LaunchType;

pub const STATE: State = State {
    // config
    config_file_names: &["ecsrun.yaml", "ecsrun.yml", ".ecsrun.yaml"],
    init_file_name: "ecsrun.yaml",
    default_config_name: "default",

    // task
    default_launch_type: LaunchType::Fargate,
    default_count: 1,
    // ECS accepts at most 10 tasks per RunTask call
    max_count: 10,

    // aws
    default_aws_profile: "default",
};

pub struct State {
    // config
    pub config_file_names: &'static [&'static str],
    pub init_file_name: &'static str,
    pub default_config_name: &'static str,

    // task
    pub default_launch_type: LaunchType,
    pub default_count: i32,
    pub max_count: i32,

    // aws
    pub default_aws_profile: &'static str,
}

impl State {
    pub fn count_in_range(&self, count: i32) -> bool {
        (1..=self.max_count).contains(&count)
    }
}
