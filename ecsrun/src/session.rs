// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::ecsrun::{EcsRunError, EcsRunResult};
use aws_config::BehaviorVersion;
use aws_credential_types::provider::ProvideCredentials;
use aws_runtime::env_config::file::{EnvConfigFileKind, EnvConfigFiles};
use aws_types::region::Region;
use std::path::PathBuf;
use tracing::debug;

// How to reach AWS: which profile, region and credentials file to use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub profile: String,
    pub region: Option<String>,
    pub cred: Option<PathBuf>,
}

impl SessionConfig {
    fn profile_files(&self) -> Option<EnvConfigFiles> {
        self.cred.as_ref().map(|cred| {
            debug!("Cred File: {}", cred.display());
            EnvConfigFiles::builder()
                .include_default_config_file(true)
                .with_file(EnvConfigFileKind::Credentials, cred)
                .build()
        })
    }
}

// Load the shared AWS config and make sure credentials and a region resolve
pub async fn load(session: &SessionConfig) -> EcsRunResult<aws_types::SdkConfig> {
    debug!("Using AWS Profile: {}", session.profile);

    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).profile_name(&session.profile);
    if let Some(region) = &session.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(profile_files) = session.profile_files() {
        loader = loader.profile_files(profile_files);
    }
    let sdk_config = loader.load().await;

    let region = sdk_config.region().ok_or(EcsRunError::Session {
        dbg: "No AWS region configured. Pass --region, set AWS_REGION or add one to your profile."
            .to_string(),
    })?;
    debug!("Using AWS Region: {}", region);

    let provider = sdk_config
        .credentials_provider()
        .ok_or(EcsRunError::Session {
            dbg: "No AWS credentials provider available.".to_string(),
        })?;
    provider
        .provide_credentials()
        .await
        .map_err(|err| EcsRunError::Session {
            dbg: format!(
                "Unable to load AWS credentials for profile `{}`. Check your credentials and profile. {err}",
                session.profile
            ),
        })?;

    Ok(sdk_config)
}
