// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

// Build metadata, stamped by the release pipeline through env vars
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VersionInfo {
    pub version: &'static str,
    pub commit: &'static str,
    pub date: &'static str,
    pub built_by: &'static str,
}

pub const VERSION: VersionInfo = VersionInfo {
    version: env!("CARGO_PKG_VERSION"),
    commit: unknown_if_none(option_env!("ECSRUN_BUILD_COMMIT")),
    date: unknown_if_none(option_env!("ECSRUN_BUILD_DATE")),
    built_by: unknown_if_none(option_env!("ECSRUN_BUILT_BY")),
};

const fn unknown_if_none(value: Option<&'static str>) -> &'static str {
    match value {
        Some(value) => value,
        None => "unknown",
    }
}

impl std::fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ecsrun {} (commit: {}, built: {}, by: {})",
            self.version, self.commit, self.date, self.built_by
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string() {
        let info = VersionInfo {
            version: "0.1.0",
            commit: "238958943",
            date: "06/19/20",
            built_by: "MDG",
        };

        let result = info.to_string();
        assert!(result.contains("0.1.0"));
        assert!(result.contains("238958943"));
        assert!(result.contains("06/19/20"));
        assert!(result.contains("MDG"));
    }

    #[test]
    fn crate_version() {
        assert_eq!(VERSION.version, env!("CARGO_PKG_VERSION"));
        assert!(!VERSION.commit.is_empty());
    }
}
