/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use serde::Serialize;

use crate::config::error::ErrorDisplayConfig;
use crate::plugin::InterceptedCall;

pub const PYPROJECT_FILE_NAME: &str = "pyproject.toml";

/// Settings for the setattr checks, read from a standalone TOML file or
/// from the `[tool.setattr-check]` table of `pyproject.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SetattrConfig {
    /// The calls to intercept, by fully-qualified name.
    #[serde(default = "InterceptedCall::all")]
    pub hooks: Vec<InterceptedCall>,
    /// Severity overrides, e.g. `missing-attribute = "warn"` or `bad-assignment = false`.
    #[serde(default)]
    pub errors: ErrorDisplayConfig,
}

impl Default for SetattrConfig {
    fn default() -> Self {
        Self {
            hooks: InterceptedCall::all(),
            errors: ErrorDisplayConfig::default(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[error("No [tool.setattr-check] section found in pyproject.toml")]
pub struct SetattrConfigNotFound {}

impl SetattrConfig {
    pub fn is_enabled(&self, call: InterceptedCall) -> bool {
        self.hooks.contains(&call)
    }

    pub fn parse(raw_file: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw_file)?)
    }

    pub fn parse_pyproject_toml(raw_file: &str) -> anyhow::Result<Self> {
        #[derive(Deserialize)]
        struct Tool {
            #[serde(rename = "setattr-check")]
            setattr_check: Option<SetattrConfig>,
        }

        #[derive(Deserialize)]
        struct PyProject {
            tool: Option<Tool>,
        }

        toml::from_str::<PyProject>(raw_file)?
            .tool
            .and_then(|tool| tool.setattr_check)
            .ok_or_else(|| anyhow::anyhow!(SetattrConfigNotFound {}))
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw_file = std::fs::read_to_string(path)
            .with_context(|| format!("When reading `{}`", path.display()))?;
        let config = if path.file_name().is_some_and(|x| x == PYPROJECT_FILE_NAME) {
            Self::parse_pyproject_toml(&raw_file)
        } else {
            Self::parse(&raw_file)
        };
        config.with_context(|| format!("When parsing `{}`", path.display()))
    }
}
