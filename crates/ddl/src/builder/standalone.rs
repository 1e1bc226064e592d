// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use logpipe_type::{PipelineError, Result, model::DeploymentMode, return_error};

use super::{Builder, Params, template};
use crate::naming::QualifiedName;

/// Single-server DDL: no cluster clause, plain `MergeTree` storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandaloneBuilder;

impl Builder for StandaloneBuilder {
	fn mode(&self) -> DeploymentMode {
		DeploymentMode::Standalone
	}

	fn stream_table(&self, params: &Params) -> Result<String> {
		Ok(template::stream(params.stream("stream table")?, None))
	}

	fn data_table(&self, params: &Params) -> Result<String> {
		Ok(template::data(params.data("data table")?, None, &template::merge_tree()))
	}

	fn view_table(&self, params: &Params) -> Result<String> {
		Ok(template::view(params.view("view table")?, None))
	}

	fn distributed_table(&self, _params: &Params) -> Result<String> {
		return_error!(PipelineError::Unsupported {
			operation: "distributed table",
			mode: DeploymentMode::Standalone,
		})
	}

	fn drop_table(&self, name: &QualifiedName, _cluster: &str) -> Result<String> {
		Ok(template::drop(name, None))
	}
}
