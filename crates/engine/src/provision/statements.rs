// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use logpipe_type::{Error, model::Stage};
use serde::{Deserialize, Serialize};

/// SQL of one provisioning run. Statements that were not built, or do not
/// apply to the deployment mode, are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStatements {
	pub stream: String,
	pub data: String,
	pub view: String,
	pub distributed: String,
}

impl PipelineStatements {
	pub fn get(&self, stage: Stage) -> &str {
		match stage {
			Stage::Stream => &self.stream,
			Stage::Data => &self.data,
			Stage::View => &self.view,
			Stage::Distributed => &self.distributed,
		}
	}

	pub(crate) fn set(&mut self, stage: Stage, sql: String) {
		match stage {
			Stage::Stream => self.stream = sql,
			Stage::Data => self.data = sql,
			Stage::View => self.view = sql,
			Stage::Distributed => self.distributed = sql,
		}
	}
}

/// A provisioning run that stopped at its first failure, with the SQL built
/// up to that point.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{error}")]
pub struct ProvisionError {
	pub statements: PipelineStatements,
	#[source]
	pub error: Error,
}

impl ProvisionError {
	pub(crate) fn new(statements: PipelineStatements, error: Error) -> Self {
		Self {
			statements,
			error,
		}
	}
}
