// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use logpipe_type::{
	PipelineError, Result,
	model::{DeploymentMode, ReplicaStatus},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisionerConfig {
	pub mode: DeploymentMode,
	/// Only consulted in cluster mode.
	pub replica_status: ReplicaStatus,
	/// Drop objects created earlier in a provisioning run that fails later.
	pub compensate_on_failure: bool,
}

impl ProvisionerConfig {
	pub fn standalone() -> Self {
		Self::default()
	}

	pub fn cluster(replica_status: ReplicaStatus) -> Self {
		Self {
			mode: DeploymentMode::Cluster,
			replica_status,
			compensate_on_failure: false,
		}
	}

	pub fn with_compensation(mut self, compensate_on_failure: bool) -> Self {
		self.compensate_on_failure = compensate_on_failure;
		self
	}

	pub fn from_json(text: &str) -> Result<Self> {
		serde_json::from_str(text).map_err(|err| {
			PipelineError::InvalidConfig {
				message: err.to_string(),
			}
			.into()
		})
	}
}
