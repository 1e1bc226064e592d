// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Deployment topology of the analytical database.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentMode {
	#[default]
	Standalone,
	Cluster,
}

impl DeploymentMode {
	pub const fn is_cluster(self) -> bool {
		matches!(self, DeploymentMode::Cluster)
	}
}

impl Display for DeploymentMode {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			DeploymentMode::Standalone => f.write_str("standalone"),
			DeploymentMode::Cluster => f.write_str("cluster"),
		}
	}
}

/// Whether cluster data tables keep replicas of each shard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplicaStatus {
	#[default]
	Replicated,
	Single,
}

#[cfg(test)]
pub mod tests {
	use super::*;

	#[test]
	fn test_mode_serde() {
		let mode: DeploymentMode = serde_json::from_str("\"cluster\"").unwrap();
		assert_eq!(mode, DeploymentMode::Cluster);
		assert!(mode.is_cluster());
		assert_eq!(serde_json::to_string(&DeploymentMode::Standalone).unwrap(), "\"standalone\"");
	}

	#[test]
	fn test_replica_status_default() {
		assert_eq!(ReplicaStatus::default(), ReplicaStatus::Replicated);
		let status: ReplicaStatus = serde_json::from_str("\"single\"").unwrap();
		assert_eq!(status, ReplicaStatus::Single);
	}
}
