// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use logpipe_type::{
	PipelineError, Result,
	model::{DeploymentMode, ReplicaStatus},
	return_error,
};

use super::{Builder, Params, template};
use crate::naming::{QualifiedName, validate_identifier};

/// Multi-shard DDL. Every statement carries `ON CLUSTER`, data tables use a
/// replicated engine unless the replica status is `Single`, and a distributed
/// proxy fronts the per-shard tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClusterBuilder;

fn require_cluster<'a>(cluster: &'a str, object: &str) -> Result<&'a str> {
	if cluster.is_empty() {
		return_error!(PipelineError::ClusterNameEmpty {
			object: object.to_string(),
		});
	}
	validate_identifier(cluster)?;
	Ok(cluster)
}

impl Builder for ClusterBuilder {
	fn mode(&self) -> DeploymentMode {
		DeploymentMode::Cluster
	}

	fn stream_table(&self, params: &Params) -> Result<String> {
		let stream = params.stream("stream table")?;
		let cluster = require_cluster(&params.cluster, &stream.table.to_string())?;
		Ok(template::stream(stream, Some(cluster)))
	}

	fn data_table(&self, params: &Params) -> Result<String> {
		let data = params.data("data table")?;
		let cluster = require_cluster(&params.cluster, &data.table.to_string())?;
		let engine = match params.replica_status {
			ReplicaStatus::Replicated => template::replicated_merge_tree(&data.table),
			ReplicaStatus::Single => template::merge_tree(),
		};
		Ok(template::data(data, Some(cluster), &engine))
	}

	fn view_table(&self, params: &Params) -> Result<String> {
		let view = params.view("view table")?;
		let cluster = require_cluster(&params.cluster, &view.view.to_string())?;
		Ok(template::view(view, Some(cluster)))
	}

	fn distributed_table(&self, params: &Params) -> Result<String> {
		let distributed = params.distributed("distributed table")?;
		let cluster = require_cluster(&params.cluster, &distributed.table.to_string())?;
		Ok(template::distributed(distributed, cluster))
	}

	fn drop_table(&self, name: &QualifiedName, cluster: &str) -> Result<String> {
		let cluster = require_cluster(cluster, &name.to_string())?;
		Ok(template::drop(name, Some(cluster)))
	}
}
