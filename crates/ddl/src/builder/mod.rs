// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use logpipe_type::{Result, model::DeploymentMode};
use tracing::instrument;

use crate::naming::QualifiedName;

pub mod cluster;
mod params;
pub mod standalone;
mod template;

pub use cluster::ClusterBuilder;
pub use params::{DataParams, DistributedParams, Params, Payload, StreamParams, ViewParams};
pub use standalone::StandaloneBuilder;

/// Renders pipeline DDL for one deployment mode. Implementations never
/// execute anything; the same `Params` always yield the same text.
pub trait Builder: Send + Sync {
	fn mode(&self) -> DeploymentMode;

	fn stream_table(&self, params: &Params) -> Result<String>;

	fn data_table(&self, params: &Params) -> Result<String>;

	fn view_table(&self, params: &Params) -> Result<String>;

	fn distributed_table(&self, params: &Params) -> Result<String>;

	fn drop_table(&self, name: &QualifiedName, cluster: &str) -> Result<String>;
}

pub fn builder_for(mode: DeploymentMode) -> Box<dyn Builder> {
	match mode {
		DeploymentMode::Standalone => Box::new(StandaloneBuilder),
		DeploymentMode::Cluster => Box::new(ClusterBuilder),
	}
}

/// Dispatches to the capability matching the payload.
#[instrument(name = "ddl::builder::build", level = "trace", skip(builder, params), fields(payload = params.payload.kind()))]
pub fn build(builder: &dyn Builder, params: &Params) -> Result<String> {
	match &params.payload {
		Payload::Stream(_) => builder.stream_table(params),
		Payload::Data(_) => builder.data_table(params),
		Payload::View(_) => builder.view_table(params),
		Payload::Distributed(_) => builder.distributed_table(params),
	}
}
