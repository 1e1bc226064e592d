// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use logpipe_type::{PipelineError, Result, model::ReplicaStatus, return_error};

use crate::naming::QualifiedName;

#[derive(Debug, Clone, PartialEq)]
pub struct StreamParams {
	pub table: QualifiedName,
	pub brokers: String,
	pub topics: String,
	pub group: String,
	/// At least one; the Kafka engine rejects zero consumers.
	pub consumers: u32,
	/// Broken messages tolerated per block; `0` disables skipping.
	pub skip_broken_messages: u64,
}

impl StreamParams {
	fn validate(&self) -> Result<()> {
		if self.consumers == 0 {
			return_error!(PipelineError::InvalidConfig {
				message: format!("{} needs at least one kafka consumer", self.table),
			});
		}
		Ok(())
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataParams {
	pub table: QualifiedName,
	/// Retention in days; `0` keeps data forever.
	pub days: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewParams {
	pub view: QualifiedName,
	pub target: QualifiedName,
	pub source: QualifiedName,
	pub time_convert: String,
	/// Extracted columns, already joined; may be empty.
	pub columns: String,
	pub predicate: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistributedParams {
	pub table: QualifiedName,
	/// Per-shard table the proxy fans out to.
	pub source: QualifiedName,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
	Stream(StreamParams),
	Data(DataParams),
	View(ViewParams),
	Distributed(DistributedParams),
}

impl Payload {
	pub const fn kind(&self) -> &'static str {
		match self {
			Payload::Stream(_) => "stream",
			Payload::Data(_) => "data",
			Payload::View(_) => "view",
			Payload::Distributed(_) => "distributed",
		}
	}
}

/// Input of one builder capability.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
	/// Cluster identifier; ignored in standalone mode.
	pub cluster: String,
	pub replica_status: ReplicaStatus,
	pub payload: Payload,
}

impl Params {
	pub fn new(payload: Payload) -> Self {
		Self {
			cluster: String::new(),
			replica_status: ReplicaStatus::default(),
			payload,
		}
	}

	pub fn with_cluster(mut self, cluster: impl Into<String>) -> Self {
		self.cluster = cluster.into();
		self
	}

	pub fn with_replica_status(mut self, replica_status: ReplicaStatus) -> Self {
		self.replica_status = replica_status;
		self
	}

	fn mismatch<T>(&self, capability: &'static str, expected: &'static str) -> Result<T> {
		return_error!(PipelineError::PayloadMismatch {
			capability,
			expected,
			found: self.payload.kind(),
		})
	}

	pub fn stream(&self, capability: &'static str) -> Result<&StreamParams> {
		match &self.payload {
			Payload::Stream(params) => {
				params.validate()?;
				Ok(params)
			}
			_ => self.mismatch(capability, "stream"),
		}
	}

	pub fn data(&self, capability: &'static str) -> Result<&DataParams> {
		match &self.payload {
			Payload::Data(params) => Ok(params),
			_ => self.mismatch(capability, "data"),
		}
	}

	pub fn view(&self, capability: &'static str) -> Result<&ViewParams> {
		match &self.payload {
			Payload::View(params) => Ok(params),
			_ => self.mismatch(capability, "view"),
		}
	}

	pub fn distributed(&self, capability: &'static str) -> Result<&DistributedParams> {
		match &self.payload {
			Payload::Distributed(params) => Ok(params),
			_ => self.mismatch(capability, "distributed"),
		}
	}
}
