// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use logpipe_ddl::{
	Builder, NameGenerator, QualifiedName, build, builder_for,
	builder::{DataParams, DistributedParams, Params, Payload, StreamParams},
};
use logpipe_type::{
	Result,
	model::{Database, DatabaseId, IndexSet, PipelineConfig, Stage, TimeFieldType},
};
use tracing::{debug, instrument};

use crate::{
	DatabaseLookup, Executor, NoRollback, ProvisionerConfig, ViewError, ViewOperator, ViewRequest, ViewRollback,
	execute,
};

mod statements;
mod teardown;

pub use statements::{PipelineStatements, ProvisionError};

/// Object names of one pipeline.
struct PipelineNames {
	stream: QualifiedName,
	data: QualifiedName,
	view: QualifiedName,
	distributed: Option<QualifiedName>,
}

/// Progress of a provisioning run: the SQL built so far and the objects
/// created so far, oldest first.
#[derive(Default)]
struct Run {
	statements: PipelineStatements,
	created: Vec<(Stage, QualifiedName)>,
	cluster: String,
}

/// Creates and removes ingestion pipelines: a Kafka stream table, a data
/// table, the default materialized view between them and, in cluster mode, a
/// distributed table over the per-shard data tables.
pub struct Provisioner {
	config: ProvisionerConfig,
	names: NameGenerator,
	builder: Box<dyn Builder>,
	executor: Arc<dyn Executor>,
	catalog: Arc<dyn DatabaseLookup>,
	rollback: Arc<dyn ViewRollback>,
}

impl Provisioner {
	pub fn new(config: ProvisionerConfig, executor: Arc<dyn Executor>, catalog: Arc<dyn DatabaseLookup>) -> Self {
		Self {
			config,
			names: NameGenerator::new(config.mode),
			builder: builder_for(config.mode),
			executor,
			catalog,
			rollback: Arc::new(NoRollback),
		}
	}

	pub fn with_rollback(mut self, rollback: Arc<dyn ViewRollback>) -> Self {
		self.rollback = rollback;
		self
	}

	pub fn config(&self) -> &ProvisionerConfig {
		&self.config
	}

	pub fn view_operator(&self) -> ViewOperator<'_> {
		ViewOperator::new(
			self.builder.as_ref(),
			self.config.replica_status,
			self.executor.as_ref(),
			self.catalog.as_ref(),
			self.rollback.as_ref(),
		)
	}

	/// Creates the pipeline objects in dependency order. The first failure
	/// stops the run; objects created before it are left in place unless
	/// compensation is enabled.
	#[instrument(name = "engine::provision::create_pipeline", level = "debug", skip(self, pipeline), fields(mode = %self.config.mode, table = %pipeline.table))]
	pub fn create_pipeline(
		&self,
		database: DatabaseId,
		pipeline: &PipelineConfig,
	) -> std::result::Result<PipelineStatements, ProvisionError> {
		let mut run = Run::default();
		match self.provision(database, pipeline, &mut run) {
			Ok(()) => {
				debug!(created = run.created.len(), "pipeline created");
				Ok(run.statements)
			}
			Err(error) => {
				if self.config.compensate_on_failure {
					self.compensate(&run.created, &run.cluster);
				}
				Err(ProvisionError::new(run.statements, error))
			}
		}
	}

	/// Renders every statement `create_pipeline` would run without executing
	/// anything.
	#[instrument(name = "engine::provision::plan", level = "debug", skip(self, pipeline), fields(table = %pipeline.table))]
	pub fn plan(&self, database: DatabaseId, pipeline: &PipelineConfig) -> Result<PipelineStatements> {
		TimeFieldType::from_code(pipeline.time_field_type)?;
		let database = self.catalog.database(database)?;
		let names = self.pipeline_names(&database, &pipeline.table)?;

		let indexes = IndexSet::new();
		let request = Self::default_view_request(&database, pipeline, &indexes);

		let mut statements = PipelineStatements {
			stream: build(self.builder.as_ref(), &self.stream_params(&database, pipeline, &names))?,
			data: build(self.builder.as_ref(), &self.data_params(&database, pipeline, &names))?,
			view: self.view_operator().render_create(&database, &request)?,
			distributed: String::new(),
		};
		if let Some(params) = self.distributed_params(&database, &names) {
			statements.distributed = build(self.builder.as_ref(), &params)?;
		}
		Ok(statements)
	}

	/// Drops and recreates one view of an existing pipeline.
	#[instrument(name = "engine::provision::recreate_view", level = "debug", skip(self, request), fields(table = request.table))]
	pub fn recreate_view(&self, request: &ViewRequest<'_>) -> std::result::Result<String, ViewError> {
		self.view_operator().operate(request)
	}

	fn provision(&self, database: DatabaseId, pipeline: &PipelineConfig, run: &mut Run) -> Result<()> {
		TimeFieldType::from_code(pipeline.time_field_type)?;
		let database = self.catalog.database(database)?;
		run.cluster = database.cluster.clone();
		let names = self.pipeline_names(&database, &pipeline.table)?;

		run.statements.stream = build(self.builder.as_ref(), &self.stream_params(&database, pipeline, &names))?;
		run.statements.data = build(self.builder.as_ref(), &self.data_params(&database, pipeline, &names))?;

		execute::run(self.executor.as_ref(), Stage::Stream, &run.statements.stream)?;
		run.created.push((Stage::Stream, names.stream.clone()));
		execute::run(self.executor.as_ref(), Stage::Data, &run.statements.data)?;
		run.created.push((Stage::Data, names.data.clone()));

		let indexes = IndexSet::new();
		let request = Self::default_view_request(&database, pipeline, &indexes);
		match self.view_operator().operate(&request) {
			Ok(sql) => {
				run.statements.view = sql;
				run.created.push((Stage::View, names.view.clone()));
			}
			Err(err) => {
				run.statements.view = err.sql;
				return Err(err.error);
			}
		}

		if let (Some(params), Some(name)) = (self.distributed_params(&database, &names), names.distributed) {
			run.statements.distributed = build(self.builder.as_ref(), &params)?;
			execute::run(self.executor.as_ref(), Stage::Distributed, &run.statements.distributed)?;
			run.created.push((Stage::Distributed, name));
		}
		Ok(())
	}

	fn pipeline_names(&self, database: &Database, table: &str) -> Result<PipelineNames> {
		let distributed = if self.config.mode.is_cluster() {
			Some(self.names.distributed_table(&database.name, table)?)
		} else {
			None
		};
		Ok(PipelineNames {
			stream: self.names.stream_table(&database.name, table)?,
			data: self.names.data_table(&database.name, table)?,
			view: self.names.view_table(&database.name, table, None)?,
			distributed,
		})
	}

	fn default_view_request<'a>(
		database: &Database,
		pipeline: &'a PipelineConfig,
		indexes: &'a IndexSet,
	) -> ViewRequest<'a> {
		ViewRequest {
			time_field: &pipeline.time_field,
			..ViewRequest::default_view(database.id, &pipeline.table, pipeline.time_field_type, indexes)
		}
	}

	fn params(&self, database: &Database, payload: Payload) -> Params {
		Params::new(payload).with_cluster(database.cluster.clone()).with_replica_status(self.config.replica_status)
	}

	fn stream_params(&self, database: &Database, pipeline: &PipelineConfig, names: &PipelineNames) -> Params {
		self.params(
			database,
			Payload::Stream(StreamParams {
				table: names.stream.clone(),
				brokers: pipeline.brokers.clone(),
				topics: pipeline.topics.clone(),
				group: pipeline.group_name(&database.name),
				consumers: pipeline.consumers,
				skip_broken_messages: pipeline.skip_broken_messages,
			}),
		)
	}

	fn data_params(&self, database: &Database, pipeline: &PipelineConfig, names: &PipelineNames) -> Params {
		self.params(
			database,
			Payload::Data(DataParams {
				table: names.data.clone(),
				days: pipeline.days,
			}),
		)
	}

	fn distributed_params(&self, database: &Database, names: &PipelineNames) -> Option<Params> {
		let table = names.distributed.clone()?;
		Some(self.params(
			database,
			Payload::Distributed(DistributedParams {
				table,
				source: names.data.clone(),
			}),
		))
	}
}
