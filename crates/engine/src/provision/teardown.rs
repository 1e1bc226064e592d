// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use logpipe_ddl::QualifiedName;
use logpipe_type::{
	Result,
	model::{DatabaseId, Stage},
};
use tracing::{debug, instrument, warn};

use super::{PipelineStatements, ProvisionError, Provisioner};
use crate::execute;

impl Provisioner {
	/// Drops the default view, the distributed table, the data table and the
	/// stream table, in that order. All statements are built before the first
	/// one runs.
	#[instrument(name = "engine::provision::drop_pipeline", level = "debug", skip(self), fields(mode = %self.config.mode))]
	pub fn drop_pipeline(
		&self,
		database: DatabaseId,
		table: &str,
	) -> std::result::Result<PipelineStatements, ProvisionError> {
		let mut statements = PipelineStatements::default();
		match self.teardown(database, table, &mut statements) {
			Ok(()) => Ok(statements),
			Err(error) => Err(ProvisionError::new(statements, error)),
		}
	}

	fn teardown(&self, database: DatabaseId, table: &str, statements: &mut PipelineStatements) -> Result<()> {
		let database = self.catalog.database(database)?;
		let names = self.pipeline_names(&database, table)?;

		let mut targets = vec![(Stage::View, names.view)];
		if let Some(distributed) = names.distributed {
			targets.push((Stage::Distributed, distributed));
		}
		targets.push((Stage::Data, names.data));
		targets.push((Stage::Stream, names.stream));

		for (stage, name) in &targets {
			statements.set(*stage, self.builder.drop_table(name, &database.cluster)?);
		}
		for (stage, _) in &targets {
			execute::run(self.executor.as_ref(), *stage, statements.get(*stage))?;
		}
		Ok(())
	}

	/// Best-effort removal of `created`, newest first. Failures are logged and
	/// do not stop the remaining drops.
	pub(super) fn compensate(&self, created: &[(Stage, QualifiedName)], cluster: &str) {
		for (stage, name) in created.iter().rev() {
			let result = self
				.builder
				.drop_table(name, cluster)
				.and_then(|sql| execute::run(self.executor.as_ref(), *stage, &sql));
			match result {
				Ok(()) => debug!(%stage, %name, "compensated"),
				Err(err) => warn!(%stage, %name, code = %err.diagnostic().code, "compensation failed"),
			}
		}
	}
}
