// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use logpipe_type::{PipelineError, Result, model::Stage, return_error};
use tracing::{debug, error, instrument};

pub type ExecuteError = Box<dyn std::error::Error + Send + Sync>;

/// Runs one DDL statement against the analytical database.
pub trait Executor: Send + Sync {
	fn execute(&self, sql: &str) -> std::result::Result<(), ExecuteError>;
}

#[instrument(name = "engine::execute::run", level = "debug", skip(executor, sql))]
pub(crate) fn run(executor: &dyn Executor, stage: Stage, sql: &str) -> Result<()> {
	debug!(statement = sql, "executing statement");
	if let Err(err) = executor.execute(sql) {
		error!(%stage, statement = sql, error = %err, "statement failed");
		return_error!(PipelineError::Execution {
			stage,
			statement: sql.to_string(),
			message: err.to_string(),
		});
	}
	Ok(())
}
