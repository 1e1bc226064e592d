// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashMap;

use logpipe_type::{
	PipelineError, Result,
	model::{Database, DatabaseId, TableId},
	return_error,
};
use parking_lot::Mutex;

use crate::{DatabaseLookup, ExecuteError, Executor, ViewRollback};

/// Records every statement it receives and fails the ones matching a
/// scripted pattern.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
	attempted: Mutex<Vec<String>>,
	executed: Mutex<Vec<String>>,
	failures: Mutex<Vec<(String, String)>>,
}

impl RecordingExecutor {
	pub fn new() -> Self {
		Self::default()
	}

	/// Fails any later statement containing `pattern` with `message`.
	pub fn fail_on(&self, pattern: impl Into<String>, message: impl Into<String>) {
		self.failures.lock().push((pattern.into(), message.into()));
	}

	/// Statements that ran successfully, in order.
	pub fn executed(&self) -> Vec<String> {
		self.executed.lock().clone()
	}

	/// Every statement received, including failed ones.
	pub fn attempted(&self) -> Vec<String> {
		self.attempted.lock().clone()
	}
}

impl Executor for RecordingExecutor {
	fn execute(&self, sql: &str) -> std::result::Result<(), ExecuteError> {
		self.attempted.lock().push(sql.to_string());
		let failure = self.failures.lock().iter().find(|(pattern, _)| sql.contains(pattern.as_str())).cloned();
		if let Some((_, message)) = failure {
			return Err(message.into());
		}
		self.executed.lock().push(sql.to_string());
		Ok(())
	}
}

#[derive(Debug, Default)]
pub struct StaticCatalog {
	databases: HashMap<DatabaseId, Database>,
}

impl StaticCatalog {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, database: Database) -> Self {
		self.databases.insert(database.id, database);
		self
	}
}

impl DatabaseLookup for StaticCatalog {
	fn database(&self, id: DatabaseId) -> Result<Database> {
		match self.databases.get(&id) {
			Some(database) => Ok(database.clone()),
			None => return_error!(PipelineError::DatabaseLookup {
				id: id.0,
				message: "database not found".to_string(),
			}),
		}
	}
}

#[derive(Debug, Default)]
pub struct RecordingRollback {
	calls: Mutex<Vec<(TableId, Option<String>)>>,
}

impl RecordingRollback {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn calls(&self) -> Vec<(TableId, Option<String>)> {
		self.calls.lock().clone()
	}
}

impl ViewRollback for RecordingRollback {
	fn rollback_view(&self, table_id: TableId, custom_time_field: Option<&str>) {
		self.calls.lock().push((table_id, custom_time_field.map(str::to_string)));
	}
}
