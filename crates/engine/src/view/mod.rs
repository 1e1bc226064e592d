// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use logpipe_ddl::{
	Builder, NameGenerator, QualifiedName, build,
	builder::{Params, Payload, ViewParams},
	extract::extract_columns,
	predicate::{current_predicate, default_predicate},
	time::time_expression,
};
use logpipe_type::{
	Error, Result,
	model::{Database, DatabaseId, IndexSet, ReplicaStatus, Stage, TableId, TimeFieldType, ViewDefinition},
};
use tracing::{debug, instrument, warn};

use crate::{DatabaseLookup, Executor, ViewRollback, execute};

/// Inputs of one drop-then-create cycle for a materialized view.
#[derive(Debug, Clone, Copy)]
pub struct ViewRequest<'a> {
	pub database: DatabaseId,
	/// Table whose index profile contributes extracted columns; `TableId::NONE`
	/// skips extraction.
	pub table_id: TableId,
	pub table: &'a str,
	pub time_field_type: i32,
	pub time_field: &'a str,
	/// Selects the current-view form when set.
	pub custom_time_field: Option<&'a str>,
	pub current: Option<&'a ViewDefinition>,
	pub siblings: &'a [ViewDefinition],
	pub indexes: &'a IndexSet,
	/// When false the CREATE statement is rendered but not executed.
	pub execute: bool,
}

impl<'a> ViewRequest<'a> {
	/// The default view of a table with no index profile.
	pub fn default_view(database: DatabaseId, table: &'a str, time_field_type: i32, indexes: &'a IndexSet) -> Self {
		Self {
			database,
			table_id: TableId::NONE,
			table,
			time_field_type,
			time_field: "",
			custom_time_field: None,
			current: None,
			siblings: &[],
			indexes,
			execute: true,
		}
	}

	fn custom_time_field(&self) -> Option<&'a str> {
		self.custom_time_field.filter(|field| !field.is_empty())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
	Draft,
	Dropped,
	Created,
	Failed,
}

impl Display for ViewState {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			ViewState::Draft => f.write_str("draft"),
			ViewState::Dropped => f.write_str("dropped"),
			ViewState::Created => f.write_str("created"),
			ViewState::Failed => f.write_str("failed"),
		}
	}
}

/// A failed view operation. `sql` is the CREATE statement when it was built
/// before the failure, empty otherwise; `reached` is the last state entered
/// before the operation moved to `Failed`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("view operation failed after {reached}: {error}")]
pub struct ViewError {
	pub sql: String,
	pub reached: ViewState,
	#[source]
	pub error: Error,
}

struct Draft {
	view: QualifiedName,
	target: QualifiedName,
	source: QualifiedName,
	columns: String,
}

pub struct ViewOperator<'a> {
	names: NameGenerator,
	builder: &'a dyn Builder,
	replica_status: ReplicaStatus,
	executor: &'a dyn Executor,
	catalog: &'a dyn DatabaseLookup,
	rollback: &'a dyn ViewRollback,
}

impl<'a> ViewOperator<'a> {
	pub fn new(
		builder: &'a dyn Builder,
		replica_status: ReplicaStatus,
		executor: &'a dyn Executor,
		catalog: &'a dyn DatabaseLookup,
		rollback: &'a dyn ViewRollback,
	) -> Self {
		Self {
			names: NameGenerator::new(builder.mode()),
			builder,
			replica_status,
			executor,
			catalog,
			rollback,
		}
	}

	/// Drops the view if it exists and recreates it. The rollback hook runs
	/// on every failure before the error is returned.
	#[instrument(name = "engine::view::operate", level = "debug", skip(self, request), fields(database = %request.database, table = request.table))]
	pub fn operate(&self, request: &ViewRequest<'_>) -> std::result::Result<String, ViewError> {
		let mut state = ViewState::Draft;
		let mut sql = String::new();

		match self.run(request, &mut state, &mut sql) {
			Ok(()) => {
				debug!(%state, "view operation finished");
				Ok(sql)
			}
			Err(error) => {
				warn!(reached = %state, code = %error.diagnostic().code, "view operation failed, rolling back");
				self.rollback.rollback_view(request.table_id, request.custom_time_field());
				Err(ViewError {
					sql,
					reached: state,
					error,
				})
			}
		}
	}

	/// Renders the CREATE statement without touching the database.
	pub fn render_create(&self, database: &Database, request: &ViewRequest<'_>) -> Result<String> {
		let draft = self.draft(database, request)?;
		self.create_sql(database, request, &draft)
	}

	fn run(&self, request: &ViewRequest<'_>, state: &mut ViewState, sql: &mut String) -> Result<()> {
		let database = self.catalog.database(request.database)?;
		let draft = self.draft(&database, request)?;

		let drop = self.builder.drop_table(&draft.view, &database.cluster)?;
		execute::run(self.executor, Stage::View, &drop)?;
		*state = ViewState::Dropped;

		*sql = self.create_sql(&database, request, &draft)?;
		if request.execute {
			execute::run(self.executor, Stage::View, sql)?;
		}
		*state = ViewState::Created;
		Ok(())
	}

	fn draft(&self, database: &Database, request: &ViewRequest<'_>) -> Result<Draft> {
		TimeFieldType::from_code(request.time_field_type)?;
		let view = self.names.view_table(&database.name, request.table, request.custom_time_field())?;
		let target = self.names.data_table(&database.name, request.table)?;
		let source = self.names.stream_table(&database.name, request.table)?;
		let columns = if request.table_id.is_attached() {
			extract_columns(request.indexes)?
		} else {
			String::new()
		};
		Ok(Draft {
			view,
			target,
			source,
			columns,
		})
	}

	fn create_sql(&self, database: &Database, request: &ViewRequest<'_>, draft: &Draft) -> Result<String> {
		let (time_convert, predicate) = match request.custom_time_field() {
			None => (
				time_expression(request.time_field_type, None, request.time_field)?,
				default_predicate(request.siblings),
			),
			Some(_) => {
				let predicate = current_predicate(request.current)?;
				(time_expression(request.time_field_type, request.current, request.time_field)?, predicate)
			}
		};

		let params = Params::new(Payload::View(ViewParams {
			view: draft.view.clone(),
			target: draft.target.clone(),
			source: draft.source.clone(),
			time_convert,
			columns: draft.columns.clone(),
			predicate,
		}))
		.with_cluster(database.cluster.clone())
		.with_replica_status(self.replica_status);
		build(self.builder, &params)
	}
}

#[cfg(test)]
pub mod tests {
	use logpipe_ddl::builder_for;
	use logpipe_type::model::{DeploymentMode, IndexDefinition};

	use super::*;
	use crate::test_utils::{RecordingExecutor, RecordingRollback, StaticCatalog};

	struct Fixture {
		builder: Box<dyn Builder>,
		executor: RecordingExecutor,
		catalog: StaticCatalog,
		rollback: RecordingRollback,
	}

	impl Fixture {
		fn new(mode: DeploymentMode, database: Database) -> Self {
			Self {
				builder: builder_for(mode),
				executor: RecordingExecutor::new(),
				catalog: StaticCatalog::new().with(database),
				rollback: RecordingRollback::new(),
			}
		}

		fn operator(&self) -> ViewOperator<'_> {
			ViewOperator::new(
				self.builder.as_ref(),
				ReplicaStatus::Replicated,
				&self.executor,
				&self.catalog,
				&self.rollback,
			)
		}
	}

	fn standalone() -> Fixture {
		Fixture::new(DeploymentMode::Standalone, Database::new(1, "logs"))
	}

	#[test]
	fn test_default_view_drops_then_creates() {
		let fixture = standalone();
		let indexes = IndexSet::new();
		let request = ViewRequest::default_view(DatabaseId(1), "nginx", 1, &indexes);

		let sql = fixture.operator().operate(&request).unwrap();
		assert!(sql.starts_with("CREATE MATERIALIZED VIEW `logs`.`nginx_view` TO `logs`.`nginx` AS"));
		assert!(sql.contains("parseDateTimeBestEffort(JSONExtractString(_log, '_time_'))"));
		assert!(sql.ends_with("WHERE 1=1"));

		assert_eq!(fixture.executor.executed(), vec!["DROP TABLE IF EXISTS `logs`.`nginx_view`".to_string(), sql]);
		assert!(fixture.rollback.calls().is_empty());
	}

	#[test]
	fn test_sibling_predicate_and_columns() {
		let fixture = standalone();
		let siblings = [ViewDefinition::new("a"), ViewDefinition::new("b")];
		let indexes: IndexSet = [("status".to_string(), IndexDefinition::new("status").with_value_type(1))].into();
		let request = ViewRequest {
			table_id: TableId(7),
			time_field: "ts",
			siblings: &siblings,
			..ViewRequest::default_view(DatabaseId(1), "nginx", 2, &indexes)
		};

		let sql = fixture.operator().operate(&request).unwrap();
		assert!(sql.contains("JSONExtractFloat(_log, 'ts')"));
		assert!(sql.contains("toInt64OrNull(replaceAll(JSONExtractRaw(_log, 'status'), '\"', '')) AS `status`"));
		assert!(sql.ends_with("WHERE JSONHas(_log, 'a') = 0 AND JSONHas(_log, 'b') = 0"));
	}

	#[test]
	fn test_unattached_profile_skips_columns() {
		let fixture = standalone();
		let indexes: IndexSet = [("status".to_string(), IndexDefinition::new("status"))].into();
		let request = ViewRequest::default_view(DatabaseId(1), "nginx", 1, &indexes);

		let sql = fixture.operator().operate(&request).unwrap();
		assert!(!sql.contains("`status`"));
	}

	#[test]
	fn test_current_view() {
		let fixture = standalone();
		let current = ViewDefinition::new("span_ts").with_format("fromUnixTimestamp64Micro");
		let indexes = IndexSet::new();
		let request = ViewRequest {
			custom_time_field: Some("span_ts"),
			current: Some(&current),
			..ViewRequest::default_view(DatabaseId(1), "traces", 1, &indexes)
		};

		let sql = fixture.operator().operate(&request).unwrap();
		assert!(sql.starts_with("CREATE MATERIALIZED VIEW `logs`.`traces__span_ts_view` TO `logs`.`traces` AS"));
		assert!(sql.contains("fromUnixTimestamp64Micro(JSONExtractInt(_log, 'span_ts'))"));
		assert!(sql.ends_with("WHERE JSONHas(_log, 'span_ts') = 1"));
	}

	#[test]
	fn test_missing_current_view_after_drop() {
		let fixture = standalone();
		let indexes = IndexSet::new();
		let request = ViewRequest {
			table_id: TableId(3),
			custom_time_field: Some("span_ts"),
			..ViewRequest::default_view(DatabaseId(1), "traces", 1, &indexes)
		};

		let err = fixture.operator().operate(&request).unwrap_err();
		assert_eq!(err.error.diagnostic().code, "PIPE_003");
		assert_eq!(err.reached, ViewState::Dropped);
		assert!(err.sql.is_empty());
		assert_eq!(fixture.executor.executed().len(), 1);
		assert_eq!(fixture.rollback.calls(), vec![(TableId(3), Some("span_ts".to_string()))]);
	}

	#[test]
	fn test_drop_failure_skips_create() {
		let fixture = standalone();
		fixture.executor.fail_on("DROP TABLE", "timeout");
		let indexes = IndexSet::new();
		let request = ViewRequest::default_view(DatabaseId(1), "nginx", 1, &indexes);

		let err = fixture.operator().operate(&request).unwrap_err();
		assert_eq!(err.error.diagnostic().code, "PIPE_004");
		assert_eq!(err.reached, ViewState::Draft);
		assert!(err.sql.is_empty());
		assert_eq!(fixture.executor.attempted().len(), 1);
		assert_eq!(fixture.rollback.calls().len(), 1);
	}

	#[test]
	fn test_create_failure_returns_sql() {
		let fixture = standalone();
		fixture.executor.fail_on("CREATE MATERIALIZED VIEW", "syntax error");
		let indexes = IndexSet::new();
		let request = ViewRequest::default_view(DatabaseId(1), "nginx", 1, &indexes);

		let err = fixture.operator().operate(&request).unwrap_err();
		assert_eq!(err.error.diagnostic().code, "PIPE_004");
		assert_eq!(err.reached, ViewState::Dropped);
		assert!(err.sql.starts_with("CREATE MATERIALIZED VIEW"));
		assert_eq!(fixture.rollback.calls().len(), 1);
	}

	#[test]
	fn test_invalid_time_type_before_drop() {
		let fixture = standalone();
		let indexes = IndexSet::new();
		let request = ViewRequest::default_view(DatabaseId(1), "nginx", 7, &indexes);

		let err = fixture.operator().operate(&request).unwrap_err();
		assert_eq!(err.error.diagnostic().code, "PIPE_001");
		assert_eq!(err.reached, ViewState::Draft);
		assert!(fixture.executor.attempted().is_empty());
		assert_eq!(fixture.rollback.calls().len(), 1);
	}

	#[test]
	fn test_sql_only() {
		let fixture = standalone();
		let indexes = IndexSet::new();
		let request = ViewRequest {
			execute: false,
			..ViewRequest::default_view(DatabaseId(1), "nginx", 1, &indexes)
		};

		fixture.operator().operate(&request).unwrap();
		assert_eq!(fixture.executor.executed(), vec!["DROP TABLE IF EXISTS `logs`.`nginx_view`".to_string()]);
	}

	#[test]
	fn test_unknown_database_rolls_back() {
		let fixture = standalone();
		let indexes = IndexSet::new();
		let request = ViewRequest::default_view(DatabaseId(9), "nginx", 1, &indexes);

		let err = fixture.operator().operate(&request).unwrap_err();
		assert_eq!(err.error.diagnostic().code, "PIPE_009");
		assert!(fixture.executor.attempted().is_empty());
		assert_eq!(fixture.rollback.calls().len(), 1);
	}

	#[test]
	fn test_cluster_empty_before_execution() {
		let fixture = Fixture::new(DeploymentMode::Cluster, Database::new(1, "logs"));
		let indexes = IndexSet::new();
		let request = ViewRequest::default_view(DatabaseId(1), "nginx", 1, &indexes);

		let err = fixture.operator().operate(&request).unwrap_err();
		assert_eq!(err.error.diagnostic().code, "PIPE_002");
		assert!(fixture.executor.attempted().is_empty());
		assert_eq!(fixture.rollback.calls().len(), 1);
	}

	#[test]
	fn test_cluster_view() {
		let fixture = Fixture::new(DeploymentMode::Cluster, Database::new(1, "logs").with_cluster("c1"));
		let indexes = IndexSet::new();
		let request = ViewRequest::default_view(DatabaseId(1), "nginx", 1, &indexes);

		let sql = fixture.operator().operate(&request).unwrap();
		assert_eq!(fixture.executor.executed()[0], "DROP TABLE IF EXISTS `logs`.`nginx_local_view` ON CLUSTER `c1`");
		assert!(sql.starts_with(
			"CREATE MATERIALIZED VIEW `logs`.`nginx_local_view` ON CLUSTER `c1` TO `logs`.`nginx_local` AS"
		));
	}
}
