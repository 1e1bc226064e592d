// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use logpipe_type::{PipelineError, Result, model::DeploymentMode, return_error};

const LOCAL_SUFFIX: &str = "_local";
const STREAM_SUFFIX: &str = "_stream";
const VIEW_SUFFIX: &str = "_view";
const CUSTOM_SEPARATOR: &str = "__";
const RESERVED_SUFFIXES: [&str; 3] = [LOCAL_SUFFIX, STREAM_SUFFIX, VIEW_SUFFIX];

pub fn validate_identifier(identifier: &str) -> Result<()> {
	if identifier.is_empty() {
		return_error!(PipelineError::InvalidIdentifier {
			identifier: identifier.to_string(),
			reason: "identifier is empty",
		});
	}
	if identifier.contains('`') {
		return_error!(PipelineError::InvalidIdentifier {
			identifier: identifier.to_string(),
			reason: "identifier contains a backtick",
		});
	}
	Ok(())
}

/// Logical table names must not look like a derived name, otherwise two
/// pipelines could resolve to the same object.
pub fn validate_table(table: &str) -> Result<()> {
	validate_identifier(table)?;
	let reason = if table.contains(CUSTOM_SEPARATOR) {
		"table name contains '__'"
	} else if table.ends_with('_') {
		"table name ends with an underscore"
	} else if RESERVED_SUFFIXES.iter().any(|suffix| table.ends_with(suffix)) {
		"table name ends with a reserved suffix"
	} else {
		return Ok(());
	};
	return_error!(PipelineError::InvalidIdentifier {
		identifier: table.to_string(),
		reason,
	})
}

/// Database-qualified table name, rendered as `` `database`.`table` ``.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
	database: String,
	table: String,
}

impl QualifiedName {
	pub fn new(database: impl Into<String>, table: impl Into<String>) -> Result<Self> {
		let database = database.into();
		let table = table.into();
		validate_identifier(&database)?;
		validate_identifier(&table)?;
		Ok(Self {
			database,
			table,
		})
	}

	pub fn database(&self) -> &str {
		&self.database
	}

	pub fn table(&self) -> &str {
		&self.table
	}

	/// Parses the rendered form back into its parts.
	pub fn parse(text: &str) -> Option<Self> {
		let inner = text.strip_prefix('`')?.strip_suffix('`')?;
		let (database, table) = inner.split_once("`.`")?;
		Self::new(database, table).ok()
	}
}

impl Display for QualifiedName {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "`{}`.`{}`", self.database, self.table)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
	Stream,
	Data,
	View,
	Distributed,
}

/// Derives pipeline object names for one deployment mode.
///
/// In cluster mode the data table is the per-shard `_local` table, and the
/// stream table and views are named after it so they target the shard rather
/// than the distributed proxy, which takes the plain table name. Views over a
/// custom time field are named `<base>__<field>_view`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameGenerator {
	mode: DeploymentMode,
}

impl NameGenerator {
	pub const fn new(mode: DeploymentMode) -> Self {
		Self {
			mode,
		}
	}

	pub const fn mode(&self) -> DeploymentMode {
		self.mode
	}

	fn base(&self, table: &str) -> String {
		match self.mode {
			DeploymentMode::Standalone => table.to_string(),
			DeploymentMode::Cluster => format!("{table}{LOCAL_SUFFIX}"),
		}
	}

	pub fn data_table(&self, database: &str, table: &str) -> Result<QualifiedName> {
		validate_table(table)?;
		QualifiedName::new(database, self.base(table))
	}

	pub fn stream_table(&self, database: &str, table: &str) -> Result<QualifiedName> {
		validate_table(table)?;
		QualifiedName::new(database, format!("{}{STREAM_SUFFIX}", self.base(table)))
	}

	pub fn view_table(&self, database: &str, table: &str, custom_time_field: Option<&str>) -> Result<QualifiedName> {
		validate_table(table)?;
		let name = match custom_time_field.filter(|field| !field.is_empty()) {
			Some(field) => {
				validate_identifier(field)?;
				format!("{}{CUSTOM_SEPARATOR}{field}{VIEW_SUFFIX}", self.base(table))
			}
			None => format!("{}{VIEW_SUFFIX}", self.base(table)),
		};
		QualifiedName::new(database, name)
	}

	pub fn distributed_table(&self, database: &str, table: &str) -> Result<QualifiedName> {
		if !self.mode.is_cluster() {
			return_error!(PipelineError::Unsupported {
				operation: "distributed table",
				mode: self.mode,
			});
		}
		validate_table(table)?;
		QualifiedName::new(database, table)
	}

	/// Recovers `(database, table)` from a name produced by this generator.
	pub fn logical(&self, kind: TableKind, name: &QualifiedName) -> Option<(String, String)> {
		let stem = match kind {
			TableKind::Stream => name.table().strip_suffix(STREAM_SUFFIX)?,
			TableKind::View => {
				let view = name.table().strip_suffix(VIEW_SUFFIX)?;
				view.split_once(CUSTOM_SEPARATOR).map_or(view, |(base, _)| base)
			}
			TableKind::Data | TableKind::Distributed => name.table(),
		};
		let table = match (kind, self.mode) {
			(TableKind::Distributed, DeploymentMode::Standalone) => return None,
			(TableKind::Distributed, DeploymentMode::Cluster) => stem,
			(_, DeploymentMode::Cluster) => stem.strip_suffix(LOCAL_SUFFIX)?,
			(_, DeploymentMode::Standalone) => stem,
		};
		validate_table(table).ok()?;
		Some((name.database().to_string(), table.to_string()))
	}
}
