// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashSet;

use logpipe_type::{
	PipelineError, Result,
	model::{HashKind, IndexDefinition, IndexSet, ValueType},
	return_error,
};

use crate::{
	column::{RAW_LOG_COLUMN, RAW_LOG_FIELD, TIME_NANOSECOND_COLUMN, TIME_SECOND_COLUMN},
	literal::escape,
	naming::validate_identifier,
};

pub const COLUMN_SEPARATOR: &str = ",\n  ";

/// Aliases the view projects ahead of the extracted columns.
const RESERVED_COLUMNS: [&str; 3] = [TIME_SECOND_COLUMN, TIME_NANOSECOND_COLUMN, RAW_LOG_COLUMN];

/// Conversion applied to the quote-stripped raw extraction of a typed value.
fn conversion(value_type: ValueType) -> Option<&'static str> {
	match value_type {
		ValueType::String => None,
		ValueType::Int64 => Some("toInt64OrNull"),
		ValueType::Float64 => Some("toFloat64OrNull"),
		ValueType::DateTime => Some("parseDateTimeBestEffortOrNull"),
	}
}

/// Renders the projected column list for a view, one hash column (when
/// configured) followed by one value column per index. Indexes are ordered by
/// generated column name, then index name, so the output does not depend on
/// the iteration order of `indexes`. Every alias must be unique within the
/// projection.
pub fn extract_columns(indexes: &IndexSet) -> Result<String> {
	let mut ordered: Vec<(&String, &IndexDefinition)> = indexes.iter().collect();
	ordered.sort_by(|(left_name, left), (right_name, right)| {
		left.column_name().cmp(&right.column_name()).then_with(|| left_name.cmp(right_name))
	});

	let mut aliases: HashSet<String> = RESERVED_COLUMNS.iter().map(|column| column.to_string()).collect();
	let mut columns = Vec::with_capacity(ordered.len());
	for (_, index) in ordered {
		if let Some((name, hash)) = hash_column(index) {
			claim(&mut aliases, name)?;
			columns.push(hash);
		}
		let (name, value) = value_column(index)?;
		claim(&mut aliases, name)?;
		columns.push(value);
	}
	Ok(columns.join(COLUMN_SEPARATOR))
}

fn claim(aliases: &mut HashSet<String>, name: String) -> Result<()> {
	if aliases.contains(&name) {
		return_error!(PipelineError::InvalidIdentifier {
			identifier: name,
			reason: "column alias is used more than once",
		});
	}
	aliases.insert(name);
	Ok(())
}

/// Expression the field is extracted from. Nested objects arrive as
/// string-encoded JSON, so a root means a second extraction.
fn source(index: &IndexDefinition) -> String {
	match index.root() {
		Some(root) => format!("JSONExtractString({RAW_LOG_FIELD}, '{}')", escape(root)),
		None => RAW_LOG_FIELD.to_string(),
	}
}

fn extract_string(index: &IndexDefinition) -> String {
	format!("JSONExtractString({}, '{}')", source(index), escape(&index.field))
}

fn hash_column(index: &IndexDefinition) -> Option<(String, String)> {
	let name = index.hash_column_name()?;
	let function = match index.hash {
		HashKind::None => return None,
		HashKind::Sip => "sipHash64",
		HashKind::Url => "URLHash",
	};
	let column = format!("{function}({}) AS `{name}`", extract_string(index));
	Some((name, column))
}

/// Returns the alias together with the rendered column.
fn value_column(index: &IndexDefinition) -> Result<(String, String)> {
	let name = index.column_name();
	validate_identifier(&name)?;
	let expression = match conversion(index.resolved_type()?) {
		None => format!("toNullable({})", extract_string(index)),
		Some(function) => format!(
			"{function}(replaceAll(JSONExtractRaw({}, '{}'), '\"', ''))",
			source(index),
			escape(&index.field)
		),
	};
	let column = format!("{expression} AS `{name}`");
	Ok((name, column))
}

#[cfg(test)]
pub mod tests {
	use super::*;

	fn set(entries: Vec<(&str, IndexDefinition)>) -> IndexSet {
		entries.into_iter().map(|(name, index)| (name.to_string(), index)).collect()
	}

	#[test]
	fn test_empty() {
		assert_eq!(extract_columns(&IndexSet::new()).unwrap(), "");
	}

	#[test]
	fn test_untyped_without_root() {
		let indexes = set(vec![("field", IndexDefinition::new("field"))]);
		assert_eq!(extract_columns(&indexes).unwrap(), "toNullable(JSONExtractString(_log, 'field')) AS `field`");
	}

	#[test]
	fn test_typed_without_root() {
		let indexes = set(vec![("status", IndexDefinition::new("status").with_value_type(1))]);
		assert_eq!(
			extract_columns(&indexes).unwrap(),
			"toInt64OrNull(replaceAll(JSONExtractRaw(_log, 'status'), '\"', '')) AS `status`"
		);
	}

	#[test]
	fn test_nested_root() {
		let indexes = set(vec![
			("latency", IndexDefinition::new("latency").with_root("upstream").with_value_type(2)),
			("host", IndexDefinition::new("host").with_root("upstream")),
		]);
		assert_eq!(
			extract_columns(&indexes).unwrap(),
			"toNullable(JSONExtractString(JSONExtractString(_log, 'upstream'), 'host')) AS `upstream.host`,\n  \
			 toFloat64OrNull(replaceAll(JSONExtractRaw(JSONExtractString(_log, 'upstream'), 'latency'), '\"', '')) AS `upstream.latency`"
		);
	}

	#[test]
	fn test_hash_precedes_value() {
		let indexes = set(vec![
			("url", IndexDefinition::new("url").with_hash(HashKind::Url)),
			("id", IndexDefinition::new("id").with_root("req").with_hash(HashKind::Sip)),
		]);
		let sql = extract_columns(&indexes).unwrap();
		let columns: Vec<&str> = sql.split(COLUMN_SEPARATOR).collect();
		assert_eq!(
			columns,
			vec![
				"sipHash64(JSONExtractString(JSONExtractString(_log, 'req'), 'id')) AS `_inner_siphash_req.id_`",
				"toNullable(JSONExtractString(JSONExtractString(_log, 'req'), 'id')) AS `req.id`",
				"URLHash(JSONExtractString(_log, 'url')) AS `_inner_urlhash_url_`",
				"toNullable(JSONExtractString(_log, 'url')) AS `url`",
			]
		);
	}

	#[test]
	fn test_deterministic_regardless_of_insertion_order() {
		let entries = vec![
			("c", IndexDefinition::new("code").with_value_type(1)),
			("a", IndexDefinition::new("agent")),
			("m", IndexDefinition::new("method").with_hash(HashKind::Sip)),
			("d", IndexDefinition::new("at").with_root("time").with_value_type(3)),
			("b", IndexDefinition::new("bytes").with_value_type(2)),
		];

		let forward = extract_columns(&set(entries.clone())).unwrap();
		let mut reversed_entries = entries;
		reversed_entries.reverse();
		let reversed = extract_columns(&set(reversed_entries)).unwrap();
		assert_eq!(forward, reversed);

		for _ in 0..8 {
			let rebuilt: IndexSet = set(vec![
				("b", IndexDefinition::new("bytes").with_value_type(2)),
				("d", IndexDefinition::new("at").with_root("time").with_value_type(3)),
				("a", IndexDefinition::new("agent")),
				("m", IndexDefinition::new("method").with_hash(HashKind::Sip)),
				("c", IndexDefinition::new("code").with_value_type(1)),
			]);
			assert_eq!(extract_columns(&rebuilt).unwrap(), forward);
		}
	}

	#[test]
	fn test_duplicate_alias() {
		let indexes = set(vec![
			("a", IndexDefinition::new("x")),
			("b", IndexDefinition::new("x").with_value_type(1)),
		]);
		let err = extract_columns(&indexes).unwrap_err();
		assert_eq!(err.diagnostic().code, "PIPE_006");
		assert!(err.diagnostic().message.contains("'x'"));

		let nested = set(vec![
			("a", IndexDefinition::new("host").with_root("upstream")),
			("b", IndexDefinition::new("host").with_root("upstream").with_hash(HashKind::Sip)),
		]);
		assert_eq!(extract_columns(&nested).unwrap_err().diagnostic().code, "PIPE_006");
	}

	#[test]
	fn test_reserved_alias() {
		let indexes = set(vec![("raw", IndexDefinition::new("_raw_log_"))]);
		assert_eq!(extract_columns(&indexes).unwrap_err().diagnostic().code, "PIPE_006");

		let indexes = set(vec![("t", IndexDefinition::new("_time_second_").with_value_type(3))]);
		assert_eq!(extract_columns(&indexes).unwrap_err().diagnostic().code, "PIPE_006");
	}

	#[test]
	fn test_unknown_value_type() {
		let indexes = set(vec![("x", IndexDefinition::new("x").with_value_type(42))]);
		assert_eq!(extract_columns(&indexes).unwrap_err().diagnostic().code, "PIPE_005");
	}
}
