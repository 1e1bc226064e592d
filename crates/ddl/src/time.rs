// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use logpipe_type::{
	Result,
	model::{TimeFieldType, ViewDefinition},
};

use crate::{
	column::{DEFAULT_TIME_FIELD, NANOSECOND_TIME_FORMAT, RAW_LOG_FIELD, TIME_NANOSECOND_COLUMN, TIME_SECOND_COLUMN},
	literal::escape,
};

/// SQL fragment families converting the raw time field into
/// `_time_second_` and `_time_nanosecond_`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeTemplate {
	/// Microsecond unix timestamp read from the view's own key.
	Nanosecond,
	StringDefault,
	NumericDefault,
}

impl TimeTemplate {
	/// Picks the template for a declared time type, optionally in the context
	/// of one view. The type code is validated even when the view selects the
	/// nanosecond template.
	pub fn resolve(time_type: i32, view: Option<&ViewDefinition>) -> Result<Self> {
		let time_type = TimeFieldType::from_code(time_type)?;
		if view.is_some_and(|view| view.format == NANOSECOND_TIME_FORMAT && !view.use_default_time) {
			return Ok(TimeTemplate::Nanosecond);
		}
		Ok(match time_type {
			TimeFieldType::String => TimeTemplate::StringDefault,
			TimeFieldType::Float => TimeTemplate::NumericDefault,
		})
	}

	pub fn render(self, field: &str) -> String {
		let field = escape(field);
		match self {
			TimeTemplate::Nanosecond => format!(
				"toDateTime(fromUnixTimestamp64Micro(JSONExtractInt({RAW_LOG_FIELD}, '{field}'))) AS {TIME_SECOND_COLUMN},\n  \
				 fromUnixTimestamp64Micro(JSONExtractInt({RAW_LOG_FIELD}, '{field}')) AS {TIME_NANOSECOND_COLUMN}"
			),
			TimeTemplate::StringDefault => format!(
				"parseDateTimeBestEffort(JSONExtractString({RAW_LOG_FIELD}, '{field}')) AS {TIME_SECOND_COLUMN},\n  \
				 parseDateTime64BestEffort(JSONExtractString({RAW_LOG_FIELD}, '{field}'), 9) AS {TIME_NANOSECOND_COLUMN}"
			),
			TimeTemplate::NumericDefault => format!(
				"toDateTime(toInt64(JSONExtractFloat({RAW_LOG_FIELD}, '{field}'))) AS {TIME_SECOND_COLUMN},\n  \
				 fromUnixTimestamp64Nano(toInt64(JSONExtractFloat({RAW_LOG_FIELD}, '{field}') * 1000000000)) AS {TIME_NANOSECOND_COLUMN}"
			),
		}
	}
}

/// Resolves and renders the time conversion fragment. The nanosecond template
/// reads the view key; the defaults read `time_field`, or `_time_` when empty.
pub fn time_expression(time_type: i32, view: Option<&ViewDefinition>, time_field: &str) -> Result<String> {
	let template = TimeTemplate::resolve(time_type, view)?;
	let field = match (template, view) {
		(TimeTemplate::Nanosecond, Some(view)) => view.key.as_str(),
		_ if time_field.is_empty() => DEFAULT_TIME_FIELD,
		_ => time_field,
	};
	Ok(template.render(field))
}
