// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

use crate::{PipelineError, Result, return_error};

/// Declared type of the raw time field inside the JSON payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeFieldType {
	String,
	Float,
}

impl TimeFieldType {
	pub const STRING_CODE: i32 = 1;
	pub const FLOAT_CODE: i32 = 2;

	pub fn from_code(code: i32) -> Result<Self> {
		match code {
			Self::STRING_CODE => Ok(TimeFieldType::String),
			Self::FLOAT_CODE => Ok(TimeFieldType::Float),
			_ => return_error!(PipelineError::InvalidTimeType {
				code
			}),
		}
	}

	pub const fn code(self) -> i32 {
		match self {
			TimeFieldType::String => Self::STRING_CODE,
			TimeFieldType::Float => Self::FLOAT_CODE,
		}
	}
}

fn default_consumers() -> u32 {
	1
}

/// Provisioning request for one ingestion pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
	pub table: String,
	#[serde(default)]
	pub time_field: String,
	/// Raw type code as received; validated with [`TimeFieldType::from_code`].
	pub time_field_type: i32,
	/// Retention in days, zero keeps rows forever.
	#[serde(default)]
	pub days: u32,
	pub brokers: String,
	pub topics: String,
	/// Overrides the derived `<database>_<table>` consumer group.
	#[serde(default)]
	pub consumer_group: Option<String>,
	#[serde(default = "default_consumers")]
	pub consumers: u32,
	#[serde(default)]
	pub skip_broken_messages: u64,
}

impl PipelineConfig {
	pub fn new(table: impl Into<String>, time_field_type: TimeFieldType) -> Self {
		Self {
			table: table.into(),
			time_field: String::new(),
			time_field_type: time_field_type.code(),
			days: 0,
			brokers: String::new(),
			topics: String::new(),
			consumer_group: None,
			consumers: default_consumers(),
			skip_broken_messages: 0,
		}
	}

	pub fn with_time_field(mut self, time_field: impl Into<String>) -> Self {
		self.time_field = time_field.into();
		self
	}

	pub fn with_days(mut self, days: u32) -> Self {
		self.days = days;
		self
	}

	pub fn with_kafka(mut self, brokers: impl Into<String>, topics: impl Into<String>) -> Self {
		self.brokers = brokers.into();
		self.topics = topics.into();
		self
	}

	pub fn with_consumers(mut self, consumers: u32) -> Self {
		self.consumers = consumers;
		self
	}

	pub fn group_name(&self, database: &str) -> String {
		match self.consumer_group.as_deref() {
			Some(group) if !group.is_empty() => group.to_string(),
			_ => format!("{}_{}", database, self.table),
		}
	}
}
