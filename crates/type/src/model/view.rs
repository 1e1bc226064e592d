// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

/// Partition predicate of one materialized view over a table's stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewDefinition {
	/// JSON key whose presence routes a row into this view.
	pub key: String,
	#[serde(default)]
	pub format: String,
	#[serde(default)]
	pub use_default_time: bool,
}

impl ViewDefinition {
	pub fn new(key: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			format: String::new(),
			use_default_time: false,
		}
	}

	pub fn with_format(mut self, format: impl Into<String>) -> Self {
		self.format = format.into();
		self
	}

	pub fn with_default_time(mut self, use_default_time: bool) -> Self {
		self.use_default_time = use_default_time;
		self
	}
}
