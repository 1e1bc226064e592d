// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatabaseId(pub u64);

impl Display for DatabaseId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self.0, f)
	}
}

/// Identifier of the table whose index profile feeds a view. Zero means no
/// profile is attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(pub u64);

impl TableId {
	pub const NONE: TableId = TableId(0);

	pub const fn is_attached(self) -> bool {
		self.0 != 0
	}
}

impl Display for TableId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self.0, f)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
	pub id: DatabaseId,
	pub name: String,
	/// Empty for standalone deployments.
	#[serde(default)]
	pub cluster: String,
}

impl Database {
	pub fn new(id: u64, name: impl Into<String>) -> Self {
		Self {
			id: DatabaseId(id),
			name: name.into(),
			cluster: String::new(),
		}
	}

	pub fn with_cluster(mut self, cluster: impl Into<String>) -> Self {
		self.cluster = cluster.into();
		self
	}
}
