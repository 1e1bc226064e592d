// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Pipeline object a statement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
	Stream,
	Data,
	View,
	Distributed,
}

impl Display for Stage {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Stage::Stream => f.write_str("stream"),
			Stage::Data => f.write_str("data"),
			Stage::View => f.write_str("view"),
			Stage::Distributed => f.write_str("distributed"),
		}
	}
}
