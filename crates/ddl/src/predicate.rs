// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use logpipe_type::{PipelineError, Result, model::ViewDefinition, return_error};

use crate::{column::RAW_LOG_FIELD, literal::escape};

pub const TAUTOLOGY: &str = "1=1";

fn has_key(key: &str, present: bool) -> String {
	format!("JSONHas({RAW_LOG_FIELD}, '{}') = {}", escape(key), u8::from(present))
}

/// Rows of the default view: none of the sibling views' keys are present.
pub fn default_predicate(siblings: &[ViewDefinition]) -> String {
	if siblings.is_empty() {
		return TAUTOLOGY.to_string();
	}
	siblings.iter().map(|view| has_key(&view.key, false)).collect::<Vec<_>>().join(" AND ")
}

/// Rows of one specific view: its key is present.
pub fn current_predicate(current: Option<&ViewDefinition>) -> Result<String> {
	match current {
		Some(view) => Ok(has_key(&view.key, true)),
		None => return_error!(PipelineError::MissingCurrentView),
	}
}
