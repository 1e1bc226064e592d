// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::Write;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
	pub code: String,
	pub statement: Option<String>,
	pub message: String,
	pub label: Option<String>,
	pub help: Option<String>,
	pub notes: Vec<String>,
}

pub trait IntoDiagnostic {
	fn into_diagnostic(self) -> Diagnostic;
}

impl IntoDiagnostic for Diagnostic {
	fn into_diagnostic(self) -> Diagnostic {
		self
	}
}

/// Renders a diagnostic as plain text, one field per line.
pub fn render(diagnostic: &Diagnostic) -> String {
	let mut out = format!("{}: {}", diagnostic.code, diagnostic.message);

	if let Some(label) = &diagnostic.label {
		let _ = write!(out, "\n  label: {label}");
	}
	if let Some(statement) = &diagnostic.statement {
		let _ = write!(out, "\n  statement: {}", statement.replace('\n', " "));
	}
	if let Some(help) = &diagnostic.help {
		let _ = write!(out, "\n  help: {help}");
	}
	for note in &diagnostic.notes {
		let _ = write!(out, "\n  note: {note}");
	}
	out
}
