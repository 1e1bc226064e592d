// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use super::{Diagnostic, IntoDiagnostic};
use crate::model::{DeploymentMode, Stage};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
	#[error("invalid time type {code}")]
	InvalidTimeType {
		code: i32,
	},

	#[error("cluster name is empty")]
	ClusterNameEmpty {
		object: String,
	},

	#[error("current view cannot be empty")]
	MissingCurrentView,

	#[error("{stage} statement failed: {message}")]
	Execution {
		stage: Stage,
		statement: String,
		message: String,
	},

	#[error("unknown value type {code} for field '{field}'")]
	UnknownValueType {
		field: String,
		code: i32,
	},

	#[error("invalid identifier '{identifier}': {reason}")]
	InvalidIdentifier {
		identifier: String,
		reason: &'static str,
	},

	#[error("{capability} expects {expected} parameters, got {found}")]
	PayloadMismatch {
		capability: &'static str,
		expected: &'static str,
		found: &'static str,
	},

	#[error("{operation} is not supported in {mode} mode")]
	Unsupported {
		operation: &'static str,
		mode: DeploymentMode,
	},

	#[error("database {id} lookup failed: {message}")]
	DatabaseLookup {
		id: u64,
		message: String,
	},

	#[error("invalid configuration: {message}")]
	InvalidConfig {
		message: String,
	},
}

impl IntoDiagnostic for PipelineError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			PipelineError::InvalidTimeType {
				code,
			} => Diagnostic {
				code: "PIPE_001".to_string(),
				statement: None,
				message,
				label: Some(format!("time type code {code}")),
				help: Some("Use 1 for a string time field or 2 for a float time field".to_string()),
				notes: vec![],
			},

			PipelineError::ClusterNameEmpty {
				object,
			} => Diagnostic {
				code: "PIPE_002".to_string(),
				statement: None,
				message,
				label: Some(format!("while building DDL for {object}")),
				help: Some("Configure the cluster name of the database before provisioning in cluster mode"
					.to_string()),
				notes: vec!["Cluster mode statements are emitted with ON CLUSTER and need a cluster name"
					.to_string()],
			},

			PipelineError::MissingCurrentView => Diagnostic {
				code: "PIPE_003".to_string(),
				statement: None,
				message,
				label: None,
				help: Some("Pass the view definition when operating on a custom time field view".to_string()),
				notes: vec![],
			},

			PipelineError::Execution {
				stage,
				statement,
				..
			} => Diagnostic {
				code: "PIPE_004".to_string(),
				statement: Some(statement),
				message,
				label: Some(format!("{stage} stage")),
				help: None,
				notes: vec![],
			},

			PipelineError::UnknownValueType {
				..
			} => Diagnostic {
				code: "PIPE_005".to_string(),
				statement: None,
				message,
				label: None,
				help: Some("Supported value types are 0 (string), 1 (int64), 2 (float64) and 3 (datetime)"
					.to_string()),
				notes: vec![],
			},

			PipelineError::InvalidIdentifier {
				..
			} => Diagnostic {
				code: "PIPE_006".to_string(),
				statement: None,
				message,
				label: None,
				help: Some("Identifiers must be non-empty and must not contain backticks".to_string()),
				notes: vec![],
			},

			PipelineError::PayloadMismatch {
				..
			} => Diagnostic {
				code: "PIPE_007".to_string(),
				statement: None,
				message,
				label: None,
				help: None,
				notes: vec!["Each builder call carries exactly one parameter payload".to_string()],
			},

			PipelineError::Unsupported {
				..
			} => Diagnostic {
				code: "PIPE_008".to_string(),
				statement: None,
				message,
				label: None,
				help: None,
				notes: vec![],
			},

			PipelineError::DatabaseLookup {
				..
			} => Diagnostic {
				code: "PIPE_009".to_string(),
				statement: None,
				message,
				label: None,
				help: None,
				notes: vec![],
			},

			PipelineError::InvalidConfig {
				..
			} => Diagnostic {
				code: "PIPE_010".to_string(),
				statement: None,
				message,
				label: None,
				help: None,
				notes: vec![],
			},
		}
	}
}

#[cfg(test)]
pub mod tests {
	use super::*;

	#[test]
	fn test_codes() {
		let cases = [
			(
				PipelineError::InvalidTimeType {
					code: 7,
				},
				"PIPE_001",
			),
			(PipelineError::MissingCurrentView, "PIPE_003"),
			(
				PipelineError::Unsupported {
					operation: "distributed table",
					mode: DeploymentMode::Standalone,
				},
				"PIPE_008",
			),
		];

		for (err, code) in cases {
			assert_eq!(err.into_diagnostic().code, code);
		}
	}

	#[test]
	fn test_execution_keeps_statement() {
		let diagnostic = PipelineError::Execution {
			stage: Stage::Stream,
			statement: "CREATE TABLE `logs`.`nginx_stream`".to_string(),
			message: "broker unreachable".to_string(),
		}
		.into_diagnostic();

		assert_eq!(diagnostic.statement.as_deref(), Some("CREATE TABLE `logs`.`nginx_stream`"));
		assert_eq!(diagnostic.message, "stream statement failed: broker unreachable");
	}

	#[test]
	fn test_unsupported_message() {
		let err = PipelineError::Unsupported {
			operation: "distributed table",
			mode: DeploymentMode::Standalone,
		};
		assert_eq!(err.to_string(), "distributed table is not supported in standalone mode");
	}
}
