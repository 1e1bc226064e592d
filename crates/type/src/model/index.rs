// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{PipelineError, Result, return_error};

/// Index definitions keyed by index name. Iteration order carries no meaning.
pub type IndexSet = HashMap<String, IndexDefinition>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashKind {
	#[default]
	None,
	/// 64-bit content hash of the string value.
	Sip,
	/// URL-normalizing hash.
	Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
	/// Untyped sentinel; the value is kept as a nullable string.
	String,
	Int64,
	Float64,
	DateTime,
}

impl ValueType {
	pub fn from_code(field: &str, code: i32) -> Result<Self> {
		match code {
			0 => Ok(ValueType::String),
			1 => Ok(ValueType::Int64),
			2 => Ok(ValueType::Float64),
			3 => Ok(ValueType::DateTime),
			_ => return_error!(PipelineError::UnknownValueType {
				field: field.to_string(),
				code,
			}),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDefinition {
	pub field: String,
	/// Key of the string-encoded JSON object holding `field`.
	#[serde(default)]
	pub root: Option<String>,
	#[serde(default)]
	pub value_type: i32,
	#[serde(default)]
	pub hash: HashKind,
}

impl IndexDefinition {
	pub fn new(field: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			root: None,
			value_type: 0,
			hash: HashKind::None,
		}
	}

	pub fn with_root(mut self, root: impl Into<String>) -> Self {
		self.root = Some(root.into());
		self
	}

	pub fn with_value_type(mut self, code: i32) -> Self {
		self.value_type = code;
		self
	}

	pub fn with_hash(mut self, hash: HashKind) -> Self {
		self.hash = hash;
		self
	}

	pub fn root(&self) -> Option<&str> {
		self.root.as_deref().filter(|root| !root.is_empty())
	}

	pub fn resolved_type(&self) -> Result<ValueType> {
		ValueType::from_code(&self.field, self.value_type)
	}

	/// Name of the generated value column.
	pub fn column_name(&self) -> String {
		match self.root() {
			Some(root) => format!("{}.{}", root, self.field),
			None => self.field.clone(),
		}
	}

	/// Name of the generated hash column, when a hash kind is set.
	pub fn hash_column_name(&self) -> Option<String> {
		match self.hash {
			HashKind::None => None,
			HashKind::Sip => Some(format!("_inner_siphash_{}_", self.column_name())),
			HashKind::Url => Some(format!("_inner_urlhash_{}_", self.column_name())),
		}
	}
}
