// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use logpipe_type::{
	Result,
	model::{Database, DatabaseId},
};

/// Resolves database metadata by identifier. Implementations report a
/// missing or unreachable database as `PipelineError::DatabaseLookup`.
pub trait DatabaseLookup: Send + Sync {
	fn database(&self, id: DatabaseId) -> Result<Database>;
}
