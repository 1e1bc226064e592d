// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use logpipe_type::model::TableId;

/// Notified synchronously whenever a view operation fails, whatever step it
/// failed at. Implementations must not panic.
pub trait ViewRollback: Send + Sync {
	fn rollback_view(&self, table_id: TableId, custom_time_field: Option<&str>);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoRollback;

impl ViewRollback for NoRollback {
	fn rollback_view(&self, _table_id: TableId, _custom_time_field: Option<&str>) {}
}
