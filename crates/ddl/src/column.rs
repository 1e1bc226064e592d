// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// Column of the stream table holding one raw JSON message.
pub const RAW_LOG_FIELD: &str = "_log";

pub const RAW_LOG_COLUMN: &str = "_raw_log_";
pub const TIME_SECOND_COLUMN: &str = "_time_second_";
pub const TIME_NANOSECOND_COLUMN: &str = "_time_nanosecond_";

/// Time field name used when the request does not name one.
pub const DEFAULT_TIME_FIELD: &str = "_time_";

/// View format marker selecting microsecond-timestamp parsing.
pub const NANOSECOND_TIME_FORMAT: &str = "fromUnixTimestamp64Micro";
