// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use super::params::{DataParams, DistributedParams, StreamParams, ViewParams};
use crate::{
	column::{RAW_LOG_COLUMN, RAW_LOG_FIELD, TIME_NANOSECOND_COLUMN, TIME_SECOND_COLUMN},
	extract::COLUMN_SEPARATOR,
	literal::escape,
	naming::QualifiedName,
};

const KAFKA_FORMAT: &str = "JSONAsString";
const INDEX_GRANULARITY: u32 = 8192;

pub(crate) fn on_cluster(cluster: Option<&str>) -> String {
	match cluster {
		Some(cluster) => format!(" ON CLUSTER `{cluster}`"),
		None => String::new(),
	}
}

pub(crate) fn stream(params: &StreamParams, cluster: Option<&str>) -> String {
	format!(
		"CREATE TABLE {table}{on_cluster}\n(\n  {RAW_LOG_FIELD} String\n)\nENGINE = Kafka\n\
		 SETTINGS kafka_broker_list = '{brokers}',\n  \
		 kafka_topic_list = '{topics}',\n  \
		 kafka_group_name = '{group}',\n  \
		 kafka_format = '{KAFKA_FORMAT}',\n  \
		 kafka_num_consumers = {consumers},\n  \
		 kafka_skip_broken_messages = {skip}",
		table = params.table,
		on_cluster = on_cluster(cluster),
		brokers = escape(&params.brokers),
		topics = escape(&params.topics),
		group = escape(&params.group),
		consumers = params.consumers,
		skip = params.skip_broken_messages,
	)
}

pub(crate) fn merge_tree() -> String {
	"MergeTree".to_string()
}

/// Replicated engine keyed by the shard macro and the per-shard table name.
pub(crate) fn replicated_merge_tree(table: &QualifiedName) -> String {
	format!(
		"ReplicatedMergeTree('/clickhouse/tables/{{shard}}/{}.{}', '{{replica}}')",
		escape(table.database()),
		escape(table.table())
	)
}

pub(crate) fn data(params: &DataParams, cluster: Option<&str>, engine: &str) -> String {
	let ttl = match params.days {
		0 => String::new(),
		days => format!("\nTTL toDateTime({TIME_SECOND_COLUMN}) + INTERVAL {days} DAY"),
	};
	format!(
		"CREATE TABLE {table}{on_cluster}\n(\n  \
		 {TIME_SECOND_COLUMN} DateTime,\n  \
		 {TIME_NANOSECOND_COLUMN} DateTime64(9),\n  \
		 {RAW_LOG_COLUMN} String CODEC(ZSTD(1)),\n  \
		 INDEX idx_raw_log {RAW_LOG_COLUMN} TYPE tokenbf_v1(30720, 2, 0) GRANULARITY 1\n)\n\
		 ENGINE = {engine}\n\
		 PARTITION BY toYYYYMMDD({TIME_SECOND_COLUMN})\n\
		 ORDER BY {TIME_SECOND_COLUMN}{ttl}\n\
		 SETTINGS index_granularity = {INDEX_GRANULARITY}",
		table = params.table,
		on_cluster = on_cluster(cluster),
	)
}

pub(crate) fn view(params: &ViewParams, cluster: Option<&str>) -> String {
	let columns = if params.columns.is_empty() {
		String::new()
	} else {
		format!("{COLUMN_SEPARATOR}{}", params.columns)
	};
	format!(
		"CREATE MATERIALIZED VIEW {view}{on_cluster} TO {target} AS\nSELECT\n  \
		 {time},\n  \
		 {RAW_LOG_FIELD} AS {RAW_LOG_COLUMN}{columns}\n\
		 FROM {source}\n\
		 WHERE {predicate}",
		view = params.view,
		on_cluster = on_cluster(cluster),
		target = params.target,
		time = params.time_convert,
		source = params.source,
		predicate = params.predicate,
	)
}

pub(crate) fn distributed(params: &DistributedParams, cluster: &str) -> String {
	format!(
		"CREATE TABLE {table}{on_cluster} AS {source}\n\
		 ENGINE = Distributed('{cluster}', '{database}', '{local}', rand())",
		table = params.table,
		on_cluster = on_cluster(Some(cluster)),
		source = params.source,
		cluster = escape(cluster),
		database = escape(params.source.database()),
		local = escape(params.source.table()),
	)
}

pub(crate) fn drop(name: &QualifiedName, cluster: Option<&str>) -> String {
	format!("DROP TABLE IF EXISTS {name}{}", on_cluster(cluster))
}
