// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tracing::Subscriber;
use tracing_subscriber::{
	EnvFilter, Layer,
	fmt::{self, TestWriter, writer::BoxMakeWriter},
	layer::SubscriberExt,
	registry::LookupSpan,
	util::{SubscriberInitExt, TryInitError},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingFormat {
	#[default]
	Pretty,
	Compact,
	Json,
}

/// Builder for the process-wide tracing subscriber. `RUST_LOG`, when set,
/// takes precedence over the configured directive.
#[derive(Debug, Clone)]
pub struct TracingBuilder {
	directive: String,
	format: TracingFormat,
	target: bool,
	test_writer: bool,
}

impl Default for TracingBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl TracingBuilder {
	pub fn new() -> Self {
		Self {
			directive: "info".to_string(),
			format: TracingFormat::default(),
			target: true,
			test_writer: false,
		}
	}

	/// Builder suited for test binaries: debug output for logpipe crates,
	/// captured by the test harness, without event targets.
	pub fn for_tests() -> Self {
		Self::new()
			.with_directive("warn,logpipe_engine=debug")
			.with_format(TracingFormat::Compact)
			.with_target(false)
			.with_test_writer(true)
	}

	pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
		self.directive = directive.into();
		self
	}

	pub fn with_format(mut self, format: TracingFormat) -> Self {
		self.format = format;
		self
	}

	pub fn with_target(mut self, target: bool) -> Self {
		self.target = target;
		self
	}

	pub fn with_test_writer(mut self, test_writer: bool) -> Self {
		self.test_writer = test_writer;
		self
	}

	pub fn directive(&self) -> &str {
		&self.directive
	}

	pub fn format(&self) -> TracingFormat {
		self.format
	}

	pub fn target(&self) -> bool {
		self.target
	}

	pub fn filter(&self) -> EnvFilter {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.directive))
	}

	pub fn layer<S>(&self) -> Box<dyn Layer<S> + Send + Sync + 'static>
	where
		S: Subscriber + for<'span> LookupSpan<'span>,
	{
		let writer = if self.test_writer {
			BoxMakeWriter::new(TestWriter::new())
		} else {
			BoxMakeWriter::new(std::io::stderr)
		};
		let layer = fmt::layer().with_writer(writer).with_target(self.target);
		match self.format {
			TracingFormat::Pretty => layer.pretty().boxed(),
			TracingFormat::Compact => layer.compact().boxed(),
			TracingFormat::Json => layer.json().boxed(),
		}
	}

	/// Installs the subscriber globally. Fails when one is already installed.
	pub fn try_init(self) -> Result<(), TryInitError> {
		let filter = self.filter();
		tracing_subscriber::registry().with(self.layer()).with(filter).try_init()
	}
}

#[cfg(test)]
pub mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let builder = TracingBuilder::default();
		assert_eq!(builder.directive(), "info");
		assert_eq!(builder.format(), TracingFormat::Pretty);
		assert!(builder.target());
	}

	#[test]
	fn test_for_tests() {
		let builder = TracingBuilder::for_tests();
		assert_eq!(builder.format(), TracingFormat::Compact);
		assert!(!builder.target());
		assert!(builder.test_writer);
	}

	#[test]
	fn test_second_init_fails() {
		let _ = TracingBuilder::for_tests().try_init();
		assert!(TracingBuilder::for_tests().with_format(TracingFormat::Json).try_init().is_err());
	}
}
