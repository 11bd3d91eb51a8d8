// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use tracing_subscriber::EnvFilter;

use crate::config::{ConfigError, LogFormat, LoggingConfig};

/// Installs the global subscriber. Logs go to stderr so stdout carries only
/// command output.
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
	let rust_log = std::env::var("RUST_LOG").ok();
	let filter = build_filter(rust_log.as_deref(), &config.level)?;
	let builder = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr);

	let result = match config.format {
		LogFormat::Pretty => builder.try_init(),
		LogFormat::Json => builder.json().try_init(),
	};
	result.map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))
}

/// A usable `RUST_LOG` wins over the configured level.
fn build_filter(rust_log: Option<&str>, level: &str) -> Result<EnvFilter, ConfigError> {
	if let Some(filter) = rust_log
		.filter(|s| !s.is_empty())
		.and_then(|directives| EnvFilter::try_new(directives).ok())
	{
		return Ok(filter);
	}
	EnvFilter::try_new(level).map_err(|e| ConfigError::invalid_value("logging.level", e.to_string()))
}
