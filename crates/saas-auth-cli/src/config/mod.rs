// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered CLI configuration.
//!
//! Precedence, lowest to highest: built-in defaults, the TOML config file,
//! `SAAS_AUTH_*` environment variables.

mod error;
mod sections;
mod sources;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use error::ConfigError;
pub use sections::{LogFormat, LoggingConfig, OutputFormat};

use sections::{LoggingConfigLayer, OutputConfig, OutputConfigLayer};
use sources::{ConfigSource, DefaultsSource, EnvSource, TomlSource};

/// What a single source contributes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConfigLayer {
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
	#[serde(default)]
	pub output: Option<OutputConfigLayer>,
}

impl ConfigLayer {
	pub fn merge(&mut self, other: ConfigLayer) {
		if let Some(other) = other.logging {
			self.logging.get_or_insert_with(Default::default).merge(other);
		}
		if let Some(other) = other.output {
			self.output.get_or_insert_with(Default::default).merge(other);
		}
	}

	pub fn finalize(self) -> CliConfig {
		CliConfig {
			logging: self.logging.unwrap_or_default().finalize(),
			output: self.output.unwrap_or_default().finalize(),
		}
	}
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CliConfig {
	pub logging: LoggingConfig,
	pub output: OutputConfig,
}

/// Merges `sources` in precedence order.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<CliConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading config source");
		merged.merge(source.load()?);
	}
	Ok(merged.finalize())
}

/// Loads configuration with the standard sources. An explicit `config_path`
/// replaces the per-user config file.
pub fn load_config(config_path: Option<PathBuf>) -> Result<CliConfig, ConfigError> {
	let mut sources: Vec<Box<dyn ConfigSource>> =
		vec![Box::new(DefaultsSource), Box::new(EnvSource::new())];

	match config_path {
		Some(path) => {
			if !path.exists() {
				return Err(ConfigError::FileRead {
					source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
					path,
				});
			}
			sources.push(Box::new(TomlSource::new(path)));
		}
		None => {
			if let Some(user) = TomlSource::user() {
				sources.push(Box::new(user));
			}
		}
	}

	load_from_sources(sources)
}
