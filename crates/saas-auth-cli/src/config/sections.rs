// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections.
//!
//! Each section has a `*ConfigLayer` with all-optional fields (what a single
//! source provides) and a resolved `*Config` produced by `finalize`.

use serde::{Deserialize, Serialize};

const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	#[default]
	Pretty,
	Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
	#[default]
	Text,
	Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfigLayer {
	pub level: Option<String>,
	pub format: Option<LogFormat>,
}

impl LoggingConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.level.is_some() {
			self.level = other.level;
		}
		if other.format.is_some() {
			self.format = other.format;
		}
	}

	pub fn finalize(self) -> LoggingConfig {
		LoggingConfig {
			level: self.level.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
			format: self.format.unwrap_or_default(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
	/// `EnvFilter` directive; `RUST_LOG` takes precedence when set.
	pub level: String,
	pub format: LogFormat,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		LoggingConfigLayer::default().finalize()
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputConfigLayer {
	pub format: Option<OutputFormat>,
	pub explain: Option<bool>,
}

impl OutputConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.format.is_some() {
			self.format = other.format;
		}
		if other.explain.is_some() {
			self.explain = other.explain;
		}
	}

	pub fn finalize(self) -> OutputConfig {
		OutputConfig {
			format: self.format.unwrap_or_default(),
			explain: self.explain.unwrap_or(false),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
	pub format: OutputFormat,
	/// Print the deciding rule with every `check`.
	pub explain: bool,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_layers_finalize_to_defaults() {
		let logging = LoggingConfigLayer::default().finalize();
		assert_eq!(logging.level, "warn");
		assert_eq!(logging.format, LogFormat::Pretty);

		let output = OutputConfigLayer::default().finalize();
		assert_eq!(output.format, OutputFormat::Text);
		assert!(!output.explain);
	}

	#[test]
	fn merge_keeps_unset_fields() {
		let mut base = LoggingConfigLayer {
			level: Some("info".to_string()),
			format: Some(LogFormat::Json),
		};
		base.merge(LoggingConfigLayer {
			level: Some("debug".to_string()),
			format: None,
		});
		assert_eq!(base.level.as_deref(), Some("debug"));
		assert_eq!(base.format, Some(LogFormat::Json));
	}

	#[test]
	fn output_layer_parses_from_toml() {
		let layer: OutputConfigLayer = toml::from_str("format = \"json\"\nexplain = true").unwrap();
		let config = layer.finalize();
		assert_eq!(config.format, OutputFormat::Json);
		assert!(config.explain);
	}
}
