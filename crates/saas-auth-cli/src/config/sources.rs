// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: built-in defaults, a TOML file and the environment.

use std::path::PathBuf;

use tracing::{debug, trace};

use super::error::ConfigError;
use super::sections::{LogFormat, LoggingConfigLayer, OutputConfigLayer, OutputFormat};
use super::ConfigLayer;

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ConfigLayer, ConfigError>;
}

pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		Ok(ConfigLayer::default())
	}
}

/// TOML file source. A missing file contributes nothing.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// `$XDG_CONFIG_HOME/saas-auth/config.toml`, or the platform equivalent.
	pub fn user() -> Option<Self> {
		dirs::config_dir().map(|dir| Self::new(dir.join("saas-auth").join("config.toml")))
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ConfigLayer = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: SAAS_AUTH_<SECTION>_<FIELD>
pub struct EnvSource {
	lookup: Box<dyn Fn(&str) -> Option<String> + Send + Sync>,
}

impl EnvSource {
	pub fn new() -> Self {
		Self::with_lookup(|name| std::env::var(name).ok())
	}

	/// Reads variables through `lookup` instead of the process environment.
	pub fn with_lookup(lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
		Self {
			lookup: Box::new(lookup),
		}
	}

	fn var(&self, name: &str) -> Option<String> {
		(self.lookup)(name).filter(|s| !s.is_empty())
	}

	fn bool(&self, name: &str) -> Result<Option<bool>, ConfigError> {
		match self.var(name) {
			Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => Ok(Some(true)),
			Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => Ok(Some(false)),
			Some(v) => Err(ConfigError::invalid_value(
				name,
				format!("invalid boolean value '{v}'"),
			)),
			None => Ok(None),
		}
	}

	fn logging(&self) -> Result<LoggingConfigLayer, ConfigError> {
		const FORMAT: &str = "SAAS_AUTH_LOGGING_FORMAT";
		let format = match self.var(FORMAT).as_deref() {
			Some(v) if v.eq_ignore_ascii_case("pretty") => Some(LogFormat::Pretty),
			Some(v) if v.eq_ignore_ascii_case("json") => Some(LogFormat::Json),
			Some(v) => {
				return Err(ConfigError::invalid_value(
					FORMAT,
					format!("expected 'pretty' or 'json', got '{v}'"),
				))
			}
			None => None,
		};
		Ok(LoggingConfigLayer {
			level: self.var("SAAS_AUTH_LOGGING_LEVEL"),
			format,
		})
	}

	fn output(&self) -> Result<OutputConfigLayer, ConfigError> {
		const FORMAT: &str = "SAAS_AUTH_OUTPUT_FORMAT";
		let format = match self.var(FORMAT).as_deref() {
			Some(v) if v.eq_ignore_ascii_case("text") => Some(OutputFormat::Text),
			Some(v) if v.eq_ignore_ascii_case("json") => Some(OutputFormat::Json),
			Some(v) => {
				return Err(ConfigError::invalid_value(
					FORMAT,
					format!("expected 'text' or 'json', got '{v}'"),
				))
			}
			None => None,
		};
		Ok(OutputConfigLayer {
			format,
			explain: self.bool("SAAS_AUTH_OUTPUT_EXPLAIN")?,
		})
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(ConfigLayer {
			logging: Some(self.logging()?),
			output: Some(self.output()?),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;
	use std::io::Write;
	use tempfile::NamedTempFile;

	fn env(vars: &[(&str, &str)]) -> EnvSource {
		let vars: HashMap<String, String> = vars
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		EnvSource::with_lookup(move |name| vars.get(name).cloned())
	}

	#[test]
	fn precedence_orders_sources() {
		assert!(Precedence::Defaults < Precedence::ConfigFile);
		assert!(Precedence::ConfigFile < Precedence::Environment);
	}

	mod toml_source {
		use super::*;

		#[test]
		fn missing_file_is_empty_layer() {
			let layer = TomlSource::new("/nonexistent/saas-auth.toml").load().unwrap();
			assert_eq!(layer, ConfigLayer::default());
		}

		#[test]
		fn parses_sections() {
			let mut file = NamedTempFile::new().unwrap();
			writeln!(
				file,
				"[logging]\nlevel = \"debug\"\nformat = \"json\"\n\n[output]\nexplain = true"
			)
			.unwrap();

			let layer = TomlSource::new(file.path()).load().unwrap();
			let logging = layer.logging.unwrap();
			assert_eq!(logging.level.as_deref(), Some("debug"));
			assert_eq!(logging.format, Some(LogFormat::Json));
			assert_eq!(layer.output.unwrap().explain, Some(true));
		}

		#[test]
		fn malformed_file_reports_path() {
			let mut file = NamedTempFile::new().unwrap();
			writeln!(file, "[logging\nlevel = ").unwrap();

			let err = TomlSource::new(file.path()).load().unwrap_err();
			match err {
				ConfigError::TomlParse { path, .. } => assert_eq!(path, file.path()),
				other => panic!("unexpected error: {other}"),
			}
		}
	}

	mod env_source {
		use super::*;

		#[test]
		fn unset_variables_leave_fields_empty() {
			let layer = env(&[]).load().unwrap();
			assert_eq!(layer.logging, Some(LoggingConfigLayer::default()));
			assert_eq!(layer.output, Some(OutputConfigLayer::default()));
		}

		#[test]
		fn reads_every_field() {
			let layer = env(&[
				("SAAS_AUTH_LOGGING_LEVEL", "saas_auth=debug"),
				("SAAS_AUTH_LOGGING_FORMAT", "JSON"),
				("SAAS_AUTH_OUTPUT_FORMAT", "json"),
				("SAAS_AUTH_OUTPUT_EXPLAIN", "1"),
			])
			.load()
			.unwrap();

			let logging = layer.logging.unwrap();
			assert_eq!(logging.level.as_deref(), Some("saas_auth=debug"));
			assert_eq!(logging.format, Some(LogFormat::Json));
			let output = layer.output.unwrap();
			assert_eq!(output.format, Some(OutputFormat::Json));
			assert_eq!(output.explain, Some(true));
		}

		#[test]
		fn empty_value_counts_as_unset() {
			let layer = env(&[("SAAS_AUTH_LOGGING_LEVEL", "")]).load().unwrap();
			assert_eq!(layer.logging.unwrap().level, None);
		}

		#[test]
		fn rejects_unknown_format() {
			let err = env(&[("SAAS_AUTH_OUTPUT_FORMAT", "yaml")]).load().unwrap_err();
			assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "SAAS_AUTH_OUTPUT_FORMAT"));
		}

		#[test]
		fn rejects_malformed_boolean() {
			let err = env(&[("SAAS_AUTH_OUTPUT_EXPLAIN", "maybe")]).load().unwrap_err();
			assert!(matches!(err, ConfigError::InvalidValue { .. }));
		}
	}
}
