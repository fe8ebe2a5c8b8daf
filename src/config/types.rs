use crate::error::PreprocessError;
use serde::Deserialize;
use std::path::PathBuf;

/// Top-level configuration from a `.preprocess.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
	/// If true, stop walking parent directories; only ~/.preprocess.toml
	/// is still consulted.
	#[serde(default)]
	pub root: bool,

	/// Rules in the order they are applied.
	#[serde(default)]
	pub rules: Vec<RuleConfig>,
}

/// A replacement rule as written in a config file.
///
/// Exactly one of `pattern` or `expression` must be set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct RuleConfig {
	/// Regex to match.
	pub pattern: Option<String>,

	/// Replacement for every match of `pattern`. `$1` / `${name}` refer to
	/// capture groups.
	#[serde(default)]
	pub replacement: String,

	/// Sed-like form: "s/pattern/replacement/flags".
	pub expression: Option<String>,

	/// Match `pattern` case-insensitively.
	#[serde(default)]
	pub case_insensitive: bool,

	/// Free-text note shown by `config show` and in logs.
	pub description: Option<String>,
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	pub config: Config,
	pub path: PathBuf,
}

/// Rules from every config file in the cascade, in application order.
#[derive(Debug, Clone, Default)]
pub struct MergedConfig {
	pub rules: Vec<RuleWithSource>,
}

/// A rule with the config file it came from.
#[derive(Debug, Clone)]
pub struct RuleWithSource {
	pub rule: RuleConfig,
	pub source: PathBuf,
}

impl RuleConfig {
	/// Check that the rule names its pattern exactly once.
	pub fn validate(&self) -> Result<(), PreprocessError> {
		match (&self.pattern, &self.expression) {
			(None, None) => Err(PreprocessError::MissingPattern),
			(Some(_), Some(_)) => Err(PreprocessError::MutuallyExclusive {
				option1: "pattern".to_string(),
				option2: "expression".to_string(),
			}),
			(None, Some(_)) if self.case_insensitive => Err(PreprocessError::MutuallyExclusive {
				option1: "expression".to_string(),
				option2: "case_insensitive".to_string(),
			}),
			(None, Some(_)) if !self.replacement.is_empty() => {
				Err(PreprocessError::MutuallyExclusive {
					option1: "expression".to_string(),
					option2: "replacement".to_string(),
				})
			}
			_ => Ok(()),
		}
	}
}

impl Config {
	/// Validate all rules in this config.
	pub fn validate(&self) -> Result<(), PreprocessError> {
		for rule in &self.rules {
			rule.validate()?;
		}
		Ok(())
	}
}
