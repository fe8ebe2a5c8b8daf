use std::path::PathBuf;

/// Library-level structured errors for loading and compiling rules.
///
/// Applying a rule never produces one of these; only building rules from
/// config files or expressions does. The CLI binary wraps them with `anyhow`.
#[derive(Debug, thiserror::Error)]
pub enum PreprocessError {
	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid regex pattern in rule: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Invalid substitution expression {expression:?}: {reason}")]
	InvalidSubstitution { expression: String, reason: String },

	#[error("Rule has neither `pattern` nor `expression`")]
	MissingPattern,

	#[error("Mutually exclusive options: {option1} and {option2}")]
	MutuallyExclusive { option1: String, option2: String },

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using PreprocessError.
pub type Result<T> = std::result::Result<T, PreprocessError>;
