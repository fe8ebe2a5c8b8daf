use crate::config::types::Config;
use crate::error::{PreprocessError, Result};
use std::path::Path;

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<Config> {
	let content =
		std::fs::read_to_string(path).map_err(|source| PreprocessError::ConfigReadError {
			path: path.to_path_buf(),
			source,
		})?;

	parse_config_str(&content, path)
}

/// Parse a config from a string. `path` is only used in error messages.
pub fn parse_config_str(content: &str, path: &Path) -> Result<Config> {
	let config: Config =
		toml::from_str(content).map_err(|source| PreprocessError::ConfigParseError {
			path: path.to_path_buf(),
			source,
		})?;

	config.validate()?;

	Ok(config)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::PathBuf;

	#[test]
	fn test_parse_empty_config() {
		let path = PathBuf::from("test.toml");
		let config = parse_config_str("", &path).unwrap();

		assert!(!config.root);
		assert!(config.rules.is_empty());
	}

	#[test]
	fn test_parse_rules_array_of_tables() {
		let content = r#"
root = true

[[rules]]
pattern = '\s+'
replacement = " "
description = "collapse whitespace"

[[rules]]
pattern = "colour"
replacement = "color"
case_insensitive = true

[[rules]]
expression = "s/Dr\\./doctor/"
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert!(config.root);
		assert_eq!(config.rules.len(), 3);

		let rule1 = &config.rules[0];
		assert_eq!(rule1.pattern.as_deref(), Some(r"\s+"));
		assert_eq!(rule1.replacement, " ");
		assert_eq!(rule1.description.as_deref(), Some("collapse whitespace"));
		assert!(!rule1.case_insensitive);

		assert!(config.rules[1].case_insensitive);

		let rule3 = &config.rules[2];
		assert_eq!(rule3.expression.as_deref(), Some(r"s/Dr\./doctor/"));
		assert_eq!(rule3.replacement, "");
	}

	#[test]
	fn test_parse_rules_inline_tables() {
		let content = r#"
rules = [
    { pattern = "foo", replacement = "bar" },
    { expression = "s/baz/qux/" },
]
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert_eq!(config.rules.len(), 2);
	}

	#[test]
	fn test_missing_pattern() {
		let content = r#"
[[rules]]
replacement = "bar"
"#;
		let result = parse_config_str(content, &PathBuf::from("test.toml"));
		assert!(matches!(result, Err(PreprocessError::MissingPattern)));
	}

	#[test]
	fn test_pattern_and_expression_are_exclusive() {
		let content = r#"
[[rules]]
pattern = "foo"
expression = "s/foo/bar/"
"#;
		let result = parse_config_str(content, &PathBuf::from("test.toml"));

		match result.unwrap_err() {
			PreprocessError::MutuallyExclusive { option1, option2 } => {
				assert_eq!(option1, "pattern");
				assert_eq!(option2, "expression");
			}
			_ => panic!("Expected MutuallyExclusive error"),
		}
	}

	#[test]
	fn test_expression_rejects_case_insensitive() {
		let content = r#"
[[rules]]
expression = "s/foo/bar/"
case_insensitive = true
"#;
		let result = parse_config_str(content, &PathBuf::from("test.toml"));
		assert!(matches!(
			result,
			Err(PreprocessError::MutuallyExclusive { .. })
		));
	}

	#[test]
	fn test_unknown_field_is_parse_error() {
		let content = r#"
[[rules]]
pattern = "foo"
replace = "bar"
"#;
		let result = parse_config_str(content, &PathBuf::from("bad.toml"));
		match result.unwrap_err() {
			PreprocessError::ConfigParseError { path, .. } => {
				assert_eq!(path, PathBuf::from("bad.toml"));
			}
			other => panic!("Expected ConfigParseError, got {other:?}"),
		}
	}

	#[test]
	fn test_parse_config_file_missing() {
		let result = parse_config_file(Path::new("/nonexistent/.preprocess.toml"));
		assert!(matches!(
			result,
			Err(PreprocessError::ConfigReadError { .. })
		));
	}
}
