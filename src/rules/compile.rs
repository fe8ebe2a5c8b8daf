use crate::config::types::{MergedConfig, RuleConfig, RuleWithSource};
use crate::error::{PreprocessError, Result};
use crate::rules::expression::parse_expression;
use crate::rules::rule::PreprocessingRule;
use regex::RegexBuilder;
use std::path::PathBuf;

/// A config rule compiled into a ready-to-apply [`PreprocessingRule`].
#[derive(Debug, Clone)]
pub struct CompiledRule {
	pub rule: PreprocessingRule,

	/// Source config path (for debugging).
	pub source: PathBuf,
}

impl CompiledRule {
	/// Compile a rule from a RuleWithSource.
	pub fn from_rule_with_source(rws: &RuleWithSource) -> Result<Self> {
		Ok(CompiledRule {
			rule: compile_rule(&rws.rule)?,
			source: rws.source.clone(),
		})
	}
}

/// Compile one config rule.
pub fn compile_rule(config: &RuleConfig) -> Result<PreprocessingRule> {
	config.validate()?;

	let rule = match (&config.pattern, &config.expression) {
		(Some(pattern), _) => {
			let regex = RegexBuilder::new(pattern)
				.case_insensitive(config.case_insensitive)
				.build()
				.map_err(|source| PreprocessError::InvalidRegex {
					pattern: pattern.clone(),
					source,
				})?;
			PreprocessingRule::new(regex).with_replacement(config.replacement.clone())
		}
		(None, Some(expression)) => parse_expression(expression)?,
		(None, None) => return Err(PreprocessError::MissingPattern),
	};

	Ok(match config.description {
		Some(ref description) => rule.with_description(description.clone()),
		None => rule,
	})
}

/// Compile all rules in a merged config, preserving order.
pub fn compile_rules(config: &MergedConfig) -> Result<Vec<CompiledRule>> {
	config
		.rules
		.iter()
		.map(CompiledRule::from_rule_with_source)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn with_source(rule: RuleConfig) -> RuleWithSource {
		RuleWithSource {
			rule,
			source: PathBuf::from("test.toml"),
		}
	}

	#[test]
	fn test_compile_pattern_rule() {
		let rule = compile_rule(&RuleConfig {
			pattern: Some(r"\s+".to_string()),
			replacement: " ".to_string(),
			description: Some("collapse whitespace".to_string()),
			..Default::default()
		})
		.unwrap();

		assert_eq!(rule.description(), Some("collapse whitespace"));
		assert_eq!(rule.apply("a \t b\n\nc"), "a b c");
	}

	#[test]
	fn test_compile_case_insensitive() {
		let rule = compile_rule(&RuleConfig {
			pattern: Some("pt".to_string()),
			replacement: "patient".to_string(),
			case_insensitive: true,
			..Default::default()
		})
		.unwrap();

		assert_eq!(rule.apply("Pt and PT"), "patient and patient");
	}

	#[test]
	fn test_compile_expression_rule() {
		let rule = compile_rule(&RuleConfig {
			expression: Some("s/colour/color/i".to_string()),
			description: Some("spelling".to_string()),
			..Default::default()
		})
		.unwrap();

		assert_eq!(rule.apply("COLOUR"), "color");
		assert_eq!(rule.label(), "spelling");
	}

	#[test]
	fn test_compile_invalid_regex() {
		let result = compile_rule(&RuleConfig {
			pattern: Some("[invalid".to_string()),
			..Default::default()
		});

		match result.unwrap_err() {
			PreprocessError::InvalidRegex { pattern, .. } => {
				assert_eq!(pattern, "[invalid");
			}
			_ => panic!("Expected InvalidRegex error"),
		}
	}

	#[test]
	fn test_compile_rules_keeps_order_and_source() {
		let merged = MergedConfig {
			rules: vec![
				with_source(RuleConfig {
					pattern: Some("a".to_string()),
					replacement: "b".to_string(),
					..Default::default()
				}),
				with_source(RuleConfig {
					expression: Some("s/b/c/".to_string()),
					..Default::default()
				}),
			],
		};

		let compiled = compile_rules(&merged).unwrap();
		assert_eq!(compiled.len(), 2);
		assert_eq!(compiled[0].source, PathBuf::from("test.toml"));

		let text = compiled
			.iter()
			.fold("aab".to_string(), |text, c| c.rule.apply(&text));
		assert_eq!(text, "ccc");
	}

	#[test]
	fn test_compile_rules_fails_on_first_bad_rule() {
		let merged = MergedConfig {
			rules: vec![with_source(RuleConfig::default())],
		};
		assert!(matches!(
			compile_rules(&merged),
			Err(PreprocessError::MissingPattern)
		));
	}
}
