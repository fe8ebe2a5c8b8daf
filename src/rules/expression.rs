use crate::error::{PreprocessError, Result};
use crate::rules::rule::PreprocessingRule;
use regex::RegexBuilder;

/// Parse a sed-like rule expression: `s/pattern/replacement/flags`.
///
/// Any character after the leading `s` is the delimiter; `\` escapes it
/// inside the pattern or replacement. Flags: `i` (case-insensitive),
/// `m` (multi-line), `s` (dot matches newline), `x` (ignore whitespace).
/// `g` is accepted for familiarity; replacement rules always replace every
/// match.
pub fn parse_expression(input: &str) -> Result<PreprocessingRule> {
	let invalid = |reason: &str| PreprocessError::InvalidSubstitution {
		expression: input.to_string(),
		reason: reason.to_string(),
	};

	let mut chars = input.chars();
	if chars.next() != Some('s') {
		return Err(invalid("expression must start with 's'"));
	}
	let delimiter = chars.next().ok_or_else(|| invalid("missing delimiter"))?;
	if delimiter.is_alphanumeric() || delimiter == '\\' || delimiter.is_whitespace() {
		return Err(invalid("delimiter must be a punctuation character"));
	}

	let parts = split_by_delimiter(chars.as_str(), delimiter);
	if parts.len() < 3 {
		return Err(invalid("expected pattern, replacement and closing delimiter"));
	}
	if parts.len() > 3 {
		return Err(invalid("too many delimiters"));
	}

	let pattern = &parts[0];
	let mut builder = RegexBuilder::new(pattern);
	for flag in parts[2].chars() {
		match flag {
			'g' => {}
			'i' => {
				builder.case_insensitive(true);
			}
			'm' => {
				builder.multi_line(true);
			}
			's' => {
				builder.dot_matches_new_line(true);
			}
			'x' => {
				builder.ignore_whitespace(true);
			}
			other => return Err(invalid(&format!("unknown flag '{other}'"))),
		}
	}

	let regex = builder
		.build()
		.map_err(|source| PreprocessError::InvalidRegex {
			pattern: pattern.clone(),
			source,
		})?;

	Ok(PreprocessingRule::new(regex).with_replacement(parts[1].clone()))
}

/// Split a string by a delimiter, respecting backslash escapes of the
/// delimiter. Other backslashes are kept for the regex engine.
fn split_by_delimiter(input: &str, delimiter: char) -> Vec<String> {
	let mut parts = Vec::new();
	let mut current = String::new();
	let mut chars = input.chars().peekable();

	while let Some(c) = chars.next() {
		if c == '\\' && chars.peek() == Some(&delimiter) {
			current.push(delimiter);
			chars.next();
		} else if c == delimiter {
			parts.push(std::mem::take(&mut current));
		} else {
			current.push(c);
		}
	}

	parts.push(current);
	parts
}
