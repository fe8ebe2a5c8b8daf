use crate::rules::matched::RuleMatch;
use log::{debug, trace};
use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// A transform builds the complete output text from the first match.
pub type TransformFn = dyn for<'h> Fn(&RuleMatch<'h>) -> String + Send + Sync;

/// How a rule rewrites its input, selected by whether a transform is set.
#[derive(Clone, Copy)]
pub enum Mode<'a> {
	/// Replace every non-overlapping match with a replacement template.
	Replace(&'a str),

	/// Hand the first match to a transform and return its output verbatim.
	Transform(&'a TransformFn),
}

impl fmt::Debug for Mode<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Mode::Replace(replacement) => f.debug_tuple("Replace").field(replacement).finish(),
			Mode::Transform(_) => f.write_str("Transform(..)"),
		}
	}
}

/// A single text preprocessing rule.
///
/// Without a transform, [`apply`](Self::apply) replaces every match of the
/// pattern with the replacement (which may use `$1` / `${name}` references).
/// With a transform, only the first match is looked up and the transform's
/// return value becomes the whole result; the replacement is ignored.
///
/// Rules are immutable once built and can be shared between threads.
#[derive(Clone)]
pub struct PreprocessingRule {
	pattern: Regex,
	replacement: String,
	transform: Option<Arc<TransformFn>>,
	description: Option<String>,
}

impl PreprocessingRule {
	/// A rule that deletes every match of `pattern`.
	pub fn new(pattern: Regex) -> Self {
		PreprocessingRule {
			pattern,
			replacement: String::new(),
			transform: None,
			description: None,
		}
	}

	/// Set the replacement template used when no transform is present.
	pub fn with_replacement(mut self, replacement: impl Into<String>) -> Self {
		self.replacement = replacement.into();
		self
	}

	/// Set a transform. It takes precedence over any replacement.
	pub fn with_transform<F>(mut self, transform: F) -> Self
	where
		F: for<'h> Fn(&RuleMatch<'h>) -> String + Send + Sync + 'static,
	{
		self.transform = Some(Arc::new(transform));
		self
	}

	/// Attach a free-text label. Only used for display and logging.
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	pub fn pattern(&self) -> &Regex {
		&self.pattern
	}

	pub fn replacement(&self) -> &str {
		&self.replacement
	}

	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	pub fn has_transform(&self) -> bool {
		self.transform.is_some()
	}

	/// The substitution mode `apply` will use.
	pub fn mode(&self) -> Mode<'_> {
		match self.transform {
			Some(ref transform) => Mode::Transform(&**transform),
			None => Mode::Replace(&self.replacement),
		}
	}

	/// Apply this rule to `text`.
	///
	/// Input without a match comes back unchanged in either mode, and a
	/// transform is only called when there is a match.
	pub fn apply(&self, text: &str) -> String {
		match self.mode() {
			Mode::Replace(replacement) => {
				match self.pattern.replace_all(text, replacement) {
					Cow::Borrowed(unchanged) => {
						trace!("rule {} did not match", self.label());
						unchanged.to_string()
					}
					Cow::Owned(rewritten) => {
						debug!("rule {} replaced matches", self.label());
						rewritten
					}
				}
			}
			Mode::Transform(transform) => {
				let Some(first) = self
					.pattern
					.captures(text)
					.and_then(|captures| RuleMatch::new(text, captures))
				else {
					trace!("rule {} did not match", self.label());
					return text.to_string();
				};
				debug!(
					"rule {} transforming match at {}..{}",
					self.label(),
					first.start(),
					first.end()
				);
				transform(&first)
			}
		}
	}

	/// Description if set, otherwise the pattern source.
	pub fn label(&self) -> &str {
		self.description
			.as_deref()
			.unwrap_or_else(|| self.pattern.as_str())
	}
}

impl fmt::Debug for PreprocessingRule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PreprocessingRule")
			.field("pattern", &self.pattern.as_str())
			.field("mode", &self.mode())
			.field("description", &self.description)
			.finish()
	}
}
