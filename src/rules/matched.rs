use regex::{Captures, Match};
use std::ops::Range;

/// The first match of a rule's pattern, as handed to a transform.
///
/// Borrows the input text, so a transform can read the matched text, its
/// capture groups and its byte span, and rebuild whatever output it wants
/// from the text around the match.
#[derive(Debug)]
pub struct RuleMatch<'h> {
	haystack: &'h str,
	whole: Match<'h>,
	captures: Captures<'h>,
}

impl<'h> RuleMatch<'h> {
	/// Wrap a successful capture. Returns `None` only if group 0 is absent,
	/// which `regex` never produces for a real match.
	pub(crate) fn new(haystack: &'h str, captures: Captures<'h>) -> Option<Self> {
		let whole = captures.get(0)?;
		Some(RuleMatch {
			haystack,
			whole,
			captures,
		})
	}

	/// The matched text.
	pub fn as_str(&self) -> &'h str {
		self.whole.as_str()
	}

	/// Byte offset where the match starts.
	pub fn start(&self) -> usize {
		self.whole.start()
	}

	/// Byte offset just past the end of the match.
	pub fn end(&self) -> usize {
		self.whole.end()
	}

	pub fn range(&self) -> Range<usize> {
		self.whole.range()
	}

	/// The whole input the pattern was searched in.
	pub fn haystack(&self) -> &'h str {
		self.haystack
	}

	/// Input text preceding the match.
	pub fn before(&self) -> &'h str {
		&self.haystack[..self.start()]
	}

	/// Input text following the match.
	pub fn after(&self) -> &'h str {
		&self.haystack[self.end()..]
	}

	/// Capture group `i`, where group 0 is the whole match.
	///
	/// `None` if the group does not exist or did not take part in the match.
	pub fn get(&self, i: usize) -> Option<&'h str> {
		self.captures.get(i).map(|m| m.as_str())
	}

	/// Named capture group.
	pub fn name(&self, name: &str) -> Option<&'h str> {
		self.captures.name(name).map(|m| m.as_str())
	}

	/// Capture groups 1..n in pattern order.
	pub fn groups(&self) -> Vec<Option<&'h str>> {
		self.captures
			.iter()
			.skip(1)
			.map(|m| m.map(|m| m.as_str()))
			.collect()
	}

	/// Number of groups in the pattern, counting group 0.
	pub fn group_count(&self) -> usize {
		self.captures.len()
	}

	/// Expand a `$1` / `${name}` template against this match.
	pub fn expand(&self, template: &str) -> String {
		let mut dst = String::new();
		self.captures.expand(template, &mut dst);
		dst
	}
}
