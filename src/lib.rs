//! Regex preprocessing rules that rewrite raw text before it is tokenized.
//!
//! This library provides:
//! - [`PreprocessingRule`]: one pattern plus either a replacement template
//!   (every match replaced) or a transform (first match handed to a function
//!   that returns the complete output)
//! - Sed-like rule expressions such as `s/colour/color/i`
//! - `.preprocess.toml` config files and directory cascade discovery
//!
//! Ordering several rules is left to the caller.
//!
//! # Example
//!
//! ```
//! use nlp_preprocessor::PreprocessingRule;
//! use regex::Regex;
//!
//! let strip = PreprocessingRule::new(Regex::new(r"\[\d+\]").unwrap())
//!     .with_description("drop citation markers");
//! assert_eq!(strip.apply("fever[1] and cough[2]"), "fever and cough");
//!
//! let dates = PreprocessingRule::new(Regex::new(r"(\d{2})/(\d{2})/(\d{4})").unwrap())
//!     .with_transform(|m| format!("{}{}{}", m.before(), m.expand("$3-$1-$2"), m.after()));
//! assert_eq!(dates.apply("seen 04/01/2020."), "seen 2020-04-01.");
//! ```

pub mod config;
pub mod error;
pub mod rules;

pub use error::{PreprocessError, Result};
pub use rules::{PreprocessingRule, RuleMatch};
