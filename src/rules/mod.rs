//! Text preprocessing rules.
//!
//! This module handles:
//! - Applying a single pattern rule to a string (replace-all or transform)
//! - Exposing match details to transforms
//! - Parsing sed-like rule expressions
//! - Compiling config-file rules

pub mod compile;
pub mod expression;
pub mod matched;
pub mod rule;

pub use compile::{CompiledRule, compile_rules};
pub use expression::parse_expression;
pub use matched::RuleMatch;
pub use rule::{Mode, PreprocessingRule, TransformFn};
