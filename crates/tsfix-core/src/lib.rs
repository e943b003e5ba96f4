//! tsfix-core: Rule-based text rewriting
//!
//! This crate provides:
//! - `Edit`: A span-based text modification
//! - `apply_edits()`: Function to apply non-overlapping edits
//! - `Template`: Replacement text with capture-group slots
//! - `Rule`: A literal or pattern matcher plus its replacement
//! - `RuleSet`: An ordered list of rules for one target file

mod edit;
pub mod rule;
pub mod rule_set;
pub mod template;

pub use edit::{apply_edits, offset_to_line_column, Edit, EditError};
pub use rule::{CompiledRule, Guard, Matcher, Rule, RuleError};
pub use rule_set::{Change, CompiledRuleSet, RuleSet, Transform};
pub use template::{Template, TemplateError};
