//! Ordered rule sets and the file transform
//!
//! Rules run as a left fold: each rule sees the output of the one before
//! it, never the original text.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::edit::offset_to_line_column;
use crate::rule::{CompiledRule, Rule, RuleError};

/// An ordered sequence of rules scoped to one target file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    target: PathBuf,
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Create an empty rule set for `target` (a path relative to the project root)
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            rules: Vec::new(),
        }
    }

    /// Append a rule; it runs after every rule added before it
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Compile every rule up front
    ///
    /// Fails on the first broken rule, so nothing runs unless all of them
    /// can.
    pub fn compile(&self) -> Result<CompiledRuleSet<'_>, RuleError> {
        let mut seen = HashSet::new();
        let mut rules = Vec::with_capacity(self.rules.len());

        for rule in &self.rules {
            if !seen.insert(rule.name()) {
                return Err(RuleError::DuplicateRule(rule.name().to_string()));
            }
            rules.push(rule.compile()?);
        }

        Ok(CompiledRuleSet { rules })
    }

    /// Compile and run the rule set over `content`
    pub fn transform(&self, content: &str) -> Result<Transform, RuleError> {
        self.compile()?.transform(content)
    }
}

/// A rule set with all patterns built
pub struct CompiledRuleSet<'r> {
    rules: Vec<CompiledRule<'r>>,
}

impl CompiledRuleSet<'_> {
    /// Apply every rule in order, each to the previous rule's output
    pub fn transform(&self, content: &str) -> Result<Transform, RuleError> {
        let mut changes = Vec::new();

        let output = self.rules.iter().try_fold(content.to_string(), |text, rule| {
            let (next, edits) = rule.apply(&text)?;
            debug!(rule = rule.rule().name(), edits = edits.len(), "applied rule");

            changes.extend(edits.iter().map(|edit| {
                let (line, column) = offset_to_line_column(&text, edit.start_offset());
                Change {
                    rule: edit.rule.clone(),
                    description: rule.rule().description().to_string(),
                    line,
                    column,
                }
            }));
            Ok::<_, RuleError>(next)
        })?;

        Ok(Transform { output, changes })
    }

    /// Check that `output` is a fixed point of this rule set
    ///
    /// Re-applies each rule in order and reports the first one that still
    /// changes the text.
    pub fn verify_fixed_point(&self, output: &str) -> Result<(), RuleError> {
        let mut text = output.to_string();
        for rule in &self.rules {
            let (next, _) = rule.apply(&text)?;
            if next != text {
                return Err(RuleError::NotFixedPoint(rule.rule().name().to_string()));
            }
            text = next;
        }
        Ok(())
    }
}

/// The result of running a rule set over one text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transform {
    /// The rewritten text
    pub output: String,
    /// Every replacement made, in application order
    pub changes: Vec<Change>,
}

impl Transform {
    /// Whether the output differs from `original`
    pub fn modifies(&self, original: &str) -> bool {
        self.output != original
    }
}

/// One replacement made by one rule
///
/// Line and column are 1-based and refer to the text as that rule saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub rule: String,
    pub description: String,
    pub line: usize,
    pub column: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_step() -> RuleSet {
        RuleSet::new("services/example.ts")
            .rule(Rule::literal("first", "Type the payload", "(data: any)", "(data: Payload)"))
            .rule(Rule::pattern(
                "second",
                "Name the payload handler",
                r"handle\((data: Payload)\)",
                "handlePayload(${1})",
            ))
    }

    #[test]
    fn test_rules_fold_in_order() {
        let set = two_step();
        let result = set.transform("handle(data: any)").unwrap();

        assert_eq!(result.output, "handlePayload(data: Payload)");
        assert_eq!(result.changes.len(), 2);
        assert_eq!(result.changes[0].rule, "first");
        assert_eq!(result.changes[1].rule, "second");
    }

    #[test]
    fn test_second_rule_alone_is_noop_on_original() {
        let set = RuleSet::new("services/example.ts").rule(two_step().rules()[1].clone());
        let result = set.transform("handle(data: any)").unwrap();

        assert_eq!(result.output, "handle(data: any)");
        assert!(result.changes.is_empty());
        assert!(!result.modifies("handle(data: any)"));
    }

    #[test]
    fn test_capture_group_scenario_is_idempotent() {
        let set = RuleSet::new("components/Controls.tsx").rule(Rule::pattern(
            "generic_change_handler",
            "Make change handlers generic over the parameter key",
            r"(handle\w*Change) = \(key: keyof WorldParams, value: any\) => \{",
            "${1} = <K extends keyof WorldParams>(key: K, value: WorldParams[K]) => {",
        ));
        let input = "handleChange = (key: keyof WorldParams, value: any) => {";
        let expected =
            "handleChange = <K extends keyof WorldParams>(key: K, value: WorldParams[K]) => {";

        let once = set.transform(input).unwrap();
        assert_eq!(once.output, expected);
        assert_eq!(once.changes.len(), 1);

        let twice = set.transform(&once.output).unwrap();
        assert_eq!(twice.output, expected);
        assert!(twice.changes.is_empty());
    }

    #[test]
    fn test_change_positions() {
        let set = RuleSet::new("types.ts").rule(Rule::literal("any", "Type it", ": any;", ": unknown;"));
        let result = set.transform("a: string;\n  b: any;\n").unwrap();

        assert_eq!(result.changes.len(), 1);
        assert_eq!(result.changes[0].line, 2);
        assert_eq!(result.changes[0].column, 4);
        assert_eq!(result.changes[0].description, "Type it");
    }

    #[test]
    fn test_malformed_rule_fails_whole_set() {
        let set = RuleSet::new("a.ts")
            .rule(Rule::literal("ok", "Fine", "a", "b"))
            .rule(Rule::pattern("broken", "Broken", "(", "x"));

        let err = set.transform("a").unwrap_err();
        assert!(matches!(err, RuleError::InvalidPattern { ref rule, .. } if rule == "broken"));
    }

    #[test]
    fn test_duplicate_rule_names_rejected() {
        let set = RuleSet::new("a.ts")
            .rule(Rule::literal("same", "One", "a", "b"))
            .rule(Rule::literal("same", "Two", "c", "d"));

        assert!(matches!(set.compile(), Err(RuleError::DuplicateRule(name)) if name == "same"));
    }

    #[test]
    fn test_verify_fixed_point_accepts_idempotent_set() {
        let set = two_step();
        let compiled = set.compile().unwrap();
        let result = compiled.transform("x handle(data: any) y").unwrap();

        assert!(compiled.verify_fixed_point(&result.output).is_ok());
    }

    #[test]
    fn test_verify_fixed_point_rejects_drifting_rule() {
        let set = RuleSet::new("a.ts").rule(Rule::literal(
            "append_comment",
            "Append a comment",
            "value: any) => {",
            "value: any) => { // note",
        ));
        let compiled = set.compile().unwrap();
        let result = compiled.transform("(value: any) => {").unwrap();

        let err = compiled.verify_fixed_point(&result.output).unwrap_err();
        assert!(matches!(err, RuleError::NotFixedPoint(name) if name == "append_comment"));
    }

    #[test]
    fn test_transform_is_deterministic() {
        let set = two_step();
        let input = "handle(data: any); handle(data: any);";
        let first = set.transform(input).unwrap();
        let second = set.transform(input).unwrap();
        assert_eq!(first, second);
    }
}
