//! Rewrite rules: one matcher plus one replacement
//!
//! A [`Rule`] is plain data. [`Rule::compile`] turns it into a
//! [`CompiledRule`], which is where patterns are built and templates are
//! checked, so a broken rule fails before any text is touched.

use std::fmt;
use std::ops::Range;

use regex::Regex;
use thiserror::Error;

use crate::edit::{apply_edits, Edit, EditError};
use crate::template::{MissingGroup, Template, TemplateError};

/// Errors raised while compiling or applying rules
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("rule `{rule}`: invalid pattern")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("rule `{rule}`: malformed replacement template")]
    MalformedTemplate {
        rule: String,
        #[source]
        source: TemplateError,
    },

    #[error("rule `{rule}`: replacement references capture group {group}, but the pattern defines {available}")]
    UnknownGroup {
        rule: String,
        group: usize,
        available: usize,
    },

    #[error("rule `{rule}`: replacement references unknown capture group `{name}`")]
    UnknownNamedGroup { rule: String, name: String },

    #[error("rule `{0}`: literal matcher is empty")]
    EmptyLiteral(String),

    #[error("rule `{0}` appears more than once in the rule set")]
    DuplicateRule(String),

    #[error("rule `{0}` is not idempotent: a second pass changed the text again")]
    NotFixedPoint(String),

    #[error("rule `{rule}`: failed to apply edits")]
    Edit {
        rule: String,
        #[source]
        source: EditError,
    },
}

/// What a rule looks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Exact substring
    Literal(String),
    /// Regular expression (`regex` crate syntax)
    Pattern(String),
}

/// Veto for individual matches, based on the text around them
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    /// Skip a match when the text right after it starts with this
    NotFollowedBy(String),
    /// Skip a match when the text before it, minus trailing whitespace, ends with this
    NotPrecededBy(String),
}

impl Guard {
    /// Whether the match at `span` may be rewritten
    pub fn allows(&self, source: &str, span: &Range<usize>) -> bool {
        match self {
            Guard::NotFollowedBy(text) => !source[span.end..].starts_with(text.as_str()),
            Guard::NotPrecededBy(text) => !source[..span.start].trim_end().ends_with(text.as_str()),
        }
    }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guard::NotFollowedBy(text) => write!(f, "skip if followed by `{}`", text.trim()),
            Guard::NotPrecededBy(text) => write!(f, "skip if preceded by `{}`", text.trim()),
        }
    }
}

/// A single match-and-replace rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    name: String,
    description: String,
    matcher: Matcher,
    replacement: String,
    scope: Option<String>,
    guards: Vec<Guard>,
}

impl Rule {
    /// Replace every occurrence of `needle` with `replacement`
    pub fn literal(
        name: impl Into<String>,
        description: impl Into<String>,
        needle: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self::new(name, description, Matcher::Literal(needle.into()), replacement)
    }

    /// Replace every match of `pattern` with the rendered `template`
    pub fn pattern(
        name: impl Into<String>,
        description: impl Into<String>,
        pattern: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        Self::new(name, description, Matcher::Pattern(pattern.into()), template)
    }

    fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        matcher: Matcher,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            matcher,
            replacement: replacement.into(),
            scope: None,
            guards: Vec::new(),
        }
    }

    /// Document the code shape this rule assumes around its matches
    pub fn scope(mut self, hint: impl Into<String>) -> Self {
        self.scope = Some(hint.into());
        self
    }

    /// Leave matches alone when they are already followed by `text`
    pub fn not_followed_by(mut self, text: impl Into<String>) -> Self {
        self.guards.push(Guard::NotFollowedBy(text.into()));
        self
    }

    /// Leave matches alone when they are already preceded by `text`
    pub fn not_preceded_by(mut self, text: impl Into<String>) -> Self {
        self.guards.push(Guard::NotPrecededBy(text.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn scope_hint(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn guards(&self) -> &[Guard] {
        &self.guards
    }

    /// Build the pattern and check the template
    pub fn compile(&self) -> Result<CompiledRule<'_>, RuleError> {
        let kind = match &self.matcher {
            Matcher::Literal(needle) => {
                if needle.is_empty() {
                    return Err(RuleError::EmptyLiteral(self.name.clone()));
                }
                Compiled::Literal {
                    needle: needle.as_str(),
                }
            }
            Matcher::Pattern(pattern) => {
                let regex = Regex::new(pattern).map_err(|source| RuleError::InvalidPattern {
                    rule: self.name.clone(),
                    source,
                })?;
                let template = Template::parse(&self.replacement).map_err(|source| {
                    RuleError::MalformedTemplate {
                        rule: self.name.clone(),
                        source,
                    }
                })?;
                template.check_against(&regex).map_err(|missing| match missing {
                    MissingGroup::Index { group, available } => RuleError::UnknownGroup {
                        rule: self.name.clone(),
                        group,
                        available,
                    },
                    MissingGroup::Name(name) => RuleError::UnknownNamedGroup {
                        rule: self.name.clone(),
                        name,
                    },
                })?;
                Compiled::Pattern { regex, template }
            }
        };

        Ok(CompiledRule { rule: self, kind })
    }
}

enum Compiled<'r> {
    Literal { needle: &'r str },
    Pattern { regex: Regex, template: Template },
}

/// A rule ready to run
pub struct CompiledRule<'r> {
    rule: &'r Rule,
    kind: Compiled<'r>,
}

impl<'r> CompiledRule<'r> {
    pub fn rule(&self) -> &'r Rule {
        self.rule
    }

    /// Find every non-overlapping match, left to right, that the guards allow
    pub fn check(&self, source: &str) -> Vec<Edit> {
        let name = self.rule.name();
        let allowed = |span: &Range<usize>| self.rule.guards.iter().all(|g| g.allows(source, span));

        match &self.kind {
            Compiled::Literal { needle } => source
                .match_indices(*needle)
                .map(|(start, m)| start..start + m.len())
                .filter(|span| allowed(span))
                .map(|span| Edit::new(span, self.rule.replacement.as_str(), name))
                .collect(),
            Compiled::Pattern { regex, template } => regex
                .captures_iter(source)
                .filter_map(|caps| {
                    let span = caps.get(0)?.range();
                    if !allowed(&span) {
                        return None;
                    }
                    Some(Edit::new(span, template.render(&caps), name))
                })
                .collect(),
        }
    }

    /// Rewrite `source`, returning the new text and the edits made
    pub fn apply(&self, source: &str) -> Result<(String, Vec<Edit>), RuleError> {
        let edits = self.check(source);
        let output = apply_edits(source, &edits).map_err(|source| RuleError::Edit {
            rule: self.rule.name.clone(),
            source,
        })?;
        Ok((output, edits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(rule: &Rule, source: &str) -> String {
        rule.compile().unwrap().apply(source).unwrap().0
    }

    #[test]
    fn test_literal_replaces_every_occurrence() {
        let rule = Rule::literal("geo_json", "Type geoJson", "geoJson: any;", "geoJson: Record<string, unknown>;");
        let source = "a { geoJson: any; }\nb { geoJson: any; }\n";

        assert_eq!(
            apply(&rule, source),
            "a { geoJson: Record<string, unknown>; }\nb { geoJson: Record<string, unknown>; }\n"
        );
    }

    #[test]
    fn test_guards_describe_themselves() {
        let rule = Rule::literal("catch_any", "Suppress", "} catch (e: any) {", "x")
            .not_followed_by(" // note")
            .not_preceded_by("// note");

        let shown: Vec<String> = rule.guards().iter().map(ToString::to_string).collect();
        assert_eq!(
            shown,
            vec!["skip if followed by `// note`", "skip if preceded by `// note`"]
        );
    }

    #[test]
    fn test_literal_is_non_overlapping() {
        let rule = Rule::literal("aa", "Collapse", "aa", "b");
        assert_eq!(apply(&rule, "aaa"), "ba");
    }

    #[test]
    fn test_literal_replacement_is_not_a_template() {
        let rule = Rule::literal("cost", "Keep dollars", "price", "${price}");
        assert_eq!(apply(&rule, "price"), "${price}");
    }

    #[test]
    fn test_absent_matcher_is_noop() {
        let rule = Rule::literal("lore", "Drop fallback", "loreLevel || 1", "loreLevel");
        let compiled = rule.compile().unwrap();
        assert!(compiled.check("const x = 1;").is_empty());
        assert_eq!(compiled.apply("const x = 1;").unwrap().0, "const x = 1;");
    }

    #[test]
    fn test_pattern_with_groups() {
        let rule = Rule::pattern(
            "void_event_handler",
            "Brace handler bodies",
            r"(on[A-Z][a-zA-Z]*=\{(?:e|v|)\s*=>)\s*([^{}\n]+)\}",
            "${1} { ${2}; }}",
        );
        let source = "<input onChange={v => setSeed(v)} onBlur={e => save(e)} />";

        assert_eq!(
            apply(&rule, source),
            "<input onChange={v => { setSeed(v); }} onBlur={e => { save(e); }} />"
        );
    }

    #[test]
    fn test_pattern_does_not_rescan_output() {
        let rule = Rule::pattern("wrap", "Wrap digits", r"\d", "[$0]");
        assert_eq!(apply(&rule, "a1b2"), "a[1]b[2]");
    }

    #[test]
    fn test_not_followed_by_guard() {
        let rule = Rule::literal("mark", "Mark catch", "catch (e: any) {", "catch (e: any) { // ok")
            .not_followed_by(" // ok");
        let once = apply(&rule, "} catch (e: any) {\n");
        assert_eq!(once, "} catch (e: any) { // ok\n");
        assert_eq!(apply(&rule, &once), once);
    }

    #[test]
    fn test_not_preceded_by_guard() {
        let rule = Rule::pattern("mark", "Mark line", r"(?m)^([ \t]*)(x\[i\];)", "${1}// ok\n${1}${2}")
            .not_preceded_by("// ok");
        let once = apply(&rule, "  x[i];\n");
        assert_eq!(once, "  // ok\n  x[i];\n");
        assert_eq!(apply(&rule, &once), once);
    }

    #[test]
    fn test_invalid_pattern() {
        let rule = Rule::pattern("broken", "Broken", r"(unclosed", "$1");
        assert!(matches!(rule.compile(), Err(RuleError::InvalidPattern { .. })));
    }

    #[test]
    fn test_out_of_range_group() {
        let rule = Rule::pattern("broken", "Broken", r"(a)", "$2");
        assert!(matches!(
            rule.compile(),
            Err(RuleError::UnknownGroup {
                group: 2,
                available: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_named_group() {
        let rule = Rule::pattern("broken", "Broken", r"(?P<indent>\s*)", "${depth}");
        assert!(matches!(rule.compile(), Err(RuleError::UnknownNamedGroup { .. })));
    }

    #[test]
    fn test_malformed_template() {
        let rule = Rule::pattern("broken", "Broken", r"(a)", "cost $ a");
        assert!(matches!(rule.compile(), Err(RuleError::MalformedTemplate { .. })));
    }

    #[test]
    fn test_empty_literal() {
        let rule = Rule::literal("empty", "Empty", "", "x");
        assert!(matches!(rule.compile(), Err(RuleError::EmptyLiteral(_))));
    }

    #[test]
    fn test_scope_hint() {
        let rule = Rule::literal("a", "A", "a", "b").scope("inside a JSX attribute");
        assert_eq!(rule.scope_hint(), Some("inside a JSX attribute"));
        assert_eq!(Rule::literal("a", "A", "a", "b").scope_hint(), None);
    }
}
