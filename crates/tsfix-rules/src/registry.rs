//! Registry of the compiled-in rule sets

use std::path::Path;

use tsfix_core::{Guard, RuleSet};

/// Summary of one configured target (for --list-rules)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetInfo<'a> {
    pub target: &'a Path,
    pub rules: Vec<RuleInfo<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInfo<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub scope: Option<&'a str>,
    pub guards: &'a [Guard],
}

/// Ordered table of `(target, rule set)` pairs
pub struct RuleSetRegistry {
    sets: Vec<RuleSet>,
}

impl RuleSetRegistry {
    /// Create a registry with every built-in rule set, in run order
    pub fn new() -> Self {
        let mut registry = Self { sets: Vec::new() };

        registry.register(super::controls::rule_set());
        registry.register(super::app::rule_set());
        registry.register(super::map2d::rule_set());
        registry.register(super::gemini::rule_set());
        registry.register(super::types::rule_set());

        registry
    }

    /// Register a new rule set; it runs after the ones already registered
    pub fn register(&mut self, set: RuleSet) {
        self.sets.push(set);
    }

    /// All rule sets in run order
    pub fn rule_sets(&self) -> &[RuleSet] {
        &self.sets
    }

    /// Get all target paths
    pub fn all_targets(&self) -> Vec<&Path> {
        self.sets.iter().map(|s| s.target()).collect()
    }

    /// Look up the rule set for a target
    ///
    /// A leading `./` on `target` is ignored.
    pub fn get(&self, target: &Path) -> Option<&RuleSet> {
        let target = relative(target);
        self.sets.iter().find(|s| s.target() == target)
    }

    /// Rule sets whose target is in `only`, keeping run order
    ///
    /// An empty filter selects everything.
    pub fn select<P: AsRef<Path>>(&self, only: &[P]) -> Vec<&RuleSet> {
        self.sets
            .iter()
            .filter(|s| only.is_empty() || only.iter().any(|p| relative(p.as_ref()) == s.target()))
            .collect()
    }

    /// Targets with their rules (for --list-rules)
    pub fn list(&self) -> Vec<TargetInfo<'_>> {
        self.sets
            .iter()
            .map(|set| TargetInfo {
                target: set.target(),
                rules: set
                    .rules()
                    .iter()
                    .map(|r| RuleInfo {
                        name: r.name(),
                        description: r.description(),
                        scope: r.scope_hint(),
                        guards: r.guards(),
                    })
                    .collect(),
            })
            .collect()
    }
}

impl Default for RuleSetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop a leading `.` component so `./App.tsx` names `App.tsx`
fn relative(path: &Path) -> &Path {
    path.strip_prefix(".").unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_run_order() {
        let registry = RuleSetRegistry::new();
        assert_eq!(
            registry.all_targets(),
            vec![
                Path::new("components/Controls.tsx"),
                Path::new("App.tsx"),
                Path::new("components/Map2D.tsx"),
                Path::new("services/gemini.ts"),
                Path::new("types.ts"),
            ]
        );
    }

    #[test]
    fn test_every_rule_set_compiles() {
        for set in RuleSetRegistry::new().rule_sets() {
            assert!(set.compile().is_ok(), "{} failed to compile", set.target().display());
        }
    }

    #[test]
    fn test_targets_are_unique() {
        let registry = RuleSetRegistry::new();
        let unique: HashSet<_> = registry.all_targets().into_iter().collect();
        assert_eq!(unique.len(), registry.rule_sets().len());
    }

    #[test]
    fn test_select_keeps_run_order() {
        let registry = RuleSetRegistry::new();
        let selected = registry.select(&["types.ts", "App.tsx"]);

        let targets: Vec<_> = selected.iter().map(|s| s.target()).collect();
        assert_eq!(targets, vec![Path::new("App.tsx"), Path::new("types.ts")]);
    }

    #[test]
    fn test_select_empty_filter_selects_all() {
        let registry = RuleSetRegistry::new();
        let none: [&str; 0] = [];
        assert_eq!(registry.select(&none).len(), 5);
    }

    #[test]
    fn test_get() {
        let registry = RuleSetRegistry::new();
        assert!(registry.get(Path::new("services/gemini.ts")).is_some());
        assert!(registry.get(Path::new("index.tsx")).is_none());
    }

    #[test]
    fn test_leading_current_dir_is_ignored() {
        let registry = RuleSetRegistry::new();
        assert!(registry.get(Path::new("./types.ts")).is_some());
        assert!(registry.get(Path::new("./components/Map2D.tsx")).is_some());

        let selected = registry.select(&["./types.ts"]);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].target(), Path::new("types.ts"));
    }

    #[test]
    fn test_list_includes_scope_hints() {
        let registry = RuleSetRegistry::new();
        let list = registry.list();
        let app = list.iter().find(|t| t.target == Path::new("App.tsx")).unwrap();

        let lookup = app
            .rules
            .iter()
            .find(|r| r.name == "suppress_province_lookup")
            .unwrap();
        assert_eq!(lookup.scope, Some("statement at the start of its own line"));
        assert_eq!(lookup.guards.len(), 1);
    }
}
