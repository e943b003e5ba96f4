//! Rule set for `App.tsx`

use tsfix_core::{Rule, RuleSet};

use crate::common::{suppress_explicit_any, suppress_object_injection, void_event_handler};

pub const TARGET: &str = "App.tsx";

/// Build the rule set
pub fn rule_set() -> RuleSet {
    RuleSet::new(TARGET)
        .rule(Rule::literal(
            "void_log_callback",
            "Give the log callback a block body",
            "(msg) => addLog(msg)",
            "(msg) => { addLog(msg); }",
        ))
        .rule(void_event_handler("e|v|"))
        .rule(suppress_explicit_any("suppress_any_catch", "} catch (e: any) {"))
        .rule(suppress_object_injection(
            "suppress_province_lookup",
            "if (genF.provinces[idx]) {",
        ))
        .rule(suppress_object_injection(
            "suppress_province_rename",
            "genF.provinces[idx].name = savedP.name;",
        ))
        .rule(suppress_object_injection(
            "suppress_town_lookup",
            "if (genF.provinces[idx].towns[tIdx]) {",
        ))
        .rule(suppress_object_injection(
            "suppress_town_rename",
            "genF.provinces[idx].towns[tIdx].name = savedT.name;",
        ))
}
