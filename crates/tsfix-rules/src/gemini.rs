//! Rule set for `services/gemini.ts`

use tsfix_core::{Rule, RuleSet};

use crate::common::suppress_object_injection;

pub const TARGET: &str = "services/gemini.ts";

/// Shape of one faction entry in the model's JSON response
const FACTION_JSON_TYPE: &str = "{ id: number, name: string, description: string, capitalName?: string, provinceNames?: string[] }";

/// Build the rule set
pub fn rule_set() -> RuleSet {
    RuleSet::new(TARGET)
        .rule(Rule::literal(
            "lore_level_always_truthy",
            "Drop the fallback for loreLevel, which is always set",
            "const level = world.params.loreLevel || 1;",
            "const level = world.params.loreLevel;",
        ))
        .rule(Rule::literal(
            "faction_json_shape",
            "Type the faction JSON callback parameter",
            "(fJson: any)",
            format!("(fJson: {})", FACTION_JSON_TYPE),
        ))
        .rule(suppress_object_injection(
            "suppress_province_name_lookup",
            "if (fJson.provinceNames[idx]) {",
        ))
        .rule(suppress_object_injection(
            "suppress_province_name_assign",
            "p.name = fJson.provinceNames[idx];",
        ))
}
