//! Rule set for `components/Controls.tsx`
//!
//! - Change handlers taking `value: any` become generic over the parameter key
//! - Single-expression event handlers get block bodies
//! - Remaining `value: any` callbacks get an explicit-any suppression
//! - `icon: any` props are typed as `React.ElementType`

use tsfix_core::{Rule, RuleSet};

use crate::common::{suppress_explicit_any, void_event_handler};

pub const TARGET: &str = "components/Controls.tsx";

/// Build the rule set
pub fn rule_set() -> RuleSet {
    RuleSet::new(TARGET)
        .rule(
            Rule::pattern(
                "generic_change_handler",
                "Make change handlers generic over the WorldParams key",
                r"(handle\w*Change) = \(key: keyof WorldParams, value: any\) => \{",
                "${1} = <K extends keyof WorldParams>(key: K, value: WorldParams[K]) => {",
            )
            .scope("arrow function assigned to a `handle...Change` binding"),
        )
        .rule(void_event_handler("e|"))
        // Runs after the generic rewrite so only untyped callbacks are left.
        .rule(suppress_explicit_any("suppress_any_value_param", "value: any) => {"))
        .rule(Rule::literal(
            "icon_element_type",
            "Type icon props as React.ElementType",
            "icon: any,",
            "icon: React.ElementType,",
        ))
}
