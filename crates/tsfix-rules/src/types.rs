//! Rule set for `types.ts`

use tsfix_core::{Rule, RuleSet};

pub const TARGET: &str = "types.ts";

/// Build the rule set
pub fn rule_set() -> RuleSet {
    RuleSet::new(TARGET).rule(Rule::literal(
        "geo_json_record",
        "Type geoJson as a record instead of any",
        "geoJson: any;",
        "geoJson: Record<string, unknown>;",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_json_record() {
        let source = "export interface World {\n  cells: Cell[];\n  geoJson: any;\n}\n";
        let result = rule_set().transform(source).unwrap();

        assert_eq!(
            result.output,
            "export interface World {\n  cells: Cell[];\n  geoJson: Record<string, unknown>;\n}\n"
        );
        assert_eq!(result.changes.len(), 1);
        assert_eq!(result.changes[0].line, 3);
    }
}
