//! Versioned JSON mirror types for rules and explanation trees.
//!
//! Formulas cross the wire as canonical text and are re-parsed on load, so
//! the serialized form stays stable even if the in-memory representation
//! changes. Every rule record carries a format version; loading rejects
//! versions this build does not know.

use serde::{Deserialize, Serialize};

use crate::engine::{Explain, Rule};
use crate::error::{PropLogicError, Result};
use crate::parser::{parse_with_mode, ParseMode};

/// Current rule wire format version.
pub const RULE_FORMAT_VERSION: u32 = 1;

/// Wire form of a [`Rule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleJson {
    pub version: u32,
    pub id: String,
    /// Canonical rendering of the antecedent.
    pub when: String,
    pub then: String,
}

impl RuleJson {
    pub fn from_rule(rule: &Rule) -> Self {
        RuleJson {
            version: RULE_FORMAT_VERSION,
            id: rule.id.clone(),
            when: rule.when.to_string(),
            then: rule.then.clone(),
        }
    }

    pub fn to_rule(&self) -> Result<Rule> {
        if self.version != RULE_FORMAT_VERSION {
            return Err(PropLogicError::UnsupportedRuleVersion {
                found: self.version,
                current: RULE_FORMAT_VERSION,
            });
        }
        if self.id.is_empty() {
            return Err(PropLogicError::InvalidRule {
                id: self.id.clone(),
                reason: "empty rule id".to_string(),
            });
        }
        if self.then.is_empty() {
            return Err(PropLogicError::InvalidRule {
                id: self.id.clone(),
                reason: "empty consequent".to_string(),
            });
        }
        let when =
            parse_with_mode(&self.when, ParseMode::Lenient).map_err(|err| {
                PropLogicError::InvalidRule {
                    id: self.id.clone(),
                    reason: format!("bad antecedent: {}", err),
                }
            })?;
        Ok(Rule::new(&self.id, when, &self.then))
    }
}

/// Convert a rule list to its wire form.
pub fn dump_rules(rules: &[Rule]) -> Vec<RuleJson> {
    rules.iter().map(RuleJson::from_rule).collect()
}

/// Rebuild a rule list from wire form. Fails on the first bad record.
pub fn load_rules(records: &[RuleJson]) -> Result<Vec<Rule>> {
    records.iter().map(RuleJson::to_rule).collect()
}

/// Wire form of an [`Explain`] tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainJson {
    pub expr: String,
    pub value: bool,
    pub why: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<ExplainJson>,
}

impl ExplainJson {
    pub fn from_explain(tree: &Explain) -> Self {
        ExplainJson {
            expr: tree.expr.clone(),
            value: tree.value,
            why: tree.why.clone(),
            children: tree.children.iter().map(Self::from_explain).collect(),
        }
    }

    pub fn to_explain(&self) -> Explain {
        Explain {
            expr: self.expr.clone(),
            value: self.value,
            why: self.why.clone(),
            children: self.children.iter().map(Self::to_explain).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::parser::parse;

    fn rule(id: &str, when: &str, then: &str) -> Rule {
        Rule::new(id, parse(when).unwrap(), then)
    }

    #[test]
    fn test_rule_round_trip() {
        let original = rule("r1", "A & (B | !C)", "D");
        let wire = RuleJson::from_rule(&original);
        assert_eq!(wire.version, RULE_FORMAT_VERSION);
        assert_eq!(wire.when, "(A & (B | !C))");

        let restored = wire.to_rule().unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_rule_json_shape() {
        let wire = RuleJson::from_rule(&rule("r1", "A", "B"));
        let text = serde_json::to_string(&wire).unwrap();
        assert_eq!(
            text,
            r#"{"version":1,"id":"r1","when":"A","then":"B"}"#
        );
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let wire = RuleJson {
            version: RULE_FORMAT_VERSION + 1,
            id: "r1".to_string(),
            when: "A".to_string(),
            then: "B".to_string(),
        };
        let err = wire.to_rule().unwrap_err();
        assert!(matches!(
            err,
            PropLogicError::UnsupportedRuleVersion { found: 2, current: 1 }
        ));
    }

    #[test]
    fn test_invalid_rules_are_rejected() {
        let mut wire = RuleJson::from_rule(&rule("r1", "A", "B"));
        wire.id.clear();
        assert!(matches!(
            wire.to_rule(),
            Err(PropLogicError::InvalidRule { .. })
        ));

        let mut wire = RuleJson::from_rule(&rule("r1", "A", "B"));
        wire.then.clear();
        assert!(wire.to_rule().is_err());

        let mut wire = RuleJson::from_rule(&rule("r1", "A", "B"));
        wire.when = "A &".to_string();
        assert!(matches!(
            wire.to_rule(),
            Err(PropLogicError::InvalidRule { .. })
        ));
    }

    #[test]
    fn test_dump_and_load_rule_lists() {
        let rules = vec![rule("r1", "A & B", "C"), rule("r2", "C", "D")];
        let restored = load_rules(&dump_rules(&rules)).unwrap();
        assert_eq!(restored, rules);

        let mut records = dump_rules(&rules);
        records[1].version = 99;
        assert!(load_rules(&records).is_err());
    }

    #[test]
    fn test_explain_round_trip_omits_empty_children() {
        let mut engine = Engine::new();
        engine.add_rule(rule("r1", "A", "B"));
        engine.assert_fact("A");
        engine.run_to_fixpoint(5);

        let tree = engine.query(&parse("B").unwrap()).explanation.unwrap();
        let wire = ExplainJson::from_explain(&tree);
        let text = serde_json::to_string(&wire).unwrap();

        // Leaves serialize without a children field.
        assert!(text.contains(r#""expr":"fact: A=true""#));
        assert!(!text.contains(r#""children":[]"#));

        let restored: ExplainJson = serde_json::from_str(&text).unwrap();
        assert_eq!(restored.to_explain(), tree);
    }
}
