use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::High => "High",
            RiskLevel::Medium => "Medium",
            RiskLevel::Low => "Low",
        }
    }
}

/// Each keyword that appears in the lowercased text fires once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub level: RiskLevel,
    pub weight: f64,
    pub keywords: Vec<String>,
}

impl KeywordRule {
    pub fn reason(&self, keyword: &str) -> String {
        format!("{} risk keyword: {}", self.level.label(), keyword)
    }
}

/// Fires once when every term is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationRule {
    pub all_of: Vec<String>,
    pub weight: f64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainRules {
    pub digit_weight: f64,
    /// Domains strictly longer than this many characters are flagged.
    pub max_length: usize,
    pub long_weight: f64,
}

impl Default for DomainRules {
    fn default() -> Self {
        Self {
            digit_weight: 3.0,
            max_length: 25,
            long_weight: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkVolumeRule {
    pub max_links: usize,
    pub weight: f64,
}

impl Default for LinkVolumeRule {
    fn default() -> Self {
        Self {
            max_links: 2,
            weight: 2.0,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RuleError {
    #[error("rule '{rule}' has invalid weight {weight}; weights must be finite and non-negative")]
    InvalidWeight { rule: String, weight: f64 },
    #[error("{level:?} keyword list contains an empty keyword")]
    EmptyKeyword { level: RiskLevel },
    #[error("combination rule '{reason}' has no usable terms")]
    EmptyCombination { reason: String },
}

/// The full scoring table, evaluated top to bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub keywords: Vec<KeywordRule>,
    pub combinations: Vec<CombinationRule>,
    pub domain: DomainRules,
    pub link_volume: LinkVolumeRule,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            keywords: vec![
                KeywordRule {
                    level: RiskLevel::High,
                    weight: 2.0,
                    keywords: words(&[
                        "urgent",
                        "immediate",
                        "expired",
                        "expiration",
                        "suspicious",
                    ]),
                },
                KeywordRule {
                    level: RiskLevel::Medium,
                    weight: 1.5,
                    keywords: words(&["verify", "verification"]),
                },
                KeywordRule {
                    level: RiskLevel::Low,
                    weight: 0.5,
                    keywords: words(&[
                        "invoice",
                        "payroll",
                        "payslip",
                        "document",
                        "file",
                        "request",
                        "delivery",
                        "package",
                        "follow up",
                    ]),
                },
            ],
            combinations: vec![
                CombinationRule {
                    all_of: words(&["urgent", "verify"]),
                    weight: 2.0,
                    reason: "urgency + verification combination".to_string(),
                },
                CombinationRule {
                    all_of: words(&["expired", "verify"]),
                    weight: 2.0,
                    reason: "Expired account + verification combination".to_string(),
                },
            ],
            domain: DomainRules::default(),
            link_volume: LinkVolumeRule::default(),
        }
    }
}

fn check_weight(rule: &str, weight: f64) -> Result<(), RuleError> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(RuleError::InvalidWeight {
            rule: rule.to_string(),
            weight,
        })
    }
}

impl RuleSet {
    /// Rejects tables that could produce a negative score or rules that
    /// would match every input.
    pub fn validate(&self) -> Result<(), RuleError> {
        for rule in &self.keywords {
            check_weight(&format!("{} risk keywords", rule.level.label()), rule.weight)?;
            if rule.keywords.iter().any(|k| k.is_empty()) {
                return Err(RuleError::EmptyKeyword { level: rule.level });
            }
        }

        for rule in &self.combinations {
            check_weight(&rule.reason, rule.weight)?;
            if rule.all_of.is_empty() || rule.all_of.iter().any(|t| t.is_empty()) {
                return Err(RuleError::EmptyCombination {
                    reason: rule.reason.clone(),
                });
            }
        }

        check_weight("domain digits", self.domain.digit_weight)?;
        check_weight("long domain", self.domain.long_weight)?;
        check_weight("link volume", self.link_volume.weight)?;
        Ok(())
    }

    /// Copy with every keyword and combination term lowercased, ready for
    /// matching against lowercased text.
    pub fn normalized(&self) -> Self {
        let mut rules = self.clone();
        for rule in &mut rules.keywords {
            for keyword in &mut rule.keywords {
                *keyword = keyword.to_lowercase();
            }
        }
        for rule in &mut rules.combinations {
            for term in &mut rule.all_of {
                *term = term.to_lowercase();
            }
        }
        rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        let rules = RuleSet::default();
        assert!(rules.validate().is_ok());
        assert_eq!(rules.keywords.len(), 3);
        assert_eq!(rules.keywords[2].keywords.len(), 9);
        assert_eq!(rules.combinations.len(), 2);
    }

    #[test]
    fn test_keyword_reason_format() {
        let rules = RuleSet::default();
        assert_eq!(rules.keywords[0].reason("urgent"), "High risk keyword: urgent");
        assert_eq!(rules.keywords[1].reason("verify"), "Medium risk keyword: verify");
        assert_eq!(rules.keywords[2].reason("follow up"), "Low risk keyword: follow up");
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut rules = RuleSet::default();
        rules.link_volume.weight = -1.0;
        assert!(matches!(
            rules.validate(),
            Err(RuleError::InvalidWeight { weight, .. }) if weight == -1.0
        ));
    }

    #[test]
    fn test_nan_weight_rejected() {
        let mut rules = RuleSet::default();
        rules.keywords[0].weight = f64::NAN;
        assert!(matches!(rules.validate(), Err(RuleError::InvalidWeight { .. })));
    }

    #[test]
    fn test_empty_terms_rejected() {
        let mut rules = RuleSet::default();
        rules.keywords[1].keywords.push(String::new());
        assert_eq!(
            rules.validate(),
            Err(RuleError::EmptyKeyword {
                level: RiskLevel::Medium
            })
        );

        let mut rules = RuleSet::default();
        rules.combinations[0].all_of.clear();
        assert!(matches!(
            rules.validate(),
            Err(RuleError::EmptyCombination { .. })
        ));
    }

    #[test]
    fn test_normalized_lowercases_terms() {
        let mut rules = RuleSet::default();
        rules.keywords[0].keywords = vec!["URGENT".to_string()];
        rules.combinations[0].all_of = vec!["Urgent".to_string(), "VERIFY".to_string()];

        let normalized = rules.normalized();
        assert_eq!(normalized.keywords[0].keywords, vec!["urgent"]);
        assert_eq!(normalized.combinations[0].all_of, vec!["urgent", "verify"]);
    }
}
