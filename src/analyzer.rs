//! Heuristic phishing scorer.
//!
//! The analyzer walks the rule table in a fixed order (keywords by level,
//! combinations, per-link domain checks, link volume) and records one
//! [`Finding`] per rule that fires. The score is the sum of the finding
//! deltas, so it never goes below zero for a validated [`RuleSet`].

use crate::rules::{RiskLevel, RuleSet};
use crate::url_extractor::{ExtractedUrl, UrlExtractor};
use serde::Serialize;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    Keyword(RiskLevel),
    Combination,
    NumericDomain,
    LongDomain,
    LinkVolume,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub delta: f64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    score: f64,
    findings: Vec<Finding>,
}

impl AnalysisResult {
    fn from_findings(findings: Vec<Finding>) -> Self {
        let score = findings.iter().fold(0.0, |acc, f| acc + f.delta);
        Self { score, findings }
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// Reasons in evaluation order.
    pub fn reasons(&self) -> Vec<&str> {
        self.findings.iter().map(|f| f.reason.as_str()).collect()
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

pub struct PhishingAnalyzer {
    rules: RuleSet,
    url_extractor: UrlExtractor,
}

impl Default for PhishingAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl PhishingAnalyzer {
    pub fn new() -> Self {
        Self::with_rules(RuleSet::default())
    }

    /// Build an analyzer over `rules`. Terms are lowercased here; callers
    /// loading tables from disk should run [`RuleSet::validate`] first.
    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            rules: rules.normalized(),
            url_extractor: UrlExtractor::new(),
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn analyse(&self, text: &str) -> AnalysisResult {
        let text_lower = text.to_lowercase();
        let mut findings = Vec::new();

        self.check_keywords(&text_lower, &mut findings);
        self.check_combinations(&text_lower, &mut findings);

        // Links come from the original text, not the lowercased copy
        let links = self.url_extractor.extract(text);
        self.check_domains(&links, &mut findings);
        self.check_link_volume(links.len(), &mut findings);

        let result = AnalysisResult::from_findings(findings);
        log::debug!(
            "Analysis complete: score {} from {} rule(s), {} link(s)",
            result.score(),
            result.findings().len(),
            links.len()
        );
        result
    }

    fn check_keywords(&self, text_lower: &str, findings: &mut Vec<Finding>) {
        for rule in &self.rules.keywords {
            for keyword in &rule.keywords {
                if text_lower.contains(keyword.as_str()) {
                    push(
                        findings,
                        FindingKind::Keyword(rule.level),
                        rule.weight,
                        rule.reason(keyword),
                    );
                }
            }
        }
    }

    fn check_combinations(&self, text_lower: &str, findings: &mut Vec<Finding>) {
        for rule in &self.rules.combinations {
            if rule
                .all_of
                .iter()
                .all(|term| text_lower.contains(term.as_str()))
            {
                push(
                    findings,
                    FindingKind::Combination,
                    rule.weight,
                    rule.reason.clone(),
                );
            }
        }
    }

    fn check_domains(&self, links: &[ExtractedUrl], findings: &mut Vec<Finding>) {
        let domain_rules = &self.rules.domain;

        for link in links {
            let domain = link.domain.as_str();

            if domain.chars().any(char::is_numeric) {
                push(
                    findings,
                    FindingKind::NumericDomain,
                    domain_rules.digit_weight,
                    format!("Suspicious domain with numbers: {}", domain),
                );
            }

            if domain.chars().count() > domain_rules.max_length {
                push(
                    findings,
                    FindingKind::LongDomain,
                    domain_rules.long_weight,
                    format!("Unusually long domain name: {}", domain),
                );
            }
        }
    }

    fn check_link_volume(&self, link_count: usize, findings: &mut Vec<Finding>) {
        let rule = &self.rules.link_volume;
        if link_count > rule.max_links {
            push(
                findings,
                FindingKind::LinkVolume,
                rule.weight,
                "Email contains many links".to_string(),
            );
        }
    }
}

fn push(findings: &mut Vec<Finding>, kind: FindingKind, delta: f64, reason: String) {
    log::debug!("Rule fired (+{}): {}", delta, reason);
    findings.push(Finding {
        kind,
        delta,
        reason,
    });
}

fn default_analyzer() -> &'static PhishingAnalyzer {
    static ANALYZER: OnceLock<PhishingAnalyzer> = OnceLock::new();
    ANALYZER.get_or_init(PhishingAnalyzer::new)
}

/// Score `text` against the built-in rule table.
pub fn analyse(text: &str) -> AnalysisResult {
    default_analyzer().analyse(text)
}
