pub mod analyzer;
pub mod config;
pub mod input;
pub mod report;
pub mod rules;
pub mod url_extractor;
pub mod verdict;

pub use analyzer::{analyse, AnalysisResult, Finding, FindingKind, PhishingAnalyzer};
pub use config::Config;
pub use input::InputError;
pub use report::{OutputFormat, Report};
pub use rules::{RiskLevel, RuleSet};
pub use url_extractor::{domain_of, extract_urls};
pub use verdict::Verdict;
