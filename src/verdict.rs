use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    LikelyPhishing,
    AppearsSafe,
}

impl Verdict {
    pub fn classify(score: f64, threshold: f64) -> Self {
        if score >= threshold {
            Verdict::LikelyPhishing
        } else {
            Verdict::AppearsSafe
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Verdict::LikelyPhishing => "This email is likely a phishing attempt!",
            Verdict::AppearsSafe => "This email appears to be safe, but not guaranteed.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_THRESHOLD;

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(Verdict::classify(6.0, DEFAULT_THRESHOLD), Verdict::LikelyPhishing);
        assert_eq!(Verdict::classify(15.0, DEFAULT_THRESHOLD), Verdict::LikelyPhishing);
        assert_eq!(Verdict::classify(5.5, DEFAULT_THRESHOLD), Verdict::AppearsSafe);
        assert_eq!(Verdict::classify(0.0, DEFAULT_THRESHOLD), Verdict::AppearsSafe);
    }
}
