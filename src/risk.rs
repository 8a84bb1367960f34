use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Positive,
    Caution,
    Critical,
}

impl RiskLevel {
    /// Thresholds are authoritative: the bucket is always derived from the
    /// score, never carried alongside it.
    pub fn classify(score: u8) -> RiskLevel {
        match score {
            0..=39 => RiskLevel::Low,
            40..=69 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }

    pub fn badge_variant(self) -> BadgeVariant {
        match self {
            RiskLevel::Low => BadgeVariant::Positive,
            RiskLevel::Medium => BadgeVariant::Caution,
            RiskLevel::High => BadgeVariant::Critical,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl BadgeVariant {
    pub fn token(self) -> &'static str {
        match self {
            BadgeVariant::Positive => "positive",
            BadgeVariant::Caution => "caution",
            BadgeVariant::Critical => "critical",
        }
    }
}

/// Scores arriving from the feed may sit outside [0, 100]; they are pinned
/// here, at the ingestion boundary, so the classifier stays total.
pub fn clamp_score(raw: i64) -> u8 {
    raw.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_follows_threshold_boundaries() {
        assert_eq!(RiskLevel::classify(0), RiskLevel::Low);
        assert_eq!(RiskLevel::classify(39), RiskLevel::Low);
        assert_eq!(RiskLevel::classify(40), RiskLevel::Medium);
        assert_eq!(RiskLevel::classify(69), RiskLevel::Medium);
        assert_eq!(RiskLevel::classify(70), RiskLevel::High);
        assert_eq!(RiskLevel::classify(100), RiskLevel::High);
    }

    #[test]
    fn every_level_has_a_badge_variant() {
        assert_eq!(RiskLevel::Low.badge_variant(), BadgeVariant::Positive);
        assert_eq!(RiskLevel::Medium.badge_variant(), BadgeVariant::Caution);
        assert_eq!(RiskLevel::High.badge_variant(), BadgeVariant::Critical);
    }

    #[test]
    fn out_of_range_scores_are_clamped() {
        assert_eq!(clamp_score(-20), 0);
        assert_eq!(clamp_score(55), 55);
        assert_eq!(clamp_score(140), 100);
    }
}
