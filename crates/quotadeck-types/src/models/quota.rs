//! Quota data models and severity tiers.

use serde::{Deserialize, Serialize};

/// Lower bound (inclusive) of the healthy tier.
pub const HEALTHY_THRESHOLD: f64 = 50.0;
/// Lower bound (inclusive) of the warning tier.
pub const WARNING_THRESHOLD: f64 = 20.0;

/// Coarse severity of a remaining-quota percentage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum QuotaTier {
    /// 50% or more remaining
    Healthy,
    /// At least 20% and below 50%
    Warning,
    /// Below 20%
    Critical,
}

impl QuotaTier {
    /// Classify a percentage. Ties go to the higher tier; values outside
    /// `[0, 100]` are classified as-is and NaN lands in `Critical`.
    pub fn classify(percentage: f64) -> Self {
        if percentage >= HEALTHY_THRESHOLD {
            Self::Healthy
        } else if percentage >= WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Critical
        }
    }

    /// Visual weight, higher is more severe.
    pub const fn weight(self) -> u8 {
        match self {
            Self::Healthy => 0,
            Self::Warning => 1,
            Self::Critical => 2,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for QuotaTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model quota information.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelQuota {
    /// Model name, unique within one snapshot
    pub name: String,
    /// Remaining percentage, nominally 0-100 but stored unvalidated
    pub percentage: f64,
    /// RFC 3339 time when quota resets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_time: Option<String>,
}

impl ModelQuota {
    pub fn new(name: impl Into<String>, percentage: f64, reset_time: Option<String>) -> Self {
        Self { name: name.into(), percentage, reset_time }
    }

    /// Severity tier of this model's remaining quota.
    pub fn tier(&self) -> QuotaTier {
        QuotaTier::classify(self.percentage)
    }

    /// Percentage clamped to `[0, 100]` for progress bars. NaN becomes 0.
    pub fn display_percentage(&self) -> f64 {
        if self.percentage.is_nan() {
            return 0.0;
        }
        self.percentage.clamp(0.0, 100.0)
    }

    /// Reset time, treating an empty string as unknown.
    pub fn reset_time(&self) -> Option<&str> {
        self.reset_time.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Aggregated quota data for an account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct QuotaData {
    /// Per-model quota information, in provider order
    #[serde(default)]
    pub models: Vec<ModelQuota>,
    /// Last time quota was updated
    #[serde(default)]
    pub last_updated: i64,
    /// Whether the account is in forbidden state
    #[serde(default)]
    pub is_forbidden: bool,
    /// Subscription tier (FREE/PRO/ULTRA)
    #[serde(default)]
    pub subscription_tier: Option<String>,
}

impl QuotaData {
    /// Create empty quota data.
    pub fn new() -> Self {
        Self {
            models: Vec::new(),
            last_updated: chrono::Utc::now().timestamp(),
            is_forbidden: false,
            subscription_tier: None,
        }
    }

    /// Add a model quota entry. An existing entry with the same name is
    /// replaced in place so names stay unique.
    pub fn add_model(&mut self, name: String, percentage: f64, reset_time: Option<String>) {
        if let Some(existing) = self.models.iter_mut().find(|m| m.name == name) {
            existing.percentage = percentage;
            existing.reset_time = reset_time;
            return;
        }
        self.models.push(ModelQuota { name, percentage, reset_time });
    }

    /// Get the minimum quota percentage across all models.
    pub fn min_quota(&self) -> Option<f64> {
        self.models.iter().map(|m| m.percentage).reduce(f64::min)
    }

    /// Most severe tier across all models.
    pub fn worst_tier(&self) -> Option<QuotaTier> {
        self.models.iter().map(ModelQuota::tier).max_by_key(|tier| tier.weight())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(QuotaTier::classify(100.0), QuotaTier::Healthy);
        assert_eq!(QuotaTier::classify(50.0), QuotaTier::Healthy);
        assert_eq!(QuotaTier::classify(49.999), QuotaTier::Warning);
        assert_eq!(QuotaTier::classify(20.0), QuotaTier::Warning);
        assert_eq!(QuotaTier::classify(19.999), QuotaTier::Critical);
        assert_eq!(QuotaTier::classify(0.0), QuotaTier::Critical);
    }

    #[test]
    fn test_tier_out_of_range_tolerated() {
        assert_eq!(QuotaTier::classify(150.0), QuotaTier::Healthy);
        assert_eq!(QuotaTier::classify(-5.0), QuotaTier::Critical);
        assert_eq!(QuotaTier::classify(f64::NAN), QuotaTier::Critical);
    }

    #[test]
    fn test_tier_partition_sweep() {
        for i in -200..=1200 {
            let p = f64::from(i) / 10.0;
            let tier = QuotaTier::classify(p);
            assert_eq!(tier == QuotaTier::Healthy, p >= 50.0, "p={p}");
            assert_eq!(tier == QuotaTier::Warning, (20.0..50.0).contains(&p), "p={p}");
            assert_eq!(tier == QuotaTier::Critical, p < 20.0, "p={p}");
        }
    }

    #[test]
    fn test_weight_orders_by_severity() {
        assert!(QuotaTier::Healthy.weight() < QuotaTier::Warning.weight());
        assert!(QuotaTier::Warning.weight() < QuotaTier::Critical.weight());
    }

    #[test]
    fn test_display_percentage_clamps() {
        assert_eq!(ModelQuota::new("a", 130.0, None).display_percentage(), 100.0);
        assert_eq!(ModelQuota::new("a", -3.0, None).display_percentage(), 0.0);
        assert_eq!(ModelQuota::new("a", f64::NAN, None).display_percentage(), 0.0);
        assert_eq!(ModelQuota::new("a", 42.5, None).display_percentage(), 42.5);
    }

    #[test]
    fn test_empty_reset_time_is_unknown() {
        let quota = ModelQuota::new("a", 10.0, Some("  ".to_string()));
        assert_eq!(quota.reset_time(), None);
    }

    #[test]
    fn test_add_model_keeps_names_unique() {
        let mut quota = QuotaData::new();
        quota.add_model("claude-sonnet".to_string(), 50.0, None);
        quota.add_model("gemini-pro".to_string(), 15.0, None);
        quota.add_model("claude-sonnet".to_string(), 35.0, Some("2026-01-01T00:00:00Z".into()));

        assert_eq!(quota.models.len(), 2);
        assert_eq!(quota.models[0].percentage, 35.0);
        assert_eq!(quota.min_quota(), Some(15.0));
        assert_eq!(quota.worst_tier(), Some(QuotaTier::Critical));
    }

    #[test]
    fn test_worst_tier_picks_heaviest() {
        let mut quota = QuotaData::new();
        assert_eq!(quota.worst_tier(), None);

        quota.add_model("fast".to_string(), 90.0, None);
        quota.add_model("mid".to_string(), 30.0, None);
        assert_eq!(quota.worst_tier(), Some(QuotaTier::Warning));

        quota.add_model("fast".to_string(), 5.0, None);
        assert_eq!(quota.worst_tier(), Some(QuotaTier::Critical));
    }
}
