//! Delinquency and credit-score bucketing.

/// Loan status used by the status donut and migration comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelinquencyStatus {
    Current,
    Days30To60,
    Days60To90,
    Days90Plus,
}

impl DelinquencyStatus {
    pub const ALL: [DelinquencyStatus; 4] = [
        Self::Current,
        Self::Days30To60,
        Self::Days60To90,
        Self::Days90Plus,
    ];

    /// Bucket a days-past-due count. Unknown or negative counts have no bucket.
    pub fn classify(days: Option<i64>) -> Option<Self> {
        match days? {
            0 => Some(Self::Current),
            1..=60 => Some(Self::Days30To60),
            61..=90 => Some(Self::Days60To90),
            d if d > 90 => Some(Self::Days90Plus),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Current => "Current",
            Self::Days30To60 => "30-60 Days",
            Self::Days60To90 => "60-90 Days",
            Self::Days90Plus => "90+ Days",
        }
    }
}

/// Early-stage collection funnel for delinquent accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionStage {
    Days1To15,
    Days16To30,
    Days31To60,
    Days61To90,
    Days90Plus,
}

impl CollectionStage {
    pub const ALL: [CollectionStage; 5] = [
        Self::Days1To15,
        Self::Days16To30,
        Self::Days31To60,
        Self::Days61To90,
        Self::Days90Plus,
    ];

    /// Current (0 days) and unknown accounts are not in the funnel.
    pub fn classify(days: Option<i64>) -> Option<Self> {
        match days? {
            1..=15 => Some(Self::Days1To15),
            16..=30 => Some(Self::Days16To30),
            31..=60 => Some(Self::Days31To60),
            61..=90 => Some(Self::Days61To90),
            d if d > 90 => Some(Self::Days90Plus),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Days1To15 => "1-15 Days",
            Self::Days16To30 => "16-30 Days",
            Self::Days31To60 => "31-60 Days",
            Self::Days61To90 => "61-90 Days",
            Self::Days90Plus => "90+ Days",
        }
    }
}

pub const SCORE_BUCKET_LABELS: [&str; 7] = [
    "500-550", "550-600", "600-650", "650-700", "700-750", "750-800", "800-850",
];

/// Index into SCORE_BUCKET_LABELS. Scores below 550 land in the first
/// bucket, 800 and above in the last. Missing scores are not bucketed.
pub fn score_bucket(score: Option<f64>) -> Option<usize> {
    let s = score?;
    Some(if s >= 800.0 {
        6
    } else if s >= 550.0 {
        ((s - 500.0) / 50.0).floor() as usize
    } else {
        0
    })
}

/// Twelve-month loan age group label: `27 -> "24-35m"`.
pub fn age_group(age_months: i64) -> (i64, String) {
    let group = age_months.div_euclid(12) * 12;
    (group, format!("{}-{}m", group, group + 11))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_boundaries() {
        assert_eq!(DelinquencyStatus::classify(Some(0)), Some(DelinquencyStatus::Current));
        assert_eq!(DelinquencyStatus::classify(Some(60)), Some(DelinquencyStatus::Days30To60));
        assert_eq!(DelinquencyStatus::classify(Some(61)), Some(DelinquencyStatus::Days60To90));
        assert_eq!(DelinquencyStatus::classify(Some(90)), Some(DelinquencyStatus::Days60To90));
        assert_eq!(DelinquencyStatus::classify(Some(91)), Some(DelinquencyStatus::Days90Plus));
        assert_eq!(DelinquencyStatus::classify(None), None);
    }

    #[test]
    fn stage_excludes_current() {
        assert_eq!(CollectionStage::classify(Some(0)), None);
        assert_eq!(CollectionStage::classify(Some(15)), Some(CollectionStage::Days1To15));
        assert_eq!(CollectionStage::classify(Some(16)), Some(CollectionStage::Days16To30));
        assert_eq!(CollectionStage::classify(Some(120)), Some(CollectionStage::Days90Plus));
    }

    #[test]
    fn score_bucket_edges() {
        assert_eq!(score_bucket(Some(420.0)), Some(0));
        assert_eq!(score_bucket(Some(549.9)), Some(0));
        assert_eq!(score_bucket(Some(550.0)), Some(1));
        assert_eq!(score_bucket(Some(699.0)), Some(3));
        assert_eq!(score_bucket(Some(799.0)), Some(5));
        assert_eq!(score_bucket(Some(849.0)), Some(6));
        assert_eq!(score_bucket(None), None);
    }

    #[test]
    fn age_group_labels() {
        assert_eq!(age_group(0), (0, "0-11m".to_string()));
        assert_eq!(age_group(27), (24, "24-35m".to_string()));
    }
}
