//! Coaching insights (page 1C) — associate priority matrix and the
//! collection-stage funnel.

use crate::{
    buckets::CollectionStage,
    chart::{BubblePoint, RangeCount, StageCount},
    error::PulseResult,
    metrics::Kpi,
    rng::{StreamRng, StreamSlot},
    section::{ReportSection, SectionContext},
};
use serde::{Deserialize, Serialize};

/// Coaching scorecard for one associate. Scores are 0-100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociateScorecard {
    pub name: String,
    #[serde(rename = "Speed")]
    pub speed: i64,
    #[serde(rename = "Quality")]
    pub quality: i64,
    #[serde(rename = "Consistency")]
    pub consistency: i64,
    #[serde(rename = "Compliance")]
    pub compliance: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeatDelinquency {
    pub category: String,
    #[serde(rename = "Migrated")]
    pub migrated: u64,
    #[serde(rename = "Stable")]
    pub stable: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedAction {
    pub id: u32,
    pub associate: String,
    pub risk: String,
    pub action: String,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachingReport {
    pub kpis: Vec<Kpi>,
    pub risk_heatmap: Vec<AssociateScorecard>,
    pub priority_matrix: Vec<BubblePoint>,
    pub stage_funnel: Vec<StageCount>,
    pub time_to_cure_dist: Vec<RangeCount>,
    pub repeat_delinquency: Vec<RepeatDelinquency>,
    pub suggested_actions: Vec<SuggestedAction>,
}

pub struct CoachingSection;

impl ReportSection for CoachingSection {
    type Output = CoachingReport;

    fn name(&self) -> &'static str {
        "coaching"
    }

    fn slot(&self) -> StreamSlot {
        StreamSlot::Coaching
    }

    fn compute(&self, ctx: &SectionContext<'_>, rng: &mut StreamRng) -> PulseResult<CoachingReport> {
        let associates = &ctx.portfolio.associates;

        // No QA scoring feed exists; scorecards come from the section stream
        // within each dimension's usual band.
        let risk_heatmap = associates
            .iter()
            .take(ctx.config.heatmap_associates)
            .map(|a| AssociateScorecard {
                name: a.associate_name.clone(),
                speed: rng.next_in_range(60, 100),
                quality: rng.next_in_range(70, 100),
                consistency: rng.next_in_range(50, 90),
                compliance: rng.next_in_range(90, 100),
            })
            .collect();

        let priority_matrix = ctx
            .index
            .all_stats(associates)
            .into_iter()
            .map(|(a, stats)| {
                BubblePoint::new(
                    stats.delinquency_rate,
                    stats.cure_rate,
                    stats.workload as f64,
                    &a.associate_name,
                )
            })
            .collect();

        let mut stage_counts = [0u64; 5];
        for account in &ctx.portfolio.accounts {
            if let Some(stage) = CollectionStage::classify(account.days_delinquent) {
                stage_counts[stage as usize] += 1;
            }
        }
        let stage_funnel = CollectionStage::ALL
            .iter()
            .map(|s| StageCount::new(s.label(), stage_counts[*s as usize]))
            .collect();

        Ok(CoachingReport {
            kpis: reference_kpis(),
            risk_heatmap,
            priority_matrix,
            stage_funnel,
            time_to_cure_dist: vec![
                RangeCount::new("0-15d", 420),
                RangeCount::new("16-30d", 850),
                RangeCount::new("31-45d", 1240),
                RangeCount::new("46-60d", 620),
                RangeCount::new("60d+", 310),
            ],
            repeat_delinquency: [("1st Time", 450, 820), ("2nd Time", 310, 240), ("3+ Times", 180, 95)]
                .into_iter()
                .map(|(category, migrated, stable)| RepeatDelinquency {
                    category: category.into(),
                    migrated,
                    stable,
                })
                .collect(),
            suggested_actions: reference_actions(),
        })
    }
}

fn reference_kpis() -> Vec<Kpi> {
    vec![
        Kpi::new("Early -> 90+ Conv.", "14.2%", "-2.1%", Some(true)),
        Kpi::new("Avg Time-to-Cure", "42 Days", "-3 Days", Some(true)),
        Kpi::new("Coaching Pipeline", "14", "+2", Some(false)),
        Kpi::new("Team Quality Score", "88/100", "+4", Some(true)),
        Kpi::new("Escalation Speed", "4.2h", "-0.5h", Some(true)),
        Kpi::new("Resolution Rate", "92%", "+1.5%", Some(true)),
        Kpi::new("Compliance Score", "98%", "Stable", None),
        Kpi::new("Training Impact", "+12%", "Positive", Some(true)),
    ]
}

fn reference_actions() -> Vec<SuggestedAction> {
    [
        ("Associate 04", "Critical", "Schedule 1-on-1 for Workload Stress", "+15% Cure Rate"),
        ("Associate 12", "Warning", "Assign \"Warm Handoff\" Training", "-10% Migration Churn"),
        ("Associate 07", "High", "Re-allocate 50 accounts to South Team", "Burnout Mitigation"),
        ("Associate 15", "Stable", "Approve for Advanced Compliance Lead", "Team Quality Boost"),
    ]
    .into_iter()
    .zip(1..)
    .map(|((associate, risk, action, impact), id)| SuggestedAction {
        id,
        associate: associate.into(),
        risk: risk.into(),
        action: action.into(),
        impact: impact.into(),
    })
    .collect()
}
