//! Risk forecasting (page 2C) — short projection of the monthly
//! delinquency trend plus the forward-looking reference panels.

use crate::{
    chart::FlowLink,
    error::PulseResult,
    metrics::{round1, Kpi},
    performance_section::TrendPoint,
    rng::{StreamRng, StreamSlot},
    section::{ReportSection, SectionContext},
    types::MonthKey,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointKind {
    Historical,
    Projected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub month: MonthKey,
    pub rate: f64,
    #[serde(rename = "type")]
    pub kind: PointKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarningSignal {
    pub signal: String,
    pub count: u64,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub stage: String,
    pub value: u64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBucket {
    pub bucket: String,
    pub count: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionInsight {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastingReport {
    pub kpis: Vec<Kpi>,
    pub delinquency_forecast: Vec<ForecastPoint>,
    pub transition_matrix: Vec<FlowLink>,
    pub early_warning_signals: Vec<WarningSignal>,
    pub risk_funnel_data: Vec<FunnelStage>,
    pub risk_score_buckets: Vec<ScoreBucket>,
    pub decision_insights: Vec<DecisionInsight>,
}

/// The month after `YYYY-MM`. Returns None for malformed keys.
pub fn next_month(key: &str) -> Option<MonthKey> {
    let (y, m) = key.split_once('-')?;
    let (y, m): (i32, u32) = (y.parse().ok()?, m.parse().ok()?);
    if !(1..=12).contains(&m) {
        return None;
    }
    let (y, m) = if m == 12 { (y + 1, 1) } else { (y, m + 1) };
    Some(format!("{y:04}-{m:02}"))
}

/// Historical points followed by one projected point per offset.
pub fn project_trend(trend: &[TrendPoint], offsets: &[f64]) -> Vec<ForecastPoint> {
    let mut out: Vec<ForecastPoint> = trend
        .iter()
        .map(|p| ForecastPoint {
            month: p.month.clone(),
            rate: p.rate,
            kind: PointKind::Historical,
        })
        .collect();

    let Some(last) = trend.last() else {
        return out;
    };
    let mut month = last.month.clone();
    for offset in offsets {
        let Some(next) = next_month(&month) else { break };
        out.push(ForecastPoint {
            month: next.clone(),
            rate: round1(last.rate + offset),
            kind: PointKind::Projected,
        });
        month = next;
    }
    out
}

/// Reads the performance section's trend, so the engine builds it after
/// performance has run.
pub struct ForecastingSection {
    pub trend: Vec<TrendPoint>,
}

impl ReportSection for ForecastingSection {
    type Output = ForecastingReport;

    fn name(&self) -> &'static str {
        "forecasting"
    }

    fn slot(&self) -> StreamSlot {
        StreamSlot::Forecasting
    }

    fn compute(&self, ctx: &SectionContext<'_>, _rng: &mut StreamRng) -> PulseResult<ForecastingReport> {
        let delinquency_forecast = project_trend(&self.trend, &ctx.config.forecast_offsets);
        log::debug!(
            "forecasting: {} historical + {} projected points",
            self.trend.len(),
            delinquency_forecast.len() - self.trend.len()
        );

        Ok(ForecastingReport {
            kpis: vec![
                Kpi::new("Proj. Delinquency", "8.2%", "+0.4%", Some(false)),
                Kpi::new("Early Warnings", "482", "+12", Some(false)),
                Kpi::new("Transition Rate", "4.5%", "+0.2%", Some(false)),
                Kpi::new("ECL Provision", "$12.4M", "+$1.2M", Some(false)),
                Kpi::new("Risk Velocity", "High", "Increasing", Some(false)),
                Kpi::new("Expected Cures", "142", "-8", Some(false)),
                Kpi::new("Reserve Adequacy", "112%", "Stable", Some(true)),
            ],
            delinquency_forecast,
            transition_matrix: vec![
                FlowLink::new("Current", "Current", 94.2),
                FlowLink::new("Current", "30-60", 4.5),
                FlowLink::new("Current", "60-90", 0.8),
                FlowLink::new("Current", "90+", 0.5),
                FlowLink::new("30-60", "Current", 42.1),
                FlowLink::new("30-60", "30-60", 38.5),
                FlowLink::new("30-60", "60-90", 15.4),
                FlowLink::new("30-60", "90+", 4.0),
                FlowLink::new("60-90", "Current", 12.5),
                FlowLink::new("60-90", "60-90", 45.2),
                FlowLink::new("60-90", "90+", 42.3),
            ],
            early_warning_signals: [
                ("Multiple Inquiries", 450, "High"),
                ("Payment Variance", 820, "Medium"),
                ("Limit Utilization", 310, "High"),
                ("Non-Loan Miss", 180, "Critical"),
                ("Employment Update", 65, "Low"),
            ]
            .into_iter()
            .map(|(signal, count, impact)| WarningSignal {
                signal: signal.into(),
                count,
                impact: impact.into(),
            })
            .collect(),
            risk_funnel_data: [
                ("High Risk Filter", 12500, "Portfolio Filter"),
                ("Early Warning", 4200, "Behavioral Alert"),
                ("Pre-Delinquent", 1800, "1-15 Day Past Due"),
                ("Serious Risk", 650, "30+ Day Transition"),
            ]
            .into_iter()
            .map(|(stage, value, label)| FunnelStage {
                stage: stage.into(),
                value,
                label: label.into(),
            })
            .collect(),
            risk_score_buckets: [
                ("0-20", 85, "Very Low"),
                ("21-40", 1420, "Low"),
                ("41-60", 3200, "Medium"),
                ("61-80", 1850, "High"),
                ("81-100", 420, "Critical"),
            ]
            .into_iter()
            .map(|(bucket, count, name)| ScoreBucket {
                bucket: bucket.into(),
                count,
                name: name.into(),
            })
            .collect(),
            decision_insights: [
                ("critical", "Liquidity risk spike detected in West region segments.", "High"),
                ("warning", "Early stage delinquency rising in credit scores < 620.", "Medium"),
                ("info", "Forecasted recovery rates improved by 2.4% for Q1.", "Low"),
            ]
            .into_iter()
            .zip(1..)
            .map(|((kind, message, impact), id)| DecisionInsight {
                id,
                kind: kind.into(),
                message: message.into(),
                impact: impact.into(),
            })
            .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_month_rolls_year() {
        assert_eq!(next_month("2025-11").as_deref(), Some("2025-12"));
        assert_eq!(next_month("2025-12").as_deref(), Some("2026-01"));
        assert_eq!(next_month("garbage"), None);
    }

    #[test]
    fn projection_follows_last_point() {
        let trend = vec![
            TrendPoint { month: "2025-11".into(), rate: 10.0 },
            TrendPoint { month: "2025-12".into(), rate: 12.4 },
        ];
        let points = project_trend(&trend, &[0.2, 0.5, 0.3]);
        assert_eq!(points.len(), 5);
        assert_eq!(points[2].month, "2026-01");
        assert_eq!(points[2].rate, 12.6);
        assert_eq!(points[3].rate, 12.9);
        assert_eq!(points[4].month, "2026-03");
        assert!(points[2..].iter().all(|p| p.kind == PointKind::Projected));
    }

    #[test]
    fn empty_trend_has_no_projection() {
        assert!(project_trend(&[], &[0.2]).is_empty());
    }
}
