//! Assistance strategy (page 3C) — policy simulation panels.

use crate::{
    chart::{BubblePoint, FlowLink},
    error::PulseResult,
    metrics::{fixed, pct_of, Kpi},
    rng::{StreamRng, StreamSlot},
    section::{ReportSection, SectionContext},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageOutcome {
    pub month: String,
    pub usage: u64,
    pub outcome: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressScenario {
    pub scenario: String,
    pub coverage: u64,
    pub impact: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramRoi {
    pub program: String,
    pub cost: u64,
    #[serde(rename = "return")]
    pub returns: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecommendation {
    pub id: u32,
    pub policy: String,
    pub impact: String,
    pub feasibility: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyReport {
    pub kpis: Vec<Kpi>,
    pub usage_outcome_trend: Vec<UsageOutcome>,
    pub stress_test_data: Vec<StressScenario>,
    pub customer_flow: Vec<FlowLink>,
    pub policy_matrix: Vec<BubblePoint>,
    pub roi_analysis: Vec<ProgramRoi>,
    pub recommendations: Vec<PolicyRecommendation>,
}

pub struct StrategySection;

impl ReportSection for StrategySection {
    type Output = StrategyReport;

    fn name(&self) -> &'static str {
        "strategy"
    }

    fn slot(&self) -> StreamSlot {
        StreamSlot::Strategy
    }

    fn compute(&self, ctx: &SectionContext<'_>, _rng: &mut StreamRng) -> PulseResult<StrategyReport> {
        let adherence = ctx
            .assistance
            .and_then(|s| s.adherent.map(|n| format!("{}%", fixed(pct_of(n, s.total), 1))))
            .unwrap_or_else(|| "96%".to_string());

        Ok(StrategyReport {
            kpis: vec![
                Kpi::new("Strategy Effectiveness", "84%", "+4.5%", Some(true)),
                Kpi::new("Opt-in Rate", "62%", "+1.5%", Some(true)),
                Kpi::new("Simulation Stability", "High", "Stable", None),
                Kpi::new("Proj. Recovery", "$12.8M", "+$1.4M", Some(true)),
                Kpi::new("Policy Adherence", adherence, "+0.5%", Some(true)),
                Kpi::new("Net Strategy ROI", "5.2x", "+0.4x", Some(true)),
                Kpi::new("Warning Sign Count", "12", "-2", Some(true)),
            ],
            usage_outcome_trend: [
                ("Jul", 45, 38),
                ("Aug", 52, 42),
                ("Sep", 48, 45),
                ("Oct", 61, 54),
                ("Nov", 55, 50),
                ("Dec", 72, 68),
            ]
            .into_iter()
            .map(|(month, usage, outcome)| UsageOutcome {
                month: month.into(),
                usage,
                outcome,
            })
            .collect(),
            stress_test_data: [
                ("Baseline", 85, 12),
                ("Stress 1", 70, 25),
                ("Stress 2", 55, 42),
                ("Aggressive", 95, 8),
            ]
            .into_iter()
            .map(|(scenario, coverage, impact)| StressScenario {
                scenario: scenario.into(),
                coverage,
                impact,
            })
            .collect(),
            customer_flow: vec![
                FlowLink::new("Identification", "Outreach", 1200.0),
                FlowLink::new("Outreach", "Application", 850.0),
                FlowLink::new("Application", "Approval", 620.0),
                FlowLink::new("Approval", "Trial Success", 580.0),
            ],
            policy_matrix: vec![
                BubblePoint::new(20.0, 80.0, 400.0, "Standard Mod"),
                BubblePoint::new(40.0, 70.0, 250.0, "Forbearance A"),
                BubblePoint::new(60.0, 40.0, 120.0, "Short Sale Beta"),
                BubblePoint::new(10.0, 90.0, 300.0, "Deferral Ext"),
                BubblePoint::new(80.0, 20.0, 80.0, "Risk High B"),
            ],
            roi_analysis: [
                ("Loan Mod", 1200, 8500),
                ("Forbearance", 800, 4200),
                ("Deferral", 500, 4800),
                ("Short Sale", 2500, 3100),
            ]
            .into_iter()
            .map(|(program, cost, returns)| ProgramRoi {
                program: program.into(),
                cost,
                returns,
            })
            .collect(),
            recommendations: [
                ("Extended Deferral", "High", "92%", "Deploy to West Region"),
                ("Interest Rate Cap", "Medium", "85%", "A/B Test in North"),
                ("Auto-Forbearance", "Critical", "60%", "Review Compliance"),
                ("Handoff Acceleration", "High", "95%", "Update Workflow"),
            ]
            .into_iter()
            .zip(1..)
            .map(|((policy, impact, feasibility, action), id)| PolicyRecommendation {
                id,
                policy: policy.into(),
                impact: impact.into(),
                feasibility: feasibility.into(),
                action: action.into(),
            })
            .collect(),
        })
    }
}
