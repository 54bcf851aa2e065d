//! Loss mitigation (page 3A) — workout pipeline and program mix.

use crate::{
    chart::{NamedValue, RangeCount},
    error::PulseResult,
    metrics::{pct_of, round0, Kpi},
    rng::{StreamRng, StreamSlot},
    section::{ReportSection, SectionContext},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestVolume {
    pub month: String,
    pub requests: u64,
    pub completed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageBreakdown {
    pub stage: String,
    pub doc: u64,
    pub review: u64,
    #[serde(rename = "final")]
    pub final_review: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LossMitigationReport {
    pub kpis: Vec<Kpi>,
    pub program_distribution: Vec<NamedValue>,
    pub volume_trend: Vec<RequestVolume>,
    pub status_breakdown: Vec<StageBreakdown>,
    pub duration_distribution: Vec<RangeCount>,
}

pub struct LossMitigationSection;

impl ReportSection for LossMitigationSection {
    type Output = LossMitigationReport;

    fn name(&self) -> &'static str {
        "loss_mitigation"
    }

    fn slot(&self) -> StreamSlot {
        StreamSlot::LossMitigation
    }

    fn compute(&self, ctx: &SectionContext<'_>, _rng: &mut StreamRng) -> PulseResult<LossMitigationReport> {
        let program_distribution = match ctx.assistance {
            Some(summary) => {
                let assigned: usize = summary.programs.iter().map(|p| p.records).sum();
                summary
                    .programs
                    .iter()
                    .map(|p| NamedValue::new(&p.name, round0(pct_of(p.records, assigned))))
                    .collect()
            }
            None => vec![
                NamedValue::new("Loan Mod", 45.0),
                NamedValue::new("Forbearance", 25.0),
                NamedValue::new("Deferral", 20.0),
                NamedValue::new("Short Sale", 10.0),
            ],
        };

        Ok(LossMitigationReport {
            kpis: vec![
                Kpi::new("Pending Requests", "1,284", "+12%", Some(false)),
                Kpi::new("Approved Mods", "3,420", "+5.4%", Some(true)),
                Kpi::new("Denial Rate", "14.2%", "-2.1%", Some(true)),
                Kpi::new("Avg Process Time", "12 Days", "-1 Day", Some(true)),
                Kpi::new("Escalation Rate", "3.8%", "+0.5%", Some(false)),
                Kpi::new("Deferrals Active", "842", "-4.2%", Some(true)),
                Kpi::new("Trial Period Succ.", "92%", "+1.2%", Some(true)),
                Kpi::new("Net Loss Avoided", "$4.2M", "+$240k", Some(true)),
            ],
            program_distribution,
            volume_trend: [
                ("Jul", 420, 380),
                ("Aug", 450, 410),
                ("Sep", 480, 440),
                ("Oct", 520, 490),
                ("Nov", 590, 530),
                ("Dec", 650, 610),
            ]
            .into_iter()
            .map(|(month, requests, completed)| RequestVolume {
                month: month.into(),
                requests,
                completed,
            })
            .collect(),
            status_breakdown: [
                ("Submission", 120, 80, 40),
                ("Processing", 240, 150, 90),
                ("Decisioning", 310, 200, 110),
                ("Fulfillment", 180, 140, 40),
            ]
            .into_iter()
            .map(|(stage, doc, review, final_review)| StageBreakdown {
                stage: stage.into(),
                doc,
                review,
                final_review,
            })
            .collect(),
            duration_distribution: vec![
                RangeCount::new("0-7d", 15),
                RangeCount::new("8-14d", 35),
                RangeCount::new("15-21d", 25),
                RangeCount::new("22-30d", 18),
                RangeCount::new("30d+", 7),
            ],
        })
    }
}
