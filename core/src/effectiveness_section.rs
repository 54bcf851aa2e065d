//! Assistance effectiveness (page 3B) — cure and re-default outcomes per
//! assistance program.
//!
//! With the assistance history loaded, program rates, repeat-assistance
//! frequency and the two headline outcome KPIs come from the data.
//! Without it the section falls back to the reference figures.

use crate::{
    assistance::AssistanceSummary,
    chart::{ProgramRate, ScatterPoint, StageCount},
    error::PulseResult,
    metrics::{fixed, pct_of, round0, Kpi},
    rng::{StreamRng, StreamSlot},
    section::{ReportSection, SectionContext},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyCount {
    pub frequency: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramSegmentScore {
    pub program: String,
    pub segment: String,
    pub score: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectivenessReport {
    pub kpis: Vec<Kpi>,
    pub cure_rate_by_program: Vec<ProgramRate>,
    pub re_default_rate_by_program: Vec<ProgramRate>,
    pub outcome_funnel: Vec<StageCount>,
    pub risk_vs_outcome: Vec<ScatterPoint>,
    pub assistance_frequency: Vec<FrequencyCount>,
    pub performance_heatmap: Vec<ProgramSegmentScore>,
}

pub struct EffectivenessSection;

/// KPIs, cure rates, re-default rates, assistance frequency.
type Outcomes = (Vec<Kpi>, Vec<ProgramRate>, Vec<ProgramRate>, Vec<FrequencyCount>);

impl EffectivenessSection {
    fn kpis(overall_cure: &str, overall_redefault: &str) -> Vec<Kpi> {
        vec![
            Kpi::new("Overall Cure Rate", overall_cure, "+4.2%", Some(true)),
            Kpi::new("Overall Re-default", overall_redefault, "-1.5%", Some(true)),
            Kpi::new("Avg Cure Time", "45 Days", "-2 Days", Some(true)),
            Kpi::new("Program ROI", "8.4x", "+0.2x", Some(true)),
            Kpi::new("Self-Cure Rate", "18%", "-2.1%", Some(false)),
            Kpi::new("Success Variance", "5.2%", "Stable", None),
            Kpi::new("Efficiency Score", "94/100", "+2", Some(true)),
        ]
    }

    fn frequency(first: u64, second: u64, repeat: u64) -> Vec<FrequencyCount> {
        [("1st Time", first), ("2nd Time", second), ("3+ Times", repeat)]
            .into_iter()
            .map(|(frequency, count)| FrequencyCount {
                frequency: frequency.into(),
                count,
            })
            .collect()
    }

    fn measured(summary: &AssistanceSummary) -> Outcomes {
        let kpis = Self::kpis(
            &format!("{}%", fixed(pct_of(summary.cured, summary.total), 1)),
            &format!("{}%", fixed(pct_of(summary.redefaulted, summary.total), 1)),
        );
        let cure = summary
            .programs
            .iter()
            .map(|p| ProgramRate::new(&p.name, round0(pct_of(p.cured, p.records))))
            .collect();
        let redefault = summary
            .programs
            .iter()
            .map(|p| ProgramRate::new(&p.name, round0(pct_of(p.redefaulted, p.records))))
            .collect();
        let frequency = Self::frequency(
            summary.first_time as u64,
            summary.second_time as u64,
            summary.repeat as u64,
        );
        (kpis, cure, redefault, frequency)
    }

    fn reference() -> Outcomes {
        let rates = |values: [f64; 4]| {
            ["Mod", "Forbearance", "Deferral", "Short Sale"]
                .into_iter()
                .zip(values)
                .map(|(program, rate)| ProgramRate::new(program, rate))
                .collect::<Vec<_>>()
        };
        (
            Self::kpis("68%", "12.4%"),
            rates([72.0, 58.0, 84.0, 42.0]),
            rates([8.0, 15.0, 6.0, 22.0]),
            Self::frequency(820, 240, 85),
        )
    }
}

impl ReportSection for EffectivenessSection {
    type Output = EffectivenessReport;

    fn name(&self) -> &'static str {
        "effectiveness"
    }

    fn slot(&self) -> StreamSlot {
        StreamSlot::Effectiveness
    }

    fn compute(&self, ctx: &SectionContext<'_>, _rng: &mut StreamRng) -> PulseResult<EffectivenessReport> {
        let (kpis, cure_rate_by_program, re_default_rate_by_program, assistance_frequency) =
            match ctx.assistance {
                Some(summary) => {
                    log::debug!(
                        "effectiveness: {} assistance records over {} programs",
                        summary.total,
                        summary.programs.len()
                    );
                    Self::measured(summary)
                }
                None => Self::reference(),
            };

        Ok(EffectivenessReport {
            kpis,
            cure_rate_by_program,
            re_default_rate_by_program,
            outcome_funnel: vec![
                StageCount::new("Approved", 1000),
                StageCount::new("Trial Start", 850),
                StageCount::new("Trial Success", 720),
                StageCount::new("Permanent Mod", 680),
            ],
            risk_vs_outcome: [
                (10.0, 90.0, "Low Risk"),
                (30.0, 75.0, "Med-Low"),
                (50.0, 60.0, "Medium"),
                (70.0, 45.0, "Med-High"),
                (90.0, 25.0, "High Risk"),
            ]
            .into_iter()
            .map(|(x, y, name)| ScatterPoint { x, y, name: name.into() })
            .collect(),
            assistance_frequency,
            performance_heatmap: [
                ("Mod", "Low LTV", 92),
                ("Mod", "High LTV", 78),
                ("Deferral", "Low LTV", 88),
                ("Deferral", "High LTV", 82),
                ("Forbearance", "Low LTV", 75),
                ("Forbearance", "High LTV", 62),
            ]
            .into_iter()
            .map(|(program, segment, score)| ProgramSegmentScore {
                program: program.into(),
                segment: segment.into(),
                score,
            })
            .collect(),
        })
    }
}
