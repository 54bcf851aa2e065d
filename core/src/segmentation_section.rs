//! Risk segmentation (page 2B) — geography, credit score, loan age and
//! origination vintage.

use crate::{
    buckets::age_group,
    error::PulseResult,
    metrics::{pct_of, round0, round1, Kpi},
    performance_section::region_risk,
    rng::{StreamRng, StreamSlot},
    section::{ReportSection, SectionContext},
};
use chrono::Datelike;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{BTreeMap, BTreeSet};

const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoDelinquency {
    pub region: String,
    pub delinquency_rate: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScoreDelinquencyPoint {
    pub score: f64,
    pub delinquency: i64,
    /// Loan amount in thousands.
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeRisk {
    pub name: String,
    pub risk_rate: f64,
}

/// One heatmap row: `{"year": "2023", "Jan": 12.5, "Mar": 9.1, ...}`.
/// Months appear in calendar order; months with no originations are absent.
#[derive(Debug, Clone, PartialEq)]
pub struct VintageRow {
    pub year: String,
    pub months: Vec<(&'static str, f64)>,
}

impl Serialize for VintageRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.months.len() + 1))?;
        map.serialize_entry("year", &self.year)?;
        for (month, rate) in &self.months {
            map.serialize_entry(month, rate)?;
        }
        map.end()
    }
}

/// Share of a region's loans in each risk segment: `{"region": "North", "High Risk": 21, ...}`.
/// Every row has the same segment keys.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentMix {
    pub region: String,
    pub shares: BTreeMap<String, f64>,
}

impl Serialize for SegmentMix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.shares.len() + 1))?;
        map.serialize_entry("region", &self.region)?;
        for (segment, share) in &self.shares {
            map.serialize_entry(segment, share)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationReport {
    pub kpis: Vec<Kpi>,
    pub geo_delinquency: Vec<GeoDelinquency>,
    pub score_vs_delinquency: Vec<ScoreDelinquencyPoint>,
    pub loan_age_vs_risk: Vec<AgeRisk>,
    pub vintage_heatmap: Vec<VintageRow>,
    pub segment_contribution: Vec<SegmentMix>,
}

pub struct SegmentationSection;

impl ReportSection for SegmentationSection {
    type Output = SegmentationReport;

    fn name(&self) -> &'static str {
        "segmentation"
    }

    fn slot(&self) -> StreamSlot {
        StreamSlot::Segmentation
    }

    fn compute(&self, ctx: &SectionContext<'_>, _rng: &mut StreamRng) -> PulseResult<SegmentationReport> {
        let loans = &ctx.portfolio.loans;

        let geo_delinquency: Vec<GeoDelinquency> = region_risk(loans)
            .into_iter()
            .map(|(region, r)| GeoDelinquency {
                delinquency_rate: r.risk_rate(),
                region,
            })
            .collect();

        // First region wins ties so the choice is stable across runs.
        let highest_risk_region = geo_delinquency
            .iter()
            .fold(None::<&GeoDelinquency>, |best, g| match best {
                Some(b) if b.delinquency_rate >= g.delinquency_rate => Some(b),
                _ => Some(g),
            })
            .map_or_else(|| "n/a".to_string(), |g| g.region.clone());

        let score_vs_delinquency = loans
            .iter()
            .step_by(ctx.config.scatter_sample_stride)
            .map(|l| ScoreDelinquencyPoint {
                score: l.credit_score.unwrap_or(0.0),
                delinquency: l.days_past_due(),
                amount: l.amount() / 1000.0,
            })
            .collect();

        let mut ages: BTreeMap<i64, (String, usize, usize)> = BTreeMap::new();
        for loan in loans {
            let Some(age) = loan.loan_age_months else { continue };
            let (group, label) = age_group(age);
            let entry = ages.entry(group).or_insert_with(|| (label, 0, 0));
            entry.2 += 1;
            if loan.days_past_due() > 60 {
                entry.1 += 1;
            }
        }
        let loan_age_vs_risk = ages
            .into_values()
            .map(|(name, risky, total)| AgeRisk {
                name,
                risk_rate: round1(pct_of(risky, total)),
            })
            .collect();

        let mut vintages: BTreeMap<i32, [(usize, usize); 12]> = BTreeMap::new();
        for loan in loans {
            let Some(date) = loan.origination_date else { continue };
            let cell = &mut vintages.entry(date.year()).or_insert([(0, 0); 12])[date.month0() as usize];
            cell.1 += 1;
            if loan.days_past_due() > 30 {
                cell.0 += 1;
            }
        }
        let vintage_heatmap = vintages
            .into_iter()
            .map(|(year, cells)| VintageRow {
                year: year.to_string(),
                months: MONTH_ABBREV
                    .iter()
                    .zip(cells)
                    .filter(|(_, (_, total))| *total > 0)
                    .map(|(m, (late, total))| (*m, round1(pct_of(late, total))))
                    .collect(),
            })
            .collect();

        let segments: BTreeSet<&str> = loans.iter().map(|l| l.risk_segment.as_str()).collect();
        let mut mix: BTreeMap<&str, BTreeMap<&str, usize>> = BTreeMap::new();
        for loan in loans {
            *mix.entry(loan.region.as_str())
                .or_default()
                .entry(loan.risk_segment.as_str())
                .or_default() += 1;
        }
        let segment_contribution = mix
            .into_iter()
            .map(|(region, counts)| {
                let total: usize = counts.values().sum();
                SegmentMix {
                    region: region.to_string(),
                    shares: segments
                        .iter()
                        .map(|seg| {
                            let n = counts.get(seg).copied().unwrap_or(0);
                            (seg.to_string(), round0(pct_of(n, total)))
                        })
                        .collect(),
                }
            })
            .collect();

        let kpis = vec![
            Kpi::new("Weighted Risk Score", "72/100", "+2", Some(false)),
            Kpi::new("Geo Variance", "14%", "Stable", None),
            Kpi::new("Highest Risk Region", highest_risk_region, "+1.2%", Some(false)),
            Kpi::new("Vintage Default", "2.4%", "-0.3%", Some(true)),
            Kpi::new("Net Credit Margin", "3.8%", "+0.1%", Some(true)),
            Kpi::new("Risk Concentration", "18%", "+0.5%", Some(false)),
            Kpi::new("Outreach Targets", "450", "+42", Some(false)),
        ];

        Ok(SegmentationReport {
            kpis,
            geo_delinquency,
            score_vs_delinquency,
            loan_age_vs_risk,
            vintage_heatmap,
            segment_contribution,
        })
    }
}
