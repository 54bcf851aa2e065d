//! Loan performance (page 2A) — portfolio value, delinquency by value,
//! monthly delinquency trend, status mix, and regional risk.

use crate::{
    buckets::{score_bucket, DelinquencyStatus, SCORE_BUCKET_LABELS},
    chart::{NamedValue, RangeCount},
    error::PulseResult,
    metrics::{fixed, millions, pct, pct_of, ratio, round1, Kpi},
    records::Loan,
    rng::{StreamRng, StreamSlot},
    section::{ReportSection, SectionContext},
    types::MonthKey,
};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: MonthKey,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionValueRisk {
    pub region: String,
    /// Portfolio value in millions.
    pub value: f64,
    pub risk_rate: f64,
}

/// Per-region loan totals. A loan is "at risk" when it is in the High Risk
/// segment or more than 60 days past due.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionRisk {
    pub value: f64,
    pub at_risk: usize,
    pub total: usize,
}

impl RegionRisk {
    pub fn risk_rate(&self) -> f64 {
        round1(pct_of(self.at_risk, self.total))
    }
}

/// Regions in name order.
pub fn region_risk(loans: &[Loan]) -> BTreeMap<String, RegionRisk> {
    let mut regions: BTreeMap<String, RegionRisk> = BTreeMap::new();
    for loan in loans {
        let entry = regions.entry(loan.region.clone()).or_default();
        entry.value += loan.amount();
        entry.total += 1;
        if loan.is_high_risk() || loan.days_past_due() > 60 {
            entry.at_risk += 1;
        }
    }
    regions
}

/// Monthly delinquency rate by origination month, ascending, keeping the
/// most recent `window` months. Loans without a parseable date are skipped.
pub fn delinquency_trend(loans: &[Loan], window: usize) -> Vec<TrendPoint> {
    let mut months: BTreeMap<MonthKey, (usize, usize)> = BTreeMap::new();
    let mut undated = 0usize;
    for loan in loans {
        let Some(date) = loan.origination_date else {
            undated += 1;
            continue;
        };
        let key = format!("{:04}-{:02}", date.year(), date.month());
        let (delinquent, total) = months.entry(key).or_insert((0, 0));
        *total += 1;
        if loan.is_delinquent() {
            *delinquent += 1;
        }
    }
    if undated > 0 {
        log::warn!("performance: {undated} loans without a valid origination_date left out of the trend");
    }
    let skip = months.len().saturating_sub(window);
    months
        .into_iter()
        .skip(skip)
        .map(|(month, (delinquent, total))| TrendPoint {
            month,
            rate: round1(pct_of(delinquent, total)),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    pub portfolio_value: f64,
    pub avg_loan_size: f64,
    pub avg_credit_score: f64,
    pub delinquency_by_value: f64,
    pub high_risk_exposure: f64,
    pub projected_loss_reserve: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub summary: PerformanceSummary,
    pub kpis: Vec<Kpi>,
    pub delinquency_trend: Vec<TrendPoint>,
    pub status_distribution: Vec<NamedValue>,
    pub value_vs_risk: Vec<RegionValueRisk>,
    pub score_buckets: Vec<RangeCount>,
    pub risk_segments: Vec<NamedValue>,
}

pub struct PerformanceSection;

impl ReportSection for PerformanceSection {
    type Output = PerformanceReport;

    fn name(&self) -> &'static str {
        "performance"
    }

    fn slot(&self) -> StreamSlot {
        StreamSlot::Performance
    }

    fn compute(&self, ctx: &SectionContext<'_>, _rng: &mut StreamRng) -> PulseResult<PerformanceReport> {
        let loans = &ctx.portfolio.loans;
        let count = loans.len() as f64;

        let portfolio_value: f64 = loans.iter().map(Loan::amount).sum();
        let avg_loan_size = ratio(portfolio_value, count);
        let avg_credit_score = ratio(loans.iter().map(|l| l.credit_score.unwrap_or(0.0)).sum(), count);
        let delinquent_value: f64 = loans.iter().filter(|l| l.is_delinquent()).map(Loan::amount).sum();
        let high_risk_value: f64 = loans.iter().filter(|l| l.is_high_risk()).map(Loan::amount).sum();
        let delinquency_by_value = pct(delinquent_value, portfolio_value);
        let high_risk_exposure = pct(high_risk_value, portfolio_value);
        let loss_reserve = portfolio_value * ctx.config.loss_reserve_rate;

        let kpis = vec![
            Kpi::new("Portfolio Value", format!("${}B", fixed(portfolio_value / 1e9, 2)), "+4.2%", Some(true)),
            Kpi::new("Avg Loan Size", format!("${}K", fixed(avg_loan_size.round() / 1e3, 0)), "+1.5%", Some(true)),
            Kpi::new("Weighted Credit Score", fixed(avg_credit_score, 0), "-2 pts", Some(false)),
            Kpi::new("Delinquency (by Value)", format!("{}%", fixed(delinquency_by_value, 1)), "+0.3%", Some(false)),
            Kpi::new("High Risk Exposure", format!("{}%", fixed(high_risk_exposure, 1)), "-0.1%", Some(true)),
            Kpi::new("Proj. Loss Reserve", format!("${}M", fixed(loss_reserve / 1e6, 1)), "+5.4%", Some(false)),
            Kpi::new("Loan Apps (Monthly)", "1,240", "+180", Some(true)),
            Kpi::new("Approval Rate", "62%", "-2%", Some(false)),
        ];

        let delinquency_trend = delinquency_trend(loans, ctx.config.trend_window_months);

        let mut status_counts = [0usize; 4];
        for loan in loans {
            if let Some(status) = DelinquencyStatus::classify(loan.days_delinquent) {
                status_counts[status as usize] += 1;
            }
        }
        let status_distribution = DelinquencyStatus::ALL
            .iter()
            .map(|s| NamedValue::new(s.label(), status_counts[*s as usize] as f64))
            .collect();

        let value_vs_risk = region_risk(loans)
            .into_iter()
            .map(|(region, r)| RegionValueRisk {
                value: millions(r.value),
                risk_rate: r.risk_rate(),
                region,
            })
            .collect();

        let mut score_counts = [0u64; 7];
        for loan in loans {
            if let Some(idx) = score_bucket(loan.credit_score) {
                score_counts[idx] += 1;
            }
        }
        let score_buckets = SCORE_BUCKET_LABELS
            .iter()
            .zip(score_counts)
            .map(|(label, n)| RangeCount::new(label, n))
            .collect();

        let mut segment_value: HashMap<&str, f64> = HashMap::new();
        for loan in loans {
            *segment_value.entry(loan.risk_segment.as_str()).or_default() += loan.amount();
        }
        let mut risk_segments: Vec<NamedValue> = segment_value
            .into_iter()
            .map(|(name, value)| NamedValue::new(name, millions(value)))
            .collect();
        risk_segments.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.name.cmp(&b.name)));

        log::debug!(
            "performance: value ${:.0}, {} trend months, delinquency by value {:.1}%",
            portfolio_value,
            delinquency_trend.len(),
            delinquency_by_value
        );

        Ok(PerformanceReport {
            summary: PerformanceSummary {
                portfolio_value,
                avg_loan_size: avg_loan_size.round(),
                avg_credit_score: avg_credit_score.round(),
                delinquency_by_value: round1(delinquency_by_value),
                high_risk_exposure: round1(high_risk_exposure),
                projected_loss_reserve: loss_reserve,
            },
            kpis,
            delinquency_trend,
            status_distribution,
            value_vs_risk,
            score_buckets,
            risk_segments,
        })
    }
}
