//! Associate overview (page 1A) — headline account health and the
//! associate leaderboard.

use crate::{
    error::PulseResult,
    metrics::{fixed, pct_of, round1, thousands, Kpi},
    rng::{StreamRng, StreamSlot},
    section::{ReportSection, SectionContext},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewSummary {
    pub total_accounts: usize,
    pub total_associates: usize,
    pub avg_accounts_per_associate: f64,
    pub delinquency_rate: f64,
    pub serious_delinquency_rate: f64,
    pub cured_accounts: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub name: String,
    pub region: String,
    pub accounts: usize,
    pub delinquency_rate: f64,
    pub cure_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewReport {
    pub summary: OverviewSummary,
    pub kpis: Vec<Kpi>,
    pub associate_leaderboard: Vec<LeaderboardEntry>,
}

pub struct OverviewSection;

impl ReportSection for OverviewSection {
    type Output = OverviewReport;

    fn name(&self) -> &'static str {
        "overview"
    }

    fn slot(&self) -> StreamSlot {
        StreamSlot::Overview
    }

    fn compute(&self, ctx: &SectionContext<'_>, _rng: &mut StreamRng) -> PulseResult<OverviewReport> {
        let accounts = &ctx.portfolio.accounts;
        let total_accounts = accounts.len();
        let total_associates = ctx.portfolio.associates.len();

        let delinquent = accounts.iter().filter(|a| a.is_delinquent()).count();
        let serious_days = ctx.config.serious_delinquency_days;
        let serious = accounts
            .iter()
            .filter(|a| a.days_delinquent.is_some_and(|d| d >= serious_days))
            .count();
        let cured = accounts.iter().filter(|a| a.is_cured()).count();

        let avg_accounts = if total_associates == 0 {
            0.0
        } else {
            total_accounts as f64 / total_associates as f64
        };
        let delinquency_rate = pct_of(delinquent, total_accounts);
        let serious_rate = pct_of(serious, total_accounts);

        let kpis = vec![
            Kpi::new("Total Active Accounts", thousands(total_accounts as i64), "+2.4%", Some(true)),
            Kpi::new("Total Associates", total_associates.to_string(), "Stable", None),
            Kpi::new("Avg Accounts / Associate", fixed(avg_accounts, 1), "-1.2%", Some(true)),
            Kpi::new("Overall Delinquency Rate", format!("{}%", fixed(delinquency_rate, 1)), "+0.5%", Some(false)),
            Kpi::new("90+ Days Delinquency", format!("{}%", fixed(serious_rate, 1)), "-0.2%", Some(true)),
            Kpi::new("New Delinquencies", "142", "+12", Some(false)),
            Kpi::new("Cures (This Month)", thousands(cured as i64), "+8%", Some(true)),
            Kpi::new("Net Portfolio Movement", "+42", "Positive", Some(true)),
        ];

        let mut leaderboard: Vec<LeaderboardEntry> = ctx
            .index
            .all_stats(&ctx.portfolio.associates)
            .into_iter()
            .map(|(assoc, stats)| LeaderboardEntry {
                name: assoc.associate_name.clone(),
                region: assoc.region.clone(),
                accounts: stats.workload,
                delinquency_rate: stats.delinquency_rate,
                cure_rate: stats.cure_rate,
            })
            .collect();
        // Stable sort keeps table order among equal rates.
        leaderboard.sort_by(|a, b| b.delinquency_rate.total_cmp(&a.delinquency_rate));
        leaderboard.truncate(ctx.config.leaderboard_size);

        log::debug!(
            "overview: {total_accounts} accounts, delinquency {:.1}%, serious {:.1}%",
            delinquency_rate,
            serious_rate
        );

        Ok(OverviewReport {
            summary: OverviewSummary {
                total_accounts,
                total_associates,
                avg_accounts_per_associate: round1(avg_accounts),
                delinquency_rate: round1(delinquency_rate),
                serious_delinquency_rate: round1(serious_rate),
                cured_accounts: cured,
            },
            kpis,
            associate_leaderboard: leaderboard,
        })
    }
}
