//! The report engine — turns a loaded portfolio into the dashboard report.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Overview          (page 1A)
//!   2. Diagnostics       (page 1B)
//!   3. Coaching          (page 1C)
//!   4. Performance       (page 2A)
//!   5. Segmentation      (page 2B)
//!   6. Forecasting       (page 2C, reads the performance trend)
//!   7. Loss mitigation   (page 3A)
//!   8. Effectiveness     (page 3B)
//!   9. Strategy          (page 3C)
//!
//! RULES:
//!   - Each section runs exactly once per report.
//!   - Sections read only the loaded tables, the index and the config.
//!   - All randomness flows through the RngBank.

use crate::{
    assistance::AssistanceSummary,
    coaching_section::{CoachingReport, CoachingSection},
    config::ReportConfig,
    diagnostics_section::{DiagnosticsReport, DiagnosticsSection},
    effectiveness_section::{EffectivenessReport, EffectivenessSection},
    error::{PulseError, PulseResult},
    forecasting_section::{ForecastingReport, ForecastingSection},
    index::PortfolioIndex,
    loader::{load_portfolio, Portfolio},
    loss_mitigation_section::{LossMitigationReport, LossMitigationSection},
    overview_section::{OverviewReport, OverviewSection},
    performance_section::{PerformanceReport, PerformanceSection},
    rng::RngBank,
    section::{ReportSection, SectionContext},
    segmentation_section::{SegmentationReport, SegmentationSection},
    strategy_section::{StrategyReport, StrategySection},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMeta {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub seed: u64,
    pub associates: usize,
    pub accounts: usize,
    pub loans: usize,
    pub assistance_loaded: bool,
}

/// The full dashboard payload. Page 1A is flattened to the top level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub meta: ReportMeta,
    #[serde(flatten)]
    pub overview: OverviewReport,
    pub diagnostics: DiagnosticsReport,
    pub coaching: CoachingReport,
    pub performance: PerformanceReport,
    pub segmentation: SegmentationReport,
    pub forecasting: ForecastingReport,
    pub loss_mitigation: LossMitigationReport,
    pub effectiveness: EffectivenessReport,
    pub strategy: StrategyReport,
}

/// Loaded tables together with the report computed from them.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub portfolio: Portfolio,
    pub report: DashboardReport,
}

pub struct ReportEngine {
    pub config: ReportConfig,
    pub rng_bank: RngBank,
    seed: u64,
}

impl ReportEngine {
    pub fn new(config: ReportConfig, seed: u64) -> PulseResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng_bank: RngBank::new(seed),
            seed,
        })
    }

    /// Compute every section, in the documented order.
    pub fn build(&self, portfolio: &Portfolio) -> PulseResult<DashboardReport> {
        for (table, empty) in [
            ("associates", portfolio.associates.is_empty()),
            ("accounts", portfolio.accounts.is_empty()),
            ("loans", portfolio.loans.is_empty()),
        ] {
            if empty {
                return Err(PulseError::EmptyTable { table: table.into() });
            }
        }

        let index = PortfolioIndex::build(portfolio);
        let assistance = AssistanceSummary::from_portfolio(portfolio);
        let ctx = SectionContext {
            portfolio,
            index: &index,
            config: &self.config,
            assistance: assistance.as_ref(),
        };

        let overview = self.run(&OverviewSection, &ctx)?;
        let diagnostics = self.run(&DiagnosticsSection, &ctx)?;
        let coaching = self.run(&CoachingSection, &ctx)?;
        let performance = self.run(&PerformanceSection, &ctx)?;
        let segmentation = self.run(&SegmentationSection, &ctx)?;
        let forecasting = self.run(
            &ForecastingSection {
                trend: performance.delinquency_trend.clone(),
            },
            &ctx,
        )?;
        let loss_mitigation = self.run(&LossMitigationSection, &ctx)?;
        let effectiveness = self.run(&EffectivenessSection, &ctx)?;
        let strategy = self.run(&StrategySection, &ctx)?;

        let meta = ReportMeta {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            seed: self.seed,
            associates: portfolio.associates.len(),
            accounts: portfolio.accounts.len(),
            loans: portfolio.loans.len(),
            assistance_loaded: portfolio.has_assistance(),
        };
        log::info!("engine: report {} built (seed {})", meta.report_id, self.seed);

        Ok(DashboardReport {
            meta,
            overview,
            diagnostics,
            coaching,
            performance,
            segmentation,
            forecasting,
            loss_mitigation,
            effectiveness,
            strategy,
        })
    }

    fn run<S: ReportSection>(&self, section: &S, ctx: &SectionContext<'_>) -> PulseResult<S::Output> {
        let mut rng = self.rng_bank.for_slot(section.slot());
        let output = section.compute(ctx, &mut rng)?;
        log::info!("engine: section '{}' computed", section.name());
        Ok(output)
    }
}

/// Load the tables named by `config` and build the report.
pub fn try_load_dashboard(config: &ReportConfig, seed: u64) -> PulseResult<Dashboard> {
    let engine = ReportEngine::new(config.clone(), seed)?;
    let portfolio = load_portfolio(config)?;
    let report = engine.build(&portfolio)?;
    Ok(Dashboard { portfolio, report })
}

/// Catch-all entry point: any failure is logged and yields None.
pub fn load_dashboard(config: &ReportConfig, seed: u64) -> Option<Dashboard> {
    match try_load_dashboard(config, seed) {
        Ok(dashboard) => Some(dashboard),
        Err(e) => {
            log::error!("Error loading data: {e}");
            None
        }
    }
}
