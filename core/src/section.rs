//! Report section trait.
//!
//! RULE: Every dashboard page implements ReportSection.
//! The engine calls compute() on each section exactly once per report,
//! in the fixed order documented in engine.rs.

use crate::{
    assistance::AssistanceSummary,
    config::ReportConfig,
    error::PulseResult,
    index::PortfolioIndex,
    loader::Portfolio,
    rng::{StreamRng, StreamSlot},
};
use serde::Serialize;

/// Read-only inputs shared by every section of one report.
pub struct SectionContext<'a> {
    pub portfolio: &'a Portfolio,
    pub index: &'a PortfolioIndex<'a>,
    pub config: &'a ReportConfig,
    /// Assistance rollup, when the assistance history was loaded.
    pub assistance: Option<&'a AssistanceSummary>,
}

/// The contract every report section must fulfill.
pub trait ReportSection {
    /// Chart-ready output serialised into the report.
    type Output: Serialize;

    /// Unique stable name for this section.
    fn name(&self) -> &'static str;

    /// The RNG stream this section draws from.
    fn slot(&self) -> StreamSlot;

    /// Compute the section from the loaded tables.
    ///
    /// - `ctx`: tables, per-associate index and config
    /// - `rng`: this section's deterministic stream
    fn compute(&self, ctx: &SectionContext<'_>, rng: &mut StreamRng) -> PulseResult<Self::Output>;
}
