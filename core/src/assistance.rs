//! Outcome rollups over the optional customer-assistance history.
//!
//! Shared by the loss mitigation, effectiveness and strategy sections.

use crate::{
    loader::Portfolio,
    records::AssistanceProgram,
    types::ProgramId,
};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgramOutcome {
    pub program_id: ProgramId,
    pub name: String,
    pub records: usize,
    pub cured: usize,
    pub redefaulted: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssistanceSummary {
    /// Ordered by program id.
    pub programs: Vec<ProgramOutcome>,
    pub total: usize,
    pub cured: usize,
    pub redefaulted: usize,
    pub first_time: usize,
    pub second_time: usize,
    pub repeat: usize,
    /// Records within their program's `max_allowed`; None without a program table.
    pub adherent: Option<usize>,
}

impl AssistanceSummary {
    /// None when the assistance history was not loaded.
    pub fn from_portfolio(portfolio: &Portfolio) -> Option<Self> {
        let records = portfolio.assistance.as_ref()?;
        let programs: HashMap<ProgramId, &AssistanceProgram> = portfolio
            .programs
            .iter()
            .flatten()
            .map(|p| (p.program_id, p))
            .collect();

        let mut summary = AssistanceSummary {
            total: records.len(),
            ..Default::default()
        };
        let mut by_program: BTreeMap<ProgramId, ProgramOutcome> = BTreeMap::new();
        let mut adherent = 0usize;

        for record in records {
            if record.cured() {
                summary.cured += 1;
            }
            if record.redefaulted() {
                summary.redefaulted += 1;
            }
            match record.assistance_count_for_customer {
                Some(1) => summary.first_time += 1,
                Some(2) => summary.second_time += 1,
                Some(n) if n >= 3 => summary.repeat += 1,
                _ => {}
            }

            let Some(program_id) = record.program_id else { continue };
            let outcome = by_program.entry(program_id).or_insert_with(|| ProgramOutcome {
                program_id,
                name: programs
                    .get(&program_id)
                    .map_or_else(|| format!("Program {program_id}"), |p| p.program_name.clone()),
                ..Default::default()
            });
            outcome.records += 1;
            if record.cured() {
                outcome.cured += 1;
            }
            if record.redefaulted() {
                outcome.redefaulted += 1;
            }

            let within_limit = programs
                .get(&program_id)
                .and_then(|p| p.max_allowed)
                .zip(record.assistance_count_for_customer)
                .is_some_and(|(max, used)| used <= max);
            if within_limit {
                adherent += 1;
            }
        }

        summary.programs = by_program.into_values().collect();
        summary.adherent = portfolio.programs.as_ref().map(|_| adherent);
        Some(summary)
    }
}
