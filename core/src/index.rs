//! Per-associate account index, built once per report.

use crate::{
    loader::Portfolio,
    metrics::{pct_of, round1},
    records::{Account, Associate},
    types::AssociateId,
};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AssociateStats {
    pub workload: usize,
    pub delinquent: usize,
    pub cured: usize,
    /// Percent, one decimal.
    pub delinquency_rate: f64,
    /// Percent, one decimal.
    pub cure_rate: f64,
}

impl AssociateStats {
    fn from_accounts(accounts: &[&Account]) -> Self {
        let workload = accounts.len();
        let delinquent = accounts.iter().filter(|a| a.is_delinquent()).count();
        let cured = accounts.iter().filter(|a| a.is_cured()).count();
        Self {
            workload,
            delinquent,
            cured,
            delinquency_rate: round1(pct_of(delinquent, workload)),
            cure_rate: round1(pct_of(cured, workload)),
        }
    }
}

pub struct PortfolioIndex<'a> {
    by_associate: HashMap<AssociateId, Vec<&'a Account>>,
}

impl<'a> PortfolioIndex<'a> {
    pub fn build(portfolio: &'a Portfolio) -> Self {
        let mut by_associate: HashMap<AssociateId, Vec<&'a Account>> = HashMap::new();
        for account in &portfolio.accounts {
            if let Some(id) = account.associate_id {
                by_associate.entry(id).or_default().push(account);
            }
        }
        Self { by_associate }
    }

    pub fn accounts_of(&self, associate_id: AssociateId) -> &[&'a Account] {
        self.by_associate
            .get(&associate_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn stats_for(&self, associate: &Associate) -> AssociateStats {
        AssociateStats::from_accounts(self.accounts_of(associate.associate_id))
    }

    /// Stats for every associate, in table order.
    pub fn all_stats<'p>(
        &self,
        associates: &'p [Associate],
    ) -> Vec<(&'p Associate, AssociateStats)> {
        associates.iter().map(|a| (a, self.stats_for(a))).collect()
    }
}
