//! Small hand-checked portfolio shared by the integration tests.
#![allow(dead_code)]

use loanpulse_core::{
    config::ReportConfig,
    engine::{DashboardReport, ReportEngine},
    loader::load_portfolio,
};
use std::path::Path;

pub const ASSOCIATES: &str = "\
associate_id,associate_name,region,experience_years
1,Alice,North,5
2,Bob,South,3
3,Cara,East,
";

pub const ACCOUNTS: &str = "\
account_id,associate_id,days_delinquent,cured_flag,is_migrated,account_balance
1,1,0,0,0,100000
2,1,45,1,1,200000
3,1,95,0,0,150000
4,2,0,1,0,50000
5,2,120,0,1,300000
6,2,0,0,0,75000
";

pub const LOANS: &str = "\
loan_id,loan_amount,credit_score,days_delinquent,risk_segment,region,origination_date,loan_age_months
1,1000000,720,0,Low Risk,North,2024-01-15,24
2,500000,580,90,High Risk,North,2024-01-20,30
3,2000000,650,0,Medium Risk,South,2024-02-10,5
4,500000,,30,Medium Risk,South,not-a-date,
5,1000000,800,0,Very Low Risk,East,2024-03-05 00:00:00,13
";

pub const PROGRAMS: &str = "\
program_id,program_name,max_allowed
1,Forbearance,2
2,Re-amortization,1
";

pub const ASSISTANCE: &str = "\
assistance_id,loan_id,program_id,assistance_start_date,duration_months,assistance_count_for_customer,successful_cure,redefaulted
1,1,1,2024-02-01,3,1,1,0
2,2,1,2024-03-01,6,2,0,1
3,3,2,2024-04-01,2,1,1,0
4,4,2,2024-05-01,4,3,1,1
";

/// Write the three required tables, plus the assistance tables when asked.
pub fn write_fixture(dir: &Path, with_assistance: bool) {
    std::fs::write(dir.join("associates.csv"), ASSOCIATES).expect("write fixture");
    std::fs::write(dir.join("accounts.csv"), ACCOUNTS).expect("write fixture");
    std::fs::write(dir.join("loans.csv"), LOANS).expect("write fixture");
    if with_assistance {
        std::fs::write(dir.join("assistance_programs.csv"), PROGRAMS).expect("write fixture");
        std::fs::write(dir.join("customer_assistance.csv"), ASSISTANCE).expect("write fixture");
    }
}

/// Build a report over the fixture with the given config tweaks.
pub fn fixture_report(
    with_assistance: bool,
    seed: u64,
    tweak: impl FnOnce(&mut ReportConfig),
) -> DashboardReport {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().expect("temp dir");
    write_fixture(dir.path(), with_assistance);
    let mut config = ReportConfig::for_dir(dir.path());
    tweak(&mut config);
    let portfolio = load_portfolio(&config).expect("load portfolio");
    ReportEngine::new(config, seed).expect("valid config").build(&portfolio).expect("build report")
}

pub fn kpi_value<'a>(kpis: &'a [loanpulse_core::metrics::Kpi], label: &str) -> &'a str {
    kpis.iter()
        .find(|k| k.label == label)
        .map(|k| k.value.as_str())
        .unwrap_or_else(|| panic!("no KPI labelled '{label}'"))
}
