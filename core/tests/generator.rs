use loanpulse_core::{
    config::ReportConfig,
    engine::load_dashboard,
    generator::{GeneratorConfig, SyntheticData},
    loader::load_portfolio,
};

fn small() -> GeneratorConfig {
    GeneratorConfig {
        associates: 8,
        accounts: 200,
        loans: 300,
        assistance: 100,
        ..GeneratorConfig::default()
    }
}

#[test]
fn written_tables_load_back_unchanged() {
    let dir = tempfile::tempdir().expect("temp dir");
    let data = SyntheticData::generate(&small(), 11);
    data.write_to(dir.path()).expect("write data set");

    let loaded = load_portfolio(&ReportConfig::for_dir(dir.path())).expect("load portfolio");
    assert_eq!(loaded, data.to_portfolio());
}

#[test]
fn generated_values_follow_table_rules() {
    let cfg = small();
    let portfolio = SyntheticData::generate(&cfg, 3).to_portfolio();

    assert_eq!(portfolio.associates.len(), 8);
    assert!(portfolio
        .accounts
        .iter()
        .all(|a| a.associate_id.is_some_and(|id| (1..=8).contains(&id))));
    assert!(portfolio
        .accounts
        .iter()
        .all(|a| matches!(a.days_delinquent, Some(0 | 15 | 30 | 60 | 90 | 120))));
    for loan in &portfolio.loans {
        let score = loan.credit_score.expect("generated score");
        assert!((500.0..850.0).contains(&score));
        let expected = match score as i64 {
            s if s <= 600 => "High Risk",
            s if s <= 680 => "Medium Risk",
            s if s <= 750 => "Low Risk",
            _ => "Very Low Risk",
        };
        assert_eq!(loan.risk_segment, expected);
    }
    let assistance = portfolio.assistance.as_ref().expect("assistance table");
    assert!(assistance
        .iter()
        .all(|r| r.loan_id.is_some_and(|id| (1..=300).contains(&id))));
}

#[test]
fn generated_directory_produces_a_report() {
    let dir = tempfile::tempdir().expect("temp dir");
    SyntheticData::generate(&small(), 21).write_to(dir.path()).expect("write data set");
    let dashboard = load_dashboard(&ReportConfig::for_dir(dir.path()), 21).expect("dashboard");
    let report = &dashboard.report;
    assert_eq!(report.overview.summary.total_accounts, 200);
    assert_eq!(report.effectiveness.cure_rate_by_program.len(), 4);
    assert!(!report.performance.delinquency_trend.is_empty());
    assert!(report.performance.delinquency_trend.len() <= 12);
}
