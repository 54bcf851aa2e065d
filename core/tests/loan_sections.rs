mod common;

use common::{fixture_report, kpi_value};
use loanpulse_core::{
    config::ReportConfig,
    engine::ReportEngine,
    forecasting_section::PointKind,
    loader::Portfolio,
    records::{Account, Associate, Loan},
};

#[test]
fn performance_summary_uses_loan_values() {
    let report = fixture_report(false, 1, |_| {});
    let p = &report.performance;
    assert_eq!(p.summary.portfolio_value, 5_000_000.0);
    assert_eq!(p.summary.avg_loan_size, 1_000_000.0);
    // The loan without a score counts as zero in the average.
    assert_eq!(p.summary.avg_credit_score, 550.0);
    assert_eq!(p.summary.delinquency_by_value, 20.0);
    assert_eq!(p.summary.high_risk_exposure, 10.0);
    assert_eq!(kpi_value(&p.kpis, "Avg Loan Size"), "$1000K");
    assert_eq!(kpi_value(&p.kpis, "Delinquency (by Value)"), "20.0%");
    assert_eq!(kpi_value(&p.kpis, "High Risk Exposure"), "10.0%");
}

#[test]
fn delinquency_trend_skips_undated_loans() {
    let report = fixture_report(false, 1, |_| {});
    let trend: Vec<(&str, f64)> = report
        .performance
        .delinquency_trend
        .iter()
        .map(|t| (t.month.as_str(), t.rate))
        .collect();
    assert_eq!(trend, [("2024-01", 50.0), ("2024-02", 0.0), ("2024-03", 0.0)]);
}

#[test]
fn trend_window_keeps_latest_months() {
    let report = fixture_report(false, 1, |c| c.trend_window_months = 2);
    let months: Vec<&str> = report
        .performance
        .delinquency_trend
        .iter()
        .map(|t| t.month.as_str())
        .collect();
    assert_eq!(months, ["2024-02", "2024-03"]);
}

#[test]
fn status_and_score_distributions() {
    let report = fixture_report(false, 1, |_| {});
    let status: Vec<f64> = report
        .performance
        .status_distribution
        .iter()
        .map(|s| s.value)
        .collect();
    assert_eq!(status, [3.0, 1.0, 1.0, 0.0]);

    let scores: Vec<u64> = report.performance.score_buckets.iter().map(|b| b.count).collect();
    assert_eq!(scores, [0, 1, 0, 1, 1, 0, 1]);
}

#[test]
fn regions_in_name_order_with_risk_rate() {
    let report = fixture_report(false, 1, |_| {});
    let regions: Vec<(&str, f64, f64)> = report
        .performance
        .value_vs_risk
        .iter()
        .map(|r| (r.region.as_str(), r.value, r.risk_rate))
        .collect();
    assert_eq!(
        regions,
        [("East", 1.0, 0.0), ("North", 1.5, 50.0), ("South", 2.5, 0.0)]
    );
}

#[test]
fn risk_segments_sorted_by_value() {
    let report = fixture_report(false, 1, |_| {});
    let segments: Vec<(&str, f64)> = report
        .performance
        .risk_segments
        .iter()
        .map(|s| (s.name.as_str(), s.value))
        .collect();
    assert_eq!(
        segments,
        [
            ("Medium Risk", 2.5),
            ("Low Risk", 1.0),
            ("Very Low Risk", 1.0),
            ("High Risk", 0.5),
        ]
    );
}

#[test]
fn segmentation_panels() {
    let report = fixture_report(false, 1, |_| {});
    let s = &report.segmentation;
    assert_eq!(kpi_value(&s.kpis, "Highest Risk Region"), "North");

    let ages: Vec<(&str, f64)> = s
        .loan_age_vs_risk
        .iter()
        .map(|a| (a.name.as_str(), a.risk_rate))
        .collect();
    assert_eq!(ages, [("0-11m", 0.0), ("12-23m", 0.0), ("24-35m", 50.0)]);

    assert_eq!(s.vintage_heatmap.len(), 1);
    assert_eq!(s.vintage_heatmap[0].year, "2024");
    assert_eq!(
        s.vintage_heatmap[0].months,
        vec![("Jan", 50.0), ("Feb", 0.0), ("Mar", 0.0)]
    );
}

#[test]
fn scatter_sample_follows_stride() {
    let report = fixture_report(false, 1, |c| c.scatter_sample_stride = 2);
    let points = &report.segmentation.score_vs_delinquency;
    assert_eq!(points.len(), 3);
    assert_eq!(points[1].score, 650.0);
    assert_eq!(points[1].amount, 2000.0);
}

#[test]
fn segment_contribution_rows_share_every_segment_key() {
    let report = fixture_report(false, 1, |_| {});
    let json = serde_json::to_value(&report.segmentation.segment_contribution).expect("serialise report");
    assert_eq!(
        json,
        serde_json::json!([
            {"region": "East", "High Risk": 0.0, "Low Risk": 0.0, "Medium Risk": 0.0, "Very Low Risk": 100.0},
            {"region": "North", "High Risk": 50.0, "Low Risk": 50.0, "Medium Risk": 0.0, "Very Low Risk": 0.0},
            {"region": "South", "High Risk": 0.0, "Low Risk": 0.0, "Medium Risk": 100.0, "Very Low Risk": 0.0},
        ])
    );
}

#[test]
fn forecast_extends_trend_after_last_month() {
    let report = fixture_report(false, 1, |_| {});
    let points = &report.forecasting.delinquency_forecast;
    assert_eq!(points.len(), 6);
    assert!(points[..3].iter().all(|p| p.kind == PointKind::Historical));
    let projected: Vec<(&str, f64)> = points[3..]
        .iter()
        .map(|p| {
            assert_eq!(p.kind, PointKind::Projected);
            (p.month.as_str(), p.rate)
        })
        .collect();
    assert_eq!(projected, [("2024-04", 0.2), ("2024-05", 0.5), ("2024-06", 0.3)]);
}

fn two_loan_portfolio() -> Portfolio {
    let loan = |loan_id, amount, score| Loan {
        loan_id,
        loan_amount: Some(amount),
        credit_score: Some(score),
        days_delinquent: Some(0),
        risk_segment: "Low Risk".into(),
        region: "West".into(),
        origination_date: chrono::NaiveDate::from_ymd_opt(2025, 6, 1),
        loan_age_months: Some(6),
    };
    Portfolio {
        associates: vec![Associate {
            associate_id: 1,
            associate_name: "Dana".into(),
            region: "West".into(),
            experience_years: None,
        }],
        accounts: vec![Account {
            account_id: 1,
            associate_id: Some(1),
            days_delinquent: Some(0),
            cured_flag: Some(0),
            is_migrated: None,
            account_balance: None,
        }],
        loans: vec![loan(1, 2000.0, 650.0), loan(2, 3000.0, 651.0)],
        ..Portfolio::default()
    }
}

#[test]
fn half_values_round_up_in_kpis_and_summary() {
    let portfolio = two_loan_portfolio();
    let report = ReportEngine::new(ReportConfig::default(), 1)
        .expect("valid config")
        .build(&portfolio)
        .expect("build report");
    let p = &report.performance;
    assert_eq!(p.summary.avg_credit_score, 651.0);
    assert_eq!(kpi_value(&p.kpis, "Weighted Credit Score"), "651");
    assert_eq!(p.summary.avg_loan_size, 2500.0);
    assert_eq!(kpi_value(&p.kpis, "Avg Loan Size"), "$3K");
}
