mod common;

use loanpulse_core::{
    config::ReportConfig,
    error::PulseError,
    loader::{load_portfolio, read_table},
    records::{Account, Loan},
};

#[test]
fn blank_rows_are_skipped() {
    let csv = "account_id,associate_id,days_delinquent,cured_flag\n1,1,0,0\n,,,\n\n2,1,30,1\n";
    let accounts: Vec<Account> = read_table(csv.as_bytes(), "accounts").expect("parse table");
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[1].account_id, 2);
}

#[test]
fn unparseable_cells_become_missing() {
    let csv = "account_id,associate_id,days_delinquent,cured_flag\n7,abc,n/a,1\n";
    let accounts: Vec<Account> = read_table(csv.as_bytes(), "accounts").expect("parse table");
    let a = &accounts[0];
    assert_eq!(a.associate_id, None);
    assert_eq!(a.days_delinquent, None);
    assert!(!a.is_delinquent());
    assert!(a.is_cured());
}

#[test]
fn extra_columns_are_ignored() {
    let csv = "loan_id,loan_amount,region,risk_segment,customer_id\n1,250000,West,Low Risk,12345\n";
    let loans: Vec<Loan> = read_table(csv.as_bytes(), "loans").expect("parse table");
    assert_eq!(loans.len(), 1);
    assert_eq!(loans[0].region, "West");
    assert_eq!(loans[0].amount(), 250000.0);
}

#[test]
fn short_rows_leave_trailing_fields_missing() {
    let csv = "loan_id,region,risk_segment,loan_amount,days_delinquent\n2,South,Low Risk\n";
    let loans: Vec<Loan> = read_table(csv.as_bytes(), "loans").expect("parse table");
    assert_eq!(loans[0].region, "South");
    assert_eq!(loans[0].loan_amount, None);
    assert_eq!(loans[0].amount(), 0.0);
    assert_eq!(loans[0].days_past_due(), 0);
}

#[test]
fn origination_dates_accept_timestamps() {
    let csv = "loan_id,origination_date\n1,2024-03-05\n2,2024-03-05 13:45:00\n3,2024-03-05T13:45:00\n4,garbage\n";
    let loans: Vec<Loan> = read_table(csv.as_bytes(), "loans").expect("parse table");
    let expected = chrono::NaiveDate::from_ymd_opt(2024, 3, 5);
    assert_eq!(loans[0].origination_date, expected);
    assert_eq!(loans[1].origination_date, expected);
    assert_eq!(loans[2].origination_date, expected);
    assert_eq!(loans[3].origination_date, None);
}

#[test]
fn required_id_column_failure_names_the_table() {
    let csv = "account_id,associate_id\nnot-an-id,1\n";
    let err = read_table::<Account, _>(csv.as_bytes(), "accounts").unwrap_err();
    assert!(matches!(err, PulseError::Csv { ref file, .. } if file == "accounts"));
}

#[test]
fn assistance_tables_are_optional() {
    let dir = tempfile::tempdir().expect("temp dir");
    common::write_fixture(dir.path(), false);
    let portfolio = load_portfolio(&ReportConfig::for_dir(dir.path())).expect("load portfolio");
    assert_eq!(portfolio.associates.len(), 3);
    assert_eq!(portfolio.accounts.len(), 6);
    assert_eq!(portfolio.loans.len(), 5);
    assert!(!portfolio.has_assistance());
    assert!(portfolio.programs.is_none());
}

#[test]
fn assistance_tables_load_when_present() {
    let dir = tempfile::tempdir().expect("temp dir");
    common::write_fixture(dir.path(), true);
    let portfolio = load_portfolio(&ReportConfig::for_dir(dir.path())).expect("load portfolio");
    assert!(portfolio.has_assistance());
    assert_eq!(portfolio.programs.as_ref().map(Vec::len), Some(2));
    assert_eq!(portfolio.assistance.as_ref().map(Vec::len), Some(4));
}

#[test]
fn missing_required_table_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    common::write_fixture(dir.path(), false);
    std::fs::remove_file(dir.path().join("loans.csv")).expect("remove table");
    let err = load_portfolio(&ReportConfig::for_dir(dir.path())).unwrap_err();
    assert!(err.to_string().contains("loans.csv"), "unexpected error: {err}");
}
