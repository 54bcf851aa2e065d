//! Shared primitive types used across the entire report pipeline.

/// Associate (collector) identifier as it appears in the CSV exports.
pub type AssociateId = i64;

/// Servicing account identifier.
pub type AccountId = i64;

/// Loan identifier.
pub type LoanId = i64;

/// Assistance program identifier.
pub type ProgramId = i64;

/// Calendar month key, formatted `YYYY-MM`.
pub type MonthKey = String;
