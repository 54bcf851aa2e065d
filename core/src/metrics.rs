//! Ratio, rounding and display helpers shared by every report section.

use serde::{Deserialize, Serialize};

/// A headline KPI card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub label: String,
    pub value: String,
    pub trend: String,
    /// `None` renders as a neutral trend.
    pub up: Option<bool>,
}

impl Kpi {
    pub fn new(label: &str, value: impl Into<String>, trend: &str, up: Option<bool>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            trend: trend.into(),
            up,
        }
    }
}

/// `part / whole` as a percentage; 0 when `whole` is 0.
pub fn pct(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

/// `pct` over counts.
pub fn pct_of(part: usize, whole: usize) -> f64 {
    pct(part as f64, whole as f64)
}

/// `part / whole`; 0 when `whole` is 0.
pub fn ratio(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole
    }
}

pub fn round_to(x: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (x * factor).round() / factor
}

pub fn round0(x: f64) -> f64 {
    round_to(x, 0)
}

pub fn round1(x: f64) -> f64 {
    round_to(x, 1)
}

pub fn round2(x: f64) -> f64 {
    round_to(x, 2)
}

/// Fixed-decimal string, e.g. `fixed(12.345, 1) == "12.3"`.
/// Ties round away from zero, matching `round_to`.
pub fn fixed(x: f64, decimals: usize) -> String {
    let rounded = round_to(x, decimals as i32);
    format!("{rounded:.decimals$}")
}

/// Amount in millions, two decimals.
pub fn millions(x: f64) -> f64 {
    round2(x / 1_000_000.0)
}

/// Integer with comma digit grouping: `5000 -> "5,000"`.
pub fn thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pct_guards_zero_denominator() {
        assert_eq!(pct(5.0, 0.0), 0.0);
        assert_eq!(pct_of(1, 4), 25.0);
        assert_eq!(ratio(3.0, 0.0), 0.0);
    }

    #[test]
    fn rounding_helpers() {
        assert_eq!(round1(12.345), 12.3);
        assert_eq!(round2(1.005_1), 1.01);
        assert_eq!(fixed(7.0, 1), "7.0");
        assert_eq!(millions(2_345_678.0), 2.35);
    }

    #[test]
    fn fixed_rounds_ties_like_round_to() {
        assert_eq!(fixed(6.25, 1), "6.3");
        assert_eq!(fixed(650.5, 0), "651");
        assert_eq!(fixed(2.5, 0), "3");
        assert_eq!(fixed(round1(6.25), 1), fixed(6.25, 1));
    }

    #[test]
    fn digit_grouping() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(5000), "5,000");
        assert_eq!(thousands(1_234_567), "1,234,567");
        assert_eq!(thousands(-42_000), "-42,000");
    }
}
