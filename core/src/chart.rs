//! Chart-ready point shapes shared across sections.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedValue {
    pub name: String,
    pub value: f64,
}

impl NamedValue {
    pub fn new(name: &str, value: f64) -> Self {
        Self { name: name.into(), value }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeCount {
    pub range: String,
    pub count: u64,
}

impl RangeCount {
    pub fn new(range: &str, count: u64) -> Self {
        Self { range: range.into(), count }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BubblePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub name: String,
}

impl BubblePoint {
    pub fn new(x: f64, y: f64, z: f64, name: &str) -> Self {
        Self { x, y, z, name: name.into() }
    }
}

/// Directed flow between two states (sankey / transition matrix cell).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowLink {
    pub from: String,
    pub to: String,
    pub value: f64,
}

impl FlowLink {
    pub fn new(from: &str, to: &str, value: f64) -> Self {
        Self { from: from.into(), to: to.into(), value }
    }
}

/// Percentage rate for one program or category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramRate {
    pub program: String,
    pub rate: f64,
}

impl ProgramRate {
    pub fn new(program: &str, rate: f64) -> Self {
        Self { program: program.into(), rate }
    }
}

/// Funnel stage with a count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageCount {
    pub stage: String,
    pub count: u64,
}

impl StageCount {
    pub fn new(stage: &str, count: u64) -> Self {
        Self { stage: stage.into(), count }
    }
}
