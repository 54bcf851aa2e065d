pub mod assistance;
pub mod buckets;
pub mod chart;
pub mod coaching_section;
pub mod config;
pub mod diagnostics_section;
pub mod effectiveness_section;
pub mod engine;
pub mod error;
pub mod forecasting_section;
pub mod generator;
pub mod index;
pub mod loader;
pub mod loss_mitigation_section;
pub mod metrics;
pub mod overview_section;
pub mod performance_section;
pub mod records;
pub mod rng;
pub mod section;
pub mod segmentation_section;
pub mod strategy_section;
pub mod types;
