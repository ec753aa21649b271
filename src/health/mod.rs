//! Health aggregation subsystem.
//!
//! # Data Flow
//! ```text
//! GET /health
//!     → aggregator.rs: spawn one probe task per backend
//!         → GET <backend>/health under its own timeout
//!     → join all tasks (wait-for-all barrier)
//!     → report.rs: fold outcomes into healthy | degraded
//! ```
//!
//! # Design Decisions
//! - Probes run on demand; no background polling, no stored state
//! - A failing probe never fails the whole check
//! - Only HTTP 200 counts as healthy

pub mod aggregator;
pub mod report;

pub use aggregator::{probe, HealthAggregator};
pub use report::{HealthReport, HealthSummary, OverallStatus, ProbeOutcome};
