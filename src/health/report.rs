//! Health report types.
//!
//! # Design Decisions
//! - One entry per backend, rebuilt on every probe cycle
//! - Composite status is a pure fold: healthy iff every entry is healthy
//! - Entries serialize as `"healthy"` or `"unhealthy: <reason>"`

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// Outcome of probing one backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Healthy,
    Unhealthy(String),
}

impl ProbeOutcome {
    pub fn unhealthy(reason: impl Into<String>) -> Self {
        ProbeOutcome::Unhealthy(reason.into())
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, ProbeOutcome::Healthy)
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Healthy => f.write_str("healthy"),
            ProbeOutcome::Unhealthy(reason) => write!(f, "unhealthy: {}", reason),
        }
    }
}

impl Serialize for ProbeOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Composite verdict over every backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Healthy,
    Degraded,
}

/// Per-backend probe outcomes keyed by backend name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HealthReport(BTreeMap<String, ProbeOutcome>);

impl HealthReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, outcome: ProbeOutcome) {
        self.0.insert(name.into(), outcome);
    }

    pub fn get(&self, name: &str) -> Option<&ProbeOutcome> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ProbeOutcome)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn status(&self) -> OverallStatus {
        if self.0.values().all(ProbeOutcome::is_healthy) {
            OverallStatus::Healthy
        } else {
            OverallStatus::Degraded
        }
    }
}

impl FromIterator<(String, ProbeOutcome)> for HealthReport {
    fn from_iter<I: IntoIterator<Item = (String, ProbeOutcome)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthSummary {
    pub status: OverallStatus,
    pub services: HealthReport,
}

impl From<HealthReport> for HealthSummary {
    fn from(services: HealthReport) -> Self {
        Self {
            status: services.status(),
            services,
        }
    }
}
