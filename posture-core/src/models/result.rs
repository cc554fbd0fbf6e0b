//! Immutable scan results and their derived views.

use std::collections::BTreeMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use super::endpoint::{Endpoint, SecurityTier};
use super::finding::{Finding, Severity};

/// The complete output of one scan: classified endpoints in discovery order,
/// findings in rank order, and scan metadata.
///
/// Immutable once built. All views below are recomputed per call rather than
/// cached, and `with_findings` produces a new instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub project_path: String,
    pub endpoints: Vec<Endpoint>,
    pub findings: Vec<Finding>,
    pub scanned_files: usize,
    /// Files the syntax provider could not interpret. Lets callers tell a
    /// clean scan with zero findings apart from a scan that saw nothing.
    pub skipped_files: usize,
    pub duration: Duration,
    /// Seconds since the Unix epoch at scan completion.
    pub timestamp: u64,
}

impl ScanResult {
    pub fn new(
        project_path: impl Into<String>,
        endpoints: Vec<Endpoint>,
        findings: Vec<Finding>,
        scanned_files: usize,
        skipped_files: usize,
        duration: Duration,
    ) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            project_path: project_path.into(),
            endpoints,
            findings,
            scanned_files,
            skipped_files,
            duration,
            timestamp,
        }
    }

    pub fn total_endpoints(&self) -> usize {
        self.endpoints.len()
    }

    pub fn total_findings(&self) -> usize {
        self.findings.len()
    }

    /// Findings grouped by severity. Every severity appears as a key, even
    /// when its group is empty.
    pub fn findings_by_severity(&self) -> BTreeMap<Severity, Vec<&Finding>> {
        let mut groups: BTreeMap<Severity, Vec<&Finding>> =
            Severity::ALL.iter().map(|&s| (s, Vec::new())).collect();
        for finding in &self.findings {
            groups.entry(finding.severity).or_default().push(finding);
        }
        groups
    }

    pub fn severity_counts(&self) -> BTreeMap<Severity, usize> {
        let mut counts: BTreeMap<Severity, usize> =
            Severity::ALL.iter().map(|&s| (s, 0)).collect();
        for finding in &self.findings {
            *counts.entry(finding.severity).or_default() += 1;
        }
        counts
    }

    /// Findings at or above the given severity, in the result's rank order.
    pub fn findings_at_least(&self, min: Severity) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity.is_at_least(min))
            .collect()
    }

    pub fn has_findings(&self, min: Severity) -> bool {
        self.findings.iter().any(|f| f.severity.is_at_least(min))
    }

    pub fn highest_severity(&self) -> Option<Severity> {
        self.findings.iter().map(|f| f.severity).max()
    }

    /// Classified endpoints grouped by tier. Unclassified endpoints are not
    /// placed in any group.
    pub fn endpoints_by_tier(&self) -> BTreeMap<SecurityTier, Vec<&Endpoint>> {
        let mut groups: BTreeMap<SecurityTier, Vec<&Endpoint>> =
            SecurityTier::ALL.iter().map(|&t| (t, Vec::new())).collect();
        for endpoint in &self.endpoints {
            if let Some(tier) = endpoint.tier {
                groups.entry(tier).or_default().push(endpoint);
            }
        }
        groups
    }

    /// A new result with the findings replaced; everything else carries over.
    pub fn with_findings(&self, findings: Vec<Finding>) -> Self {
        Self {
            findings,
            ..self.clone()
        }
    }
}
