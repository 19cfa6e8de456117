use super::{Classification, Finding};
use chrono::{DateTime, Utc};

/// Totals for a completed scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationCounts {
    pub in_range: usize,
    pub out_of_range: usize,
    pub not_installed: usize,
    pub unreadable: usize,
}

impl ClassificationCounts {
    pub fn record(&mut self, classification: &Classification) {
        match classification {
            Classification::InRange => self.in_range += 1,
            Classification::OutOfRange => self.out_of_range += 1,
            Classification::NotInstalled => self.not_installed += 1,
            Classification::Unreadable(_) => self.unreadable += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.in_range + self.out_of_range + self.not_installed + self.unreadable
    }
}

#[derive(Debug, Clone)]
pub struct ScanResult {
    pub scan_time: DateTime<Utc>,
    pub directories_checked: usize,
    pub counts: ClassificationCounts,
    /// Findings whose installed version sits inside an affected range.
    pub hits: Vec<Finding>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self {
            scan_time: Utc::now(),
            directories_checked: 0,
            counts: ClassificationCounts::default(),
            hits: Vec::new(),
        }
    }

    pub fn record(&mut self, finding: &Finding) {
        self.counts.record(&finding.classification);
        if finding.classification.is_hit() {
            self.hits.push(finding.clone());
        }
    }

    pub fn has_hits(&self) -> bool {
        !self.hits.is_empty()
    }
}

impl Default for ScanResult {
    fn default() -> Self {
        Self::new()
    }
}
