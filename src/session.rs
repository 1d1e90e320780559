use sha2::{Digest, Sha256};
use tracing::info;

use crate::color::{footprints, ColorAssignment};
use crate::config::EngineConfig;
use crate::custom::{CustomCourseEntry, CustomCourseInput, CustomCourseStore, CustomStoreError};
use crate::merge::{merge_sources, WeekBuckets};

/// Everything the daemon knows about the current timetable.
///
/// The session is the single writer of the color cache: every mutation goes
/// through `&mut self`, and the merged schedule plus its colors are rebuilt
/// right after each change so readers always see a consistent pair.
pub struct TimetableSession {
    config: EngineConfig,
    institutional: WeekBuckets,
    custom: CustomCourseStore,
    merged: WeekBuckets,
    colors: ColorAssignment,
    revision: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebuildSummary {
    pub merged_records: usize,
    pub newly_colored: Vec<String>,
}

impl TimetableSession {
    pub fn new(config: EngineConfig) -> Self {
        let mut session = Self {
            config,
            institutional: WeekBuckets::new(),
            custom: CustomCourseStore::new(),
            merged: WeekBuckets::new(),
            colors: ColorAssignment::new(),
            revision: String::new(),
        };
        session.rebuild();
        session
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn institutional(&self) -> &WeekBuckets {
        &self.institutional
    }

    pub fn merged(&self) -> &WeekBuckets {
        &self.merged
    }

    pub fn colors(&self) -> &ColorAssignment {
        &self.colors
    }

    pub fn revision(&self) -> &str {
        &self.revision
    }

    pub fn custom_entries(&self) -> &[CustomCourseEntry] {
        self.custom.list()
    }

    pub fn color_hex(&self, name: &str) -> Option<&str> {
        let idx = self.colors.get(name)?;
        self.config.palette.colors.get(idx).map(String::as_str)
    }

    /// Replaces the institutional feed. Colors of names seen before are kept.
    pub fn load_institutional(&mut self, buckets: WeekBuckets) -> RebuildSummary {
        self.institutional = buckets;
        let summary = self.rebuild();
        info!(
            institutional = self.institutional.len(),
            merged = summary.merged_records,
            new_colors = summary.newly_colored.len(),
            "institutional schedule loaded"
        );
        summary
    }

    pub fn clear_institutional(&mut self) -> RebuildSummary {
        self.load_institutional(WeekBuckets::new())
    }

    pub fn add_custom(&mut self, input: CustomCourseInput) -> Result<String, CustomStoreError> {
        let id = self.custom.add(input)?;
        self.rebuild();
        info!(id = %id, total = self.custom.len(), "custom course added");
        Ok(id)
    }

    pub fn update_custom(&mut self, id: &str, input: CustomCourseInput) -> Result<(), CustomStoreError> {
        self.custom.update(id, input)?;
        self.rebuild();
        info!(id = %id, "custom course updated");
        Ok(())
    }

    pub fn delete_custom(&mut self, id: &str) -> Result<CustomCourseEntry, CustomStoreError> {
        let removed = self.custom.delete(id)?;
        self.rebuild();
        info!(id = %id, total = self.custom.len(), "custom course deleted");
        Ok(removed)
    }

    fn rebuild(&mut self) -> RebuildSummary {
        let custom = self.custom.to_buckets(self.config.weeks.count);
        self.merged = merge_sources(&self.institutional, &custom);
        let newly_colored = self
            .colors
            .extend_with(&footprints(&self.merged), self.config.palette.colors.len());
        self.revision = fingerprint(&self.merged);
        RebuildSummary {
            merged_records: self.merged.len(),
            newly_colored,
        }
    }
}

/// Short hex digest of the merged schedule.
pub fn fingerprint(merged: &WeekBuckets) -> String {
    let bytes = serde_json::to_vec(merged).unwrap_or_default();
    let digest = Sha256::digest(&bytes);
    hex::encode(&digest[..16])
}
