use crate::models::DenseRecord;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Whether rows without a report are kept in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum MaskMode {
    /// Drop rows holding the missing-value marker
    #[value(name = "maskout")]
    MaskOut,
    /// Keep one row per station
    #[value(name = "default")]
    Default,
}

pub struct MaskFilter {
    mode: MaskMode,
}

impl MaskFilter {
    pub fn new(mode: MaskMode) -> Self {
        Self { mode }
    }

    /// Stable filter over densified rows.
    ///
    /// Compaction tests for the missing-value marker itself rather than the
    /// sign of the value, so it stays correct if the unit conversion changes.
    pub fn apply(&self, records: Vec<DenseRecord>) -> Vec<DenseRecord> {
        match self.mode {
            MaskMode::Default => records,
            MaskMode::MaskOut => {
                let before = records.len();
                let kept: Vec<DenseRecord> =
                    records.into_iter().filter(|r| !r.is_missing()).collect();
                debug!("Masked out {} of {} rows", before - kept.len(), before);
                kept
            }
        }
    }
}
