//! Schedule entry records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Backend identifier of a persisted schedule entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A flow the user can schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowOption {
    pub label: String,
    pub value: String,

    /// Managed-package prefix, when the flow ships in one.
    #[serde(default)]
    pub namespace_prefix: Option<String>,
}

impl FlowOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            namespace_prefix: None,
        }
    }

    pub fn with_namespace(mut self, prefix: impl Into<String>) -> Self {
        self.namespace_prefix = Some(prefix.into());
        self
    }

    /// The fully qualified flow name the scheduler expects:
    /// `prefix__value` when namespaced, plain `value` otherwise.
    pub fn qualified_name(&self) -> String {
        match &self.namespace_prefix {
            Some(prefix) => format!("{prefix}__{}", self.value),
            None => self.value.clone(),
        }
    }
}

/// One schedule entry, as persisted by the backend.
///
/// Field population rules depend on the scheduling mode; see
/// [`crate::SchedulerForm::build_entry`]. Fields that do not apply to the
/// chosen mode are `None`, never empty strings or zeroes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Display name of the job, including the creation timestamp.
    pub name: String,

    /// Anonymous code body; code mode only.
    pub anonymous_code: Option<String>,

    /// Batch size; batchable class mode only, and only when positive.
    pub batch_size: Option<u32>,

    /// Class name; class mode only.
    pub class_name: Option<String>,

    /// End of the daily window; daily mode only.
    pub daily_end: Option<DateTime<Utc>>,

    /// Start of the daily window. Mirrors `start`.
    pub daily_start: DateTime<Utc>,

    /// End of the repeat window; repeating jobs only.
    pub end: Option<DateTime<Utc>>,

    /// Qualified flow name; flow mode only.
    pub flow_name: Option<String>,

    pub is_batchable: bool,
    pub is_daily: bool,
    pub is_schedulable: bool,

    /// Minutes between repeats; repeating jobs only.
    pub repeat_interval: Option<u32>,

    /// Minutes between batch reschedules; batchable class mode only.
    pub reschedule_interval: Option<u32>,

    /// First run time.
    pub start: DateTime<Utc>,
}
