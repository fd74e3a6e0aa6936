//! The scheduling form.
//!
//! Three scheduling modes over one shared time configuration: a class picked
//! through the lookup, a flow picked from a fixed list, or an anonymous code
//! block. The form tracks per-field validity, derives which sections are
//! visible, and assembles the schedule entry on submit.

use std::sync::Arc;

use chrono::{DateTime, Duration, Timelike, Utc};
use schedulomatic_core::{FormLabels, ScheduleError, SchedulerConfig, SelectionChange, Toast};

use crate::entry::{FlowOption, ScheduleEntry};
use crate::service::SchedulerService;

/// What the form schedules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MainOption {
    #[default]
    Classes,
    Flows,
    Code,
}

impl MainOption {
    pub const ALL: [MainOption; 3] = [MainOption::Classes, MainOption::Flows, MainOption::Code];

    /// Display label for the mode selector.
    pub fn label<'a>(&self, labels: &'a FormLabels) -> &'a str {
        match self {
            MainOption::Classes => &labels.main_choice_class,
            MainOption::Flows => &labels.main_choice_flow,
            MainOption::Code => &labels.main_choice_code,
        }
    }
}

/// Lifecycle of the form as a whole.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPhase {
    /// Initial handshake in progress.
    #[default]
    Loading,

    /// Ready for input.
    Ready,

    /// The user lacks the required permission set; show the static
    /// missing-permissions page instead of the form.
    MissingPermissions,

    /// The handshake failed for another reason.
    Failed,
}

/// Multi-mode job scheduling form.
pub struct SchedulerForm {
    config: SchedulerConfig,
    labels: FormLabels,
    service: Arc<dyn SchedulerService>,

    phase: FormPhase,

    /// Alt text of the busy spinner while an async call is in flight.
    spinner: Option<String>,

    main_option: MainOption,
    flows: Vec<FlowOption>,
    selected_flow: Option<String>,

    selected_class: Option<String>,
    is_batchable: bool,

    start: Option<DateTime<Utc>>,
    start_valid: bool,

    /// Minutes between repeats; zero means the job runs once.
    repeat_interval: u32,
    repeat_interval_valid: bool,

    end: Option<DateTime<Utc>>,
    end_valid: bool,

    is_daily: bool,
    daily_end: Option<DateTime<Utc>>,
    daily_end_valid: bool,

    batch_size: Option<u32>,
    batch_size_valid: bool,
    reschedule_interval: u32,
    reschedule_interval_valid: bool,

    code: String,
    code_valid: bool,
    code_touched: bool,
    code_full: bool,
}

impl SchedulerForm {
    pub fn new(
        config: SchedulerConfig,
        labels: FormLabels,
        service: Arc<dyn SchedulerService>,
    ) -> Self {
        let reschedule_interval = config.default_reschedule_interval;
        Self {
            config,
            labels,
            service,
            phase: FormPhase::Loading,
            spinner: None,
            main_option: MainOption::Classes,
            flows: Vec::new(),
            selected_flow: None,
            selected_class: None,
            is_batchable: false,
            start: None,
            start_valid: true,
            repeat_interval: 0,
            repeat_interval_valid: true,
            end: None,
            end_valid: true,
            is_daily: false,
            daily_end: None,
            daily_end_valid: true,
            batch_size: None,
            batch_size_valid: true,
            reschedule_interval,
            reschedule_interval_valid: true,
            code: String::new(),
            code_valid: false,
            code_touched: false,
            code_full: false,
        }
    }

    // -------------------------------------------------------------------------
    // Initialization
    // -------------------------------------------------------------------------

    /// Run the backend handshake and reset the form to its defaults.
    ///
    /// A flow-retrieval failure degrades gracefully: the form still opens,
    /// with a warning toast and no flows to pick from. A permission failure
    /// swaps the form for the missing-permissions page.
    pub async fn init(&mut self, now: DateTime<Utc>) -> Vec<Toast> {
        self.reset();
        self.spinner = Some(self.labels.spinner_alt_text_loading.clone());

        let mut toasts = Vec::new();
        match self.service.init().await {
            Ok(flows) => {
                self.selected_flow = flows.first().map(|f| f.value.clone());
                self.flows = flows;
                self.start = Some(default_start(now, self.config.start_lead_minutes));
                self.phase = FormPhase::Ready;
            }
            Err(ScheduleError::FlowRetrieval) => {
                tracing::warn!("flow list unavailable, continuing without flows");
                toasts.push(Toast::warning(
                    "Error",
                    self.labels.flow_retrieval_error.clone(),
                ));
                self.start = Some(default_start(now, self.config.start_lead_minutes));
                self.phase = FormPhase::Ready;
            }
            Err(ScheduleError::NoPermission) => {
                self.phase = FormPhase::MissingPermissions;
            }
            Err(err) => {
                tracing::error!(error = %err, "scheduler handshake failed");
                toasts.push(Toast::error(err.user_message()));
                self.phase = FormPhase::Failed;
            }
        }

        self.spinner = None;
        toasts
    }

    fn reset(&mut self) {
        self.phase = FormPhase::Loading;
        self.main_option = MainOption::Classes;
        self.flows.clear();
        self.selected_flow = None;
        self.selected_class = None;
        self.is_batchable = false;
        self.start = None;
        self.start_valid = true;
        self.repeat_interval = 0;
        self.repeat_interval_valid = true;
        self.end = None;
        self.end_valid = true;
        self.is_daily = false;
        self.daily_end = None;
        self.daily_end_valid = true;
        self.batch_size = None;
        self.batch_size_valid = true;
        self.reschedule_interval = self.config.default_reschedule_interval;
        self.reschedule_interval_valid = true;
        self.code.clear();
        self.code_valid = false;
        self.code_touched = false;
        self.code_full = false;
    }

    // -------------------------------------------------------------------------
    // Render accessors
    // -------------------------------------------------------------------------

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn spinner(&self) -> Option<&str> {
        self.spinner.as_deref()
    }

    pub fn labels(&self) -> &FormLabels {
        &self.labels
    }

    pub fn main_option(&self) -> MainOption {
        self.main_option
    }

    pub fn flows(&self) -> &[FlowOption] {
        &self.flows
    }

    pub fn selected_flow(&self) -> Option<&str> {
        self.selected_flow.as_deref()
    }

    pub fn selected_class(&self) -> Option<&str> {
        self.selected_class.as_deref()
    }

    pub fn is_batchable(&self) -> bool {
        self.is_batchable
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    pub fn repeat_interval(&self) -> u32 {
        self.repeat_interval
    }

    pub fn is_daily(&self) -> bool {
        self.is_daily
    }

    /// The time-configuration section is shown once a target is available:
    /// always in class and code mode, in flow mode only with a flow picked.
    pub fn show_form(&self) -> bool {
        match self.main_option {
            MainOption::Classes | MainOption::Code => true,
            MainOption::Flows => self.selected_flow.is_some(),
        }
    }

    /// Batch size applies only to a batchable class.
    pub fn show_batch_size(&self) -> bool {
        self.main_option == MainOption::Classes && self.is_batchable
    }

    /// The end picker appears for repeating jobs.
    pub fn show_end_date_time(&self) -> bool {
        self.repeat_interval > 0
    }

    /// The daily checkbox appears for one-shot jobs and for repeating jobs
    /// whose repeat window fits inside a single day.
    pub fn show_daily(&self) -> bool {
        let Some(start) = self.start else {
            return false;
        };
        if !self.repeat_interval_valid {
            return false;
        }
        if self.end.is_none() && self.repeat_interval > 0 {
            return false;
        }

        if self.show_end_date_time() {
            match self.end {
                Some(end) => end > start && end - start < Duration::days(1),
                None => false,
            }
        } else {
            true
        }
    }

    pub fn show_daily_end_date(&self) -> bool {
        self.show_daily() && self.is_daily
    }

    /// Characters left in the code block.
    pub fn remaining_code(&self) -> usize {
        self.config
            .max_code_length
            .saturating_sub(self.code.chars().count())
    }

    pub fn code_full(&self) -> bool {
        self.code_full
    }

    /// Whether the code field shows an error: only once the user has typed
    /// something, so a pristine form is not covered in red.
    pub fn code_error(&self) -> bool {
        self.code_touched && !self.code_valid
    }

    // -------------------------------------------------------------------------
    // Input handlers
    // -------------------------------------------------------------------------

    pub fn set_main_option(&mut self, option: MainOption) {
        self.main_option = option;
    }

    /// Selection notification from the class lookup.
    pub fn handle_class_selected(&mut self, change: &SelectionChange) {
        self.selected_class = change.value.clone();
        self.is_batchable = change.batchable == Some(true);
    }

    pub fn set_selected_flow(&mut self, value: Option<String>) {
        self.selected_flow = value;
    }

    pub fn set_start(&mut self, value: Option<DateTime<Utc>>, valid: bool) {
        self.start = value;
        self.start_valid = valid;
    }

    pub fn set_end(&mut self, value: Option<DateTime<Utc>>, valid: bool) {
        self.end = value;
        self.end_valid = valid;
    }

    pub fn set_daily_end(&mut self, value: Option<DateTime<Utc>>, valid: bool) {
        self.daily_end = value;
        self.daily_end_valid = valid;
    }

    /// An invalid interval hides the end picker, so stale end-field errors
    /// must not keep the form disabled. A zero interval makes the job
    /// one-shot, which rules out daily mode.
    pub fn set_repeat_interval(&mut self, value: u32, valid: bool) {
        self.repeat_interval = value;
        self.repeat_interval_valid = valid;

        if !valid {
            self.end_valid = true;
        } else if value == 0 {
            self.is_daily = false;
        }
    }

    pub fn set_daily(&mut self, checked: bool) {
        self.is_daily = checked;
        if !checked {
            self.daily_end_valid = true;
        }
    }

    /// Batch size is optional; an empty field is valid.
    pub fn set_batch_size(&mut self, value: Option<u32>, valid: bool) {
        self.batch_size_valid = valid || value.is_none();
        self.batch_size = value;
    }

    pub fn set_reschedule_interval(&mut self, value: u32, valid: bool) {
        self.reschedule_interval = value;
        self.reschedule_interval_valid = valid;
    }

    pub fn set_code(&mut self, text: &str) {
        self.code = text.trim().to_string();
        self.code_valid = !self.code.is_empty();
        self.code_touched = true;
        self.code_full = self.code.chars().count() == self.config.max_code_length;
    }

    // -------------------------------------------------------------------------
    // Submission
    // -------------------------------------------------------------------------

    /// Whether the schedule button is disabled.
    pub fn schedule_disabled(&self) -> bool {
        if !self.start_valid || !self.repeat_interval_valid {
            return true;
        }

        if self.show_end_date_time() {
            if !self.end_valid {
                return true;
            }
            if let (Some(start), Some(end)) = (self.start, self.end) {
                if start >= end {
                    return true;
                }
            }
        }

        if self.is_daily && self.show_daily() {
            if !self.daily_end_valid {
                return true;
            }
            if let (Some(start), Some(daily_end)) = (self.start, self.daily_end) {
                if start >= daily_end {
                    return true;
                }
            }
        }

        if self.show_batch_size() && (!self.batch_size_valid || !self.reschedule_interval_valid) {
            return true;
        }

        match self.main_option {
            MainOption::Classes => self.selected_class.is_none(),
            MainOption::Flows => self.selected_flow.is_none(),
            MainOption::Code => !self.code_valid,
        }
    }

    /// Assemble the job name and entry for the current form state.
    ///
    /// `None` when the current mode has no target yet. Fields that do not
    /// apply to the chosen mode come out as `None`.
    pub fn build_entry(&self, now: DateTime<Utc>) -> Option<(String, ScheduleEntry)> {
        let start = self.start?;

        let (base, flow_name) = match self.main_option {
            MainOption::Classes => (self.selected_class.clone()?, None),
            MainOption::Flows => {
                let selected = self.selected_flow.as_deref()?;
                let flow = self.flows.iter().find(|f| f.value == selected)?;
                (selected.to_string(), Some(flow.qualified_name()))
            }
            MainOption::Code => (self.labels.anonymous_code_job_prefix.clone(), None),
        };

        let job_name = format!("{base} - {}", now.format("%a, %d %b %Y %H:%M:%S GMT"));
        let is_class = self.main_option == MainOption::Classes;
        let is_code = self.main_option == MainOption::Code;

        let entry = ScheduleEntry {
            name: job_name.clone(),
            anonymous_code: is_code.then(|| self.code.clone()),
            batch_size: self
                .batch_size
                .filter(|&size| self.show_batch_size() && size > 0),
            class_name: is_class.then(|| base.clone()),
            daily_end: self
                .daily_end
                .filter(|_| self.is_daily && self.show_daily() && self.daily_end_valid),
            daily_start: start,
            end: self
                .end
                .filter(|_| self.show_end_date_time() && self.end_valid),
            flow_name,
            is_batchable: is_class && self.show_batch_size(),
            is_daily: self.show_daily() && self.is_daily,
            is_schedulable: is_class && !self.show_batch_size(),
            repeat_interval: self.show_end_date_time().then_some(self.repeat_interval),
            reschedule_interval: (is_class && self.show_batch_size())
                .then_some(self.reschedule_interval),
            start,
        };

        Some((job_name, entry))
    }

    /// Persist the entry and enqueue the job.
    pub async fn schedule(&mut self, now: DateTime<Utc>) -> Vec<Toast> {
        if self.schedule_disabled() {
            tracing::debug!("schedule requested while disabled, ignoring");
            return Vec::new();
        }
        let Some((job_name, entry)) = self.build_entry(now) else {
            return Vec::new();
        };
        let start = entry.start;

        self.spinner = Some(self.labels.spinner_alt_text_scheduling.clone());
        tracing::debug!(%job_name, "scheduling job");

        let result = match self.service.create_entry(entry).await {
            Ok(entry_id) => self.service.schedule(job_name, start, entry_id).await,
            Err(err) => Err(err),
        };

        self.spinner = None;
        match result {
            Ok(()) => vec![Toast::success(
                self.labels.toast_success_title.clone(),
                self.labels.toast_success_message.clone(),
            )],
            Err(ScheduleError::StartTimePassed) => {
                vec![Toast::error(self.labels.start_time_passed.clone())]
            }
            Err(err) => vec![Toast::error(err.user_message())],
        }
    }
}

/// Default start time: now truncated to the minute, plus the configured lead.
fn default_start(now: DateTime<Utc>, lead_minutes: i64) -> DateTime<Utc> {
    let rounded = now
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now);
    rounded + Duration::minutes(lead_minutes)
}
