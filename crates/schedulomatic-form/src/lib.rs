//! Multi-mode job scheduling form.
//!
//! [`SchedulerForm`] schedules an Apex class, a flow, or an anonymous code
//! block through a [`SchedulerService`] backend: one shared time
//! configuration (start, repeat window, daily window), per-mode target
//! fields, and per-field validity that feeds a single submit gate.

pub mod entry;
pub mod form;
pub mod service;

pub use entry::{EntryId, FlowOption, ScheduleEntry};
pub use form::{FormPhase, MainOption, SchedulerForm};
pub use service::SchedulerService;
