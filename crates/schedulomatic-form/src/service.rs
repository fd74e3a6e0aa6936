//! The scheduling backend the form talks to.
//!
//! Mirrors the directory seam in the lookup crate: a future-returning trait
//! so the caller controls spawning, with a mock for tests.

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use schedulomatic_core::ScheduleError;

use crate::entry::{EntryId, FlowOption, ScheduleEntry};

/// Trait for scheduler backend operations.
pub trait SchedulerService: Send + Sync {
    /// Initial handshake. Resolves with the flows available for scheduling.
    ///
    /// Fails with [`ScheduleError::NoPermission`] when the user lacks the
    /// required permission set, and [`ScheduleError::FlowRetrieval`] when
    /// only the flow list is unavailable.
    fn init(&self) -> BoxFuture<'static, Result<Vec<FlowOption>, ScheduleError>>;

    /// Persist a schedule entry. Resolves with its backend identifier.
    fn create_entry(
        &self,
        entry: ScheduleEntry,
    ) -> BoxFuture<'static, Result<EntryId, ScheduleError>>;

    /// Enqueue the job for the persisted entry.
    fn schedule(
        &self,
        job_name: String,
        start: DateTime<Utc>,
        entry_id: EntryId,
    ) -> BoxFuture<'static, Result<(), ScheduleError>>;
}

// =============================================================================
// Mock Service for Testing
// =============================================================================


// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::mock::*;
    use super::*;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_mock_init_returns_flows() {
        let service = MockScheduler::new().with_flows(vec![FlowOption::new("A flow", "A_flow")]);

        let flows = service.init().await.unwrap();
        assert_eq!(flows.len(), 1);
        assert_eq!(flows[0].value, "A_flow");
    }

    #[tokio::test]
    async fn test_mock_init_failure() {
        let service = MockScheduler::new().with_init_failure(ScheduleError::NoPermission);
        assert!(matches!(
            service.init().await,
            Err(ScheduleError::NoPermission)
        ));
    }

    #[tokio::test]
    async fn test_mock_schedule_records_call() {
        let service = MockScheduler::new();
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let id = EntryId::new("a07000001");

        service
            .schedule("Job".to_string(), start, id.clone())
            .await
            .unwrap();

        let calls = service.scheduled.lock();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], ("Job".to_string(), start, id));
    }
}
