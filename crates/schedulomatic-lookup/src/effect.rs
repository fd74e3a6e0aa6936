//! Effect protocol between the lookup controller and its host.
//!
//! Controller handlers mutate state synchronously and return effects; the
//! host (normally [`crate::LookupDriver`]) applies them. This keeps the state
//! machine free of timers, channels, and render-tree concerns, and makes
//! every transition assertable in plain synchronous tests.

use schedulomatic_core::{SelectionChange, Toast};

/// An instruction for the host, produced by a controller handler.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Start (replacing) the debounce timer for a search with this term.
    ScheduleSearch { term: String },

    /// Abort any pending debounce timer and invalidate in-flight searches.
    CancelPendingSearch,

    /// Update the accessibility active-descendant linkage on the input.
    SetActiveDescendant(Option<String>),

    /// Adjust the option list scroll position.
    ScrollList(ScrollRequest),

    /// Move focus to the search input.
    FocusInput,

    /// Notify the hosting form that the selection changed.
    SelectionChanged(SelectionChange),

    /// Surface a notification to the user.
    ShowToast(Toast),

    /// Apply the inner effects on the next cooperative scheduling turn.
    /// Used by the remove action so refocus happens before the notification.
    Deferred(Vec<Effect>),
}

/// A scroll adjustment for the option list.
///
/// Nudges move by exactly one row height; they keep the active row in view
/// without recentering the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollRequest {
    ToTop,
    ToBottom,
    NudgeUp,
    NudgeDown,
}
