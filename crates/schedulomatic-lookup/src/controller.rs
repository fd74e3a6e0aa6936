//! The lookup controller.
//!
//! Owns search state, the keyboard-navigation state machine, and the current
//! selection. Handlers consume input events, mutate state synchronously, and
//! return [`Effect`]s for the host to apply; nothing here touches timers,
//! channels, or a render tree.

use schedulomatic_core::{
    ClassMatch, DirectoryError, LookupConfig, LookupLabels, Selection, Toast,
};

use crate::effect::{Effect, ScrollRequest};
use crate::keys::Key;
use crate::option_row::OptionRow;
use crate::state::{ListViewport, LookupPhase};

/// Searchable class lookup combobox.
pub struct ClassLookup {
    config: LookupConfig,
    labels: LookupLabels,

    phase: LookupPhase,
    selection: Selection,
    search_term: String,

    /// Matches in directory order; never re-sorted here.
    options: Vec<ClassMatch>,

    /// Value of the keyboard/pointer-highlighted match. Always names a
    /// member of `options` when `Some`.
    active: Option<String>,

    dropdown_open: bool,
    focused: bool,

    /// Whether the pointer-down guard on the option list is engaged, so a
    /// scrollbar interaction does not trigger a blur-close.
    pointer_guard: bool,

    /// List geometry pushed by the host; `None` means the host does not
    /// track geometry and nudge requests are skipped.
    viewport: Option<ListViewport>,
}

impl ClassLookup {
    pub fn new(config: LookupConfig, labels: LookupLabels) -> Self {
        Self {
            config,
            labels,
            phase: LookupPhase::Idle,
            selection: Selection::none(),
            search_term: String::new(),
            options: Vec::new(),
            active: None,
            dropdown_open: false,
            focused: false,
            pointer_guard: false,
            viewport: None,
        }
    }

    // -------------------------------------------------------------------------
    // Public property: the selection
    // -------------------------------------------------------------------------

    pub fn selected_class(&self) -> &Selection {
        &self.selection
    }

    /// Replace the selection wholesale. Drives which input mode is shown;
    /// does not emit a notification (the host initiated the change).
    pub fn set_selected_class(&mut self, selection: Selection) {
        self.phase = if selection.is_empty() {
            LookupPhase::Idle
        } else {
            LookupPhase::Selected
        };
        self.selection = selection;
    }

    // -------------------------------------------------------------------------
    // Render accessors
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    pub fn labels(&self) -> &LookupLabels {
        &self.labels
    }

    pub fn phase(&self) -> LookupPhase {
        self.phase
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn options(&self) -> &[ClassMatch] {
        &self.options
    }

    pub fn active_option(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn has_focus(&self) -> bool {
        self.focused
    }

    pub fn is_searching(&self) -> bool {
        self.phase.is_searching()
    }

    /// Dropdown is rendered open only when flagged open and non-empty.
    pub fn dropdown_visible(&self) -> bool {
        self.dropdown_open && !self.options.is_empty()
    }

    /// Text shown in the input: the chosen value in selected mode, the
    /// search term otherwise.
    pub fn input_text(&self) -> &str {
        match self.phase {
            LookupPhase::Selected => self.selection.value().unwrap_or(""),
            _ => &self.search_term,
        }
    }

    /// Placeholder is blank in selected mode.
    pub fn placeholder(&self) -> &str {
        match self.phase {
            LookupPhase::Selected => "",
            _ => &self.labels.class_input_placeholder,
        }
    }

    /// Fresh rows for the current options, synced to the active option.
    pub fn rows(&self) -> Vec<OptionRow> {
        self.options
            .iter()
            .map(|item| OptionRow::new(item.clone(), self.active.clone()))
            .collect()
    }

    /// Push current list geometry. Call whenever the host lays out or
    /// scrolls the dropdown.
    pub fn update_viewport(&mut self, viewport: ListViewport) {
        self.viewport = Some(viewport);
    }

    // -------------------------------------------------------------------------
    // Focus / blur
    // -------------------------------------------------------------------------

    pub fn handle_focus(&mut self) -> Vec<Effect> {
        self.dropdown_open = true;
        self.focused = true;
        self.pointer_guard = true;
        Vec::new()
    }

    /// The host defers blur by one tick and reports whether focus stayed
    /// inside the lookup subtree.
    pub fn handle_blur(&mut self, still_inside: bool) -> Vec<Effect> {
        if still_inside {
            return Vec::new();
        }

        self.dropdown_open = false;
        self.focused = false;
        self.pointer_guard = false;
        vec![Effect::SetActiveDescendant(None)]
    }

    pub fn pointer_guard_engaged(&self) -> bool {
        self.pointer_guard
    }

    // -------------------------------------------------------------------------
    // Input / debounce
    // -------------------------------------------------------------------------

    /// Handle a changed search term. The previous timer is always canceled;
    /// the most recent keystroke wins.
    pub fn handle_input(&mut self, term: &str) -> Vec<Effect> {
        self.search_term = term.to_string();
        let mut effects = vec![Effect::CancelPendingSearch];

        if self.search_term.chars().count() < self.config.min_search_len {
            self.options.clear();
            self.active = None;
            self.dropdown_open = true;
            self.phase = LookupPhase::Idle;
            return effects;
        }

        self.phase = LookupPhase::Typing;
        effects.push(Effect::ScheduleSearch {
            term: self.search_term.clone(),
        });
        effects
    }

    /// Mark the directory call outstanding. Called by the host when the
    /// debounce timer fires, immediately before the call.
    pub fn begin_search(&mut self) {
        self.phase = LookupPhase::Searching;
    }

    /// Apply a completed directory call. Success replaces the options
    /// verbatim; failure keeps the previous options and surfaces a sticky
    /// toast. The searching state ends in both outcomes.
    pub fn apply_search_results(
        &mut self,
        result: Result<Vec<ClassMatch>, DirectoryError>,
    ) -> Vec<Effect> {
        match result {
            Ok(options) => {
                tracing::debug!(count = options.len(), "search results applied");
                self.options = options;
                if let Some(active) = &self.active {
                    if !self.options.iter().any(|o| &o.value == active) {
                        self.active = None;
                    }
                }
                self.phase = LookupPhase::ResultsOpen;
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(error = %err, "class search failed");
                self.phase = if self.options.is_empty() {
                    LookupPhase::Idle
                } else {
                    LookupPhase::ResultsOpen
                };
                vec![Effect::ShowToast(Toast::error(err.user_message()))]
            }
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard navigation
    // -------------------------------------------------------------------------

    /// Keyboard handler for the editable search input.
    pub fn handle_key(&mut self, key: Key) -> Vec<Effect> {
        let is_vertical = matches!(key, Key::ArrowUp | Key::ArrowDown);
        if is_vertical && self.options.is_empty() {
            // Nothing to navigate
            return Vec::new();
        }

        if key != Key::Escape && !self.dropdown_open {
            self.dropdown_open = true;
        }

        match key {
            Key::ArrowUp | Key::ArrowDown => self.move_active(key),
            Key::Enter => self.finalize_selection(),
            Key::Escape => self.handle_escape(),
            Key::Delete | Key::Backspace => Vec::new(),
        }
    }

    /// Keyboard handler for the read-only chip shown in selected mode.
    pub fn handle_readonly_key(&mut self, key: Key) -> Vec<Effect> {
        match key {
            Key::Delete | Key::Backspace => self.handle_remove(),
            _ => Vec::new(),
        }
    }

    fn move_active(&mut self, key: Key) -> Vec<Effect> {
        let last = self.options.len() - 1;
        let active_idx = self
            .active
            .as_ref()
            .and_then(|value| self.options.iter().position(|o| &o.value == value));

        let mut effects = Vec::new();
        let next_idx = match (key, active_idx) {
            (Key::ArrowDown, None) => 0,
            (Key::ArrowUp, None) => last,
            (Key::ArrowDown, Some(idx)) if idx == last => {
                // Wrap to the first match and reset scroll to the top
                if let Some(vp) = &mut self.viewport {
                    vp.scroll_to_top();
                }
                effects.push(Effect::ScrollList(ScrollRequest::ToTop));
                0
            }
            (Key::ArrowUp, Some(0)) => {
                // Wrap to the last match and bring it into view
                if let Some(vp) = &mut self.viewport {
                    vp.scroll_to_bottom(self.options.len());
                }
                effects.push(Effect::ScrollList(ScrollRequest::ToBottom));
                last
            }
            (Key::ArrowDown, Some(idx)) => idx + 1,
            (Key::ArrowUp, Some(idx)) => idx - 1,
            _ => unreachable!("move_active is only called for arrow keys"),
        };

        let next_value = self.options[next_idx].value.clone();
        self.active = Some(next_value.clone());
        effects.push(Effect::SetActiveDescendant(Some(next_value)));

        // Single-step nudge when the new active row fell out of view
        if let Some(vp) = &mut self.viewport {
            if vp.is_row_below(next_idx) {
                vp.nudge_down();
                effects.push(Effect::ScrollList(ScrollRequest::NudgeDown));
            } else if vp.is_row_above(next_idx) {
                vp.nudge_up();
                effects.push(Effect::ScrollList(ScrollRequest::NudgeUp));
            }
        }

        effects
    }

    fn handle_escape(&mut self) -> Vec<Effect> {
        self.options.clear();
        self.active = None;
        self.dropdown_open = false;
        self.phase = LookupPhase::Idle;
        vec![
            Effect::CancelPendingSearch,
            Effect::SetActiveDescendant(None),
        ]
    }

    // -------------------------------------------------------------------------
    // Selection lifecycle
    // -------------------------------------------------------------------------

    /// Child row reported a click.
    pub fn handle_option_selected(&mut self, value: &str) -> Vec<Effect> {
        let mut effects = self.handle_option_activated(value);
        effects.extend(self.finalize_selection());
        effects
    }

    /// Child row reported a pointer-enter.
    pub fn handle_option_activated(&mut self, value: &str) -> Vec<Effect> {
        if !self.options.iter().any(|o| o.value == value) {
            tracing::debug!(value, "activation for unknown option ignored");
            return Vec::new();
        }

        self.active = Some(value.to_string());
        vec![Effect::SetActiveDescendant(Some(value.to_string()))]
    }

    /// Finalize on the current active option. No-op when none is active;
    /// the active option is always a valid member, so selecting an absent
    /// match is impossible.
    fn finalize_selection(&mut self) -> Vec<Effect> {
        let Some(active) = self.active.take() else {
            return Vec::new();
        };
        let Some(chosen) = self.options.iter().find(|o| o.value == active).cloned() else {
            return Vec::new();
        };

        tracing::debug!(value = %chosen.value, "option selected");
        self.selection = Selection::of(chosen);
        self.options.clear();
        self.dropdown_open = false;
        self.search_term.clear();
        self.phase = LookupPhase::Selected;

        // A search still pending for the old term must not reopen the
        // dropdown after the choice is made
        vec![
            Effect::CancelPendingSearch,
            Effect::SelectionChanged(self.selection.change()),
        ]
    }

    /// Clear button: term and matches only; the selection is untouched.
    pub fn handle_clear(&mut self) -> Vec<Effect> {
        self.search_term.clear();
        self.options.clear();
        self.active = None;
        self.phase = LookupPhase::Idle;
        vec![Effect::CancelPendingSearch, Effect::FocusInput]
    }

    /// Remove the selection. State resets synchronously; refocus and the
    /// removal notification go out on the next scheduling turn so the
    /// downstream form observes the removal as a distinct, deferred event.
    pub fn handle_remove(&mut self) -> Vec<Effect> {
        tracing::debug!("selection removed");
        self.selection = Selection::none();
        self.options.clear();
        self.active = None;
        self.dropdown_open = false;
        self.phase = LookupPhase::Idle;

        vec![Effect::Deferred(vec![
            Effect::FocusInput,
            Effect::SelectionChanged(self.selection.change()),
        ])]
    }
}

impl Default for ClassLookup {
    fn default() -> Self {
        Self::new(LookupConfig::default(), LookupLabels::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schedulomatic_core::SelectionChange;

    fn matches() -> Vec<ClassMatch> {
        vec![
            ClassMatch::new("class1", "class1").with_flags(true, false),
            ClassMatch::new("class2", "class2").with_flags(false, true),
            ClassMatch::new("class3", "class3").with_flags(false, true),
        ]
    }

    fn lookup_with_results() -> ClassLookup {
        let mut lookup = ClassLookup::default();
        lookup.handle_focus();
        lookup.handle_input("baddabing");
        lookup.begin_search();
        lookup.apply_search_results(Ok(matches()));
        lookup
    }

    fn assert_active_is_valid(lookup: &ClassLookup) {
        if let Some(active) = lookup.active_option() {
            assert!(
                lookup.options().iter().any(|o| o.value == active),
                "active option {active:?} not in current options"
            );
        }
    }

    #[test]
    fn test_short_term_never_schedules_search() {
        let mut lookup = ClassLookup::default();

        for term in ["", "b", "ba"] {
            let effects = lookup.handle_input(term);
            assert_eq!(effects, vec![Effect::CancelPendingSearch], "term {term:?}");
            assert_eq!(lookup.phase(), LookupPhase::Idle);
        }
    }

    #[test]
    fn test_short_term_clears_options_and_keeps_dropdown_open() {
        let mut lookup = lookup_with_results();
        lookup.handle_key(Key::ArrowDown);
        assert!(lookup.active_option().is_some());

        lookup.handle_input("ba");
        assert!(lookup.options().is_empty());
        assert!(lookup.active_option().is_none());
        // Flagged open, but invisible while empty
        assert!(!lookup.dropdown_visible());
        assert_active_is_valid(&lookup);
    }

    #[test]
    fn test_long_term_schedules_after_cancel() {
        let mut lookup = ClassLookup::default();
        let effects = lookup.handle_input("baddabing");
        assert_eq!(
            effects,
            vec![
                Effect::CancelPendingSearch,
                Effect::ScheduleSearch {
                    term: "baddabing".to_string()
                },
            ]
        );
        assert_eq!(lookup.phase(), LookupPhase::Typing);
    }

    #[test]
    fn test_search_failure_keeps_options_and_toasts() {
        let mut lookup = lookup_with_results();
        lookup.begin_search();
        assert!(lookup.is_searching());

        let effects = lookup.apply_search_results(Err(DirectoryError::Backend {
            message: Some("Row lock contention".to_string()),
            detail: "500".to_string(),
        }));

        assert!(!lookup.is_searching());
        assert_eq!(lookup.options().len(), 3);
        match &effects[..] {
            [Effect::ShowToast(toast)] => {
                assert_eq!(toast.message, "Row lock contention");
            }
            other => panic!("expected a single toast, got {other:?}"),
        }
    }

    #[test]
    fn test_results_replace_invalidates_stale_active() {
        let mut lookup = lookup_with_results();
        lookup.handle_key(Key::ArrowDown);
        assert_eq!(lookup.active_option(), Some("class1"));

        lookup.begin_search();
        lookup.apply_search_results(Ok(vec![ClassMatch::new("other", "other")]));
        assert!(lookup.active_option().is_none());
        assert_active_is_valid(&lookup);
    }

    #[test]
    fn test_arrows_noop_on_empty_results() {
        let mut lookup = ClassLookup::default();
        assert!(lookup.handle_key(Key::ArrowDown).is_empty());
        assert!(lookup.handle_key(Key::ArrowUp).is_empty());
        assert!(lookup.active_option().is_none());
    }

    #[test]
    fn test_down_jumps_to_first_and_up_jumps_to_last() {
        let mut lookup = lookup_with_results();
        lookup.handle_key(Key::ArrowDown);
        assert_eq!(lookup.active_option(), Some("class1"));

        let mut lookup = lookup_with_results();
        lookup.handle_key(Key::ArrowUp);
        assert_eq!(lookup.active_option(), Some("class3"));
    }

    #[test]
    fn test_down_wraps_after_last() {
        let mut lookup = lookup_with_results();

        // N presses from no active option reach the last match
        let mut seen = Vec::new();
        for _ in 0..3 {
            lookup.handle_key(Key::ArrowDown);
            seen.push(lookup.active_option().unwrap().to_string());
            assert_active_is_valid(&lookup);
        }
        assert_eq!(seen, ["class1", "class2", "class3"]);

        // One more wraps back to the first and resets scroll to top
        let effects = lookup.handle_key(Key::ArrowDown);
        assert_eq!(lookup.active_option(), Some("class1"));
        assert!(effects.contains(&Effect::ScrollList(ScrollRequest::ToTop)));
    }

    #[test]
    fn test_up_from_first_wraps_to_last_with_scroll() {
        let mut lookup = lookup_with_results();
        lookup.handle_key(Key::ArrowDown);
        let effects = lookup.handle_key(Key::ArrowUp);
        assert_eq!(lookup.active_option(), Some("class3"));
        assert!(effects.contains(&Effect::ScrollList(ScrollRequest::ToBottom)));
    }

    #[test]
    fn test_navigation_nudges_when_row_leaves_viewport() {
        let mut lookup = lookup_with_results();
        // Two visible rows of height 20
        lookup.update_viewport(ListViewport::new(20.0, 40.0));

        lookup.handle_key(Key::ArrowDown);
        lookup.handle_key(Key::ArrowDown);
        // Third row is below the fold
        let effects = lookup.handle_key(Key::ArrowDown);
        assert!(effects.contains(&Effect::ScrollList(ScrollRequest::NudgeDown)));

        // Back up two: first row is now above the fold
        lookup.handle_key(Key::ArrowUp);
        let effects = lookup.handle_key(Key::ArrowUp);
        assert!(effects.contains(&Effect::ScrollList(ScrollRequest::NudgeUp)));
    }

    #[test]
    fn test_enter_with_no_active_option_is_noop() {
        let mut lookup = lookup_with_results();
        let effects = lookup.handle_key(Key::Enter);
        assert!(effects.is_empty());
        assert!(lookup.selected_class().is_empty());
        assert_eq!(lookup.options().len(), 3);
    }

    #[test]
    fn test_keyboard_scenario_lands_on_index_one_and_selects() {
        let mut lookup = ClassLookup::default();
        lookup.handle_focus();

        // Two characters: no search scheduled
        let effects = lookup.handle_input("ba");
        assert!(!effects
            .iter()
            .any(|e| matches!(e, Effect::ScheduleSearch { .. })));

        // Full term: search scheduled, results arrive
        lookup.handle_input("baddabing");
        lookup.begin_search();
        lookup.apply_search_results(Ok(matches()));

        // Down, down, up, up (wraps to last), down (wraps to first), down
        for key in [
            Key::ArrowDown,
            Key::ArrowDown,
            Key::ArrowUp,
            Key::ArrowUp,
            Key::ArrowDown,
            Key::ArrowDown,
        ] {
            lookup.handle_key(key);
            assert_active_is_valid(&lookup);
        }
        assert_eq!(lookup.active_option(), Some("class2"));

        let effects = lookup.handle_key(Key::Enter);
        let changes: Vec<_> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::SelectionChanged(c) => Some(c.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].value.as_deref(), Some("class2"));
        assert_eq!(changes[0].schedulable, Some(true));

        assert_eq!(lookup.phase(), LookupPhase::Selected);
        assert!(lookup.options().is_empty());
        assert_eq!(lookup.input_text(), "class2");
        assert_eq!(lookup.placeholder(), "");
        assert_eq!(lookup.search_term(), "");
    }

    #[test]
    fn test_select_then_remove_round_trip() {
        let mut lookup = lookup_with_results();
        lookup.handle_key(Key::ArrowDown);
        let effects = lookup.handle_key(Key::Enter);
        assert!(matches!(
            &effects[..],
            [Effect::CancelPendingSearch, Effect::SelectionChanged(c)] if !c.is_removal()
        ));
        assert_eq!(lookup.selected_class().value(), Some("class1"));

        let effects = lookup.handle_remove();
        assert!(lookup.selected_class().is_empty());
        assert_eq!(lookup.phase(), LookupPhase::Idle);
        assert_eq!(
            lookup.placeholder(),
            &LookupLabels::default().class_input_placeholder
        );
        assert_eq!(lookup.input_text(), "");

        // Removal notification goes out deferred, after refocus
        assert_eq!(
            effects,
            vec![Effect::Deferred(vec![
                Effect::FocusInput,
                Effect::SelectionChanged(SelectionChange::empty()),
            ])]
        );
    }

    #[test]
    fn test_delete_on_readonly_chip_removes() {
        let mut lookup = lookup_with_results();
        lookup.handle_key(Key::ArrowDown);
        lookup.handle_key(Key::Enter);

        let effects = lookup.handle_readonly_key(Key::Delete);
        assert!(lookup.selected_class().is_empty());
        assert!(matches!(&effects[..], [Effect::Deferred(_)]));

        // Other keys on the chip do nothing
        let mut lookup = lookup_with_results();
        lookup.handle_key(Key::ArrowDown);
        lookup.handle_key(Key::Enter);
        assert!(lookup.handle_readonly_key(Key::ArrowDown).is_empty());
        assert!(!lookup.selected_class().is_empty());
    }

    #[test]
    fn test_escape_clears_and_closes_without_selection_event() {
        let mut lookup = lookup_with_results();
        lookup.handle_key(Key::ArrowDown);
        assert!(lookup.dropdown_visible());

        let effects = lookup.handle_key(Key::Escape);
        assert!(lookup.options().is_empty());
        assert!(lookup.active_option().is_none());
        assert!(!lookup.dropdown_visible());
        assert_eq!(
            effects,
            vec![
                Effect::CancelPendingSearch,
                Effect::SetActiveDescendant(None),
            ]
        );
    }

    #[test]
    fn test_clear_keeps_selection_and_refocuses() {
        let mut lookup = lookup_with_results();
        lookup.handle_key(Key::ArrowDown);
        lookup.handle_key(Key::Enter);
        lookup.handle_input("cla");
        lookup.begin_search();
        lookup.apply_search_results(Ok(matches()));

        // Selection survives a selected-mode set from the host side
        lookup.set_selected_class(Selection::of(ClassMatch::new("kept", "kept")));
        let effects = lookup.handle_clear();
        assert_eq!(lookup.search_term(), "");
        assert!(lookup.options().is_empty());
        assert_eq!(lookup.selected_class().value(), Some("kept"));
        assert!(effects.contains(&Effect::FocusInput));
    }

    #[test]
    fn test_blur_outside_closes_and_unlinks() {
        let mut lookup = lookup_with_results();
        lookup.handle_focus();
        assert!(lookup.pointer_guard_engaged());

        // Focus moved within the lookup: nothing happens
        assert!(lookup.handle_blur(true).is_empty());
        assert!(lookup.has_focus());

        let effects = lookup.handle_blur(false);
        assert!(!lookup.has_focus());
        assert!(!lookup.dropdown_visible());
        assert!(!lookup.pointer_guard_engaged());
        assert_eq!(effects, vec![Effect::SetActiveDescendant(None)]);
    }

    #[test]
    fn test_row_activation_and_click_selection() {
        let mut lookup = lookup_with_results();

        let effects = lookup.handle_option_activated("class3");
        assert_eq!(lookup.active_option(), Some("class3"));
        assert_eq!(
            effects,
            vec![Effect::SetActiveDescendant(Some("class3".to_string()))]
        );

        // Activation for a value not in the result set is ignored
        lookup.handle_option_activated("missing");
        assert_eq!(lookup.active_option(), Some("class3"));
        assert_active_is_valid(&lookup);

        let effects = lookup.handle_option_selected("class2");
        assert_eq!(lookup.selected_class().value(), Some("class2"));
        assert!(effects
            .iter()
            .any(|e| matches!(e, Effect::SelectionChanged(c) if c.value.as_deref() == Some("class2"))));
    }

    #[test]
    fn test_rows_reflect_active_option() {
        let mut lookup = lookup_with_results();
        lookup.handle_key(Key::ArrowDown);

        let rows = lookup.rows();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_highlighted());
        assert!(!rows[1].is_highlighted());
    }
}
