//! Lookup state model.
//!
//! The phase is an explicit tag rather than a bundle of booleans, so
//! inconsistent flag combinations are impossible to represent.

/// Top-level lookup phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LookupPhase {
    /// Term empty or below the search threshold; nothing pending.
    #[default]
    Idle,

    /// Term at or above the threshold; debounce timer pending.
    Typing,

    /// A directory call is outstanding.
    Searching,

    /// Results are available in the dropdown.
    ResultsOpen,

    /// A class has been chosen; the read-only chip is shown.
    Selected,
}

impl LookupPhase {
    /// Whether the editable search input is shown (vs the read-only chip).
    pub fn is_editable(&self) -> bool {
        !matches!(self, LookupPhase::Selected)
    }

    /// Whether a directory call is outstanding.
    pub fn is_searching(&self) -> bool {
        matches!(self, LookupPhase::Searching)
    }
}

/// Geometry of the option list, kept current by the host.
///
/// The controller never walks a render tree; the host pushes geometry here
/// and the controller computes scroll adjustments from it. All values are in
/// the host's layout units, with `scroll_top` in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListViewport {
    /// Height of one option row.
    pub row_height: f32,

    /// Height of the visible scroll region.
    pub height: f32,

    /// Current scroll offset of the list.
    pub scroll_top: f32,
}

impl ListViewport {
    pub fn new(row_height: f32, height: f32) -> Self {
        Self {
            row_height,
            height,
            scroll_top: 0.0,
        }
    }

    /// Whether the row at `index` lies fully inside the visible region.
    pub fn is_row_visible(&self, index: usize) -> bool {
        let top = index as f32 * self.row_height;
        let bottom = top + self.row_height;
        top >= self.scroll_top && bottom <= self.scroll_top + self.height
    }

    /// Whether the row at `index` extends below the visible region.
    pub fn is_row_below(&self, index: usize) -> bool {
        (index as f32 + 1.0) * self.row_height > self.scroll_top + self.height
    }

    /// Whether the row at `index` extends above the visible region.
    pub fn is_row_above(&self, index: usize) -> bool {
        (index as f32) * self.row_height < self.scroll_top
    }

    /// Reset scroll to the top of the list.
    pub fn scroll_to_top(&mut self) {
        self.scroll_top = 0.0;
    }

    /// Scroll so the last of `row_count` rows is visible.
    pub fn scroll_to_bottom(&mut self, row_count: usize) {
        let content = row_count as f32 * self.row_height;
        self.scroll_top = (content - self.height).max(0.0);
    }

    /// Move down by exactly one row height.
    pub fn nudge_down(&mut self) {
        self.scroll_top += self.row_height;
    }

    /// Move up by exactly one row height.
    pub fn nudge_up(&mut self) {
        self.scroll_top = (self.scroll_top - self.row_height).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_predicates() {
        assert!(LookupPhase::Idle.is_editable());
        assert!(!LookupPhase::Selected.is_editable());
        assert!(LookupPhase::Searching.is_searching());
        assert!(!LookupPhase::ResultsOpen.is_searching());
    }

    // Viewport of 4 visible rows at 20 units each.
    fn viewport() -> ListViewport {
        ListViewport::new(20.0, 80.0)
    }

    #[test]
    fn test_row_visibility() {
        let vp = viewport();
        assert!(vp.is_row_visible(0));
        assert!(vp.is_row_visible(3));
        assert!(!vp.is_row_visible(4));
        assert!(vp.is_row_below(4));
        assert!(!vp.is_row_above(0));
    }

    #[test]
    fn test_nudge_keeps_single_step() {
        let mut vp = viewport();
        vp.nudge_down();
        assert_eq!(vp.scroll_top, 20.0);
        assert!(vp.is_row_visible(4));
        assert!(vp.is_row_above(0));

        vp.nudge_up();
        assert_eq!(vp.scroll_top, 0.0);
        // Nudging above the top clamps
        vp.nudge_up();
        assert_eq!(vp.scroll_top, 0.0);
    }

    #[test]
    fn test_scroll_to_bottom_clamps_short_lists() {
        let mut vp = viewport();
        vp.scroll_to_bottom(10);
        assert_eq!(vp.scroll_top, 120.0);
        assert!(vp.is_row_visible(9));

        vp.scroll_to_bottom(2);
        assert_eq!(vp.scroll_top, 0.0);
    }
}
