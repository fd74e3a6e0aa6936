//! A single option row in the lookup dropdown.
//!
//! Rows render one match with a highlighted substring and a type icon, track
//! their own hover state, and report user intent upward as [`RowEvent`]s.

use schedulomatic_core::{ClassMatch, LookupLabels};

/// Event a row reports to the lookup controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowEvent {
    /// The row was clicked; payload is the match value.
    Selected(String),

    /// The pointer entered the row; payload is the match value.
    Activated(String),
}

/// Which type icon a row shows. Schedulable wins when a class is both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeIndicator {
    Schedulable,
    Batchable,
}

impl TypeIndicator {
    /// Icon identifier for the host's icon set.
    pub fn icon_name(&self) -> &'static str {
        match self {
            TypeIndicator::Schedulable => "utility:clock",
            TypeIndicator::Batchable => "utility:loop",
        }
    }

    /// Accessible label for the icon.
    pub fn accessible_label<'a>(&self, labels: &'a LookupLabels) -> &'a str {
        match self {
            TypeIndicator::Schedulable => &labels.class_type_schedulable,
            TypeIndicator::Batchable => &labels.class_type_batchable,
        }
    }
}

/// One visible match row.
#[derive(Debug, Clone)]
pub struct OptionRow {
    item: ClassMatch,
    active_option: Option<String>,
    hovered: bool,
}

impl OptionRow {
    /// Create a row for `item`, synced to the controller's active option.
    pub fn new(item: ClassMatch, active_option: Option<String>) -> Self {
        Self {
            item,
            active_option,
            hovered: false,
        }
    }

    pub fn item(&self) -> &ClassMatch {
        &self.item
    }

    /// Keep the controller's active option in sync after keyboard moves.
    pub fn set_active_option(&mut self, active_option: Option<String>) {
        self.active_option = active_option;
    }

    /// Click: report selection intent.
    pub fn handle_click(&self) -> RowEvent {
        RowEvent::Selected(self.item.value.clone())
    }

    /// Pointer enter: flip the local hover flag and report activation.
    pub fn handle_pointer_enter(&mut self) -> RowEvent {
        self.hovered = true;
        RowEvent::Activated(self.item.value.clone())
    }

    /// Pointer leave: local visual reset only, no event. The controller's
    /// active option keeps reflecting the last activation until keyboard
    /// navigation or another row changes it.
    pub fn handle_pointer_leave(&mut self) {
        self.hovered = false;
    }

    /// Highlighted when hovered locally or when the controller's active
    /// option names this row. The two signals are independently sourced.
    pub fn is_highlighted(&self) -> bool {
        self.hovered || self.active_option.as_deref() == Some(self.item.value.as_str())
    }

    /// The label split for rendering: (pre, mark, post).
    pub fn highlight_parts(&self) -> (&str, &str, &str) {
        (&self.item.pre, &self.item.mark, &self.item.post)
    }

    /// Type icon, schedulable taking precedence over batchable.
    pub fn type_indicator(&self) -> TypeIndicator {
        if self.item.schedulable {
            TypeIndicator::Schedulable
        } else {
            TypeIndicator::Batchable
        }
    }
}
