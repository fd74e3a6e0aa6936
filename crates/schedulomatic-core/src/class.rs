//! Class match and selection types for the lookup.

use serde::{Deserialize, Deserializer, Serialize};

/// One searchable candidate returned by the class directory.
///
/// The label is split into `pre`/`mark`/`post` around the substring that
/// matched the search term, so the UI can highlight the match. The split must
/// reassemble to the full label; see [`ClassMatch::is_consistent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMatch {
    /// Unique identifier within the current result set, e.g. the
    /// fully-qualified class name.
    pub value: String,

    /// Primary display text.
    pub label: String,

    /// Label text before the matched substring.
    #[serde(default)]
    pub pre: String,

    /// The matched substring, rendered highlighted.
    #[serde(default)]
    pub mark: String,

    /// Label text after the matched substring.
    #[serde(default)]
    pub post: String,

    /// Whether the class can run as a batch job.
    ///
    /// The directory wire format historically sends `"true"`/`"false"`
    /// strings; both forms deserialize.
    #[serde(default, deserialize_with = "flexible_bool")]
    pub batchable: bool,

    /// Whether the class implements the schedulable interface.
    #[serde(default, deserialize_with = "flexible_bool")]
    pub schedulable: bool,
}

impl ClassMatch {
    /// Create a match with no highlighted substring.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            value: value.into(),
            post: label.clone(),
            label,
            pre: String::new(),
            mark: String::new(),
            batchable: false,
            schedulable: false,
        }
    }

    /// Set the highlight split. Callers are responsible for keeping
    /// `pre + mark + post == label`.
    pub fn with_highlight(
        mut self,
        pre: impl Into<String>,
        mark: impl Into<String>,
        post: impl Into<String>,
    ) -> Self {
        self.pre = pre.into();
        self.mark = mark.into();
        self.post = post.into();
        self
    }

    /// Set the batchable/schedulable flags.
    pub fn with_flags(mut self, batchable: bool, schedulable: bool) -> Self {
        self.batchable = batchable;
        self.schedulable = schedulable;
        self
    }

    /// Check the highlight invariant: the split reassembles to the label.
    pub fn is_consistent(&self) -> bool {
        let mut assembled = String::with_capacity(self.label.len());
        assembled.push_str(&self.pre);
        assembled.push_str(&self.mark);
        assembled.push_str(&self.post);
        assembled == self.label
    }
}

/// Accept both native booleans and `"true"`/`"false"` strings.
fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Text(s) => s.eq_ignore_ascii_case("true"),
    })
}

/// The finalized, externally bound chosen value of the lookup.
///
/// Replaced wholesale on selection or removal, never partially mutated.
/// The empty state corresponds to "nothing selected".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(Option<ClassMatch>);

impl Selection {
    /// The empty selection.
    pub fn none() -> Self {
        Self(None)
    }

    /// Select the given match.
    pub fn of(class: ClassMatch) -> Self {
        Self(Some(class))
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// The selected match, if any.
    pub fn class(&self) -> Option<&ClassMatch> {
        self.0.as_ref()
    }

    /// The selected value, if any.
    pub fn value(&self) -> Option<&str> {
        self.0.as_ref().map(|c| c.value.as_str())
    }

    /// The notification payload describing this selection state.
    pub fn change(&self) -> SelectionChange {
        match &self.0 {
            Some(class) => SelectionChange {
                value: Some(class.value.clone()),
                batchable: Some(class.batchable),
                schedulable: Some(class.schedulable),
            },
            None => SelectionChange::empty(),
        }
    }
}

impl From<ClassMatch> for Selection {
    fn from(class: ClassMatch) -> Self {
        Self::of(class)
    }
}

/// Payload of the selection-changed notification emitted by the lookup.
///
/// All fields `None` signals a removal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionChange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub batchable: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedulable: Option<bool>,
}

impl SelectionChange {
    /// The removal payload.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether this payload signals a removal.
    pub fn is_removal(&self) -> bool {
        self.value.is_none()
    }
}
