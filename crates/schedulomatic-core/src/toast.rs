//! Toast notification data.
//!
//! Toasts are produced as plain data and handed to the host over a channel;
//! how they are rendered is the host's concern.

use serde::{Deserialize, Serialize};

/// A user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub message: String,
    pub variant: ToastVariant,
    pub mode: ToastMode,
}

impl Toast {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        variant: ToastVariant,
        mode: ToastMode,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            variant,
            mode,
        }
    }

    /// A sticky error toast. Errors stay up until dismissed.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new("Error", message, ToastVariant::Error, ToastMode::Sticky)
    }

    /// A dismissable success toast.
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, ToastVariant::Success, ToastMode::Dismissable)
    }

    /// A dismissable warning toast.
    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, ToastVariant::Warning, ToastMode::Dismissable)
    }
}

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Success,
    Warning,
    Error,
}

/// How long a toast stays visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastMode {
    Dismissable,
    Sticky,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_toasts_are_sticky() {
        let toast = Toast::error("boom");
        assert_eq!(toast.title, "Error");
        assert_eq!(toast.variant, ToastVariant::Error);
        assert_eq!(toast.mode, ToastMode::Sticky);
    }

    #[test]
    fn test_success_toasts_are_dismissable() {
        let toast = Toast::success("Success!", "Job scheduled");
        assert_eq!(toast.variant, ToastVariant::Success);
        assert_eq!(toast.mode, ToastMode::Dismissable);
    }
}
