//! Async host for the lookup controller.
//!
//! The driver owns the controller behind a mutex, runs the debounce timer,
//! dispatches directory searches, and applies controller effects. Outcomes
//! the hosting form cares about (selection changes, toasts) flow out over
//! unbounded channels; presentation concerns go through a [`LookupSurface`].
//!
//! ## Cancellation
//!
//! Every `CancelPendingSearch` bumps a generation counter and aborts the
//! pending debounce timer. The timer handle only ever refers to a sleeping
//! task, so aborting it cannot interrupt a directory call mid-flight;
//! in-flight calls instead finish and have their results discarded when
//! their generation no longer matches. A response can never clobber the
//! state of a newer keystroke.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::{Mutex, MutexGuard};
use schedulomatic_core::{
    ClassMatch, DirectoryError, LookupConfig, LookupLabels, SelectionChange, Toast,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::controller::ClassLookup;
use crate::directory::ClassDirectory;
use crate::effect::{Effect, ScrollRequest};
use crate::keys::Key;
use crate::state::ListViewport;

// =============================================================================
// Surface Trait
// =============================================================================

/// Presentation operations the driver delegates to the host.
///
/// These are the effects that only make sense against a concrete render
/// layer. Hosts without one (or tests) can use [`NoopSurface`].
pub trait LookupSurface: Send + Sync {
    /// Update the active-descendant linkage on the search input.
    fn set_active_descendant(&self, value: Option<String>);

    /// Adjust the option list scroll position.
    fn scroll_list(&self, request: ScrollRequest);

    /// Move focus to the search input.
    fn focus_input(&self);
}

/// Surface that ignores every request.
pub struct NoopSurface;

impl LookupSurface for NoopSurface {
    fn set_active_descendant(&self, _value: Option<String>) {}
    fn scroll_list(&self, _request: ScrollRequest) {}
    fn focus_input(&self) {}
}

// =============================================================================
// Outbound Events
// =============================================================================

/// Receiving ends of the driver's outbound channels.
pub struct LookupEvents {
    /// One message per committed selection or removal.
    pub selection_changes: mpsc::UnboundedReceiver<SelectionChange>,

    /// User-facing notifications, mostly search failures.
    pub toasts: mpsc::UnboundedReceiver<Toast>,
}

// =============================================================================
// Driver
// =============================================================================

/// Runs a [`ClassLookup`] against a [`ClassDirectory`].
pub struct LookupDriver {
    /// Handle to ourselves for the tasks we spawn.
    me: Weak<Self>,

    controller: Mutex<ClassLookup>,
    directory: Arc<dyn ClassDirectory>,
    surface: Arc<dyn LookupSurface>,
    debounce: Duration,

    /// Bumped on every cancel; searches carry the generation they were
    /// scheduled under and are discarded when it no longer matches.
    generation: Mutex<u64>,

    /// The sleeping debounce timer, if one is pending.
    pending_timer: Mutex<Option<JoinHandle<()>>>,

    selection_tx: mpsc::UnboundedSender<SelectionChange>,
    toast_tx: mpsc::UnboundedSender<Toast>,
}

impl LookupDriver {
    pub fn new(
        config: LookupConfig,
        labels: LookupLabels,
        directory: Arc<dyn ClassDirectory>,
        surface: Arc<dyn LookupSurface>,
    ) -> (Arc<Self>, LookupEvents) {
        let (selection_tx, selection_rx) = mpsc::unbounded_channel();
        let (toast_tx, toast_rx) = mpsc::unbounded_channel();

        let debounce = Duration::from_millis(config.debounce_ms);
        let driver = Arc::new_cyclic(|me| Self {
            me: me.clone(),
            controller: Mutex::new(ClassLookup::new(config, labels)),
            directory,
            surface,
            debounce,
            generation: Mutex::new(0),
            pending_timer: Mutex::new(None),
            selection_tx,
            toast_tx,
        });

        let events = LookupEvents {
            selection_changes: selection_rx,
            toasts: toast_rx,
        };

        (driver, events)
    }

    /// Direct access to the controller, for render-time reads and host-side
    /// state pushes. Do not hold the guard across an await point.
    pub fn controller(&self) -> MutexGuard<'_, ClassLookup> {
        self.controller.lock()
    }

    // -------------------------------------------------------------------------
    // Input handlers
    // -------------------------------------------------------------------------

    pub fn focus(&self) {
        let effects = self.controller.lock().handle_focus();
        self.apply_effects(effects);
    }

    pub fn blur(&self, still_inside: bool) {
        let effects = self.controller.lock().handle_blur(still_inside);
        self.apply_effects(effects);
    }

    pub fn input(&self, term: &str) {
        let effects = self.controller.lock().handle_input(term);
        self.apply_effects(effects);
    }

    pub fn key(&self, key: Key) {
        let effects = self.controller.lock().handle_key(key);
        self.apply_effects(effects);
    }

    pub fn readonly_key(&self, key: Key) {
        let effects = self.controller.lock().handle_readonly_key(key);
        self.apply_effects(effects);
    }

    pub fn option_selected(&self, value: &str) {
        let effects = self.controller.lock().handle_option_selected(value);
        self.apply_effects(effects);
    }

    pub fn option_activated(&self, value: &str) {
        let effects = self.controller.lock().handle_option_activated(value);
        self.apply_effects(effects);
    }

    pub fn clear(&self) {
        let effects = self.controller.lock().handle_clear();
        self.apply_effects(effects);
    }

    pub fn remove(&self) {
        let effects = self.controller.lock().handle_remove();
        self.apply_effects(effects);
    }

    pub fn update_viewport(&self, viewport: ListViewport) {
        self.controller.lock().update_viewport(viewport);
    }

    // -------------------------------------------------------------------------
    // Effect application
    // -------------------------------------------------------------------------

    fn apply_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ScheduleSearch { term } => self.schedule_search(term),
                Effect::CancelPendingSearch => self.cancel_pending_search(),
                Effect::SetActiveDescendant(value) => self.surface.set_active_descendant(value),
                Effect::ScrollList(request) => self.surface.scroll_list(request),
                Effect::FocusInput => self.surface.focus_input(),
                Effect::SelectionChanged(change) => {
                    let _ = self.selection_tx.send(change);
                }
                Effect::ShowToast(toast) => {
                    let _ = self.toast_tx.send(toast);
                }
                Effect::Deferred(inner) => {
                    let Some(driver) = self.me.upgrade() else {
                        continue;
                    };
                    tokio::spawn(async move {
                        tokio::task::yield_now().await;
                        driver.apply_effects(inner);
                    });
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Search scheduling
    // -------------------------------------------------------------------------

    /// Invalidate the pending timer and any in-flight directory call.
    fn cancel_pending_search(&self) {
        *self.generation.lock() += 1;
        if let Some(timer) = self.pending_timer.lock().take() {
            timer.abort();
        }
    }

    /// Arm the debounce timer for `term` under the current generation.
    fn schedule_search(&self, term: String) {
        let generation = *self.generation.lock();
        tracing::debug!(%term, generation, "debounce timer armed");

        let Some(driver) = self.me.upgrade() else {
            return;
        };
        let timer = tokio::spawn(async move {
            tokio::time::sleep(driver.debounce).await;
            driver.dispatch_search(term, generation);
        });

        if let Some(old) = self.pending_timer.lock().replace(timer) {
            old.abort();
        }
    }

    /// Timer fired: issue the directory call on a detached task.
    fn dispatch_search(&self, term: String, generation: u64) {
        if *self.generation.lock() != generation {
            return;
        }

        self.controller.lock().begin_search();
        tracing::debug!(%term, generation, "directory search dispatched");

        let search = self.directory.search(term);
        let Some(driver) = self.me.upgrade() else {
            return;
        };
        tokio::spawn(async move {
            let result = search.await;
            driver.finish_search(result, generation);
        });
    }

    /// Directory call completed: apply unless a newer keystroke superseded it.
    fn finish_search(
        &self,
        result: Result<Vec<ClassMatch>, DirectoryError>,
        generation: u64,
    ) {
        if *self.generation.lock() != generation {
            tracing::debug!(generation, "stale search response discarded");
            return;
        }

        let effects = self.controller.lock().apply_search_results(result);
        self.apply_effects(effects);
    }
}

// =============================================================================
// Tests
// =============================================================================
