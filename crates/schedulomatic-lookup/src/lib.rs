//! Searchable class lookup.
//!
//! A combobox over an async class directory: debounced search, keyboard
//! navigation with wrap-around, pointer activation, and a single-selection
//! lifecycle with clear and remove actions.
//!
//! The [`ClassLookup`] controller is a pure state machine driven through an
//! effect protocol; [`LookupDriver`] hosts it on a tokio runtime and turns
//! effects into timers, directory calls, channel sends, and
//! [`LookupSurface`] requests.

pub mod controller;
pub mod directory;
pub mod driver;
pub mod effect;
pub mod keys;
pub mod option_row;
pub mod state;

pub use controller::ClassLookup;
pub use directory::ClassDirectory;
pub use driver::{LookupDriver, LookupEvents, LookupSurface, NoopSurface};
pub use effect::{Effect, ScrollRequest};
pub use keys::Key;
pub use option_row::{OptionRow, RowEvent, TypeIndicator};
pub use state::{ListViewport, LookupPhase};
