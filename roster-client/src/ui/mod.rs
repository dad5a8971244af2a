//! Dashboard UI state
//!
//! View/modal state machine and the debounced quick-search input. The
//! rendering shell (whatever draws the screens) drives this module and
//! displays the data and errors it produces.

pub mod debounce;
pub mod state;

pub use debounce::Debouncer;
pub use state::{Dashboard, Modal, SearchCriteria, View, ViewData};
