//! View-state controller and terminal browser for mediatrack.
//!
//! [`controller::Controller`] owns the [`state::ViewState`] and issues
//! catalog requests; [`browser::run_browser`] renders it with `ratatui`.

/// Terminal browser main loop.
pub mod browser;
/// View-state controller.
pub mod controller;
/// Browsing state types.
pub mod state;
mod ui;

#[cfg(test)]
mod test_support;

pub use browser::run_browser;
pub use controller::{Completion, Controller, Slot, Ticket};
pub use state::{ListingSource, Request, Status, ViewState};
