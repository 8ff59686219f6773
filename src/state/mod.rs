//! Application state management module.
//!
//! This module contains the screen state shared by the render loop and the
//! network handler:
//! - Main `State` struct with the displayed location, view and selection
//! - Navigation types (menu entries, card actions, overlays, feedback pulses)
//! - State error handling

mod error;
mod navigation;
mod state_impl;

pub use error::StateError;
pub use navigation::{CardAction, MenuEntry, Overlay, Pulse};
pub use state_impl::State;
