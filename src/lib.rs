//! Pocket-sized terminal client for browsing Trello boards.
//!
//! The navigation core lives in `nav`: it fetches through the `trello::Fetch`
//! seam, builds grouped views, caches them per context and guards against
//! stale responses. The remaining modules wire it to a ratatui interface.

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod logger;
pub mod nav;
pub mod state;
pub mod timeline;
pub mod trello;
pub mod ui;
pub mod utils;
