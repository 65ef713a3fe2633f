//! Core process state.

mod state;

pub use state::{is_shutdown, setup_shutdown_handler};
