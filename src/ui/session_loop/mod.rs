//! The interactive session: terminal setup, input routing and the event loop.

mod event_loop;
pub mod keybindings;
mod lifecycle;

pub use event_loop::run_session;
