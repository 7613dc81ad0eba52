//! Terminal UI layer.
//!
//! - [`session_loop`]: terminal lifecycle, key routing and the event loop
//!   that feeds [`crate::core::app`].
//! - [`renderer`]: draws the current [`App`](crate::core::app::App) state.
//! - [`text_field`]: single-line editing surfaces for the prompt and settings.
//! - [`theme`]: colors and score banding.

pub mod renderer;
pub mod session_loop;
pub mod text_field;
pub mod theme;
