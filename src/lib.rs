//! Mahoraga is a terminal tool that scores natural-language prompts for
//! clarity before they are handed to an AI agent.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the session state machine, the persisted connection
//!   config, and the analysis providers.
//! - [`ui`] renders the terminal interface and runs the event loop that
//!   turns key presses into session actions.
//! - [`commands`] implements the slash-command registry and interpreter.
//! - [`api`] defines the chat-completions payloads sent to the provider.
//!
//! The binary (`src/main.rs`) routes through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;
