pub mod analysis;
pub mod app;
pub mod config;
pub mod providers;
