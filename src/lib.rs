// Public API for integration tests and embedding the engine headless

pub mod catalog;
pub mod config;
pub mod engine;
pub mod protocol;
pub mod state;
pub mod types;
pub mod ws;
