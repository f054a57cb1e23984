// The binary in main.rs is a thin terminal shell over this library; the
// engine, app state and widgets live here so integration tests and
// criterion benchmarks can drive them directly.

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod generator;
pub mod session;
pub mod ui;
