//! Backend bridge: command queue, worker thread, and command history sources.

pub mod commands;
pub mod runtime;
pub mod sources;
