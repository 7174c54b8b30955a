//! Bridge between the UI thread and the backend worker that owns the session controller.

pub mod commands;
pub mod runtime;
