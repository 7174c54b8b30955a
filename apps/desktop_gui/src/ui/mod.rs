//! UI layer for desktop GUI: app shell and summary rendering.

pub mod app;
pub mod markdown;

pub use app::SummarizerApp;
