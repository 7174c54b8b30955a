//! Screen-side seam of the session controller.

use std::{io, path::PathBuf};

use crate::render::SummaryBlock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Summarize,
    DownloadSummary,
    DiagramMenu,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramMenuEntry {
    pub index: usize,
    pub label: String,
}

/// Everything the controller needs from a front-end.
///
/// Implementations only draw; they never decide. Notices are blocking in the
/// sense that the user has to acknowledge them, not that the call blocks.
pub trait SummaryView: Send {
    fn show_loading(&mut self, text: &str);
    fn render_summary(&mut self, markdown: &str, blocks: &[SummaryBlock]);
    fn show_error(&mut self, message: &str);
    fn set_enabled(&mut self, control: Control, enabled: bool);
    fn set_label(&mut self, control: Control, label: &str);
    fn notify(&mut self, message: &str);
    fn show_diagram_menu(&mut self, entries: &[DiagramMenuEntry]);
    fn hide_diagram_menu(&mut self);
    fn update_diagram_entry(&mut self, index: usize, label: &str, enabled: bool);
    /// Persists a downloaded file and returns where it landed.
    fn save_file(&mut self, filename: &str, bytes: &[u8]) -> io::Result<PathBuf>;
}
