//! Backend commands queued from UI to backend worker.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Summarize { text: String },
    DownloadSummary,
    ToggleDiagramMenu,
    ExportDiagram { index: usize },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Summarize { .. } => "summarize",
            BackendCommand::DownloadSummary => "download_summary",
            BackendCommand::ToggleDiagramMenu => "toggle_diagram_menu",
            BackendCommand::ExportDiagram { .. } => "export_diagram",
        }
    }
}
