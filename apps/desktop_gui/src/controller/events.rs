//! Events the backend worker sends back to the UI thread.

use std::path::PathBuf;

use client_core::{Control, DiagramMenuEntry, SummaryBlock};

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Info(String),
    Loading(String),
    SummaryRendered {
        markdown: String,
        blocks: Vec<SummaryBlock>,
    },
    OutputError(String),
    ControlEnabled {
        control: Control,
        enabled: bool,
    },
    ControlLabel {
        control: Control,
        label: String,
    },
    Notice(String),
    DiagramMenuShown(Vec<DiagramMenuEntry>),
    DiagramMenuHidden,
    DiagramEntryUpdated {
        index: usize,
        label: String,
        enabled: bool,
    },
    FileSaved(PathBuf),
    /// The worker could not start; commands will not be processed.
    BackendFailed(String),
}
