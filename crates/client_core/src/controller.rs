//! Session controller: owns the current summary and its diagrams and drives
//! the view through submit, download, and diagram export.

use shared::{
    domain::{diagram_filename, DiagramPhase, SessionPhase, SummaryPhase, SUMMARY_FILENAME},
    error::ServiceError,
};
use tracing::{error, info, warn};

use crate::{
    messages::Messages,
    render::summary_blocks,
    view::{Control, DiagramMenuEntry, SummaryView},
    SummaryService,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was blank; nothing was sent.
    Rejected,
    Failed,
    Rendered { diagram_count: usize },
}

pub struct SummarySessionController<S: SummaryService, V: SummaryView> {
    service: S,
    view: V,
    messages: Messages,
    current_summary: String,
    diagrams: Vec<String>,
    menu_open: bool,
    phase: SessionPhase,
}

impl<S: SummaryService, V: SummaryView> SummarySessionController<S, V> {
    pub fn new(service: S, mut view: V, messages: Messages) -> Self {
        view.set_label(Control::Summarize, messages.summarize_button());
        view.set_label(Control::DownloadSummary, messages.download_button());
        view.set_label(Control::DiagramMenu, messages.diagram_button());
        view.set_enabled(Control::Summarize, true);
        view.set_enabled(Control::DownloadSummary, false);
        view.set_enabled(Control::DiagramMenu, false);
        Self {
            service,
            view,
            messages,
            current_summary: String::new(),
            diagrams: Vec::new(),
            menu_open: false,
            phase: SessionPhase::default(),
        }
    }

    pub fn current_summary(&self) -> &str {
        &self.current_summary
    }

    pub fn diagrams(&self) -> &[String] {
        &self.diagrams
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_diagram_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn messages(&self) -> Messages {
        self.messages
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub async fn submit_summary(&mut self, input: &str) -> SubmitOutcome {
        let news_text = input.trim();
        if news_text.is_empty() {
            self.view.show_error(self.messages.empty_input());
            return SubmitOutcome::Rejected;
        }

        self.phase.summary = SummaryPhase::Submitting;
        self.view.show_loading(self.messages.loading());
        self.view.set_enabled(Control::Summarize, false);
        self.view.set_enabled(Control::DownloadSummary, false);
        self.view.set_enabled(Control::DiagramMenu, false);

        let outcome = match self.service.summarize(news_text).await {
            Ok(summary) => {
                self.apply_summary(summary);
                self.extract_diagrams().await;
                SubmitOutcome::Rendered {
                    diagram_count: self.diagrams.len(),
                }
            }
            Err(err) => {
                warn!("summarization failed: {err}");
                self.phase.summary = SummaryPhase::Failed;
                let message = self.describe(&err);
                self.view.show_error(&message);
                self.sync_export_controls();
                SubmitOutcome::Failed
            }
        };

        self.view.set_enabled(Control::Summarize, true);
        outcome
    }

    fn apply_summary(&mut self, summary: String) {
        self.current_summary = summary;
        self.phase.summary = SummaryPhase::Rendered;

        // Diagrams belong to the summary they were extracted from.
        self.diagrams.clear();
        self.phase.diagrams = DiagramPhase::None;
        if self.menu_open {
            self.menu_open = false;
            self.view.hide_diagram_menu();
        }
        self.view
            .set_label(Control::DiagramMenu, self.messages.diagram_button());

        match summary_blocks(&self.current_summary) {
            Ok(blocks) => self.view.render_summary(&self.current_summary, &blocks),
            Err(err) => {
                warn!("rendering summary as plain text: {err}");
                self.view.render_summary(&self.current_summary, &[]);
            }
        }
        self.view.set_enabled(Control::DownloadSummary, true);
    }

    async fn extract_diagrams(&mut self) {
        self.phase.diagrams = DiagramPhase::Extracting;
        match self.service.extract_diagrams(&self.current_summary).await {
            Ok(diagrams) => {
                self.diagrams = diagrams;
                if self.diagrams.is_empty() {
                    self.phase.diagrams = DiagramPhase::Empty;
                } else {
                    let count = self.diagrams.len();
                    self.phase.diagrams = DiagramPhase::Ready(count);
                    self.view.set_label(
                        Control::DiagramMenu,
                        &self.messages.diagram_button_with_count(count),
                    );
                }
            }
            Err(err) => {
                warn!("diagram extraction failed, continuing without diagrams: {err}");
                self.phase.diagrams = DiagramPhase::ExtractionFailed;
            }
        }
        self.sync_export_controls();
    }

    fn sync_export_controls(&mut self) {
        self.view
            .set_enabled(Control::DownloadSummary, !self.current_summary.is_empty());
        self.view
            .set_enabled(Control::DiagramMenu, !self.diagrams.is_empty());
    }

    pub async fn download_summary_file(&mut self) {
        if self.current_summary.is_empty() {
            self.view.notify(self.messages.no_summary());
            return;
        }

        match self.service.download_summary(&self.current_summary).await {
            Ok(bytes) => match self.view.save_file(SUMMARY_FILENAME, &bytes) {
                Ok(path) => info!(path = %path.display(), bytes = bytes.len(), "summary saved"),
                Err(err) => {
                    warn!("failed to save {SUMMARY_FILENAME}: {err}");
                    let message = self
                        .messages
                        .save_failed(SUMMARY_FILENAME, &err.to_string());
                    self.view.notify(&message);
                }
            },
            Err(err) => {
                warn!("summary download failed: {err}");
                let message = self.describe(&err);
                self.view.notify(&message);
            }
        }
    }

    pub fn toggle_diagram_menu(&mut self) {
        if self.diagrams.is_empty() {
            self.view.notify(self.messages.no_diagrams());
            return;
        }

        if self.menu_open {
            self.menu_open = false;
            self.view.hide_diagram_menu();
            return;
        }

        let entries: Vec<DiagramMenuEntry> = (0..self.diagrams.len())
            .map(|index| DiagramMenuEntry {
                index,
                label: self.messages.diagram_entry(index),
            })
            .collect();
        self.menu_open = true;
        self.view.show_diagram_menu(&entries);
    }

    /// Converts the diagram at zero-based `index` on the server and saves the
    /// returned PNG as `diagram_<index + 1>.png`.
    pub async fn export_diagram(&mut self, index: usize) {
        let Some(mermaid_code) = self.diagrams.get(index).cloned() else {
            self.view.notify(self.messages.invalid_diagram_index());
            return;
        };

        self.view
            .update_diagram_entry(index, self.messages.converting(), false);

        let filename = diagram_filename(index);
        match self.service.convert_diagram(&mermaid_code, index).await {
            Ok(bytes) => match self.view.save_file(&filename, &bytes) {
                Ok(path) => {
                    info!(path = %path.display(), bytes = bytes.len(), "diagram saved");
                    self.menu_open = false;
                    self.view.hide_diagram_menu();
                }
                Err(err) => {
                    warn!("failed to save {filename}: {err}");
                    let message = self.messages.save_failed(&filename, &err.to_string());
                    self.view.notify(&message);
                }
            },
            Err(err) => {
                error!(index, "diagram conversion failed: {err}");
                let detail = self.describe(&err);
                let message = self.messages.diagram_export_failed(&detail);
                self.view.notify(&message);
            }
        }

        self.view
            .update_diagram_entry(index, &self.messages.diagram_entry(index), true);
    }

    /// Server message when one was supplied, otherwise a wrapped generic one.
    fn describe(&self, err: &ServiceError) -> String {
        match err {
            ServiceError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            ServiceError::Rejected {
                status,
                message: None,
            } => self.messages.unexpected_error(&format!("HTTP {status}")),
            ServiceError::Transport(detail) | ServiceError::Decode(detail) => {
                self.messages.unexpected_error(detail)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
