//! `SummaryView` that forwards every call to the UI thread as a [`UiEvent`].

use std::{fs, io, path::PathBuf};

use client_core::{Control, DiagramMenuEntry, SummaryBlock, SummaryView};
use crossbeam_channel::{Sender, TrySendError};

use crate::controller::events::UiEvent;

pub struct ChannelView {
    ui_tx: Sender<UiEvent>,
    download_dir: PathBuf,
}

impl ChannelView {
    pub fn new(ui_tx: Sender<UiEvent>, download_dir: PathBuf) -> Self {
        Self {
            ui_tx,
            download_dir,
        }
    }

    fn send(&self, event: UiEvent) {
        match self.ui_tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                tracing::warn!(?event, "ui event queue full; dropping event");
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::debug!("ui event receiver gone");
            }
        }
    }
}

impl SummaryView for ChannelView {
    fn show_loading(&mut self, text: &str) {
        self.send(UiEvent::Loading(text.to_string()));
    }

    fn render_summary(&mut self, markdown: &str, blocks: &[SummaryBlock]) {
        self.send(UiEvent::SummaryRendered {
            markdown: markdown.to_string(),
            blocks: blocks.to_vec(),
        });
    }

    fn show_error(&mut self, message: &str) {
        self.send(UiEvent::OutputError(message.to_string()));
    }

    fn set_enabled(&mut self, control: Control, enabled: bool) {
        self.send(UiEvent::ControlEnabled { control, enabled });
    }

    fn set_label(&mut self, control: Control, label: &str) {
        self.send(UiEvent::ControlLabel {
            control,
            label: label.to_string(),
        });
    }

    fn notify(&mut self, message: &str) {
        self.send(UiEvent::Notice(message.to_string()));
    }

    fn show_diagram_menu(&mut self, entries: &[DiagramMenuEntry]) {
        self.send(UiEvent::DiagramMenuShown(entries.to_vec()));
    }

    fn hide_diagram_menu(&mut self) {
        self.send(UiEvent::DiagramMenuHidden);
    }

    fn update_diagram_entry(&mut self, index: usize, label: &str, enabled: bool) {
        self.send(UiEvent::DiagramEntryUpdated {
            index,
            label: label.to_string(),
            enabled,
        });
    }

    fn save_file(&mut self, filename: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        let path = self.download_dir.join(filename);
        fs::write(&path, bytes)?;
        self.send(UiEvent::FileSaved(path.clone()));
        Ok(path)
    }
}
