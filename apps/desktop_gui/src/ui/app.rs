use std::collections::{HashMap, VecDeque};

use client_core::{Control, DiagramMenuEntry, Messages, SummaryBlock};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::markdown::show_summary;

#[derive(Debug, Clone, PartialEq)]
pub enum OutputRegion {
    Empty,
    Loading(String),
    Summary {
        markdown: String,
        blocks: Vec<SummaryBlock>,
    },
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    pub enabled: bool,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramEntryState {
    pub index: usize,
    pub label: String,
    pub enabled: bool,
}

impl From<DiagramMenuEntry> for DiagramEntryState {
    fn from(entry: DiagramMenuEntry) -> Self {
        Self {
            index: entry.index,
            label: entry.label,
            enabled: true,
        }
    }
}

/// Ctrl+Enter in the input area submits.
pub fn is_submit_shortcut(modifiers: egui::Modifiers, enter_pressed: bool) -> bool {
    enter_pressed && modifiers.ctrl
}

pub struct SummarizerApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    news_input: String,
    output: OutputRegion,
    controls: HashMap<Control, ControlState>,
    diagram_menu: Option<Vec<DiagramEntryState>>,
    notices: VecDeque<String>,
    status: String,
}

impl SummarizerApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        messages: Messages,
    ) -> Self {
        let mut controls = HashMap::new();
        controls.insert(
            Control::Summarize,
            ControlState {
                enabled: true,
                label: messages.summarize_button().to_string(),
            },
        );
        controls.insert(
            Control::DownloadSummary,
            ControlState {
                enabled: false,
                label: messages.download_button().to_string(),
            },
        );
        controls.insert(
            Control::DiagramMenu,
            ControlState {
                enabled: false,
                label: messages.diagram_button().to_string(),
            },
        );

        Self {
            cmd_tx,
            ui_rx,
            news_input: String::new(),
            output: OutputRegion::Empty,
            controls,
            diagram_menu: None,
            notices: VecDeque::new(),
            status: "Starting backend worker".to_string(),
        }
    }

    fn is_enabled(&self, control: Control) -> bool {
        self.controls.get(&control).is_some_and(|state| state.enabled)
    }

    fn label(&self, control: Control) -> String {
        self.controls
            .get(&control)
            .map(|state| state.label.clone())
            .unwrap_or_default()
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::Loading(text) => {
                self.output = OutputRegion::Loading(text);
            }
            UiEvent::SummaryRendered { markdown, blocks } => {
                self.output = OutputRegion::Summary { markdown, blocks };
            }
            UiEvent::OutputError(message) => {
                self.output = OutputRegion::Error(message);
            }
            UiEvent::ControlEnabled { control, enabled } => {
                if let Some(state) = self.controls.get_mut(&control) {
                    state.enabled = enabled;
                }
            }
            UiEvent::ControlLabel { control, label } => {
                if let Some(state) = self.controls.get_mut(&control) {
                    state.label = label;
                }
            }
            UiEvent::Notice(message) => {
                self.notices.push_back(message);
            }
            UiEvent::DiagramMenuShown(entries) => {
                self.diagram_menu = Some(entries.into_iter().map(Into::into).collect());
            }
            UiEvent::DiagramMenuHidden => {
                self.diagram_menu = None;
            }
            UiEvent::DiagramEntryUpdated {
                index,
                label,
                enabled,
            } => {
                if let Some(entry) = self
                    .diagram_menu
                    .as_mut()
                    .and_then(|entries| entries.iter_mut().find(|entry| entry.index == index))
                {
                    entry.label = label;
                    entry.enabled = enabled;
                }
            }
            UiEvent::FileSaved(path) => {
                self.status = format!("Saved {}", path.display());
            }
            UiEvent::BackendFailed(message) => {
                for state in self.controls.values_mut() {
                    state.enabled = false;
                }
                self.diagram_menu = None;
                self.status = message;
            }
        }
    }

    fn submit(&mut self) {
        if !self.is_enabled(Control::Summarize) {
            return;
        }
        let cmd = BackendCommand::Summarize {
            text: self.news_input.clone(),
        };
        if dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
            // The worker re-enables it once the request settles.
            if let Some(state) = self.controls.get_mut(&Control::Summarize) {
                state.enabled = false;
            }
        }
    }

    fn send(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn show_input(&mut self, ui: &mut egui::Ui) {
        let response = ui.add(
            egui::TextEdit::multiline(&mut self.news_input)
                .desired_rows(10)
                .desired_width(f32::INFINITY)
                .hint_text("Ctrl+Enter"),
        );
        let (modifiers, enter_pressed) =
            ui.input(|i| (i.modifiers, i.key_pressed(egui::Key::Enter)));
        if response.has_focus() && is_submit_shortcut(modifiers, enter_pressed) {
            self.submit();
        }

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let summarize = egui::Button::new(
                egui::RichText::new(self.label(Control::Summarize)).strong(),
            );
            if ui
                .add_enabled(self.is_enabled(Control::Summarize), summarize)
                .clicked()
            {
                self.submit();
            }

            let download = egui::Button::new(self.label(Control::DownloadSummary));
            if ui
                .add_enabled(self.is_enabled(Control::DownloadSummary), download)
                .clicked()
            {
                self.send(BackendCommand::DownloadSummary);
            }

            let diagrams = egui::Button::new(self.label(Control::DiagramMenu))
                .selected(self.diagram_menu.is_some());
            if ui
                .add_enabled(self.is_enabled(Control::DiagramMenu), diagrams)
                .clicked()
            {
                self.send(BackendCommand::ToggleDiagramMenu);
            }
        });

        let mut export = None;
        if let Some(entries) = &self.diagram_menu {
            ui.indent("diagram_menu", |ui| {
                for entry in entries {
                    if ui
                        .add_enabled(entry.enabled, egui::Button::new(&entry.label))
                        .clicked()
                    {
                        export = Some(entry.index);
                    }
                }
            });
        }
        if let Some(index) = export {
            self.send(BackendCommand::ExportDiagram { index });
        }
    }

    fn show_output(&self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| match &self.output {
                OutputRegion::Empty => {}
                OutputRegion::Loading(text) => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(text);
                    });
                }
                OutputRegion::Summary { markdown, blocks } => show_summary(ui, blocks, markdown),
                OutputRegion::Error(message) => {
                    let color = ui.visuals().error_fg_color;
                    ui.colored_label(color, message);
                }
            });
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(message) = self.notices.front().cloned() else {
            return;
        };
        let mut acknowledged = false;
        egui::Window::new("notice_window")
            .title_bar(false)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(&message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    acknowledged = true;
                }
            });
        if acknowledged {
            self.notices.pop_front();
        }
    }
}

impl eframe::App for SummarizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.status).weak());
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(self.notices.is_empty(), |ui| {
                self.show_input(ui);
                ui.separator();
                self.show_output(ui);
            });
        });

        self.show_notice(ctx);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
