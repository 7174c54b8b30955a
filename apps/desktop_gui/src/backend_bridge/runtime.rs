//! Backend worker: owns the Tokio runtime and the session controller, and
//! drains the UI command queue one command at a time.

use std::thread;

use client_core::{
    config::{prepare_download_dir, Settings},
    connect, Messages, SummaryService, SummarySessionController, SummaryView,
};
use crossbeam_channel::{Receiver, Sender};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{events::UiEvent, view::ChannelView},
};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: Settings) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let download_dir = match prepare_download_dir(&settings.download_dir) {
            Ok(dir) => dir,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!("{err:#}")));
                tracing::error!("unable to prepare download directory: {err:#}");
                return;
            }
        };

        let view = ChannelView::new(ui_tx.clone(), download_dir.clone());
        let mut controller = match connect(
            &settings.server_url,
            Messages::new(settings.locale),
            view,
        ) {
            Ok(controller) => controller,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!("{err:#}")));
                tracing::error!("invalid summarizer configuration: {err:#}");
                return;
            }
        };

        tracing::info!(
            server_url = %controller.service().server_url(),
            download_dir = %download_dir.display(),
            "backend worker ready"
        );
        let _ = ui_tx.try_send(UiEvent::Info(format!(
            "Summarizer: {} / saving to {}",
            controller.service().server_url(),
            download_dir.display()
        )));

        while let Ok(cmd) = cmd_rx.recv() {
            runtime.block_on(handle_command(&mut controller, cmd));
        }
        tracing::info!("ui command queue closed; backend worker exiting");
    });
}

pub async fn handle_command<S: SummaryService, V: SummaryView>(
    controller: &mut SummarySessionController<S, V>,
    cmd: BackendCommand,
) {
    tracing::debug!(command = cmd.name(), "handling ui command");
    match cmd {
        BackendCommand::Summarize { text } => {
            controller.submit_summary(&text).await;
        }
        BackendCommand::DownloadSummary => controller.download_summary_file().await,
        BackendCommand::ToggleDiagramMenu => controller.toggle_diagram_menu(),
        BackendCommand::ExportDiagram { index } => controller.export_diagram(index).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::{HttpSummaryService, Locale};
    use crossbeam_channel::bounded;

    #[tokio::test]
    async fn blank_summarize_command_reports_validation_error() {
        let (ui_tx, ui_rx) = bounded(64);
        let view = ChannelView::new(ui_tx, std::env::temp_dir());
        let mut controller = SummarySessionController::new(
            HttpSummaryService::new("http://127.0.0.1:9"),
            view,
            Messages::new(Locale::Ja),
        );

        handle_command(
            &mut controller,
            BackendCommand::Summarize {
                text: "   ".to_string(),
            },
        )
        .await;
        handle_command(&mut controller, BackendCommand::ToggleDiagramMenu).await;
        handle_command(&mut controller, BackendCommand::DownloadSummary).await;

        let events: Vec<UiEvent> = ui_rx.try_iter().collect();
        assert!(events.contains(&UiEvent::OutputError(
            "ニュースの本文を入力してください".to_string()
        )));
        assert!(events.contains(&UiEvent::Notice("mermaid図解がありません".to_string())));
        assert!(events.contains(&UiEvent::Notice("要約がありません".to_string())));
    }
}
