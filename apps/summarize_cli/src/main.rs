use std::{
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    config::{load_settings, prepare_download_dir},
    connect, Control, DiagramMenuEntry, Locale, Messages, SubmitOutcome, SummaryBlock,
    SummaryView,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Summarize a news article with the summarizer service")]
struct Args {
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    locale: Option<Locale>,
    /// Directory that receives news_summary.md and diagram_<n>.png.
    #[arg(long)]
    out_dir: Option<PathBuf>,
    #[arg(long, conflicts_with = "input")]
    text: Option<String>,
    /// Article file; `-` or no flag reads stdin.
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long)]
    download: bool,
    #[arg(long)]
    list_diagrams: bool,
    /// One-based diagram number, may be repeated.
    #[arg(long, value_name = "N")]
    export_diagram: Vec<usize>,
}

struct TerminalView<W: Write + Send> {
    out: W,
    download_dir: PathBuf,
    notices: usize,
}

impl<W: Write + Send> TerminalView<W> {
    fn new(out: W, download_dir: PathBuf) -> Self {
        Self {
            out,
            download_dir,
            notices: 0,
        }
    }

    fn write_line(&mut self, line: &str) {
        if let Err(err) = writeln!(self.out, "{line}") {
            warn!("failed to write to stdout: {err}");
        }
    }
}

impl<W: Write + Send> SummaryView for TerminalView<W> {
    fn show_loading(&mut self, text: &str) {
        eprintln!("{text}");
    }

    fn render_summary(&mut self, markdown: &str, blocks: &[SummaryBlock]) {
        if blocks.is_empty() {
            self.write_line(markdown);
            return;
        }
        for block in blocks {
            self.write_line(&block.plain_text());
        }
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn set_enabled(&mut self, control: Control, enabled: bool) {
        debug!(?control, enabled, "control state");
    }

    fn set_label(&mut self, control: Control, label: &str) {
        debug!(?control, label, "control label");
    }

    fn notify(&mut self, message: &str) {
        self.notices += 1;
        eprintln!("{message}");
    }

    fn show_diagram_menu(&mut self, entries: &[DiagramMenuEntry]) {
        for entry in entries {
            self.write_line(&format!("[{}] {}", entry.index + 1, entry.label));
        }
    }

    fn hide_diagram_menu(&mut self) {}

    fn update_diagram_entry(&mut self, index: usize, label: &str, enabled: bool) {
        debug!(index, label, enabled, "diagram entry");
    }

    fn save_file(&mut self, filename: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        let path = self.download_dir.join(filename);
        fs::write(&path, bytes)?;
        eprintln!("saved {}", path.display());
        Ok(path)
    }
}

fn read_news_text(text: Option<String>, input: Option<&Path>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read article from {}", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read article from stdin")?;
            Ok(buf)
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let mut settings = load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if let Some(locale) = args.locale {
        settings.locale = locale;
    }
    if let Some(out_dir) = args.out_dir {
        settings.download_dir = out_dir;
    }

    let news_text = read_news_text(args.text, args.input.as_deref())?;
    let download_dir = prepare_download_dir(&settings.download_dir)?;
    let view = TerminalView::new(io::stdout(), download_dir);
    let mut controller = connect(
        &settings.server_url,
        Messages::new(settings.locale),
        view,
    )?;

    info!(server_url = %settings.server_url, "submitting article");
    match controller.submit_summary(&news_text).await {
        SubmitOutcome::Rendered { diagram_count } => {
            info!(diagram_count, "summary rendered");
        }
        SubmitOutcome::Rejected | SubmitOutcome::Failed => return Ok(ExitCode::FAILURE),
    }

    if args.download {
        controller.download_summary_file().await;
    }
    if args.list_diagrams {
        controller.toggle_diagram_menu();
    }
    for position in args.export_diagram {
        let index = position.checked_sub(1).unwrap_or(usize::MAX);
        controller.export_diagram(index).await;
    }

    if controller.view().notices > 0 {
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();
    run(args).await
}
