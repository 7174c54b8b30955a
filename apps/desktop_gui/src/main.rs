mod backend_bridge;
mod controller;
mod ui;

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use backend_bridge::{commands::BackendCommand, runtime::launch};
use clap::Parser;
use client_core::{
    config::{load_settings, Settings},
    Locale, Messages,
};
use controller::events::UiEvent;
use crossbeam_channel::bounded;
use eframe::egui;
use ui::SummarizerApp;

const CJK_FONT_NAME: &str = "summary_cjk";

const SYSTEM_CJK_FONTS: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/fonts-japanese-gothic.ttf",
    "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "C:\\Windows\\Fonts\\YuGothM.ttc",
    "C:\\Windows\\Fonts\\meiryo.ttc",
    "C:\\Windows\\Fonts\\msgothic.ttc",
];

#[derive(Debug, Parser)]
#[command(name = "desktop_gui", about = "News summarizer desktop client")]
struct Args {
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    locale: Option<Locale>,
    #[arg(long)]
    download_dir: Option<PathBuf>,
    /// Font file with Japanese glyphs; system fonts are tried otherwise.
    #[arg(long)]
    font: Option<PathBuf>,
}

fn apply_overrides(mut settings: Settings, args: &Args) -> Settings {
    if let Some(server_url) = &args.server_url {
        settings.server_url = server_url.clone();
    }
    if let Some(locale) = args.locale {
        settings.locale = locale;
    }
    if let Some(download_dir) = &args.download_dir {
        settings.download_dir = download_dir.clone();
    }
    settings
}

fn font_candidates(explicit: Option<&Path>) -> Vec<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .into_iter()
        .chain(SYSTEM_CJK_FONTS.iter().map(PathBuf::from))
        .collect()
}

fn install_cjk_font(ctx: &egui::Context, explicit: Option<&Path>) {
    let Some((path, bytes)) = font_candidates(explicit)
        .into_iter()
        .find_map(|path| fs::read(&path).ok().map(|bytes| (path, bytes)))
    else {
        tracing::warn!("no CJK font found; Japanese text may not render");
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        CJK_FONT_NAME.to_string(),
        Arc::new(egui::FontData::from_owned(bytes)),
    );
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(CJK_FONT_NAME.to_string());
    }
    ctx.set_fonts(fonts);
    tracing::info!(font = %path.display(), "installed CJK fallback font");
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let settings = apply_overrides(load_settings(), &args);
    let messages = Messages::new(settings.locale);

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("News Summarizer")
            .with_inner_size([960.0, 760.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "News Summarizer",
        options,
        Box::new(move |cc| {
            install_cjk_font(&cc.egui_ctx, args.font.as_deref());
            Ok(Box::new(SummarizerApp::new(cmd_tx, ui_rx, messages)))
        }),
    )
}
