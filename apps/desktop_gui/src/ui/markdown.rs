use client_core::SummaryBlock;
use eframe::egui;

pub fn heading_size(level: u8) -> f32 {
    match level {
        1 => 24.0,
        2 => 20.0,
        3 => 17.0,
        _ => 15.0,
    }
}

/// Draws parsed summary blocks. Falls back to the raw markdown when parsing
/// produced nothing.
pub fn show_summary(ui: &mut egui::Ui, blocks: &[SummaryBlock], markdown: &str) {
    if blocks.is_empty() {
        ui.label(markdown);
        return;
    }

    for block in blocks {
        match block {
            SummaryBlock::Heading { level, text } => {
                ui.add_space(6.0);
                ui.label(
                    egui::RichText::new(text)
                        .strong()
                        .size(heading_size(*level)),
                );
            }
            SummaryBlock::Paragraph(text) => {
                ui.label(text);
                ui.add_space(4.0);
            }
            SummaryBlock::ListItem {
                depth,
                number,
                text,
            } => {
                ui.horizontal_wrapped(|ui| {
                    ui.add_space(16.0 * (*depth as f32 + 1.0));
                    let bullet = match number {
                        Some(n) => format!("{n}."),
                        None => "•".to_string(),
                    };
                    ui.label(bullet);
                    ui.label(text);
                });
            }
            SummaryBlock::Code { language, text } => {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    if let Some(language) = language {
                        ui.small(egui::RichText::new(language).weak());
                    }
                    ui.label(egui::RichText::new(text).monospace());
                });
            }
            SummaryBlock::Quote(text) => {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new("▍").weak());
                    ui.label(egui::RichText::new(text).italics());
                });
            }
            SummaryBlock::TableRow(cells) => {
                ui.horizontal_wrapped(|ui| {
                    for (i, cell) in cells.iter().enumerate() {
                        if i > 0 {
                            ui.separator();
                        }
                        ui.label(cell);
                    }
                });
            }
            SummaryBlock::Rule => {
                ui.separator();
            }
        }
    }
}
