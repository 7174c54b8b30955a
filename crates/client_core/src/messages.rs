//! User-facing strings, per locale.

use std::{fmt, str::FromStr};

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    Ja,
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ja" | "ja-jp" | "japanese" => Ok(Locale::Ja),
            "en" | "en-us" | "en-gb" | "english" => Ok(Locale::En),
            other => Err(format!("unsupported locale '{other}' (expected ja or en)")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Ja => f.write_str("ja"),
            Locale::En => f.write_str("en"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Messages {
    locale: Locale,
}

impl Messages {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn empty_input(&self) -> &'static str {
        match self.locale {
            Locale::Ja => "ニュースの本文を入力してください",
            Locale::En => "Please enter the full news article text.",
        }
    }

    pub fn loading(&self) -> &'static str {
        match self.locale {
            Locale::Ja => "要約を生成中...",
            Locale::En => "Generating summary...",
        }
    }

    pub fn no_summary(&self) -> &'static str {
        match self.locale {
            Locale::Ja => "要約がありません",
            Locale::En => "There is no summary yet.",
        }
    }

    pub fn no_diagrams(&self) -> &'static str {
        match self.locale {
            Locale::Ja => "mermaid図解がありません",
            Locale::En => "The summary contains no Mermaid diagrams.",
        }
    }

    pub fn invalid_diagram_index(&self) -> &'static str {
        match self.locale {
            Locale::Ja => "無効な図解インデックスです",
            Locale::En => "Invalid diagram index.",
        }
    }

    /// Generic wrapper for failures that carry no server message.
    pub fn unexpected_error(&self, detail: &str) -> String {
        match self.locale {
            Locale::Ja => format!("エラーが発生しました: {detail}"),
            Locale::En => format!("An error occurred: {detail}"),
        }
    }

    pub fn summarize_button(&self) -> &'static str {
        match self.locale {
            Locale::Ja => "要約する",
            Locale::En => "Summarize",
        }
    }

    pub fn download_button(&self) -> &'static str {
        match self.locale {
            Locale::Ja => "Markdownで保存",
            Locale::En => "Save as Markdown",
        }
    }

    pub fn diagram_button(&self) -> &'static str {
        match self.locale {
            Locale::Ja => "図をPNGで保存",
            Locale::En => "Save diagrams as PNG",
        }
    }

    pub fn diagram_button_with_count(&self, count: usize) -> String {
        match self.locale {
            Locale::Ja => format!("図をPNGで保存（{count}個）"),
            Locale::En if count == 1 => "Save diagram as PNG (1)".to_string(),
            Locale::En => format!("Save diagrams as PNG ({count})"),
        }
    }

    /// Label of the menu entry for the zero-based `index`.
    pub fn diagram_entry(&self, index: usize) -> String {
        let position = index + 1;
        match self.locale {
            Locale::Ja => format!("図解 {position} をダウンロード"),
            Locale::En => format!("Download diagram {position}"),
        }
    }

    pub fn converting(&self) -> &'static str {
        match self.locale {
            Locale::Ja => "変換中...",
            Locale::En => "Converting...",
        }
    }

    pub fn diagram_export_failed(&self, detail: &str) -> String {
        match self.locale {
            Locale::Ja => format!("図解の変換に失敗しました: {detail}"),
            Locale::En => format!("Failed to convert the diagram: {detail}"),
        }
    }

    pub fn save_failed(&self, filename: &str, detail: &str) -> String {
        match self.locale {
            Locale::Ja => format!("{filename} の保存に失敗しました: {detail}"),
            Locale::En => format!("Failed to save {filename}: {detail}"),
        }
    }
}
