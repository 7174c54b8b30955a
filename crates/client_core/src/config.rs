use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use tracing::warn;
use url::Url;

use crate::messages::Locale;

pub const SETTINGS_FILE: &str = "summarizer.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub locale: Locale,
    pub download_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            locale: Locale::default(),
            download_dir: dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

/// Defaults, then `path` if it parses, then environment overrides.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("server_url") {
                    settings.server_url = v.clone();
                }
                if let Some(v) = file_cfg.get("locale") {
                    apply_locale(&mut settings, v);
                }
                if let Some(v) = file_cfg.get("download_dir") {
                    settings.download_dir = PathBuf::from(v);
                }
            }
            Err(err) => warn!("ignoring unreadable settings file {}: {err}", path.display()),
        }
    }

    if let Some(v) = env("SUMMARIZER_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = env("APP__LOCALE") {
        apply_locale(&mut settings, &v);
    }

    if let Some(v) = env("APP__DOWNLOAD_DIR") {
        settings.download_dir = PathBuf::from(v);
    }

    settings
}

fn apply_locale(settings: &mut Settings, raw: &str) {
    match raw.parse::<Locale>() {
        Ok(locale) => settings.locale = locale,
        Err(err) => warn!("keeping locale {}: {err}", settings.locale),
    }
}

/// Trims and validates a base URL and drops any trailing slash.
pub fn prepare_server_url(raw_server_url: &str) -> Result<String> {
    let raw_server_url = raw_server_url.trim();
    if raw_server_url.is_empty() {
        return Ok(Settings::default().server_url);
    }

    let parsed = Url::parse(raw_server_url)
        .with_context(|| format!("invalid summarizer server url '{raw_server_url}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(anyhow!(
            "summarizer server url must use http or https, got '{}'",
            parsed.scheme()
        ));
    }

    Ok(raw_server_url.trim_end_matches('/').to_string())
}

/// Creates the download directory if needed.
pub fn prepare_download_dir(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create download directory '{}'", dir.display()))?;
    Ok(dir.to_path_buf())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
