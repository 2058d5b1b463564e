use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::model::DEFAULT_LOCALE;
use crate::scroll::DEFAULT_DEBOUNCE;

#[derive(Debug, Default, Deserialize)]
pub struct UserConfig {
    pub logging: Option<LoggingCfg>,
    pub gallery: Option<GalleryCfg>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoggingCfg {
    pub to_file: Option<bool>,
    pub dir: Option<String>,
    pub json: Option<bool>,
    pub compact: Option<bool>,
    pub pretty: Option<bool>,
    pub level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GalleryCfg {
    pub content_dir: Option<String>,
    pub locale: Option<String>,
    pub scroll_state_file: Option<String>,
    pub scroll_debounce_ms: Option<u64>,
}

/// Resolved runtime settings for the gallery.
#[derive(Debug, Clone)]
pub struct GallerySettings {
    /// Root whose subdirectories are model identifiers.
    pub content_dir: PathBuf,
    /// Locale used for descriptions.
    pub locale: String,
    /// JSON file backing persisted scroll positions.
    pub scroll_state_file: PathBuf,
    pub scroll_debounce: Duration,
}

impl GallerySettings {
    /// Defaults rooted at the stylelab home directory.
    pub fn defaults(home: &Path, workspace_dir: &Path) -> Self {
        Self {
            content_dir: workspace_dir.join("public").join("data"),
            locale: DEFAULT_LOCALE.to_string(),
            scroll_state_file: home.join("scroll-state.json"),
            scroll_debounce: DEFAULT_DEBOUNCE,
        }
    }

    /// Apply values from the user config on top of `self`.
    pub fn merge(mut self, cfg: Option<&GalleryCfg>) -> Self {
        let Some(cfg) = cfg else {
            return self;
        };
        if let Some(dir) = cfg.content_dir.as_deref() {
            self.content_dir = expand_home(dir);
        }
        if let Some(locale) = cfg.locale.as_ref() {
            self.locale = locale.clone();
        }
        if let Some(file) = cfg.scroll_state_file.as_deref() {
            self.scroll_state_file = expand_home(file);
        }
        if let Some(ms) = cfg.scroll_debounce_ms {
            self.scroll_debounce = Duration::from_millis(ms);
        }
        self
    }
}

pub fn load_user_config(home: &Path) -> anyhow::Result<Option<UserConfig>> {
    let path = home.join("config.toml");
    if !path.exists() {
        return Ok(None);
    }
    let s = std::fs::read_to_string(&path)?;
    let cfg: UserConfig = toml::from_str(&s)?;
    Ok(Some(cfg))
}

/// Stylelab home: explicit value, else `$HOME/.stylelab`, else `./.stylelab`.
pub fn resolve_home(explicit: &str) -> PathBuf {
    if !explicit.is_empty() {
        return expand_home(explicit);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".stylelab");
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".stylelab")
}

/// Whether an env var overrides the config: present and non-empty.
pub fn env_set(key: &str) -> bool {
    std::env::var_os(key).is_some_and(|v| !v.is_empty())
}

pub fn expand_home(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Ok(home) = std::env::var("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}
