//! Configuration loading and parsing.
//!
//! Parses `oxpad.toml` (or an override path provided by the binary). Every
//! section is optional and unknown fields are ignored so the file can evolve
//! without warnings. A file that fails to parse falls back to defaults.
//!
//! Values that must come from a fixed set (the font size) are validated after
//! parsing; an out-of-set value is replaced with the default and reported on
//! the `config` target. The auto-save delay is clamped to
//! [`MAX_AUTOSAVE_DELAY_SECS`] the same way.

use anyhow::Result;
use core_text::SearchMode;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "oxpad.toml";

/// Font sizes offered by the size selector, smallest first.
/// Upper bound for `[autosave] delay_secs` (one day).
pub const MAX_AUTOSAVE_DELAY_SECS: u64 = 24 * 60 * 60;

pub const FONT_SIZES: [u16; 8] = [12, 14, 16, 18, 20, 24, 28, 32];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// A font size guaranteed to be one of [`FONT_SIZES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSize(u16);

impl FontSize {
    pub const DEFAULT: FontSize = FontSize(16);

    pub fn new(px: u16) -> Option<Self> {
        FONT_SIZES.contains(&px).then_some(Self(px))
    }

    pub fn px(self) -> u16 {
        self.0
    }

    fn index(self) -> usize {
        FONT_SIZES.iter().position(|s| *s == self.0).unwrap_or(2)
    }

    /// Next larger size; saturates at the largest.
    pub fn larger(self) -> Self {
        let idx = (self.index() + 1).min(FONT_SIZES.len() - 1);
        Self(FONT_SIZES[idx])
    }

    /// Next smaller size; saturates at the smallest.
    pub fn smaller(self) -> Self {
        Self(FONT_SIZES[self.index().saturating_sub(1)])
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct EditorConfig {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "EditorConfig::default_font_size")]
    pub font_size: u16,
    #[serde(default)]
    pub alignment: Alignment,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            font_size: Self::default_font_size(),
            alignment: Alignment::default(),
        }
    }
}

impl EditorConfig {
    const fn default_font_size() -> u16 {
        FontSize::DEFAULT.0
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AutosaveConfig {
    #[serde(default = "AutosaveConfig::default_enabled")]
    pub enabled: bool,
    #[serde(default = "AutosaveConfig::default_delay_secs")]
    pub delay_secs: u64,
    #[serde(default = "AutosaveConfig::default_flush_on_exit")]
    pub flush_on_exit: bool,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            delay_secs: Self::default_delay_secs(),
            flush_on_exit: Self::default_flush_on_exit(),
        }
    }
}

impl AutosaveConfig {
    const fn default_enabled() -> bool {
        true
    }
    const fn default_delay_secs() -> u64 {
        30
    }
    const fn default_flush_on_exit() -> bool {
        true
    }

    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SearchConfig {
    #[serde(default)]
    pub mode: SearchMode,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StorageConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ExportConfig {
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub autosave: AutosaveConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub file: ConfigFile,    // parsed (or default) data
    pub font_size: FontSize, // validated editor.font_size
}

/// Config path: local working directory first, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("oxpad").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_absent_using_defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(mut file) => {
            let font_size = validate_font_size(file.editor.font_size);
            file.autosave.delay_secs = validate_delay_secs(file.autosave.delay_secs);
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config { file, font_size })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

fn validate_font_size(px: u16) -> FontSize {
    FontSize::new(px).unwrap_or_else(|| {
        warn!(
            target: "config",
            requested = px,
            fallback = FontSize::DEFAULT.px(),
            "font_size_not_in_set"
        );
        FontSize::DEFAULT
    })
}

fn validate_delay_secs(secs: u64) -> u64 {
    if secs <= MAX_AUTOSAVE_DELAY_SECS {
        return secs;
    }
    warn!(
        target: "config",
        requested = secs,
        clamped = MAX_AUTOSAVE_DELAY_SECS,
        "autosave_delay_too_large"
    );
    MAX_AUTOSAVE_DELAY_SECS
}

impl Config {
    pub fn theme(&self) -> Theme {
        self.file.editor.theme
    }
    pub fn alignment(&self) -> Alignment {
        self.file.editor.alignment
    }
    pub fn search_mode(&self) -> SearchMode {
        self.file.search.mode
    }
    pub fn autosave(&self) -> &AutosaveConfig {
        &self.file.autosave
    }
}
