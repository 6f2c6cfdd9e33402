use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::align::AlignOptions;
use crate::plan::HighlightTag;

const CONFIG_FILE: &str = ".diff-highlight.toml";

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config '{path}': {message}")]
    Parse { path: String, message: String },
    #[error("Invalid color '{0}', expected #RRGGBB")]
    InvalidColor(String),
}

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).map_err(|_| invalid());
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Background colors for each highlight tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub addition: Color,
    pub deletion: Color,
    pub modified: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            addition: Color::rgb(0x79, 0xFF, 0x79),
            deletion: Color::rgb(0xFF, 0x75, 0x75),
            modified: Color::rgb(0xFF, 0xE1, 0x53),
        }
    }
}

impl Palette {
    pub fn color(&self, tag: HighlightTag) -> Color {
        match tag {
            HighlightTag::Addition => self.addition,
            HighlightTag::Deletion => self.deletion,
            HighlightTag::Modified => self.modified,
        }
    }
}

/// Configuration as written in the TOML file
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    palette: PaletteFile,
    autojunk: Option<bool>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PaletteFile {
    addition: Option<String>,
    deletion: Option<String>,
    modified: Option<String>,
}

/// Resolved tool configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    pub palette: Palette,
    pub align: AlignOptions,
}

impl Config {
    /// Parse configuration from TOML text
    ///
    /// Missing keys keep their defaults.
    pub fn from_toml(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;

        let defaults = Palette::default();
        let parse = |value: Option<String>, fallback: Color| match value {
            Some(v) => v.parse::<Color>(),
            None => Ok(fallback),
        };

        Ok(Self {
            palette: Palette {
                addition: parse(file.palette.addition, defaults.addition)?,
                deletion: parse(file.palette.deletion, defaults.deletion)?,
                modified: parse(file.palette.modified, defaults.modified)?,
            },
            align: AlignOptions {
                autojunk: file.autojunk.unwrap_or(AlignOptions::default().autojunk),
            },
        })
    }

    /// Load configuration from an explicit path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Self::from_toml(&content, &path.display().to_string())
    }

    /// Load config from CWD first, then home directory, or use defaults
    ///
    /// A config file that fails to parse is logged and ignored.
    pub fn load() -> Self {
        let candidates = std::iter::once(PathBuf::from(CONFIG_FILE)).chain(home_config_path());

        for path in candidates {
            if !path.is_file() {
                continue;
            }
            match Self::load_from(&path) {
                Ok(config) => return config,
                Err(e) => {
                    log::warn!("{}, using defaults", e);
                    return Self::default();
                }
            }
        }

        Self::default()
    }
}

/// Path of the config file in the home directory, if HOME is set
fn home_config_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_FILE))
}
