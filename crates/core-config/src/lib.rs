//! Configuration loading and parsing.
//!
//! Parses `seqlens.toml`, or an override path provided by the binary.
//! `[output]` holds the transcript line-kind switches (all default true);
//! `[color]` holds the colorization mode and an optional palette spec
//! string in the recording-tool convention (`|>=36;7,.=31,...`).
//!
//! Unknown fields are ignored to allow forward evolution, and a file that
//! fails to parse degrades to defaults with a logged warning; command-line
//! flags always override file values at the binary layer.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::warn;

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_true")]
    pub control_hats: bool,
    #[serde(default = "default_true")]
    pub labels: bool,
    #[serde(default = "default_true")]
    pub descriptions: bool,
    #[serde(default = "default_true")]
    pub escapes: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            control_hats: true,
            labels: true,
            descriptions: true,
            escapes: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ColorConfig {
    #[serde(default)]
    pub mode: ColorMode,
    /// Extra palette spec applied over the built-in default.
    #[serde(default)]
    pub palette: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub color: ColorConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
}

/// Best-effort config path: prefer a local `seqlens.toml`, then the
/// platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("seqlens.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("seqlens").join("seqlens.toml");
    }
    PathBuf::from("seqlens.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    if let Ok(content) = fs::read_to_string(&path) {
        match toml::from_str::<ConfigFile>(&content) {
            Ok(file) => Ok(Config {
                raw: Some(content),
                file,
            }),
            Err(e) => {
                warn!(target: "config", file = %path.display(), %e, "config_parse_failed");
                Ok(Config::default())
            }
        }
    } else {
        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn defaults_when_file_missing() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert!(cfg.file.output.labels);
        assert!(cfg.file.output.escapes);
        assert_eq!(cfg.file.color.mode, ColorMode::Auto);
        assert!(cfg.file.color.palette.is_none());
        assert!(cfg.raw.is_none());
    }

    #[test]
    fn parses_output_switches() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[output]\nlabels = false\nescapes = false\n").unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert!(!cfg.file.output.labels);
        assert!(!cfg.file.output.escapes);
        assert!(cfg.file.output.descriptions, "unset fields keep defaults");
        assert!(cfg.file.output.control_hats);
    }

    #[test]
    fn parses_color_section() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            tmp.path(),
            "[color]\nmode = \"always\"\npalette = \".=1;31\"\n",
        )
        .unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.file.color.mode, ColorMode::Always);
        assert_eq!(cfg.file.color.palette.as_deref(), Some(".=1;31"));
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[output]\nfuture_flag = 1\nlabels = false\n").unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert!(!cfg.file.output.labels);
    }

    #[test]
    fn parse_error_degrades_to_defaults() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[output\nlabels = ").unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert!(cfg.file.output.labels);
        assert!(cfg.raw.is_none());
    }
}
