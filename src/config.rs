//! Engine configuration loaded from TOML.

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "TIMETABLED_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub palette: PaletteSettings,
    pub weeks: WeekSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteSettings {
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeekSettings {
    /// Term length; also the default week span of custom courses.
    pub count: i32,
}

/// Compact cell text limits, in visual-length units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub name_max_units: usize,
    pub location_max_units: usize,
    pub teacher_max_units: usize,
    pub keep_prefix_units: usize,
    pub keep_suffix_units: usize,
    pub facility_annotations: Vec<String>,
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            colors: [
                "#5DADE2", "#58D68D", "#F5B041", "#EC7063", "#AF7AC5", "#48C9B0", "#F1948A",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        }
    }
}

impl Default for WeekSettings {
    fn default() -> Self {
        Self { count: 24 }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            name_max_units: 9,
            location_max_units: 6,
            teacher_max_units: 6,
            keep_prefix_units: 5,
            keep_suffix_units: 0,
            facility_annotations: ["智慧教室", "多媒体", "语音室"]
                .iter()
                .map(|a| a.to_string())
                .collect(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let config: EngineConfig = toml::from_str(text).context("failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.to_string_lossy()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("invalid config file {}", path.to_string_lossy()))
    }

    /// `--config <path>` wins over `TIMETABLED_CONFIG`; neither means defaults.
    pub fn load(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let path = cli_path.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        match path {
            Some(p) => Self::from_file(&p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.palette.colors.is_empty() {
            bail!("palette.colors must not be empty");
        }
        if self.weeks.count < 1 {
            bail!("weeks.count must be >= 1 (got {})", self.weeks.count);
        }
        if self.display.keep_prefix_units == 0 && self.display.keep_suffix_units == 0 {
            bail!("display.keep_prefix_units and keep_suffix_units cannot both be 0");
        }
        Ok(())
    }
}

/// Reads `--config <path>` / `--config=<path>` from process arguments.
pub fn config_path_from_args<I>(args: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
        if let Some(rest) = arg.strip_prefix("--config=") {
            return Some(PathBuf::from(rest));
        }
    }
    None
}
