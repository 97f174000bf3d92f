//! Configuration: built-in defaults, an optional TOML file, and command line flags.
//!
//! Later layers win: defaults < config file < CLI flags. The config file is the one
//! given with `--config`, or `<config dir>/asciiwave/config.toml` if it exists.
//!
//! ```toml
//! pattern = "matrix"
//! theme = "matrix"
//! quality = "high"
//! seed = 7
//! mouse = true
//! log_file = "/tmp/asciiwave.log"
//! ```

use crate::error::{Error, Result};
use crate::patterns::PATTERN_NAMES;
use crate::theme::Theme;
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Frame rate bounds accepted from config or flags.
pub const FPS_RANGE: std::ops::RangeInclusive<u32> = 1..=240;

/// Trade-off between visual density and CPU use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Low,
    #[default]
    Medium,
    High,
}

impl Quality {
    /// Frame rate implied by this quality when no explicit FPS is set.
    pub fn fps(self) -> u32 {
        match self {
            Quality::Low => 15,
            Quality::Medium => 30,
            Quality::High => 60,
        }
    }

    /// Multiplier patterns apply to their element counts.
    pub fn density(self) -> f64 {
        match self {
            Quality::Low => 0.35,
            Quality::Medium => 0.65,
            Quality::High => 1.0,
        }
    }
}

/// Command line flags.
#[derive(Parser, Debug, Default)]
#[command(version, about = "Animated ASCII-art patterns for your terminal")]
pub struct Args {
    /// Pattern to start with
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Color theme
    #[arg(short, long)]
    pub theme: Option<String>,

    /// Rendering quality; also picks the frame rate unless --fps is given
    #[arg(short, long, value_enum)]
    pub quality: Option<Quality>,

    /// Target frames per second
    #[arg(long)]
    pub fps: Option<u32>,

    /// Seed for reproducible animations
    #[arg(long)]
    pub seed: Option<u64>,

    /// Ignore mouse input
    #[arg(long)]
    pub no_mouse: bool,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Config file to load instead of the default location
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// List patterns and themes, then exit
    #[arg(long)]
    pub list: bool,
}

/// The on-disk config file. Every key is optional.
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub pattern: Option<String>,
    pub theme: Option<String>,
    pub quality: Option<Quality>,
    pub fps: Option<u32>,
    pub seed: Option<u64>,
    pub mouse: Option<bool>,
    pub log_file: Option<PathBuf>,
}

impl FileConfig {
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, path)
    }
}

/// Fully resolved and validated configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub pattern: String,
    pub theme: Theme,
    pub quality: Quality,
    pub fps: u32,
    pub seed: Option<u64>,
    pub mouse: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let quality = Quality::default();
        Self {
            pattern: PATTERN_NAMES[0].to_string(),
            theme: Theme::default(),
            quality,
            fps: quality.fps(),
            seed: None,
            mouse: true,
            log_file: None,
        }
    }
}

impl Config {
    /// Default location of the config file, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("asciiwave").join("config.toml"))
    }

    /// Loads the config file named by `args` (or the default one) and layers `args` on top.
    pub fn load(args: &Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => FileConfig::load(&path)?,
                None => FileConfig::default(),
            },
        };
        Self::resolve(file, args)
    }

    /// Layers defaults, `file` and `args`, then validates the result.
    pub fn resolve(file: FileConfig, args: &Args) -> Result<Self> {
        let defaults = Config::default();

        let pattern = args
            .pattern
            .clone()
            .or(file.pattern)
            .unwrap_or(defaults.pattern)
            .to_ascii_lowercase();
        if !PATTERN_NAMES.contains(&pattern.as_str()) {
            return Err(Error::UnknownPattern(pattern));
        }

        let theme = match args.theme.as_deref().or(file.theme.as_deref()) {
            Some(name) => Theme::by_name(name)?,
            None => defaults.theme,
        };

        let quality = args.quality.or(file.quality).unwrap_or(defaults.quality);
        let fps = args.fps.or(file.fps).unwrap_or(quality.fps());
        if !FPS_RANGE.contains(&fps) {
            return Err(Error::InvalidConfig(format!(
                "fps must be between {} and {}, got {fps}",
                FPS_RANGE.start(),
                FPS_RANGE.end()
            )));
        }

        Ok(Self {
            pattern,
            theme,
            quality,
            fps,
            seed: args.seed.or(file.seed),
            mouse: !args.no_mouse && file.mouse.unwrap_or(defaults.mouse),
            log_file: args.log_file.clone().or(file.log_file),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(cli: &[&str]) -> Args {
        Args::parse_from(std::iter::once("asciiwave").chain(cli.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let config = Config::resolve(FileConfig::default(), &args(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.fps, 30);
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = FileConfig::parse(
            "pattern = \"matrix\"\ntheme = \"fire\"\nquality = \"low\"\nseed = 3\n",
            Path::new("inline.toml"),
        )
        .unwrap();
        let config = Config::resolve(file, &args(&["--theme", "Mono", "--seed", "9"])).unwrap();
        assert_eq!(config.pattern, "matrix");
        assert_eq!(config.theme.name(), "mono");
        assert_eq!(config.quality, Quality::Low);
        assert_eq!(config.fps, 15);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_explicit_fps_beats_quality() {
        let config = Config::resolve(FileConfig::default(), &args(&["-q", "high", "--fps", "24"]))
            .unwrap();
        assert_eq!(config.quality, Quality::High);
        assert_eq!(config.fps, 24);
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            Config::resolve(FileConfig::default(), &args(&["--fps", "0"])),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Config::resolve(FileConfig::default(), &args(&["-p", "lava"])),
            Err(Error::UnknownPattern(_))
        ));
        assert!(matches!(
            Config::resolve(FileConfig::default(), &args(&["-t", "lava"])),
            Err(Error::UnknownTheme(_))
        ));
    }

    #[test]
    fn test_mouse_can_be_disabled_from_either_layer() {
        let file = FileConfig {
            mouse: Some(false),
            ..FileConfig::default()
        };
        assert!(!Config::resolve(file, &args(&[])).unwrap().mouse);
        assert!(!Config::resolve(FileConfig::default(), &args(&["--no-mouse"])).unwrap().mouse);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "pattern = \"starfield\"\nmouse = false").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = Config::load(&args(&["--config", &path])).unwrap();
        assert_eq!(config.pattern, "starfield");
        assert!(!config.mouse);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "colour = \"red\"").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        assert!(matches!(
            Config::load(&args(&["--config", &path])),
            Err(Error::Config { .. })
        ));
    }
}
