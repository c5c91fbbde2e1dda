//! Demo configuration.
//!
//! Layers, later wins: built-in defaults, a JSON file given with `--config`,
//! `MONORAY_*` environment variables, then command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::FRAME_TIME_MS;

pub const ENV_FRAME_MS: &str = "MONORAY_FRAME_MS";
pub const ENV_SHOW_FPS: &str = "MONORAY_SHOW_FPS";
pub const ENV_LOG: &str = "MONORAY_LOG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    /// Target frame period in milliseconds
    pub frame_ms: f64,
    /// Play the title card fade before the level
    pub intro: bool,
    /// Show the measured frame rate in the status bar
    pub show_fps: bool,
    /// Lit pixel color as `[r, g, b]`
    pub lit_color: [u8; 3],
    /// Unlit pixel color as `[r, g, b]`
    pub unlit_color: [u8; 3],
    /// Held buttons are dropped after this long without a key event
    pub key_release_timeout_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frame_ms: FRAME_TIME_MS,
            intro: true,
            show_fps: false,
            lit_color: [120, 200, 255],
            unlit_color: [0, 0, 0],
            key_release_timeout_ms: 150,
        }
    }
}

/// Parsed command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub config_path: Option<PathBuf>,
    pub frame_ms: Option<f64>,
    pub no_intro: bool,
    pub show_fps: bool,
    pub help: bool,
}

pub const USAGE: &str = "\
usage: monoray [--config FILE] [--frame-ms MS] [--no-intro] [--show-fps]

keys: arrows/WASD move, space fire, enter start, q/esc quit
env:  MONORAY_FRAME_MS, MONORAY_SHOW_FPS, MONORAY_LOG (log file), RUST_LOG (filter)";

/// Longest accepted frame period (one frame per minute).
pub const MAX_FRAME_MS: f64 = 60_000.0;

fn check_frame_ms(source: &str, ms: f64) -> Result<f64> {
    if !(ms.is_finite() && ms > 0.0 && ms <= MAX_FRAME_MS) {
        return Err(anyhow!(
            "{}: frame period must be in (0, {}] ms: {}",
            source,
            MAX_FRAME_MS,
            ms
        ));
    }
    Ok(ms)
}

fn parse_frame_ms(source: &str, v: &str) -> Result<f64> {
    let ms = v
        .trim()
        .parse::<f64>()
        .map_err(|_| anyhow!("{}: invalid frame period: {}", source, v))?;
    check_frame_ms(source, ms)
}

fn parse_flag(source: &str, v: &str) -> Result<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(anyhow!("{}: expected a boolean, got: {}", source, v)),
    }
}

/// Parse arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut cli = CliArgs::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --config"))?;
                cli.config_path = Some(PathBuf::from(v));
            }
            "--frame-ms" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --frame-ms"))?;
                cli.frame_ms = Some(parse_frame_ms("--frame-ms", v)?);
            }
            "--no-intro" => cli.no_intro = true,
            "--show-fps" => cli.show_fps = true,
            "-h" | "--help" => cli.help = true,
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(cli)
}

impl DemoConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        check_frame_ms("frame_ms", config.frame_ms)?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parse config {}", path.display()))
    }

    /// Apply environment overrides; `env` looks a variable up by name.
    pub fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(v) = env(ENV_FRAME_MS) {
            self.frame_ms = parse_frame_ms(ENV_FRAME_MS, &v)?;
        }
        if let Some(v) = env(ENV_SHOW_FPS) {
            self.show_fps = parse_flag(ENV_SHOW_FPS, &v)?;
        }
        Ok(())
    }

    pub fn apply_args(&mut self, cli: &CliArgs) {
        if let Some(ms) = cli.frame_ms {
            self.frame_ms = ms;
        }
        if cli.no_intro {
            self.intro = false;
        }
        if cli.show_fps {
            self.show_fps = true;
        }
    }

    /// Resolve the full configuration for a command line.
    pub fn load(cli: &CliArgs, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match &cli.config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(env)?;
        config.apply_args(cli);
        Ok(config)
    }
}
