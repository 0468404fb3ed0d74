//! Command line and configuration for the terminal host.
//!
//! Settings are layered: built-in defaults, then an optional JSON file
//! (`--config`), then `ARCADE_*` environment variables, then flags.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::automaton::{LifeConfig, RuleSet};
use crate::physics::BodyConfig;
use crate::tetris::TetrisConfig;

/// Which widget the host runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Tetris,
    Life,
    Bounce,
}

impl Mode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tetris" => Some(Mode::Tetris),
            "life" => Some(Mode::Life),
            "bounce" => Some(Mode::Bounce),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Tetris => "tetris",
            Mode::Life => "life",
            Mode::Bounce => "bounce",
        }
    }
}

/// Physics demo parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BounceConfig {
    /// Arena size in pixels.
    pub width: f32,
    pub height: f32,
    /// Number of dynamic bodies.
    pub count: usize,
    /// Downward force per frame, scaled by mass.
    pub gravity: f32,
    pub body: BodyConfig,
    pub seed: u32,
}

impl Default for BounceConfig {
    fn default() -> Self {
        Self {
            width: 96.0,
            height: 48.0,
            count: 6,
            gravity: 0.08,
            body: BodyConfig {
                width: 5.0,
                height: 5.0,
                friction: 0.995,
                ..BodyConfig::default()
            },
            seed: 1,
        }
    }
}

/// Host timing and layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Pixels per board cell (one terminal row shows two pixels).
    pub cell_size: u32,
    /// Target frame time.
    pub frame_ms: u64,
    /// Automaton generation period.
    pub life_step_ms: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            cell_size: 2,
            frame_ms: 16,
            life_step_ms: 120,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub host: HostConfig,
    pub tetris: TetrisConfig,
    pub life: LifeConfig,
    pub bounce: BounceConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parse config {}", path.display()))
    }

    /// Apply `ARCADE_*` overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup. Unparsable values are skipped.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        fn parsed<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
            let raw = lookup(key)?;
            let value = raw.trim().parse().ok();
            if value.is_none() {
                log::warn!("ignoring {}={:?}", key, raw);
            }
            value
        }

        if let Some(seed) = parsed::<u32>(&lookup, "ARCADE_SEED") {
            self.tetris.seed = seed;
            self.life.seed = seed;
            self.bounce.seed = seed;
        }
        if let Some(v) = parsed(&lookup, "ARCADE_CELL_SIZE") {
            self.host.cell_size = v;
        }
        if let Some(v) = parsed(&lookup, "ARCADE_BOARD_WIDTH") {
            self.tetris.width = v;
        }
        if let Some(v) = parsed(&lookup, "ARCADE_BOARD_HEIGHT") {
            self.tetris.height = v;
        }
        if let Some(v) = parsed(&lookup, "ARCADE_SPEED_MS") {
            self.tetris.base_speed_ms = v;
        }
        if let Some(v) = parsed(&lookup, "ARCADE_DENSITY") {
            self.life.density = v;
        }
        if let Some(raw) = lookup("ARCADE_RULES") {
            match RuleSet::try_from(raw.trim().to_string()) {
                Ok(rules) => self.life.rules = rules,
                Err(e) => log::warn!("ignoring ARCADE_RULES: {}", e),
            }
        }
    }
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CliArgs {
    pub mode: Mode,
    pub config_path: Option<PathBuf>,
    /// Print events as JSON lines on stderr.
    pub events: bool,
    pub help: bool,
    pub seed: Option<u32>,
    pub cell_size: Option<u32>,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub speed_ms: Option<u32>,
    pub rules: Option<RuleSet>,
    pub density: Option<f32>,
    pub wrap: Option<bool>,
    pub count: Option<usize>,
}

pub const USAGE: &str = "\
usage: canvas-arcade [tetris|life|bounce] [options]

options:
  --config <file.json>   load settings from a JSON file
  --seed <n>             random seed
  --cell-size <px>       pixels per cell
  --width <n>            board / grid columns
  --height <n>           board / grid rows
  --speed <ms>           tetris tick interval at level 1
  --rules <name|B/S>     automaton rules (conway, highlife, B36/S23, ...)
  --density <0..1>       automaton seeding density
  --no-wrap              automaton edges do not wrap
  --count <n>            number of bouncing bodies
  --events               stream events as JSON lines to stderr
  -h, --help             show this help";

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing value for {}", flag))
}

fn number<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> Result<T> {
    let v = value(args, i, flag)?;
    v.parse::<T>()
        .map_err(|_| anyhow!("invalid {} value: {}", flag, v))
}

/// Parse arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut out = CliArgs::default();
    let mut i = 0usize;

    if let Some(first) = args.first() {
        if let Some(mode) = Mode::from_str(first) {
            out.mode = mode;
            i = 1;
        }
    }

    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--config" => {
                i += 1;
                out.config_path = Some(PathBuf::from(value(args, i, flag)?));
            }
            "--seed" => {
                i += 1;
                out.seed = Some(number(args, i, flag)?);
            }
            "--cell-size" => {
                i += 1;
                out.cell_size = Some(number(args, i, flag)?);
            }
            "--width" => {
                i += 1;
                out.width = Some(number(args, i, flag)?);
            }
            "--height" => {
                i += 1;
                out.height = Some(number(args, i, flag)?);
            }
            "--speed" => {
                i += 1;
                out.speed_ms = Some(number(args, i, flag)?);
            }
            "--rules" => {
                i += 1;
                let v = value(args, i, flag)?;
                let rules = RuleSet::try_from(v.to_string()).map_err(|e| anyhow!(e))?;
                out.rules = Some(rules);
            }
            "--density" => {
                i += 1;
                out.density = Some(number(args, i, flag)?);
            }
            "--no-wrap" => out.wrap = Some(false),
            "--count" => {
                i += 1;
                out.count = Some(number(args, i, flag)?);
            }
            "--events" => out.events = true,
            "-h" | "--help" => out.help = true,
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }

    Ok(out)
}

impl CliArgs {
    /// Flags win over every other layer.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(seed) = self.seed {
            config.tetris.seed = seed;
            config.life.seed = seed;
            config.bounce.seed = seed;
        }
        if let Some(v) = self.cell_size {
            config.host.cell_size = v;
        }
        match self.mode {
            Mode::Tetris => {
                if let Some(w) = self.width {
                    config.tetris.width = w;
                }
                if let Some(h) = self.height {
                    config.tetris.height = h;
                }
            }
            Mode::Life => {
                if let Some(w) = self.width {
                    config.life.width = w;
                }
                if let Some(h) = self.height {
                    config.life.height = h;
                }
            }
            Mode::Bounce => {
                if let Some(w) = self.width {
                    config.bounce.width = w as f32;
                }
                if let Some(h) = self.height {
                    config.bounce.height = h as f32;
                }
            }
        }
        if let Some(v) = self.speed_ms {
            config.tetris.base_speed_ms = v;
        }
        if let Some(v) = self.rules {
            config.life.rules = v;
        }
        if let Some(v) = self.density {
            config.life.density = v;
        }
        if let Some(v) = self.wrap {
            config.life.wrap = v;
        }
        if let Some(v) = self.count {
            config.bounce.count = v;
        }
    }

    /// Defaults, then file, then environment, then flags.
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config_path {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };
        config.apply_env();
        self.apply(&mut config);
        validate(&config)?;
        Ok(config)
    }
}

/// Reject settings the widgets cannot run with.
pub fn validate(config: &AppConfig) -> Result<()> {
    if config.host.cell_size == 0 {
        return Err(anyhow!("cell size must be at least 1"));
    }
    if config.tetris.width < 4 || config.tetris.height < 4 {
        return Err(anyhow!(
            "tetris board must be at least 4x4, got {}x{}",
            config.tetris.width,
            config.tetris.height
        ));
    }
    if config.life.width == 0 || config.life.height == 0 {
        return Err(anyhow!("automaton grid must not be empty"));
    }
    if config.bounce.width <= 0.0 || config.bounce.height <= 0.0 {
        return Err(anyhow!("bounce arena must have a positive size"));
    }
    Ok(())
}
