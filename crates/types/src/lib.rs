//! Shared types module - colors, piece kinds, actions and game constants
//!
//! Everything here is plain data shared by the widget crates (Tetris engine,
//! automaton, physics, layer compositor) and by the terminal host.
//!
//! # Tetris Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_BOARD_WIDTH` | 10 | Columns |
//! | `DEFAULT_BOARD_HEIGHT` | 20 | Rows |
//! | `DEFAULT_BASE_SPEED_MS` | 1000 | Tick interval at level 1 |
//! | `LEVEL_SPEED_STEP_MS` | 80 | Interval reduction per level |
//! | `MIN_TICK_INTERVAL_MS` | 100 | Fastest tick interval |
//! | `LINES_PER_LEVEL` | 10 | Cleared lines between level ups |
//!
//! # Examples
//!
//! ```
//! use arcade_types::{tick_interval_ms, GameAction, PieceKind, Rgba};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert_eq!(Rgba::from_hex("#ff0000"), Some(Rgba::rgb(255, 0, 0)));
//! assert_eq!(tick_interval_ms(1000, 2), 920);
//! ```

use serde::{Deserialize, Serialize};

pub mod rng;

pub use rng::SimpleRng;

/// Default board dimensions
pub const DEFAULT_BOARD_WIDTH: usize = 10;
pub const DEFAULT_BOARD_HEIGHT: usize = 20;

/// Tick timing (milliseconds)
pub const DEFAULT_BASE_SPEED_MS: u32 = 1000;
pub const LEVEL_SPEED_STEP_MS: u32 = 80;
pub const MIN_TICK_INTERVAL_MS: u32 = 100;

/// Cleared lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table, indexed by simultaneously cleared lines.
///
/// Points are multiplied by the current level (which starts at 1).
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Drop scoring
pub const HARD_DROP_POINTS_PER_CELL: u32 = 2;
pub const SOFT_DROP_POINTS: u32 = 1;

/// Horizontal offsets tried, in order, when a rotation is blocked.
pub const WALL_KICK_OFFSETS: [i32; 4] = [-1, 1, -2, 2];

/// Tick interval for a level: `max(MIN, base - (level - 1) * STEP)`.
pub fn tick_interval_ms(base_speed_ms: u32, level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(LEVEL_SPEED_STEP_MS);
    base_speed_ms
        .saturating_sub(reduction)
        .max(MIN_TICK_INTERVAL_MS)
}

/// 32-bit RGBA color. This is the opaque color token stored in board cells
/// and written by every drawing primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            3 => {
                let mut out = [0u8; 3];
                for (i, ch) in hex.chars().enumerate() {
                    let v = ch.to_digit(16)? as u8;
                    out[i] = v * 17;
                }
                Some(Self::rgb(out[0], out[1], out[2]))
            }
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Lowercase `#rrggbb` (opaque) or `#rrggbbaa` string.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// Default color token for the kind.
    pub fn color(&self) -> Rgba {
        match self {
            PieceKind::I => Rgba::rgb(0x00, 0xf0, 0xf0),
            PieceKind::O => Rgba::rgb(0xf0, 0xf0, 0x00),
            PieceKind::T => Rgba::rgb(0xa0, 0x00, 0xf0),
            PieceKind::S => Rgba::rgb(0x00, 0xf0, 0x00),
            PieceKind::Z => Rgba::rgb(0xf0, 0x00, 0x00),
            PieceKind::J => Rgba::rgb(0x00, 0x00, 0xf0),
            PieceKind::L => Rgba::rgb(0xf0, 0xa0, 0x00),
        }
    }
}

/// Player actions the Tetris engine accepts from its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (1 point on success)
    SoftDrop,
    /// Drop piece to its landing row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise, with wall kicks
    Rotate,
    /// Toggle pause state
    Pause,
    /// Start a new game (from idle, game over or mid-game)
    Restart,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// A cell on the Tetris board (None = empty, Some = color of the locked piece)
pub type Cell = Option<Rgba>;
