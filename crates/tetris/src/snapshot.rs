use serde::{Deserialize, Serialize};

use arcade_types::{Cell, PieceKind};

use crate::game_state::GameStatus;

/// The falling piece, with its occupied cells in board coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub x: i32,
    pub y: i32,
    pub cells: Vec<(i32, i32)>,
}

/// Serializable view of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Rows top to bottom.
    pub board: Vec<Vec<Cell>>,
    pub current: Option<PieceSnapshot>,
    pub next: Option<PieceKind>,
    pub ghost_y: Option<i32>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub lines_until_next_level: u32,
    pub interval_ms: u32,
    pub status: GameStatus,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.status == GameStatus::Playing
    }

    pub fn filled_cells(&self) -> usize {
        self.board.iter().flatten().filter(|c| c.is_some()).count()
    }
}
