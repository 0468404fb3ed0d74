//! Game state module - manages the complete game session
//!
//! Ties together the board, piece generator, scoring and tick timer. The
//! session moves through `idle -> playing -> {paused <-> playing} -> game over`;
//! idle and game over accept `start` to begin a fresh game.
//!
//! State changes are reported through [`TetrisEvent`]s queued on the session
//! and drained by the host. Any mutation a view should show also raises the
//! redraw flag (`take_redraw`).

use serde::{Deserialize, Serialize};

use arcade_types::{
    tick_interval_ms, GameAction, PieceKind, DEFAULT_BASE_SPEED_MS, DEFAULT_BOARD_HEIGHT,
    DEFAULT_BOARD_WIDTH, LINES_PER_LEVEL, WALL_KICK_OFFSETS,
};

use crate::board::Board;
use crate::pieces::Tetromino;
use crate::rng::PieceGenerator;
use crate::scoring::{hard_drop_score, line_clear_score, soft_drop_score};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::timer::TickTimer;

/// Session parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TetrisConfig {
    pub width: usize,
    pub height: usize,
    /// Tick interval at level 1.
    pub base_speed_ms: u32,
    /// Piece generator seed.
    pub seed: u32,
}

impl Default for TetrisConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            base_speed_ms: DEFAULT_BASE_SPEED_MS,
            seed: 1,
        }
    }
}

/// Lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    Idle,
    Playing,
    Paused,
    GameOver,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Idle => "idle",
            GameStatus::Playing => "playing",
            GameStatus::Paused => "paused",
            GameStatus::GameOver => "gameOver",
        }
    }
}

/// Engine notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum TetrisEvent {
    GameStart {
        level: u32,
        interval_ms: u32,
    },
    GameOver {
        score: u32,
        level: u32,
        lines: u32,
    },
    LineClear {
        lines: u32,
        total_lines: u32,
        score: u32,
    },
    ScoreUpdate {
        score: u32,
        previous: u32,
        delta: u32,
    },
    LevelUp {
        level: u32,
        interval_ms: u32,
        lines: u32,
    },
    PieceLock {
        piece: PieceKind,
        x: i32,
        y: i32,
    },
}

#[derive(Debug, Clone)]
pub struct GameState {
    config: TetrisConfig,
    board: Board,
    current: Option<Tetromino>,
    current_x: i32,
    current_y: i32,
    next: Option<Tetromino>,
    generator: PieceGenerator,
    timer: TickTimer,
    score: u32,
    level: u32,
    lines: u32,
    lines_until_next_level: u32,
    paused: bool,
    over: bool,
    started: bool,
    redraw: bool,
    events: Vec<TetrisEvent>,
}

impl GameState {
    /// Idle session; nothing happens until `start`.
    pub fn new(config: TetrisConfig) -> Self {
        Self {
            config,
            board: Board::new(config.width, config.height),
            current: None,
            current_x: 0,
            current_y: 0,
            next: None,
            generator: PieceGenerator::new(config.seed),
            timer: TickTimer::new(),
            score: 0,
            level: 1,
            lines: 0,
            lines_until_next_level: LINES_PER_LEVEL,
            paused: false,
            over: false,
            started: false,
            redraw: true,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &TetrisConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for scripted setups.
    pub fn board_mut(&mut self) -> &mut Board {
        self.redraw = true;
        &mut self.board
    }

    pub fn current(&self) -> Option<&Tetromino> {
        self.current.as_ref()
    }

    pub fn current_position(&self) -> (i32, i32) {
        (self.current_x, self.current_y)
    }

    pub fn next_piece(&self) -> Option<&Tetromino> {
        self.next.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn lines_until_next_level(&self) -> u32 {
        self.lines_until_next_level
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.over
    }

    pub fn status(&self) -> GameStatus {
        if self.over {
            GameStatus::GameOver
        } else if !self.started {
            GameStatus::Idle
        } else if self.paused {
            GameStatus::Paused
        } else {
            GameStatus::Playing
        }
    }

    /// Tick interval for the current level.
    pub fn interval_ms(&self) -> u32 {
        tick_interval_ms(self.config.base_speed_ms, self.level)
    }

    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    fn playable(&self) -> bool {
        self.started && !self.paused && !self.over
    }

    /// Begin a fresh game (also used as restart).
    pub fn start(&mut self) {
        self.board.clear();
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.lines_until_next_level = LINES_PER_LEVEL;
        self.over = false;
        self.paused = false;
        self.started = true;
        self.current = None;
        self.next = Some(self.generator.next_piece());

        let interval_ms = self.interval_ms();
        self.timer.start(interval_ms);
        log::info!(
            "game start: {}x{} board, {}ms ticks",
            self.board.width(),
            self.board.height(),
            interval_ms
        );
        self.events.push(TetrisEvent::GameStart {
            level: self.level,
            interval_ms,
        });

        self.spawn();
        self.redraw = true;
    }

    /// Cancel ticking and return to the idle, pre-start state.
    pub fn reset(&mut self) {
        self.timer.stop();
        self.board.clear();
        self.generator.reseed();
        self.current = None;
        self.next = None;
        self.current_x = 0;
        self.current_y = 0;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.lines_until_next_level = LINES_PER_LEVEL;
        self.paused = false;
        self.over = false;
        self.started = false;
        self.redraw = true;
    }

    /// Returns false when there is nothing to pause.
    pub fn pause(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        self.paused = true;
        self.timer.stop();
        self.redraw = true;
        log::debug!("paused");
        true
    }

    pub fn resume(&mut self) -> bool {
        if !self.started || self.over || !self.paused {
            return false;
        }
        self.paused = false;
        self.timer.start(self.interval_ms());
        self.redraw = true;
        log::debug!("resumed");
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.paused {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// Feed elapsed time; runs the gravity tick when it is due.
    pub fn update(&mut self, elapsed_ms: u32) -> bool {
        if self.timer.advance(elapsed_ms) {
            self.tick()
        } else {
            false
        }
    }

    /// Gravity step: move down one row, or lock and continue when blocked.
    ///
    /// Returns false when skipped (idle, paused or over).
    pub fn tick(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };
        if self.is_valid_position(&piece, self.current_x, self.current_y + 1) {
            self.current_y += 1;
        } else {
            self.lock_piece();
        }
        self.redraw = true;
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift(1)
    }

    fn shift(&mut self, dx: i32) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };
        if !self.is_valid_position(&piece, self.current_x + dx, self.current_y) {
            return false;
        }
        self.current_x += dx;
        self.redraw = true;
        true
    }

    /// Rotate clockwise, trying the wall kick offsets in order when blocked.
    pub fn rotate(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };
        let rotated = piece.rotated();

        let kick = std::iter::once(0)
            .chain(WALL_KICK_OFFSETS)
            .find(|&dx| self.is_valid_position(&rotated, self.current_x + dx, self.current_y));

        match kick {
            Some(dx) => {
                self.current = Some(rotated);
                self.current_x += dx;
                self.redraw = true;
                true
            }
            None => false,
        }
    }

    /// Move down one row for a point. Always requests a redraw.
    pub fn soft_drop(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };
        let moved = self.is_valid_position(&piece, self.current_x, self.current_y + 1);
        if moved {
            self.current_y += 1;
            self.add_score(soft_drop_score());
        }
        self.redraw = true;
        moved
    }

    /// Drop to the landing row, score the distance, then lock.
    ///
    /// Returns the number of rows dropped.
    pub fn hard_drop(&mut self) -> Option<u32> {
        if !self.playable() {
            return None;
        }
        let piece = self.current?;
        let mut cells = 0;
        while self.is_valid_position(&piece, self.current_x, self.current_y + 1) {
            self.current_y += 1;
            cells += 1;
        }
        self.add_score(hard_drop_score(cells));
        self.lock_piece();
        self.redraw = true;
        Some(cells)
    }

    /// Every occupied cell inside the columns and above the floor, and not on
    /// a filled board cell. Rows above the board are exempt.
    pub fn is_valid_position(&self, piece: &Tetromino, x: i32, y: i32) -> bool {
        let (width, height) = (self.board.width() as i32, self.board.height() as i32);
        piece.cells().iter().all(|&(dx, dy)| {
            let (px, py) = (x + dx, y + dy);
            if px < 0 || px >= width || py >= height {
                return false;
            }
            py < 0 || !self.board.is_occupied(px, py)
        })
    }

    /// Landing row of the current piece, without moving it.
    pub fn ghost_y(&self) -> Option<i32> {
        let piece = self.current?;
        let mut y = self.current_y;
        while self.is_valid_position(&piece, self.current_x, y + 1) {
            y += 1;
        }
        Some(y)
    }

    /// Add to the score; always reports `score-update`, zero deltas included.
    pub fn add_score(&mut self, delta: u32) {
        let previous = self.score;
        self.score = self.score.saturating_add(delta);
        self.events.push(TetrisEvent::ScoreUpdate {
            score: self.score,
            previous,
            delta,
        });
    }

    /// Lock the current piece where it is, clear lines, spawn the next one.
    pub fn lock_piece(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };
        for (dx, dy) in piece.cells() {
            let (px, py) = (self.current_x + dx, self.current_y + dy);
            if py >= 0 {
                self.board.set(px, py, Some(piece.color));
            }
        }
        self.events.push(TetrisEvent::PieceLock {
            piece: piece.kind,
            x: self.current_x,
            y: self.current_y,
        });

        self.clear_lines();
        self.spawn();
        self.redraw = true;
    }

    fn clear_lines(&mut self) {
        let cleared = self.board.clear_full_rows().len();
        if cleared == 0 {
            return;
        }
        self.add_score(line_clear_score(cleared, self.level));
        self.lines = self.lines.saturating_add(cleared as u32);
        self.events.push(TetrisEvent::LineClear {
            lines: cleared as u32,
            total_lines: self.lines,
            score: self.score,
        });
        if self.lines >= self.lines_until_next_level {
            self.level_up();
        }
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.lines_until_next_level += LINES_PER_LEVEL;
        let interval_ms = self.interval_ms();
        self.timer.start(interval_ms);
        log::info!("level up: {} ({}ms ticks)", self.level, interval_ms);
        self.events.push(TetrisEvent::LevelUp {
            level: self.level,
            interval_ms,
            lines: self.lines,
        });
    }

    /// Promote next to current and draw a new next piece. Ends the game
    /// when the centered spawn position is blocked.
    fn spawn(&mut self) -> bool {
        let piece = match self.next.take() {
            Some(p) => p,
            None => self.generator.next_piece(),
        };
        self.next = Some(self.generator.next_piece());

        let size = piece.shape.size() as i32;
        self.current_x = (self.board.width() as i32 - size).div_euclid(2);
        self.current_y = 0;
        self.current = Some(piece);

        if !self.is_valid_position(&piece, self.current_x, self.current_y) {
            log::warn!("spawn blocked for {} piece", piece.kind.as_str());
            self.end();
            return false;
        }
        true
    }

    fn end(&mut self) {
        self.over = true;
        self.timer.stop();
        log::info!(
            "game over: score {} level {} lines {}",
            self.score,
            self.level,
            self.lines
        );
        self.events.push(TetrisEvent::GameOver {
            score: self.score,
            level: self.level,
            lines: self.lines,
        });
    }

    /// Replace the falling piece (scripted setups and tests).
    ///
    /// Returns false, leaving the session unchanged, when the placement is
    /// invalid or no game is running.
    pub fn set_current(&mut self, piece: Tetromino, x: i32, y: i32) -> bool {
        if !self.started || self.over || !self.is_valid_position(&piece, x, y) {
            return false;
        }
        self.current = Some(piece);
        self.current_x = x;
        self.current_y = y;
        self.redraw = true;
        true
    }

    /// Dispatch a host action. Returns whether it changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop().is_some(),
            GameAction::Rotate => self.rotate(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.start();
                true
            }
        }
    }

    /// True once after any visible change.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    /// Take all pending events.
    pub fn drain_events(&mut self) -> Vec<TetrisEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let board = (0..self.board.height())
            .filter_map(|y| self.board.row(y))
            .map(|row| row.to_vec())
            .collect();
        let current = self.current.map(|piece| PieceSnapshot {
            kind: piece.kind,
            x: self.current_x,
            y: self.current_y,
            cells: piece
                .cells()
                .iter()
                .map(|&(dx, dy)| (self.current_x + dx, self.current_y + dy))
                .collect(),
        });
        GameSnapshot {
            width: self.board.width(),
            height: self.board.height(),
            board,
            current,
            next: self.next.map(|p| p.kind),
            ghost_y: self.ghost_y(),
            score: self.score,
            level: self.level,
            lines: self.lines,
            lines_until_next_level: self.lines_until_next_level,
            interval_ms: self.interval_ms(),
            status: self.status(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(TetrisConfig::default())
    }
}
