//! The play session: one live board, its undo history and the level pack.
//!
//! Every operation is synchronous and completes its state change before
//! returning. A rejected move changes nothing and records nothing.

use serde::Serialize;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::{FlipError, FlipResult};
use crate::executor::{execute, MoveEffect};
use crate::grid::Grid;
use crate::history::History;
use crate::level::{Level, LevelRepository};
use crate::piece::{index_at, Piece, Side};
use crate::rules::{is_legal, legal_targets, Ruleset};
use crate::turn::{may_select, side_to_move};

/// Result of pointing at a square to pick a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Selected(Piece),
    /// The selected piece was picked again.
    Deselected,
    /// Piece belongs to the side not on move; any selection was dropped.
    WrongTurn,
    /// No piece on that square; selection unchanged.
    Empty,
}

/// Details of an accepted move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    pub effect: MoveEffect,
    pub moves_made: usize,
    pub cleared: bool,
    /// The level's best score went down with this clear.
    pub new_best: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved(MoveReport),
    NoSelection,
    Rejected,
}

impl MoveOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved(_))
    }
}

/// What a click on the board ended up doing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Click {
    Select(Selection),
    Move(MoveOutcome),
    Ignored,
}

/// Serializable picture of the session for renderers.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub id: String,
    pub index: Option<usize>,
    pub width: usize,
    pub height: usize,
    pub par: u32,
    pub best_moves: Option<u32>,
    pub perfect: bool,
    pub moves: usize,
    pub cleared: bool,
    pub ruleset: Ruleset,
    /// Hidden once the board is cleared or when any piece may move.
    pub turn: Option<Side>,
    pub grid: Grid,
    pub pieces: Vec<Piece>,
    pub selected: Option<(i32, i32)>,
    pub targets: Vec<(i32, i32)>,
    pub can_undo: bool,
    pub has_next: bool,
}

pub struct Session {
    config: EngineConfig,
    repo: LevelRepository,
    /// Index into `repo`, `None` for a level pasted into the editor.
    current: Option<usize>,
    level: Level,
    ruleset: Ruleset,
    grid: Grid,
    pieces: Vec<Piece>,
    history: History,
    selected: Option<usize>,
}

impl Session {
    /// Start on the first level of `repo`.
    pub fn new(repo: LevelRepository, config: EngineConfig) -> FlipResult<Self> {
        let level = repo
            .get(0)
            .cloned()
            .ok_or(FlipError::LevelNotFound { index: 0 })?;
        Ok(Session {
            config,
            repo,
            current: Some(0),
            ruleset: level.ruleset(),
            grid: level.grid.clone(),
            pieces: level.pieces.clone(),
            level,
            history: History::new(),
            selected: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }

    pub fn repository(&self) -> &LevelRepository {
        &self.repo
    }

    pub fn repository_mut(&mut self) -> &mut LevelRepository {
        &mut self.repo
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Definition of the level being played, including its best score.
    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn ruleset(&self) -> Ruleset {
        self.ruleset
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn moves_made(&self) -> usize {
        self.history.len()
    }

    pub fn is_cleared(&self) -> bool {
        self.grid.is_uniform()
    }

    pub fn turn(&self) -> Option<Side> {
        side_to_move(self.ruleset, self.history.len(), &self.pieces)
    }

    pub fn selected(&self) -> Option<&Piece> {
        self.selected.and_then(|i| self.pieces.get(i))
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Legal destinations of the selected piece.
    pub fn legal_targets(&self) -> Vec<(i32, i32)> {
        match self.selected {
            Some(i) => legal_targets(self.ruleset, &self.grid, &self.pieces, i),
            None => Vec::new(),
        }
    }

    pub fn select_piece_at(&mut self, x: i32, y: i32) -> Selection {
        let Some(i) = index_at(&self.pieces, x, y) else {
            return Selection::Empty;
        };
        let piece = self.pieces[i];
        if !may_select(self.ruleset, self.history.len(), &self.pieces, &piece) {
            debug!(x, y, "piece belongs to the side not on move");
            self.selected = None;
            return Selection::WrongTurn;
        }
        if self.selected == Some(i) {
            self.selected = None;
            return Selection::Deselected;
        }
        self.selected = Some(i);
        Selection::Selected(piece)
    }

    /// Move the selected piece to `(tx, ty)` if the rules allow it.
    pub fn attempt_move(&mut self, tx: i32, ty: i32) -> MoveOutcome {
        let Some(mover) = self.selected else {
            return MoveOutcome::NoSelection;
        };
        let piece = self.pieces[mover];
        if !may_select(self.ruleset, self.history.len(), &self.pieces, &piece)
            || !is_legal(self.ruleset, &self.grid, &self.pieces, mover, tx, ty)
        {
            debug!(from = ?piece.position(), to = ?(tx, ty), "move rejected");
            return MoveOutcome::Rejected;
        }

        self.history.record(piece.position(), &self.grid, &self.pieces);
        let effect = execute(
            &self.config,
            self.ruleset,
            &mut self.grid,
            &mut self.pieces,
            mover,
            tx,
            ty,
        );
        let moves_made = self.history.len();
        info!(
            kind = ?piece.kind,
            from = ?effect.from,
            to = ?effect.to,
            toggled = effect.toggled.len(),
            moves = moves_made,
            "move applied"
        );

        let cleared = effect.cleared;
        let mut new_best = false;
        if cleared {
            let moves = u32::try_from(moves_made).unwrap_or(u32::MAX);
            new_best = self.level.record_clear(moves);
            if let Some(index) = self.current {
                self.repo.record_clear(index, moves);
            }
            info!(level = %self.level.id, moves, par = self.level.par, new_best, "level cleared");
        }

        self.selected = if cleared || self.ruleset == Ruleset::Duel {
            None
        } else {
            index_at(&self.pieces, tx, ty)
        };

        MoveOutcome::Moved(MoveReport {
            effect,
            moves_made,
            cleared,
            new_best,
        })
    }

    /// Pointer semantics of the board: pick pieces, move onto empty squares
    /// and, in two-color levels, capture by clicking an enemy piece.
    pub fn click(&mut self, x: i32, y: i32) -> Click {
        if !self.grid.in_bounds(x, y) || self.grid.is_wall(x, y) {
            return Click::Ignored;
        }
        let selected = self.selected().copied();
        match (selected, index_at(&self.pieces, x, y)) {
            (Some(sel), Some(i)) => {
                let enemy = self.ruleset == Ruleset::Duel && self.pieces[i].color != sel.color;
                if enemy {
                    Click::Move(self.attempt_move(x, y))
                } else {
                    Click::Select(self.select_piece_at(x, y))
                }
            }
            (None, Some(_)) => Click::Select(self.select_piece_at(x, y)),
            (Some(_), None) => Click::Move(self.attempt_move(x, y)),
            (None, None) => Click::Ignored,
        }
    }

    /// Step back one move. No-op on an empty history.
    pub fn undo(&mut self) -> bool {
        let Some(snap) = self.history.pop() else {
            return false;
        };
        self.grid = snap.grid;
        self.pieces = snap.pieces;
        self.selected = index_at(&self.pieces, snap.previous.0, snap.previous.1);
        debug!(moves = self.history.len(), "undo");
        true
    }

    /// Return to the state the level was loaded in.
    pub fn restart(&mut self) -> bool {
        self.selected = None;
        let Some(first) = self.history.first() else {
            return false;
        };
        self.grid = first.grid.clone();
        self.pieces = first.pieces.clone();
        self.history.clear();
        debug!(level = %self.level.id, "restart");
        true
    }

    /// Load level `index` of the pack. Locked levels are refused.
    pub fn load_level(&mut self, index: usize) -> FlipResult<()> {
        let level = self
            .repo
            .get(index)
            .cloned()
            .ok_or(FlipError::LevelNotFound { index })?;
        if !self.repo.is_unlocked(index) {
            return Err(FlipError::LevelLocked { index });
        }
        self.install(level, Some(index));
        Ok(())
    }

    /// Advance to the following level; `false` when there is none.
    pub fn load_next_level(&mut self) -> FlipResult<bool> {
        let next = match self.current {
            Some(i) if i + 1 < self.repo.len() => i + 1,
            _ => return Ok(false),
        };
        self.load_level(next)?;
        Ok(true)
    }

    /// Play a level definition pasted by the user. Nothing changes unless
    /// the whole text is a valid level.
    pub fn load_custom(&mut self, text: &str) -> FlipResult<()> {
        let level = Level::from_json(text)?;
        self.install(level, None);
        Ok(())
    }

    fn install(&mut self, level: Level, index: Option<usize>) {
        info!(level = %level.id, ?index, width = level.width, height = level.height, "level loaded");
        self.ruleset = level.ruleset();
        self.grid = level.grid.clone();
        self.pieces = level.pieces.clone();
        self.level = level;
        self.current = index;
        self.history.clear();
        self.selected = None;
    }

    pub fn view(&self) -> BoardView {
        let cleared = self.is_cleared();
        BoardView {
            id: self.level.id.clone(),
            index: self.current,
            width: self.grid.width(),
            height: self.grid.height(),
            par: self.level.par,
            best_moves: self.level.best_moves,
            perfect: self.level.is_perfect(),
            moves: self.history.len(),
            cleared,
            ruleset: self.ruleset,
            turn: if cleared { None } else { self.turn() },
            grid: self.grid.clone(),
            pieces: self.pieces.clone(),
            selected: self.selected().map(Piece::position),
            targets: self.legal_targets(),
            can_undo: !self.history.is_empty(),
            has_next: self
                .current
                .is_some_and(|i| i + 1 < self.repo.len()),
        }
    }
}
